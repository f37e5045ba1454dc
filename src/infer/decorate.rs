//! Declaration types for display.
//!
//! After type inference, this module walks the AST and reports the type of
//! every `let` declaration, resolved against the declarations visible from
//! it. Each report is made on a fresh instance, so the reported types are
//! as general as the declarations themselves.

use tracing::debug;

use crate::lexer::Span;
use crate::parser::ast::{Node, NodeKind};
use crate::types::PrettyContext;

use super::context::Context;
use super::state::InferState;
use super::typing::Defined;

/// The displayed type of one declaration.
#[derive(Debug, Clone, PartialEq)]
pub struct Decoration {
    pub name: String,
    pub ty: String,
    /// Span of the whole `let` statement.
    pub span: Span,
}

/// Decorate declarations with their inferred types.
pub struct Decorator<'a, 's> {
    state: &'s mut InferState,
    scopes: Vec<&'a Defined>,
    decorations: Vec<Decoration>,
}

impl<'a, 's> Decorator<'a, 's> {
    /// `outer` is resolved last, after every enclosing block.
    pub fn new(state: &'s mut InferState, outer: &'a Defined) -> Self {
        Self {
            state,
            scopes: vec![outer],
            decorations: Vec::new(),
        }
    }

    pub fn decorate(mut self, root: &'a Node) -> Vec<Decoration> {
        self.visit(root);
        self.decorations
    }

    fn visit(&mut self, node: &'a Node) {
        match &node.kind {
            NodeKind::Block(statements) => {
                let Some(typing) = node.typing() else {
                    return;
                };
                self.scopes.push(&typing.defined);
                for stmt in statements {
                    self.visit(stmt);
                }
                self.scopes.pop();
            }
            NodeKind::Decl { name, value } => {
                self.decorate_decl(node.span, name, value);
                self.visit(value);
            }
            _ => {
                for child in node.children() {
                    self.visit(child);
                }
            }
        }
    }

    fn decorate_decl(&mut self, span: Span, name: &str, value: &Node) {
        let Some(typing) = value.typing() else {
            return;
        };
        let instance = self.state.instantiate(typing);

        // Innermost scope first; a scope that fails to resolve leaves the
        // remaining names as they are
        let mut pending = instance.context;
        for scope in self.scopes.iter().rev() {
            let mut rest = Context::new();
            if let Err(err) = self.state.resolve_context(&pending, scope, &mut rest, span) {
                debug!(name, error = %err, "declaration type left partly unresolved");
                break;
            }
            pending = rest;
        }

        let ty = PrettyContext::new().format_type(&self.state.apply_subst(&instance.ty));
        self.decorations.push(Decoration {
            name: name.to_string(),
            ty,
            span,
        });
    }
}

/// Report the type of every declaration beneath `root`, in source order.
pub fn declaration_types(state: &mut InferState, root: &Node, outer: &Defined) -> Vec<Decoration> {
    Decorator::new(state, outer).decorate(root)
}
