//! Core type inference algorithm.
//!
//! Each node's typing is computed from its children's typings alone; there
//! is no environment. Free names travel upward in the typing's context and
//! are resolved against the declarations of the enclosing block, with a
//! fresh instantiation of the declaration per resolved name.

use std::rc::Rc;

use tracing::{debug, trace};

use crate::error::{LetpolyError, TypeError};
use crate::lexer::Span;
use crate::parser::ast::{Node, NodeKind};
use crate::types::{Type, INT_TYPE, UNIT_TYPE};

use super::context::Context;
use super::state::{InferState, VAR_TAG};
use super::typing::{Defined, Typing};

/// Result type for inference operations.
pub type InferResult<T> = Result<T, LetpolyError>;

impl InferState {
    /// Infer the typing of a node.
    ///
    /// The result is memoized on the node: inferring the same node again
    /// returns the stored typing without allocating any variables.
    pub fn infer(&mut self, node: &Node) -> InferResult<Rc<Typing>> {
        if let Some(typing) = node.typing() {
            return Ok(Rc::clone(typing));
        }

        let typing = match &node.kind {
            NodeKind::Int(_) => Rc::new(Typing::new(INT_TYPE.clone())),

            NodeKind::Tuple(elements) => Rc::new(self.infer_tuple(elements)?),

            NodeKind::Array(_) => {
                return Err(TypeError::UnsupportedArrayLiteral { span: node.span }.into())
            }

            NodeKind::Var(name) => {
                let var = self.fresh_tagged(VAR_TAG);
                Rc::new(Typing::with_context(
                    var.clone(),
                    Context::singleton(name.as_str(), var),
                ))
            }

            NodeKind::Apply { fun, arg } => Rc::new(self.infer_apply(node.span, fun, arg)?),

            NodeKind::Fn { params, body } => Rc::new(self.infer_fn(node.span, params, body)?),

            NodeKind::Decl { name, value } => {
                let value_typing = self.infer(value)?;
                let mut defined = Defined::new();
                defined.insert(name.clone(), value_typing);
                Rc::new(Typing {
                    ty: UNIT_TYPE.clone(),
                    context: Context::new(),
                    defined,
                })
            }

            NodeKind::Assign { name, .. } => {
                return Err(TypeError::UnsupportedAssignment {
                    name: name.clone(),
                    span: node.span,
                }
                .into())
            }

            // Shares the child's typing
            NodeKind::Return(value) => self.infer(value)?,

            NodeKind::Block(statements) => Rc::new(self.infer_block(statements)?),
        };

        Ok(node.memoize(typing))
    }

    fn infer_tuple(&mut self, elements: &[Node]) -> InferResult<Typing> {
        let mut context = Context::new();
        let mut types = Vec::with_capacity(elements.len());

        for element in elements {
            let typing = self.infer(element)?;
            context.union(&typing.context);
            types.push(typing.ty.clone());
        }

        Ok(Typing::with_context(Type::product(types), context))
    }

    fn infer_apply(&mut self, span: Span, fun: &Node, arg: &Node) -> InferResult<Typing> {
        let fun_raw = self.infer(fun)?;
        let fun_typing = self.instantiate(&fun_raw);
        let arg_raw = self.infer(arg)?;
        let arg_typing = self.instantiate(&arg_raw);

        let mut context = fun_typing.context;
        context.union(&arg_typing.context);

        let result = self.fresh_var();
        let expected = Type::arrow(arg_typing.ty, result.clone());

        match self.unify(span, &fun_typing.ty, &expected) {
            Ok(()) => Ok(Typing::with_context(result, context)),
            Err(err) => {
                debug!(error = %err, start = span.start, "application failed");
                let attempted = Type::arrow(arg_raw.ty.clone(), self.fresh_var());
                Ok(Typing::new(Type::fail(fun_raw.ty.clone(), attempted)))
            }
        }
    }

    fn infer_fn(&mut self, span: Span, params: &[String], body: &Node) -> InferResult<Typing> {
        let body_raw = self.infer(body)?;
        let body_typing = self.instantiate(&body_raw);

        let mut context = body_typing.context;
        let mut param_types = Vec::with_capacity(params.len());

        for param in params {
            let param_ty = self.fresh_var();
            for usage in context.get(param) {
                self.unify(span, &param_ty, usage)
                    .map_err(|e| e.with_context(format!("parameter '{}'", param)))?;
            }
            context.erase(param);
            param_types.push(param_ty);
        }

        Ok(Typing::with_context(
            Type::arrow(Type::product(param_types), body_typing.ty),
            context,
        ))
    }

    fn infer_block(&mut self, statements: &[Node]) -> InferResult<Typing> {
        let mut ty = UNIT_TYPE.clone();
        let mut context = Context::new();
        let mut defined = Defined::new();

        for stmt in statements {
            trace!(kind = stmt.kind_name(), start = stmt.span.start, "block statement");

            let raw = self.infer(stmt)?;
            let typing = self.instantiate(&raw);

            // A re-declaration keeps its original position
            for (name, declared) in typing.defined {
                defined.insert(name, declared);
            }

            self.resolve_context(&typing.context, &defined, &mut context, stmt.span)?;
            ty = typing.ty;
        }

        Ok(Typing {
            ty,
            context,
            defined,
        })
    }

    /// Resolve the names of `context` against `defined`.
    ///
    /// A declared name is instantiated once for all of its constraints,
    /// which must unify with the instance's type, and the instance's own
    /// context is resolved in turn. Names that are not declared have their
    /// constraints copied to `out` unchanged.
    pub fn resolve_context(
        &mut self,
        context: &Context,
        defined: &Defined,
        out: &mut Context,
        span: Span,
    ) -> InferResult<()> {
        let mut chain = Vec::new();
        self.resolve_names(context, defined, out, span, &mut chain)
    }

    fn resolve_names(
        &mut self,
        context: &Context,
        defined: &Defined,
        out: &mut Context,
        span: Span,
        chain: &mut Vec<String>,
    ) -> InferResult<()> {
        for (name, constraints) in context.iter() {
            let Some(declared) = defined.get(name) else {
                for ty in constraints {
                    out.set(name, ty.clone());
                }
                continue;
            };

            // `defined` never changes during resolution, so expanding a
            // name that is already being expanded would never terminate
            if chain.iter().any(|n| n == name) {
                return Err(TypeError::RecursiveDeclaration {
                    name: name.to_string(),
                    span,
                }
                .into());
            }

            let instance = self.instantiate(declared);
            debug!(name, uses = constraints.len(), "resolved against declaration");

            for usage in constraints {
                self.unify(span, &instance.ty, usage)
                    .map_err(|e| e.with_context(format!("use of '{}'", name)))?;
            }

            chain.push(name.to_string());
            self.resolve_names(&instance.context, defined, out, span, chain)?;
            chain.pop();
        }

        Ok(())
    }
}
