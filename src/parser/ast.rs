//! Abstract Syntax Tree definitions for letpoly.

use std::cell::OnceCell;
use std::rc::Rc;

use crate::infer::Typing;
use crate::lexer::Span;

/// Source location type alias
pub type Source = Span;

/// An AST node: a closed set of kinds plus a write-once slot holding the
/// node's inferred typing.
#[derive(Debug, Clone)]
pub struct Node {
    pub kind: NodeKind,
    pub span: Source,
    typing: OnceCell<Rc<Typing>>,
}

/// The kinds of node the inference pass understands.
#[derive(Debug, Clone)]
pub enum NodeKind {
    /// Integer literal: `42`
    Int(i64),

    /// Tuple literal: `(a, b)`, `(a,)`, `()`
    Tuple(Vec<Node>),

    /// Array literal: `[a, b]`
    Array(Vec<Node>),

    /// Variable reference
    Var(String),

    /// Function application: `f(a, b)` applies `f` to the tuple `(a, b)`
    Apply { fun: Box<Node>, arg: Box<Node> },

    /// Function definition: `fn(x, y) body`
    Fn { params: Vec<String>, body: Box<Node> },

    /// Declaration: `let name = value`
    Decl { name: String, value: Box<Node> },

    /// Assignment: `name = value`
    Assign { name: String, value: Box<Node> },

    /// Return: `return value`
    Return(Box<Node>),

    /// Block: `{ statements }`
    Block(Vec<Node>),
}

impl Node {
    pub fn new(kind: NodeKind, span: Source) -> Self {
        Self {
            kind,
            span,
            typing: OnceCell::new(),
        }
    }

    /// The memoized typing, if this node has been inferred.
    pub fn typing(&self) -> Option<&Rc<Typing>> {
        self.typing.get()
    }

    /// Store the inferred typing. The first stored typing wins; the one
    /// held by the node is returned.
    pub(crate) fn memoize(&self, typing: Rc<Typing>) -> Rc<Typing> {
        Rc::clone(self.typing.get_or_init(|| typing))
    }

    /// Direct children in source order.
    pub fn children(&self) -> Vec<&Node> {
        match &self.kind {
            NodeKind::Int(_) | NodeKind::Var(_) => Vec::new(),
            NodeKind::Tuple(nodes) | NodeKind::Array(nodes) | NodeKind::Block(nodes) => {
                nodes.iter().collect()
            }
            NodeKind::Apply { fun, arg } => vec![&**fun, &**arg],
            NodeKind::Fn { body, .. } => vec![&**body],
            NodeKind::Decl { value, .. } | NodeKind::Assign { value, .. } => vec![&**value],
            NodeKind::Return(value) => vec![&**value],
        }
    }

    /// Visit this node and all of its descendants, parents first.
    pub fn walk<'a>(&'a self, visit: &mut impl FnMut(&'a Node)) {
        visit(self);
        for child in self.children() {
            child.walk(visit);
        }
    }

    /// A short name for the node kind, for logs.
    pub fn kind_name(&self) -> &'static str {
        match &self.kind {
            NodeKind::Int(_) => "int",
            NodeKind::Tuple(_) => "tuple",
            NodeKind::Array(_) => "array",
            NodeKind::Var(_) => "var",
            NodeKind::Apply { .. } => "apply",
            NodeKind::Fn { .. } => "fn",
            NodeKind::Decl { .. } => "decl",
            NodeKind::Assign { .. } => "assign",
            NodeKind::Return(_) => "return",
            NodeKind::Block(_) => "block",
        }
    }
}
