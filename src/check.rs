//! The checking pipeline: parse, infer, resolve against the prelude, and
//! collect the problems that do not abort inference.

use std::rc::Rc;

use tracing::{debug, info};

use crate::builtins::prelude;
use crate::error::{Result, TypeError};
use crate::infer::{
    application_failures, declaration_types, Context, Decoration, Defined, InferState, Typing,
};
use crate::lexer::Span;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::parse;
use crate::types::PrettyContext;

/// Options for a check run.
#[derive(Debug, Clone)]
pub struct CheckOptions {
    /// Resolve top-level free names against the builtin prelude.
    pub prelude: bool,
}

impl Default for CheckOptions {
    fn default() -> Self {
        Self { prelude: true }
    }
}

/// A program that was inferred to completion.
pub struct Checked {
    pub root: Node,
    pub state: InferState,
    pub typing: Rc<Typing>,
    /// Unbound names and failed applications, in source order.
    pub problems: Vec<TypeError>,
    decorations: Vec<Decoration>,
}

impl Checked {
    /// The program's type with all known bindings applied.
    pub fn program_type(&self) -> String {
        PrettyContext::new().format_type(&self.state.apply_subst(&self.typing.ty))
    }

    /// The type of every `let` declaration, in source order.
    pub fn decorations(&self) -> &[Decoration] {
        &self.decorations
    }

    pub fn is_ok(&self) -> bool {
        self.problems.is_empty()
    }
}

/// Type check a source text.
///
/// Fatal errors are returned as `Err`. Everything else is reported in
/// `Checked::problems`.
pub fn check_source(source: &str, options: &CheckOptions) -> Result<Checked> {
    let root = parse(source)?;
    let mut state = InferState::new();

    let typing = state.infer(&root)?;
    info!(
        variables = state.var_count(),
        free_names = typing.context.len(),
        "inference finished"
    );

    let builtins = if options.prelude {
        prelude(&mut state)
    } else {
        Defined::new()
    };

    let mut unresolved = Context::new();
    state.resolve_context(&typing.context, &builtins, &mut unresolved, root.span)?;
    debug!(unresolved = unresolved.len(), "prelude resolution finished");

    let mut problems: Vec<TypeError> = unresolved
        .keys()
        .map(|name| TypeError::UnboundVariable {
            name: name.to_string(),
            span: first_reference(&root, name).unwrap_or(root.span),
        })
        .collect();
    problems.extend(application_failures(&state, &root));
    problems.sort_by_key(|problem| problem.span().start);

    let decorations = declaration_types(&mut state, &root, &builtins);

    info!(problems = problems.len(), "check finished");

    Ok(Checked {
        root,
        state,
        typing,
        problems,
        decorations,
    })
}

/// Span of the first reference to `name` that is not bound by an
/// enclosing parameter or by an earlier declaration in its block.
fn first_reference(node: &Node, name: &str) -> Option<Span> {
    match &node.kind {
        NodeKind::Var(var) if var == name => Some(node.span),
        NodeKind::Fn { params, .. } if params.iter().any(|p| p == name) => None,
        NodeKind::Block(statements) => statements
            .iter()
            .take_while(|stmt| !matches!(&stmt.kind, NodeKind::Decl { name: n, .. } if n == name))
            .find_map(|stmt| first_reference(stmt, name)),
        _ => node
            .children()
            .into_iter()
            .find_map(|child| first_reference(child, name)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::LetpolyError;

    fn check(source: &str) -> Checked {
        check_source(source, &CheckOptions::default()).unwrap()
    }

    #[test]
    fn test_prelude_resolution() {
        let checked = check("add(1, neg(2))");
        assert!(checked.is_ok());
        assert_eq!(checked.program_type(), "Int");
    }

    #[test]
    fn test_builtins_are_polymorphic() {
        let checked = check("let p = (1, ()); (fst(p), snd(p), swap(p))");
        assert!(checked.is_ok());
        assert_eq!(checked.program_type(), "(Int, (), ((), Int))");
    }

    #[test]
    fn test_without_prelude_names_are_unbound() {
        let checked = check_source("add(1, 2)", &CheckOptions { prelude: false }).unwrap();
        assert_eq!(checked.problems.len(), 1);
        match &checked.problems[0] {
            TypeError::UnboundVariable { name, span } => {
                assert_eq!(name, "add");
                assert_eq!(*span, Span::new(0, 3));
            }
            other => panic!("unexpected problem: {other:?}"),
        }
    }

    #[test]
    fn test_unbound_name_skips_bound_references() {
        let options = CheckOptions { prelude: false };

        let checked = check_source("(fn(x) x, x)", &options).unwrap();
        assert_eq!(checked.problems.len(), 1);
        assert_eq!(checked.problems[0].span(), Span::new(10, 11));

        let checked = check_source("(x, { let x = 1; x })", &options).unwrap();
        assert_eq!(checked.problems[0].span(), Span::new(1, 2));

        let checked = check_source("({ let x = 1; x }, x)", &options).unwrap();
        assert_eq!(checked.problems[0].span(), Span::new(19, 20));
    }

    #[test]
    fn test_problems_in_source_order() {
        let checked = check("1(2); missing");
        let kinds: Vec<&str> = checked
            .problems
            .iter()
            .map(|p| match p {
                TypeError::ApplicationMismatch { .. } => "mismatch",
                TypeError::UnboundVariable { .. } => "unbound",
                _ => "other",
            })
            .collect();
        assert_eq!(kinds, vec!["mismatch", "unbound"]);
    }

    #[test]
    fn test_builtin_misuse_is_fatal() {
        let err = check_source("add(1)", &CheckOptions::default()).err().unwrap();
        assert!(matches!(
            err,
            LetpolyError::Type(TypeError::UnificationError { .. })
        ));
    }

    #[test]
    fn test_parse_errors_are_returned() {
        let err = check_source("let = 1", &CheckOptions::default()).err().unwrap();
        assert!(matches!(err, LetpolyError::Parse(_)));
    }

    #[test]
    fn test_decorations() {
        let checked = check("let inc = fn(n) add(n, 1); let two = inc(1)");
        let lines: Vec<(&str, &str)> = checked
            .decorations()
            .iter()
            .map(|d| (d.name.as_str(), d.ty.as_str()))
            .collect();
        assert_eq!(lines, vec![("inc", "(Int) -> Int"), ("two", "Int")]);
    }
}
