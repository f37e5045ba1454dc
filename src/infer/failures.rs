//! Collection of soft application failures.
//!
//! A failed application leaves a `!Fail!` type in the tree instead of
//! aborting. Once inference is done, this module finds the applications
//! that failed on their own account and turns each one into a reportable
//! error. Applications that failed only because an operand already carried
//! a failure are skipped, so one mistake is reported once.

use crate::error::TypeError;
use crate::parser::ast::{Node, NodeKind};
use crate::types::{PrettyContext, Type};

use super::state::InferState;

/// Root-cause application failures beneath `root`, in source order.
pub fn application_failures(state: &InferState, root: &Node) -> Vec<TypeError> {
    let mut failures = Vec::new();

    root.walk(&mut |node| {
        let NodeKind::Apply { fun, arg } = &node.kind else {
            return;
        };
        let Some(typing) = node.typing() else {
            return;
        };
        if !typing.ty.is_fail() || carries_failure(state, fun) || carries_failure(state, arg) {
            return;
        }
        if let Some(err) = mismatch(state, node, &typing.ty) {
            failures.push(err);
        }
    });

    failures
}

fn carries_failure(state: &InferState, node: &Node) -> bool {
    node.typing()
        .map(|typing| state.apply_subst(&typing.ty).contains_fail())
        .unwrap_or(false)
}

fn mismatch(state: &InferState, node: &Node, failed: &Type) -> Option<TypeError> {
    let (_, params) = failed.as_con()?;
    let [function, attempted] = params else {
        return None;
    };
    let (_, arrow) = attempted.as_con()?;
    let argument = arrow.first()?;

    let mut ctx = PrettyContext::new();
    Some(TypeError::ApplicationMismatch {
        function: ctx.format_type(&state.apply_subst(function)),
        argument: ctx.format_type(&state.apply_subst(argument)),
        span: node.span,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lexer::Span;
    use crate::parser::parse;

    fn failures_in(source: &str) -> Vec<TypeError> {
        let root = parse(source).unwrap();
        let mut state = InferState::new();
        state.infer(&root).unwrap();
        application_failures(&state, &root)
    }

    #[test]
    fn test_no_failures() {
        assert!(failures_in("let id = fn(x) x; id(1)").is_empty());
    }

    #[test]
    fn test_reports_mismatch() {
        let failures = failures_in("1(2)");
        assert_eq!(failures.len(), 1);
        match &failures[0] {
            TypeError::ApplicationMismatch {
                function,
                argument,
                span,
            } => {
                assert_eq!(function, "Int");
                assert_eq!(argument, "(Int,)");
                assert_eq!(*span, Span::new(0, 4));
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cascade_reported_once() {
        assert_eq!(failures_in("1(2)(3)").len(), 1);
        assert_eq!(failures_in("(fn(x) x(1))(1(2))").len(), 1);
    }

    #[test]
    fn test_independent_failures_are_all_reported() {
        let failures = failures_in("1(2); (fn(x) x)(1, 2); ()(())");
        assert_eq!(failures.len(), 3);
        let starts: Vec<usize> = failures.iter().map(|f| f.span().start).collect();
        assert!(starts.windows(2).all(|w| w[0] < w[1]));
    }
}
