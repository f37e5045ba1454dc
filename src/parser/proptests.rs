//! Property-based tests for parser round-trip.

use proptest::prelude::*;

use super::ast::*;
use super::parse;
use super::pretty::print_program;
use crate::lexer::Span;

fn span() -> Span {
    Span::new(0, 0)
}

fn node(kind: NodeKind) -> Node {
    Node::new(kind, span())
}

fn ident_strategy() -> impl Strategy<Value = String> {
    prop::string::string_regex("[a-zA-Z_][a-zA-Z0-9_]{0,5}")
        .unwrap()
        .prop_filter("not a keyword", |s| {
            !matches!(s.as_str(), "let" | "fn" | "return")
        })
}

fn expr_strategy() -> impl Strategy<Value = Node> + Clone {
    let leaf = prop_oneof![
        (0i64..100_000).prop_map(|n| node(NodeKind::Int(n))),
        ident_strategy().prop_map(|name| node(NodeKind::Var(name))),
    ];

    leaf.prop_recursive(3, 24, 4, |inner| {
        prop_oneof![
            prop::collection::vec(inner.clone(), 0..4)
                .prop_map(|elements| node(NodeKind::Tuple(elements))),
            prop::collection::vec(inner.clone(), 0..3)
                .prop_map(|elements| node(NodeKind::Array(elements))),
            (inner.clone(), prop::collection::vec(inner.clone(), 0..3)).prop_map(
                |(fun, args)| node(NodeKind::Apply {
                    fun: Box::new(fun),
                    arg: Box::new(node(NodeKind::Tuple(args))),
                })
            ),
            (prop::collection::vec(ident_strategy(), 0..3), inner.clone()).prop_map(
                |(params, body)| node(NodeKind::Fn {
                    params,
                    body: Box::new(body),
                })
            ),
            prop::collection::vec(simple_stmt_strategy(inner), 0..3)
                .prop_map(|statements| node(NodeKind::Block(statements))),
        ]
    })
}

fn simple_stmt_strategy(expr: impl Strategy<Value = Node> + Clone) -> impl Strategy<Value = Node> {
    prop_oneof![
        expr.clone(),
        (ident_strategy(), expr.clone()).prop_map(|(name, value)| node(NodeKind::Decl {
            name,
            value: Box::new(value),
        })),
        (ident_strategy(), expr.clone()).prop_map(|(name, value)| node(NodeKind::Assign {
            name,
            value: Box::new(value),
        })),
        expr.prop_map(|value| node(NodeKind::Return(Box::new(value)))),
    ]
}

fn program_strategy() -> impl Strategy<Value = Node> {
    prop::collection::vec(simple_stmt_strategy(expr_strategy()), 0..5)
        .prop_map(|statements| node(NodeKind::Block(statements)))
}

/// Structural equality, ignoring spans.
fn nodes_equal(a: &Node, b: &Node) -> bool {
    match (&a.kind, &b.kind) {
        (NodeKind::Int(x), NodeKind::Int(y)) => x == y,
        (NodeKind::Var(x), NodeKind::Var(y)) => x == y,
        (NodeKind::Tuple(xs), NodeKind::Tuple(ys))
        | (NodeKind::Array(xs), NodeKind::Array(ys))
        | (NodeKind::Block(xs), NodeKind::Block(ys)) => lists_equal(xs, ys),
        (NodeKind::Apply { fun: f1, arg: a1 }, NodeKind::Apply { fun: f2, arg: a2 }) => {
            nodes_equal(f1, f2) && nodes_equal(a1, a2)
        }
        (
            NodeKind::Fn {
                params: p1,
                body: b1,
            },
            NodeKind::Fn {
                params: p2,
                body: b2,
            },
        ) => p1 == p2 && nodes_equal(b1, b2),
        (
            NodeKind::Decl {
                name: n1,
                value: v1,
            },
            NodeKind::Decl {
                name: n2,
                value: v2,
            },
        )
        | (
            NodeKind::Assign {
                name: n1,
                value: v1,
            },
            NodeKind::Assign {
                name: n2,
                value: v2,
            },
        ) => n1 == n2 && nodes_equal(v1, v2),
        (NodeKind::Return(x), NodeKind::Return(y)) => nodes_equal(x, y),
        _ => false,
    }
}

fn lists_equal(xs: &[Node], ys: &[Node]) -> bool {
    xs.len() == ys.len() && xs.iter().zip(ys).all(|(x, y)| nodes_equal(x, y))
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    #[test]
    fn prop_expr_round_trip(expr in expr_strategy()) {
        let program = node(NodeKind::Block(vec![expr]));
        let source = print_program(&program);

        match parse(&source) {
            Ok(parsed) => {
                prop_assert!(
                    nodes_equal(&program, &parsed),
                    "Round-trip failed!\nOriginal: {:?}\nSource: {}\nParsed: {:?}",
                    program, source, parsed
                );
            }
            Err(e) => {
                prop_assert!(false, "Parse failed: {:?}\nSource: {}", e, source);
            }
        }
    }

    #[test]
    fn prop_program_round_trip(program in program_strategy()) {
        let source = print_program(&program);

        match parse(&source) {
            Ok(parsed) => {
                prop_assert!(
                    nodes_equal(&program, &parsed),
                    "Round-trip failed!\nOriginal: {:?}\nSource: {}\nParsed: {:?}",
                    program, source, parsed
                );
            }
            Err(e) => {
                prop_assert!(false, "Parse failed: {:?}\nSource: {}", e, source);
            }
        }
    }
}
