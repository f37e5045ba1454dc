//! Property-based tests for inference.

use proptest::prelude::*;
use proptest::sample::Index;

use super::state::InferState;
use crate::lexer::Span;
use crate::parser::ast::{Node, NodeKind};
use crate::parser::parse;
use crate::parser::pretty::print_node;
use crate::types::Type;

fn node(kind: NodeKind) -> Node {
    Node::new(kind, Span::new(0, 0))
}

/// Trees of integer and tuple literals, paired with their expected type.
fn int_tuple_tree() -> impl Strategy<Value = (Node, Type)> {
    let leaf = (0i64..1000).prop_map(|n| (node(NodeKind::Int(n)), Type::int()));

    leaf.prop_recursive(3, 16, 4, |inner| {
        prop::collection::vec(inner, 0..4).prop_map(|items| {
            let (nodes, types): (Vec<_>, Vec<_>) = items.into_iter().unzip();
            (node(NodeKind::Tuple(nodes)), Type::product(types))
        })
    })
}

fn tuple_of_names(names: &[String]) -> String {
    if names.len() == 1 {
        format!("({},)", names[0])
    } else {
        format!("({})", names.join(", "))
    }
}

fn resolved_type(source: &str) -> Result<Type, String> {
    let root = parse(source).map_err(|e| format!("{:?}", e))?;
    let mut state = InferState::new();
    let typing = state.infer(&root).map_err(|e| format!("{:?}", e))?;
    if !typing.is_closed() {
        return Err(format!("unresolved names: {:?}", typing.context));
    }
    Ok(state.apply_subst(&typing.ty))
}

/// Declarations that are independent of statement order: each one is a
/// literal tree, or a pair of an earlier declaration and a tree.
fn declarations() -> impl Strategy<Value = (Vec<String>, Type)> {
    prop::collection::vec((int_tuple_tree(), prop::option::of(any::<Index>())), 1..6).prop_map(
        |items| {
            let mut lines = Vec::new();
            let mut types: Vec<Type> = Vec::new();

            for (k, ((tree, tree_ty), reference)) in items.into_iter().enumerate() {
                let (value, ty) = match reference {
                    Some(index) if k > 0 => {
                        let j = index.index(k);
                        (
                            format!("(d{}, {})", j, print_node(&tree)),
                            Type::product(vec![types[j].clone(), tree_ty]),
                        )
                    }
                    _ => (print_node(&tree), tree_ty),
                };
                lines.push(format!("let d{} = {};", k, value));
                types.push(ty);
            }

            (lines, Type::product(types))
        },
    )
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_literal_trees_infer_to_products((tree, expected) in int_tuple_tree()) {
        let mut state = InferState::new();
        let typing = state.infer(&tree).unwrap();

        prop_assert_eq!(&typing.ty, &expected);
        prop_assert!(typing.is_closed());
        prop_assert!(typing.defined.is_empty());
    }

    #[test]
    fn prop_identity_accepts_any_use(uses in prop::collection::vec(int_tuple_tree(), 1..6)) {
        let mut source = String::from("let id = fn(x) x;\n");
        let mut names = Vec::new();
        let mut expected = Vec::new();

        for (i, (tree, ty)) in uses.iter().enumerate() {
            source.push_str(&format!("let u{} = id({});\n", i, print_node(tree)));
            names.push(format!("u{}", i));
            expected.push(ty.clone());
        }
        source.push_str(&tuple_of_names(&names));

        match resolved_type(&source) {
            Ok(ty) => prop_assert_eq!(ty, Type::product(expected)),
            Err(e) => prop_assert!(false, "{}\nSource:\n{}", e, source),
        }
    }

    #[test]
    fn prop_declaration_order_is_irrelevant(
        (lines, shuffled, expected) in declarations().prop_flat_map(|(lines, expected)| {
            let shuffled = Just(lines.clone()).prop_shuffle();
            (Just(lines), shuffled, Just(expected))
        })
    ) {
        let names: Vec<String> = (0..lines.len()).map(|k| format!("d{}", k)).collect();
        let use_all = tuple_of_names(&names);

        let in_order = format!("{}\n{}", lines.join("\n"), use_all);
        let reordered = format!("{}\n{}", shuffled.join("\n"), use_all);

        prop_assert_eq!(resolved_type(&in_order), Ok(expected.clone()));
        prop_assert_eq!(resolved_type(&reordered), Ok(expected));
    }
}
