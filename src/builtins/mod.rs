//! Built-in bindings.
//!
//! The prelude is a set of closed typings that the driver resolves the
//! program's remaining free names against, exactly as a block resolves its
//! statements against its own declarations. Builtins are therefore
//! instantiated afresh at every resolved use.

use std::rc::Rc;

use crate::infer::{Defined, InferState, Typing};
use crate::types::Type;

/// Create the prelude bindings.
pub fn prelude(state: &mut InferState) -> Defined {
    let mut defined = Defined::new();
    let mut bind = |name: &str, ty: Type| {
        defined.insert(name.to_string(), Rc::new(Typing::new(ty)));
    };

    // Integer arithmetic
    let binary_int = || Type::arrow(Type::product(vec![Type::int(), Type::int()]), Type::int());
    bind("add", binary_int());
    bind("sub", binary_int());
    bind("mul", binary_int());
    bind(
        "neg",
        Type::arrow(Type::product(vec![Type::int()]), Type::int()),
    );

    bind("unit", Type::unit());

    // Pair projections: ((a, b)) -> ...
    let a = state.fresh_var();
    let b = state.fresh_var();
    bind("fst", pair_fn(&a, &b, a.clone()));

    let a = state.fresh_var();
    let b = state.fresh_var();
    bind("snd", pair_fn(&a, &b, b.clone()));

    let a = state.fresh_var();
    let b = state.fresh_var();
    bind(
        "swap",
        pair_fn(&a, &b, Type::product(vec![b.clone(), a.clone()])),
    );

    defined
}

/// A one-parameter function taking the pair `(a, b)`.
fn pair_fn(a: &Type, b: &Type, result: Type) -> Type {
    let pair = Type::product(vec![a.clone(), b.clone()]);
    Type::arrow(Type::product(vec![pair]), result)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::PrettyContext;

    fn prelude_type(name: &str) -> String {
        let mut state = InferState::new();
        let defined = prelude(&mut state);
        PrettyContext::new().format_type(&defined[name].ty)
    }

    #[test]
    fn test_prelude_types() {
        assert_eq!(prelude_type("add"), "(Int, Int) -> Int");
        assert_eq!(prelude_type("neg"), "(Int) -> Int");
        assert_eq!(prelude_type("unit"), "Unit");
        assert_eq!(prelude_type("fst"), "((a, b)) -> a");
        assert_eq!(prelude_type("snd"), "((a, b)) -> b");
        assert_eq!(prelude_type("swap"), "((a, b)) -> (b, a)");
    }

    #[test]
    fn test_prelude_is_closed() {
        let mut state = InferState::new();
        let defined = prelude(&mut state);
        assert_eq!(defined.len(), 8);
        assert!(defined.values().all(|typing| typing.is_closed()));
    }
}
