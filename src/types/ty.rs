//! Core type terms for letpoly type inference.
//!
//! A type is either a type variable or a named constructor applied to an
//! ordered list of parameters. Variables carry no binding themselves; the
//! bindings produced by unification live in the inference state's
//! substitution, so every occurrence of one variable identity observes the
//! same binding.

use std::borrow::Cow;
use std::hash::{Hash, Hasher};

use indexmap::IndexSet;

/// Unique identifier for type variables.
pub type TVarId = u32;

/// Constructor name of the integer type.
pub const INT: &str = "Int";
/// Constructor name of the unit type.
pub const UNIT: &str = "Unit";
/// Constructor name of function types: `Arrow(param, result)`.
pub const ARROW: &str = "Arrow";
/// Constructor name of tuple types: `Product(t1, ..., tn)`.
pub const PRODUCT: &str = "Product";
/// Sentinel constructor recording a failed application:
/// `!Fail!(function type, Arrow(argument type, result))`.
pub const FAIL: &str = "!Fail!";

/// The integer type.
pub static INT_TYPE: Type = Type::Con {
    name: Cow::Borrowed(INT),
    params: Vec::new(),
};

/// The unit type, the type of declarations and empty blocks.
pub static UNIT_TYPE: Type = Type::Con {
    name: Cow::Borrowed(UNIT),
    params: Vec::new(),
};

/// A type variable.
///
/// Identity is the `id` alone. The `tag` is a display hint for diagnostics
/// and never participates in equality.
#[derive(Clone, Copy, Debug)]
pub struct TVar {
    pub id: TVarId,
    pub tag: Option<&'static str>,
}

impl TVar {
    pub fn new(id: TVarId) -> Self {
        TVar { id, tag: None }
    }

    pub fn tagged(id: TVarId, tag: &'static str) -> Self {
        TVar { id, tag: Some(tag) }
    }
}

impl PartialEq for TVar {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for TVar {}

impl Hash for TVar {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

/// Core type representation.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Type {
    /// Type variable.
    Var(TVar),

    /// Named constructor with ordered parameters. Arity is fixed by
    /// convention per name, not declared anywhere.
    Con {
        name: Cow<'static, str>,
        params: Vec<Type>,
    },
}

impl Type {
    // === Constructors ===

    /// Create a type variable.
    pub fn var(var: TVar) -> Self {
        Type::Var(var)
    }

    /// Create a constructor type.
    pub fn con(name: impl Into<Cow<'static, str>>, params: Vec<Type>) -> Self {
        Type::Con {
            name: name.into(),
            params,
        }
    }

    /// The integer type.
    pub fn int() -> Self {
        INT_TYPE.clone()
    }

    /// The unit type.
    pub fn unit() -> Self {
        UNIT_TYPE.clone()
    }

    /// Create a function type `Arrow(param, ret)`.
    pub fn arrow(param: Type, ret: Type) -> Self {
        Type::con(ARROW, vec![param, ret])
    }

    /// Create a tuple type `Product(elems...)`.
    pub fn product(elems: Vec<Type>) -> Self {
        Type::con(PRODUCT, elems)
    }

    /// Create the failure sentinel for an application that did not type-check.
    pub fn fail(function: Type, attempted: Type) -> Self {
        Type::con(FAIL, vec![function, attempted])
    }

    // === Predicates ===

    /// Check if this is a type variable.
    pub fn is_var(&self) -> bool {
        matches!(self, Type::Var(_))
    }

    /// Check if this type is headed by the given constructor name.
    pub fn is_con(&self, expected: &str) -> bool {
        matches!(self, Type::Con { name, .. } if name == expected)
    }

    /// Check if this is a failure sentinel.
    pub fn is_fail(&self) -> bool {
        self.is_con(FAIL)
    }

    /// Check if a failure sentinel occurs anywhere inside this type.
    pub fn contains_fail(&self) -> bool {
        match self {
            Type::Var(_) => false,
            Type::Con { name, params } => name == FAIL || params.iter().any(Type::contains_fail),
        }
    }

    // === Accessors ===

    /// Get the type variable if this is a Var.
    pub fn as_var(&self) -> Option<&TVar> {
        match self {
            Type::Var(var) => Some(var),
            _ => None,
        }
    }

    /// Get the name and parameters if this is a constructor.
    pub fn as_con(&self) -> Option<(&str, &[Type])> {
        match self {
            Type::Con { name, params } => Some((&**name, params.as_slice())),
            _ => None,
        }
    }

    /// Collect all type variables in first-occurrence order.
    pub fn free_vars(&self) -> IndexSet<TVar> {
        let mut vars = IndexSet::new();
        self.collect_free_vars(&mut vars);
        vars
    }

    pub(crate) fn collect_free_vars(&self, vars: &mut IndexSet<TVar>) {
        match self {
            Type::Var(var) => {
                vars.insert(*var);
            }
            Type::Con { params, .. } => {
                for p in params {
                    p.collect_free_vars(vars);
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_construction() {
        let int = Type::int();
        assert!(int.is_con(INT));
        assert_eq!(int, INT_TYPE);

        let var = Type::var(TVar::new(0));
        assert!(var.is_var());

        let func = Type::arrow(Type::product(vec![Type::int()]), Type::unit());
        assert!(func.is_con(ARROW));
        assert_eq!(func.as_con().map(|(_, ps)| ps.len()), Some(2));
    }

    #[test]
    fn test_var_identity_ignores_tag() {
        assert_eq!(TVar::new(3), TVar::tagged(3, "VAR"));
        assert_ne!(TVar::new(3), TVar::new(4));
    }

    #[test]
    fn test_free_vars_in_order() {
        let a = Type::var(TVar::new(7));
        let b = Type::var(TVar::new(2));
        let ty = Type::arrow(Type::product(vec![a.clone(), b.clone()]), a);

        let vars: Vec<TVarId> = ty.free_vars().iter().map(|v| v.id).collect();
        assert_eq!(vars, vec![7, 2]);
    }

    #[test]
    fn test_contains_fail() {
        let failed = Type::fail(Type::int(), Type::arrow(Type::unit(), Type::var(TVar::new(0))));
        assert!(failed.is_fail());
        assert!(Type::product(vec![Type::int(), failed]).contains_fail());
        assert!(!Type::product(vec![Type::int()]).contains_fail());
    }
}
