//! Substitution for type inference.
//!
//! Implements the substitution data structure and the Substitutable trait
//! for applying substitutions to types and the structures built from them.

use std::collections::HashMap;

use indexmap::IndexSet;

use super::ty::{TVar, TVarId, Type};

/// A substitution mapping type variables to types.
///
/// Bindings may refer to other bound variables; `apply` follows them
/// transitively, so a binding never has to be rewritten when a variable it
/// mentions is bound later. Unification keeps these chains short.
#[derive(Clone, Debug, Default)]
pub struct Subst {
    map: HashMap<TVarId, Type>,
}

impl Subst {
    /// Create an empty substitution.
    pub fn empty() -> Self {
        Subst {
            map: HashMap::new(),
        }
    }

    /// Create a singleton substitution.
    pub fn singleton(var: TVarId, ty: Type) -> Self {
        let mut map = HashMap::new();
        map.insert(var, ty);
        Subst { map }
    }

    /// Check if the substitution is empty.
    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    /// Number of bound variables.
    pub fn len(&self) -> usize {
        self.map.len()
    }

    /// Get the type for a variable, if present.
    pub fn get(&self, var: TVarId) -> Option<&Type> {
        self.map.get(&var)
    }

    /// Check if a variable is in the domain.
    pub fn contains(&self, var: TVarId) -> bool {
        self.map.contains_key(&var)
    }

    /// Insert a mapping into the substitution, returning the one it replaces.
    pub fn insert(&mut self, var: TVarId, ty: Type) -> Option<Type> {
        self.map.insert(var, ty)
    }

    /// Remove a variable from the substitution.
    pub fn remove(&mut self, var: TVarId) -> Option<Type> {
        self.map.remove(&var)
    }

    /// Apply this substitution to a substitutable value.
    pub fn apply<T: Substitutable>(&self, t: &T) -> T {
        t.apply_subst(self)
    }
}

impl FromIterator<(TVarId, Type)> for Subst {
    fn from_iter<T: IntoIterator<Item = (TVarId, Type)>>(iter: T) -> Self {
        Subst {
            map: iter.into_iter().collect(),
        }
    }
}

/// Trait for types that can have substitutions applied.
pub trait Substitutable {
    /// Apply a substitution to this value.
    fn apply_subst(&self, subst: &Subst) -> Self;

    /// Collect all type variables, in first-occurrence order.
    fn free_vars(&self) -> IndexSet<TVar>;
}

impl Substitutable for Type {
    fn apply_subst(&self, subst: &Subst) -> Self {
        match self {
            Type::Var(var) => match subst.get(var.id) {
                // Bindings may chain through other variables
                Some(ty) => ty.apply_subst(subst),
                None => self.clone(),
            },
            Type::Con { name, params } => Type::Con {
                name: name.clone(),
                params: params.iter().map(|p| p.apply_subst(subst)).collect(),
            },
        }
    }

    fn free_vars(&self) -> IndexSet<TVar> {
        Type::free_vars(self)
    }
}

impl<T: Substitutable> Substitutable for Vec<T> {
    fn apply_subst(&self, subst: &Subst) -> Self {
        self.iter().map(|t| t.apply_subst(subst)).collect()
    }

    fn free_vars(&self) -> IndexSet<TVar> {
        let mut vars = IndexSet::new();
        for t in self {
            vars.extend(t.free_vars());
        }
        vars
    }
}
