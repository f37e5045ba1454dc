//! Constraint contexts.
//!
//! A context maps every free variable name seen beneath a node to the
//! types it was used as, one entry per occurrence, in occurrence order.

use indexmap::{IndexMap, IndexSet};

use crate::types::{Subst, Substitutable, TVar, Type};

/// Multi-valued, insertion-ordered map from free names to usage types.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Context {
    entries: IndexMap<String, Vec<Type>>,
}

impl Context {
    pub fn new() -> Self {
        Self::default()
    }

    /// A context holding one constraint.
    pub fn singleton(name: impl Into<String>, ty: Type) -> Self {
        let mut context = Self::new();
        context.set(name, ty);
        context
    }

    /// Append a constraint for `name`.
    pub fn set(&mut self, name: impl Into<String>, ty: Type) {
        self.entries.entry(name.into()).or_default().push(ty);
    }

    /// All constraints recorded for `name`; empty if there are none.
    pub fn get(&self, name: &str) -> &[Type] {
        self.entries.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    /// Merge `other` into this context, concatenating per-name lists.
    pub fn union(&mut self, other: &Context) {
        for (name, types) in &other.entries {
            self.entries
                .entry(name.clone())
                .or_default()
                .extend(types.iter().cloned());
        }
    }

    /// Remove every constraint on `name`, keeping the order of the rest.
    pub fn erase(&mut self, name: &str) {
        self.entries.shift_remove(name);
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[Type])> {
        self.entries
            .iter()
            .map(|(name, types)| (name.as_str(), types.as_slice()))
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Number of distinct names.
    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

impl Substitutable for Context {
    fn apply_subst(&self, subst: &Subst) -> Self {
        Context {
            entries: self
                .entries
                .iter()
                .map(|(name, types)| (name.clone(), types.apply_subst(subst)))
                .collect(),
        }
    }

    fn free_vars(&self) -> IndexSet<TVar> {
        let mut vars = IndexSet::new();
        for types in self.entries.values() {
            for ty in types {
                ty.collect_free_vars(&mut vars);
            }
        }
        vars
    }
}
