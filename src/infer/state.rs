//! Inference state management.
//!
//! This module provides the `InferState` struct which tracks:
//! - Fresh variable generation
//! - Current substitution
//!
//! and the instantiation of typings with fresh variables.

use crate::types::{Subst, Substitutable, TVar, TVarId, Type};

use super::typing::Typing;

/// Display tag for the variable allocated at each variable reference.
pub const VAR_TAG: &str = "VAR";

/// Inference state tracking type variables and their bindings.
pub struct InferState {
    /// Counter for generating fresh type variables.
    name_source: TVarId,

    /// Current substitution from unification.
    pub subst: Subst,
}

impl Default for InferState {
    fn default() -> Self {
        Self::new()
    }
}

impl InferState {
    /// Create a new inference state.
    pub fn new() -> Self {
        InferState {
            name_source: 0,
            subst: Subst::empty(),
        }
    }

    /// Generate a fresh type variable.
    pub fn fresh_var(&mut self) -> Type {
        Type::Var(TVar::new(self.next_id()))
    }

    /// Generate a fresh type variable carrying a display tag.
    pub fn fresh_tagged(&mut self, tag: &'static str) -> Type {
        Type::Var(TVar::tagged(self.next_id(), tag))
    }

    fn next_id(&mut self) -> TVarId {
        let id = self.name_source;
        self.name_source += 1;
        id
    }

    /// Number of variables allocated so far.
    pub fn var_count(&self) -> TVarId {
        self.name_source
    }

    /// Apply the current substitution.
    pub fn apply_subst<T: Substitutable>(&self, t: &T) -> T {
        self.subst.apply(t)
    }

    /// Copy a typing with every unbound variable reachable from it
    /// replaced by a fresh one.
    ///
    /// Occurrences of one variable map to the same fresh variable within a
    /// call; separate calls never share fresh variables.
    pub fn instantiate(&mut self, typing: &Typing) -> Typing {
        let resolved = self.apply_subst(typing);

        let renaming: Subst = resolved
            .free_vars()
            .into_iter()
            .map(|var| {
                let fresh = TVar {
                    id: self.next_id(),
                    tag: var.tag,
                };
                (var.id, Type::Var(fresh))
            })
            .collect();

        if renaming.is_empty() {
            resolved
        } else {
            renaming.apply(&resolved)
        }
    }
}
