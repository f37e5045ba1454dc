//! Type system module for letpoly.
//!
//! This module provides the type term definitions, substitution
//! implementation, and pretty-printing used by the inference pass.

mod pretty;
mod subst;
mod ty;

pub use pretty::PrettyContext;
pub use subst::{Subst, Substitutable};
pub use ty::{TVar, TVarId, Type, ARROW, FAIL, INT, INT_TYPE, PRODUCT, UNIT, UNIT_TYPE};
