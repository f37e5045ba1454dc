//! Type inference module for letpoly.
//!
//! This module provides the core type inference implementation:
//! - `state`: Inference state with fresh variables, substitution and instantiation
//! - `context`: Multi-valued constraint contexts
//! - `typing`: The typing produced for each node
//! - `unify`: Unification algorithm with occurs check
//! - `infer`: Per-node inference rules and block resolution
//! - `failures`: Collection of soft application failures
//! - `decorate`: Declaration types for display

mod context;
mod decorate;
mod failures;
mod infer;
mod state;
mod typing;
mod unify;

#[cfg(test)]
mod proptests;

pub use context::Context;
pub use decorate::{declaration_types, Decoration};
pub use failures::application_failures;
pub use infer::InferResult;
pub use state::{InferState, VAR_TAG};
pub use typing::{Defined, Typing};
pub use unify::UnifyResult;
