//! letpoly: constraint-based type inference with let-polymorphism.
//!
//! This library infers principal types for a small language of integers,
//! tuples, functions, declarations and blocks. It features:
//!
//! - **Environment-free inference**: each node's typing records the free
//!   names used beneath it, with one constraint per occurrence
//! - **Block-level let-polymorphism**: free names are resolved against the
//!   declarations of the enclosing block, instantiated afresh per name
//! - **Soft application failures**: a failed application becomes a
//!   `!Fail!` type and inference carries on
//! - **A builtin prelude** resolved the same way as block declarations

pub mod builtins;
pub mod check;
pub mod diagnostics;
pub mod error;
pub mod infer;
pub mod lexer;
pub mod parser;
pub mod types;

#[cfg(feature = "wasm")]
pub mod wasm;
