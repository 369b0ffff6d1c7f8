//! # usym-core
//!
//! Canonical symbolic expressions for the usym engine.
//!
//! This crate provides:
//! - Arena-allocated expression storage with hash-consing
//! - Canonicalizing constructors (`add`, `mul`, `pow`, `apply`)
//! - A fixed total order over expressions
//! - Substitution, rewriting and traversal that keep results canonical
//!
//! ## Design Principles
//!
//! - **One node per structure**: structurally equal expressions share a
//!   handle, so equality and hashing are O(1) identity operations
//! - **Canonical by construction**: the only way to build a compound node
//!   is through the canonicalizer
//! - **Explicit context**: interning is scoped to an [`ExprArena`] value,
//!   never to hidden global state

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod arena;
pub mod canon;
pub mod config;
pub mod error;
pub mod expr;
pub mod handle;
pub mod intern;
pub mod order;
pub mod shared;
pub mod traverse;

#[cfg(test)]
mod proptests;

pub use arena::{ArenaStats, ExprArena};
pub use config::ArenaConfig;
pub use error::{ExprError, Result};
pub use expr::{Args, ExprKind, ExprNode, FunctionArgs, NameId};
pub use handle::ExprHandle;
pub use shared::SharedArena;
pub use traverse::{PostOrder, PreOrder};
