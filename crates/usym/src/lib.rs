//! # usym
//!
//! A minimal symbolic expression engine.
//!
//! Expressions (symbols, exact constants, sums, products, powers and
//! uninterpreted function applications) live in an [`ExprArena`] as
//! immutable, hash-consed trees kept in one canonical form. Equal
//! constructions share a handle, so equality and hashing are identity
//! operations.
//!
//! ## Features
//!
//! - **Canonical forms**: flattening, sorting, like-term and like-base
//!   collection, exact numeric folding
//! - **Exact numbers**: arbitrary precision integers and rationals
//! - **Rewriting**: simultaneous substitution and bottom-up maps that stay
//!   canonical
//! - **Exact evaluation**: bind symbols to rationals, interpret functions
//!
//! ## Quick Start
//!
//! ```rust
//! use usym::prelude::*;
//!
//! let mut arena = ExprArena::new();
//! let x = arena.symbol("x");
//! let y = arena.symbol("y");
//!
//! let xy = arena.add([x, y]);
//! assert_eq!(xy, arena.add([y, x]));
//!
//! let two = arena.integer(2);
//! let doubled = arena.add([x, x]);
//! assert_eq!(doubled, arena.mul([two, x]).unwrap());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod eval;

pub use usym_core as core;
pub use usym_integers as integers;

pub use eval::{CompiledExpr, Evaluator, ExactFn};
pub use usym_core::{
    ArenaConfig, ArenaStats, ExprArena, ExprError, ExprHandle, ExprKind, ExprNode, Result,
    SharedArena,
};
pub use usym_integers::{Integer, Rational};

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::eval::Evaluator;
    pub use usym_core::{ArenaConfig, ExprArena, ExprError, ExprHandle, ExprKind, ExprNode};
    pub use usym_integers::{Integer, Rational};
}
