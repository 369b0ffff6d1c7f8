//! # usym-integers
//!
//! Exact numeric constants for the usym expression engine.
//!
//! This crate wraps `dashu` to provide:
//! - Arbitrary precision integers (`Integer`)
//! - Reduced rationals with a positive denominator (`Rational`)
//!
//! Expression constants are never approximated: every fold performed by the
//! canonicalizer goes through these types.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]

pub mod integer;
pub mod rational;

#[cfg(test)]
mod proptests;

pub use integer::Integer;
pub use rational::Rational;
