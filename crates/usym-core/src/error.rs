//! Errors raised while constructing or evaluating expressions.

use thiserror::Error;
use usym_integers::Rational;

/// Result alias used throughout the crate.
pub type Result<T, E = ExprError> = std::result::Result<T, E>;

/// Errors that can occur when building or consuming expressions.
///
/// Construction errors are raised synchronously by the canonical
/// constructors; nothing is interned when one is returned.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ExprError {
    /// A rational constant was given a zero denominator.
    #[error("rational constant has a zero denominator")]
    InvalidRational,

    /// Zero raised to a zero or negative exponent.
    #[error("0^{exponent} is undefined")]
    UndefinedExpression {
        /// The offending exponent.
        exponent: Rational,
    },

    /// A symbol had no binding during evaluation.
    #[error("symbol `{0}` is unbound")]
    UnboundSymbol(String),

    /// A function had no exact interpretation during evaluation.
    #[error("function `{0}` has no registered interpretation")]
    UnknownFunction(String),

    /// The expression has no exact rational value.
    #[error("expression has no exact rational value")]
    Inexact,

    /// A compiled expression was called with the wrong number of arguments.
    #[error("expected {expected} arguments, found {found}")]
    Arity {
        /// Declared parameters.
        expected: usize,
        /// Supplied arguments.
        found: usize,
    },

    /// A handle that had to be a symbol was not.
    #[error("expected a symbol")]
    NotASymbol,
}
