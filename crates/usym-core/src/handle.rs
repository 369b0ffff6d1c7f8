//! Identity handles for interned expressions.

use std::fmt;

/// A handle to a canonical expression inside an [`ExprArena`](crate::ExprArena).
///
/// Handles are 32-bit indices. Because every node is hash-consed, two
/// handles from the same arena are equal exactly when the expressions they
/// name are structurally equal, and the derived `Hash` is an identity hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExprHandle(u32);

impl ExprHandle {
    pub(crate) const fn new(index: u32) -> Self {
        Self(index)
    }

    /// Returns the raw index of this handle.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }

    /// Identity hash of the expression.
    ///
    /// Stable for the lifetime of the arena: equal expressions share a
    /// handle, so they share this value.
    #[must_use]
    pub const fn identity_hash(self) -> u64 {
        self.0 as u64
    }
}

impl fmt::Debug for ExprHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Expr({})", self.0)
    }
}

impl fmt::Display for ExprHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}
