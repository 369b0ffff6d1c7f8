//! Expression node types.
//!
//! The variant set is closed. Children are handles into the same arena and
//! are always canonical, so a node's derived `Hash`/`Eq` is its structural
//! key: a tag plus child identities.

use num_traits::{One, Zero};
use smallvec::SmallVec;
use usym_integers::{Integer, Rational};

use crate::handle::ExprHandle;

/// Index of an interned symbol or function name.
pub type NameId = u32;

/// Operand list of a sum or product.
pub type Args = SmallVec<[ExprHandle; 4]>;

/// Argument list of a function application.
pub type FunctionArgs = SmallVec<[ExprHandle; 2]>;

/// An expression node stored in the arena.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ExprNode {
    // === Atoms ===
    /// An exact integer constant.
    Integer(Integer),

    /// An exact rational constant.
    ///
    /// Invariant: reduced, positive denominator, never integral.
    Rational(Rational),

    /// A symbolic variable.
    Symbol(NameId),

    // === Compound Expressions ===
    /// Power expression: base^exp.
    Pow {
        /// The base of the power.
        base: ExprHandle,
        /// The exponent.
        exp: ExprHandle,
    },

    /// Product: a * b * c * ...
    ///
    /// Invariant: at least 2 factors, sorted, flat, at most one numeric
    /// factor (leading) which is neither 0 nor 1, pairwise distinct bases.
    Mul(Args),

    /// Sum: a + b + c + ...
    ///
    /// Invariant: at least 2 terms, sorted, flat, at most one numeric term
    /// (leading) which is not 0, pairwise distinct non-coefficient parts.
    Add(Args),

    // === Functions ===
    /// An uninterpreted function application: f(arg1, arg2, ...).
    Function {
        /// The function name.
        name: NameId,
        /// The arguments, in call order.
        args: FunctionArgs,
    },
}

/// Variant discriminator.
///
/// The declaration order is the canonical kind order used by
/// [`ExprArena::compare`](crate::ExprArena::compare):
/// `Number < Symbol < Pow < Mul < Add < Function`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ExprKind {
    /// `Integer` or `Rational`.
    Number,
    /// `Symbol`.
    Symbol,
    /// `Pow`.
    Pow,
    /// `Mul`.
    Mul,
    /// `Add`.
    Add,
    /// `Function`.
    Function,
}

impl ExprNode {
    /// Returns the variant discriminator.
    #[must_use]
    pub fn kind(&self) -> ExprKind {
        match self {
            ExprNode::Integer(_) | ExprNode::Rational(_) => ExprKind::Number,
            ExprNode::Symbol(_) => ExprKind::Symbol,
            ExprNode::Pow { .. } => ExprKind::Pow,
            ExprNode::Mul(_) => ExprKind::Mul,
            ExprNode::Add(_) => ExprKind::Add,
            ExprNode::Function { .. } => ExprKind::Function,
        }
    }

    /// Returns true if this node is an atom (no children).
    #[must_use]
    pub fn is_atom(&self) -> bool {
        matches!(
            self,
            ExprNode::Integer(_) | ExprNode::Rational(_) | ExprNode::Symbol(_)
        )
    }

    /// Returns true if this node is a numeric constant.
    #[must_use]
    pub fn is_number(&self) -> bool {
        matches!(self, ExprNode::Integer(_) | ExprNode::Rational(_))
    }

    /// Returns true if this is the integer zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        matches!(self, ExprNode::Integer(n) if n.is_zero())
    }

    /// Returns true if this is the integer one.
    #[must_use]
    pub fn is_one(&self) -> bool {
        matches!(self, ExprNode::Integer(n) if n.is_one())
    }

    /// Returns the numeric value of a constant.
    #[must_use]
    pub fn as_rational(&self) -> Option<Rational> {
        match self {
            ExprNode::Integer(n) => Some(Rational::from_integer(n.clone())),
            ExprNode::Rational(q) => Some(q.clone()),
            _ => None,
        }
    }

    /// Returns the children of this node, left to right.
    #[must_use]
    pub fn children(&self) -> Args {
        match self {
            ExprNode::Integer(_) | ExprNode::Rational(_) | ExprNode::Symbol(_) => Args::new(),
            ExprNode::Add(args) | ExprNode::Mul(args) => args.clone(),
            ExprNode::Pow { base, exp } => smallvec::smallvec![*base, *exp],
            ExprNode::Function { args, .. } => args.iter().copied().collect(),
        }
    }
}
