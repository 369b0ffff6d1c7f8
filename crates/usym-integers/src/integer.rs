//! Integer constants.
//!
//! The payload of an integer expression node. Arithmetic on constants is
//! done through [`Rational`](crate::Rational); this type only has to be
//! hashable, totally ordered and convertible.

use dashu::base::Signed as DashuSigned;
use dashu::integer::IBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul};

/// An arbitrary precision integer constant.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Integer(IBig);

impl Integer {
    /// Creates a new integer from an i64.
    #[must_use]
    pub fn new(value: i64) -> Self {
        Self(IBig::from(value))
    }

    pub(crate) fn from_ibig(value: IBig) -> Self {
        Self(value)
    }

    pub(crate) fn into_ibig(self) -> IBig {
        self.0
    }

    /// Returns true if this integer is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        DashuSigned::is_negative(&self.0)
    }

    /// Converts to an i64 if the value fits.
    ///
    /// Exponents are only folded when they fit.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        i64::try_from(self.0.clone()).ok()
    }
}

impl Zero for Integer {
    fn zero() -> Self {
        Self(IBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Integer {
    fn one() -> Self {
        Self(IBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == IBig::ONE
    }
}

// Required by `Zero` and `One`.
impl Add for Integer {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Mul for Integer {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl fmt::Debug for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Integer({})", self.0)
    }
}

impl fmt::Display for Integer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<i64> for Integer {
    fn from(value: i64) -> Self {
        Self::new(value)
    }
}

impl From<i32> for Integer {
    fn from(value: i32) -> Self {
        Self::new(i64::from(value))
    }
}
