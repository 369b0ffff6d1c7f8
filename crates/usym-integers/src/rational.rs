//! Exact rational constants.
//!
//! Values are kept in lowest terms with a positive denominator, so two
//! equal rationals always compare and hash equal. All constant folding in
//! the canonicalizer and all exact evaluation run on this type.

use dashu::base::{Inverse, Signed as DashuSigned, UnsignedAbs};
use dashu::integer::IBig;
use dashu::rational::RBig;
use num_traits::{One, Zero};
use std::fmt;
use std::ops::{Add, Mul};

use crate::Integer;

/// An arbitrary precision rational number.
///
/// Ordering is numeric.
#[derive(Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Rational(RBig);

impl Rational {
    /// Creates a rational from numerator and denominator, reducing it.
    ///
    /// Returns `None` if the denominator is zero.
    #[must_use]
    pub fn checked_new(numerator: Integer, denominator: Integer) -> Option<Self> {
        if denominator.is_zero() {
            return None;
        }
        let negative = denominator.is_negative();
        let value = RBig::from_parts(
            numerator.into_ibig(),
            denominator.into_ibig().unsigned_abs(),
        );
        Some(Self(if negative { -value } else { value }))
    }

    /// Creates a rational from an integer (denominator = 1).
    #[must_use]
    pub fn from_integer(n: Integer) -> Self {
        Self(RBig::from(n.into_ibig()))
    }

    /// Creates a rational from i64 numerator and denominator.
    ///
    /// Returns `None` if the denominator is zero.
    #[must_use]
    pub fn from_i64(numerator: i64, denominator: i64) -> Option<Self> {
        Self::checked_new(Integer::new(numerator), Integer::new(denominator))
    }

    /// Converts to an integer if the denominator is 1.
    #[must_use]
    pub fn to_integer(&self) -> Option<Integer> {
        self.0
            .denominator()
            .is_one()
            .then(|| Integer::from_ibig(self.0.numerator().clone()))
    }

    /// Returns the value as an i64 if it is an integer that fits.
    #[must_use]
    pub fn to_i64(&self) -> Option<i64> {
        self.to_integer()?.to_i64()
    }

    /// Returns the reciprocal, or `None` for zero.
    #[must_use]
    pub fn checked_recip(&self) -> Option<Self> {
        if self.is_zero() {
            None
        } else {
            Some(Self(self.0.clone().inv()))
        }
    }

    /// Returns true if strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        DashuSigned::is_positive(&self.0)
    }

    /// Computes `self^exp` for a signed exponent.
    ///
    /// Returns `None` when raising zero to a negative power, or when
    /// `|exp|` does not fit in a `u32`.
    #[must_use]
    pub fn pow_i(&self, exp: i64) -> Option<Self> {
        let magnitude = usize::try_from(u32::try_from(exp.unsigned_abs()).ok()?).ok()?;
        if exp >= 0 {
            Some(Self(self.0.pow(magnitude)))
        } else {
            self.checked_recip().map(|r| Self(r.0.pow(magnitude)))
        }
    }
}

impl Zero for Rational {
    fn zero() -> Self {
        Self(RBig::ZERO)
    }

    fn is_zero(&self) -> bool {
        self.0.is_zero()
    }
}

impl One for Rational {
    fn one() -> Self {
        Self(RBig::ONE)
    }

    fn is_one(&self) -> bool {
        self.0 == RBig::ONE
    }
}

impl fmt::Debug for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Rational({self})")
    }
}

impl fmt::Display for Rational {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let numerator = self.0.numerator();
        let denominator = self.0.denominator();
        if denominator.is_one() {
            write!(f, "{numerator}")
        } else {
            write!(f, "{numerator}/{denominator}")
        }
    }
}

impl Add for Rational {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self(self.0 + rhs.0)
    }
}

impl Add for &Rational {
    type Output = Rational;

    fn add(self, rhs: Self) -> Self::Output {
        Rational(&self.0 + &rhs.0)
    }
}

impl Mul for Rational {
    type Output = Self;

    fn mul(self, rhs: Self) -> Self::Output {
        Self(self.0 * rhs.0)
    }
}

impl Mul for &Rational {
    type Output = Rational;

    fn mul(self, rhs: Self) -> Self::Output {
        Rational(&self.0 * &rhs.0)
    }
}

impl From<Integer> for Rational {
    fn from(n: Integer) -> Self {
        Self::from_integer(n)
    }
}

impl From<i64> for Rational {
    fn from(n: i64) -> Self {
        Self(RBig::from(IBig::from(n)))
    }
}

impl From<i32> for Rational {
    fn from(n: i32) -> Self {
        Self::from(i64::from(n))
    }
}
