//! Canonicalizing constructors.
//!
//! Every compound expression is built here. Inputs are canonical handles;
//! outputs satisfy the node invariants documented on [`ExprNode`]:
//! flat, sorted by [`ExprArena::compare`], like terms and like bases
//! combined, numeric parts folded, identities dropped.

use num_traits::{One, Zero};
use rustc_hash::FxHashMap;
use smallvec::smallvec;
use tracing::debug;
use usym_integers::Rational;

use crate::arena::ExprArena;
use crate::error::{ExprError, Result};
use crate::expr::{Args, ExprNode, NameId};
use crate::handle::ExprHandle;

impl ExprArena {
    /// Creates a canonical sum.
    ///
    /// Nested sums are flattened, numeric terms folded into one constant,
    /// and terms that differ only by a numeric coefficient are combined
    /// (`x + x` becomes `2*x`). An empty sum is `0`; a single surviving
    /// term is returned unwrapped.
    pub fn add(&mut self, terms: impl IntoIterator<Item = ExprHandle>) -> ExprHandle {
        let mut constant = Rational::zero();
        let mut like_terms: FxHashMap<ExprHandle, Rational> = FxHashMap::default();
        let mut pending: Vec<ExprHandle> = terms.into_iter().collect();

        while let Some(term) = pending.pop() {
            if let ExprNode::Add(args) = self.get(term) {
                pending.extend(args.iter().copied());
                continue;
            }
            if let Some(value) = self.as_rational(term) {
                constant = constant + value;
                continue;
            }
            let (coefficient, rest) = self.split_coefficient(term);
            let slot = like_terms.entry(rest).or_default();
            *slot = std::mem::take(slot) + coefficient;
        }

        let mut terms = Args::new();
        if !constant.is_zero() {
            terms.push(self.number(constant));
        }
        for (rest, coefficient) in like_terms {
            if !coefficient.is_zero() {
                terms.push(self.scale(coefficient, rest));
            }
        }
        self.sort_canonical(&mut terms);

        match terms.len() {
            0 => self.integer(0),
            1 => terms[0],
            _ => self.intern(ExprNode::Add(terms)),
        }
    }

    /// Creates a canonical product.
    ///
    /// Nested products are flattened, numeric factors folded, and factors
    /// over the same base combined by summing exponents (`x*x` becomes
    /// `x^2`). Any zero factor makes the product `0`; an empty product is
    /// `1`. A number times a single sum distributes, so `2*(x+y)` is
    /// `2*x + 2*y` and `(x+y) - (x+y)` is `0`.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::UndefinedExpression`] when combining powers of a
    /// zero base yields `0^0` or a negative power of zero.
    pub fn mul(&mut self, factors: impl IntoIterator<Item = ExprHandle>) -> Result<ExprHandle> {
        let mut coefficient = Rational::one();
        // base -> (bare occurrences, explicit exponents)
        let mut powers: FxHashMap<ExprHandle, (i64, Args)> = FxHashMap::default();
        let mut pending: Vec<ExprHandle> = factors.into_iter().collect();

        while let Some(factor) = pending.pop() {
            if let Some(value) = self.as_rational(factor) {
                if value.is_zero() {
                    return Ok(self.integer(0));
                }
                coefficient = coefficient * value;
                continue;
            }
            match self.get(factor) {
                ExprNode::Mul(args) => pending.extend(args.iter().copied()),
                ExprNode::Pow { base, exp } => powers.entry(*base).or_default().1.push(*exp),
                _ => powers.entry(factor).or_default().0 += 1,
            }
        }

        let mut out = Args::new();
        // A combined factor may come back as a number, a product, or a power
        // over a different base; those go through another round.
        let mut unstable = false;
        for (base, (bare, mut exponents)) in powers {
            let combined = if bare == 1 && exponents.is_empty() {
                base
            } else {
                if bare > 0 {
                    exponents.push(self.integer(bare));
                }
                let exp = if exponents.len() == 1 {
                    exponents[0]
                } else {
                    self.add(exponents)
                };
                self.pow(base, exp)?
            };
            if let Some(value) = self.as_rational(combined) {
                if value.is_zero() {
                    return Ok(self.integer(0));
                }
                coefficient = coefficient * value;
                continue;
            }
            unstable |= match self.get(combined) {
                ExprNode::Mul(_) => true,
                ExprNode::Pow { base: b, .. } => *b != base,
                _ => combined != base,
            };
            out.push(combined);
        }

        if unstable {
            if !coefficient.is_one() {
                out.push(self.number(coefficient));
            }
            return self.mul(out);
        }

        self.sort_canonical(&mut out);
        if !coefficient.is_one() {
            if let &[single] = out.as_slice() {
                if let ExprNode::Add(terms) = self.get(single) {
                    let terms = terms.clone();
                    return self.distribute(coefficient, &terms);
                }
            }
            out.insert(0, self.number(coefficient));
        }

        Ok(match out.len() {
            0 => self.integer(1),
            1 => out[0],
            _ => self.intern(ExprNode::Mul(out)),
        })
    }

    /// Creates a canonical power `base^exp`.
    ///
    /// - `x^0 = 1` for `x != 0`, `x^1 = x`
    /// - `0^q = 0` for numeric `q > 0`; `0^e` with symbolic `e` is kept
    /// - numeric bases with integer exponents fold exactly (up to
    ///   [`ArenaConfig::max_fold_exponent`](crate::ArenaConfig))
    /// - `(b^e)^k = b^(e*k)` and `(a*b)^k = a^k * b^k` for integer `k`
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::UndefinedExpression`] for `0^0` and for zero
    /// raised to a negative numeric exponent.
    pub fn pow(&mut self, base: ExprHandle, exp: ExprHandle) -> Result<ExprHandle> {
        let exponent = self.as_rational(exp);
        let base_value = self.as_rational(base);

        if let Some(e) = &exponent {
            if e.is_zero() {
                if base_value.as_ref().is_some_and(Zero::is_zero) {
                    return Err(undefined(e.clone()));
                }
                return Ok(self.integer(1));
            }
            if e.is_one() {
                return Ok(base);
            }
        }

        if let Some(b) = &base_value {
            if b.is_zero() {
                return match exponent {
                    Some(e) if e.is_positive() => Ok(self.integer(0)),
                    Some(e) => Err(undefined(e)),
                    None => Ok(self.intern(ExprNode::Pow { base, exp })),
                };
            }
            if let Some(e) = &exponent {
                if b.is_one() {
                    return Ok(self.integer(1));
                }
                if let Some(value) = self.fold_numeric_power(b, e) {
                    return Ok(self.number(value));
                }
            }
        }

        if matches!(self.get(exp), ExprNode::Integer(_)) {
            match self.get(base) {
                ExprNode::Pow {
                    base: inner,
                    exp: inner_exp,
                } => {
                    let (inner, inner_exp) = (*inner, *inner_exp);
                    let folded = self.mul([inner_exp, exp])?;
                    return self.pow(inner, folded);
                }
                ExprNode::Mul(factors) => {
                    let factors = factors.clone();
                    let mut powered = Args::with_capacity(factors.len());
                    for factor in factors {
                        powered.push(self.pow(factor, exp)?);
                    }
                    return self.mul(powered);
                }
                _ => {}
            }
        }

        Ok(self.intern(ExprNode::Pow { base, exp }))
    }

    /// Creates an uninterpreted function application.
    ///
    /// Arguments keep their order; no simplification is applied.
    pub fn apply(&mut self, name: &str, args: impl IntoIterator<Item = ExprHandle>) -> ExprHandle {
        let name = self.intern_name(name);
        self.apply_id(name, args)
    }

    pub(crate) fn apply_id(
        &mut self,
        name: NameId,
        args: impl IntoIterator<Item = ExprHandle>,
    ) -> ExprHandle {
        self.intern(ExprNode::Function {
            name,
            args: args.into_iter().collect(),
        })
    }

    /// Creates `-x`, i.e. `(-1) * x`.
    ///
    /// # Errors
    ///
    /// See [`ExprArena::mul`].
    pub fn neg(&mut self, x: ExprHandle) -> Result<ExprHandle> {
        let minus_one = self.integer(-1);
        self.mul([minus_one, x])
    }

    /// Creates `a - b`.
    ///
    /// # Errors
    ///
    /// See [`ExprArena::mul`].
    pub fn sub(&mut self, a: ExprHandle, b: ExprHandle) -> Result<ExprHandle> {
        let negated = self.neg(b)?;
        Ok(self.add([a, negated]))
    }

    /// Creates `a / b`, i.e. `a * b^-1`.
    ///
    /// # Errors
    ///
    /// Returns [`ExprError::UndefinedExpression`] when `b` is zero.
    pub fn div(&mut self, a: ExprHandle, b: ExprHandle) -> Result<ExprHandle> {
        let minus_one = self.integer(-1);
        let inverse = self.pow(b, minus_one)?;
        self.mul([a, inverse])
    }

    /// Splits a term into its numeric coefficient and the remaining part.
    fn split_coefficient(&mut self, term: ExprHandle) -> (Rational, ExprHandle) {
        let (coefficient, rest): (Rational, Args) = match self.get(term) {
            ExprNode::Mul(factors) => match factors.first().and_then(|f| self.as_rational(*f)) {
                Some(c) => (c, factors[1..].iter().copied().collect()),
                None => return (Rational::one(), term),
            },
            _ => return (Rational::one(), term),
        };
        (coefficient, self.product_of_sorted(rest))
    }

    /// `c * (t1 + t2 + ...)` as `c*t1 + c*t2 + ...`.
    fn distribute(&mut self, coefficient: Rational, terms: &[ExprHandle]) -> Result<ExprHandle> {
        let c = self.number(coefficient);
        let mut scaled = Args::with_capacity(terms.len());
        for &term in terms {
            scaled.push(self.mul([c, term])?);
        }
        Ok(self.add(scaled))
    }

    /// Rebuilds `coefficient * rest` where `rest` has no numeric factor.
    ///
    /// `rest` is never a sum: `mul` distributes numbers over sums, so no
    /// product has the shape `c * (x + y)`.
    fn scale(&mut self, coefficient: Rational, rest: ExprHandle) -> ExprHandle {
        debug_assert!(!matches!(self.get(rest), ExprNode::Add(_)));
        if coefficient.is_one() {
            return rest;
        }
        let mut factors: Args = match self.get(rest) {
            ExprNode::Mul(factors) => factors.clone(),
            _ => smallvec![rest],
        };
        factors.insert(0, self.number(coefficient));
        self.intern(ExprNode::Mul(factors))
    }

    /// Wraps already sorted, already combined, non-numeric factors.
    fn product_of_sorted(&mut self, factors: Args) -> ExprHandle {
        match factors.len() {
            0 => self.integer(1),
            1 => factors[0],
            _ => self.intern(ExprNode::Mul(factors)),
        }
    }

    fn fold_numeric_power(&self, base: &Rational, exp: &Rational) -> Option<Rational> {
        let k = exp.to_i64()?;
        if k.unsigned_abs() > u64::from(self.config().max_fold_exponent) {
            return None;
        }
        base.pow_i(k)
    }
}

fn undefined(exponent: Rational) -> ExprError {
    debug!(%exponent, "zero raised to a non-positive power");
    ExprError::UndefinedExpression { exponent }
}
