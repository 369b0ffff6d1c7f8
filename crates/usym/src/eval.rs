//! Exact evaluation of expressions.
//!
//! Symbols are bound to rationals, functions are given exact
//! interpretations by name, and the tree is folded bottom-up. Anything that
//! has no exact rational value is reported instead of approximated.

use std::collections::HashMap;
use std::fmt;
use std::hash::BuildHasher;

use num_traits::{One, Zero};
use rustc_hash::{FxHashMap, FxHashSet};
use tracing::debug;
use usym_core::{ExprArena, ExprError, ExprHandle, ExprNode, Result};
use usym_integers::Rational;

/// An exact interpretation of a function over rationals.
///
/// Returning `None` means the value is not an exact rational.
pub type ExactFn = Box<dyn Fn(&[Rational]) -> Option<Rational> + Send + Sync>;

/// Registry of function interpretations used during evaluation.
#[derive(Default)]
pub struct Evaluator {
    functions: FxHashMap<String, ExactFn>,
}

impl fmt::Debug for Evaluator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut names: Vec<_> = self.functions.keys().collect();
        names.sort();
        f.debug_struct("Evaluator").field("functions", &names).finish()
    }
}

impl Evaluator {
    /// Creates an evaluator with no registered functions.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the interpretation of `name`, replacing any previous one.
    pub fn register<F>(&mut self, name: impl Into<String>, f: F) -> &mut Self
    where
        F: Fn(&[Rational]) -> Option<Rational> + Send + Sync + 'static,
    {
        self.functions.insert(name.into(), Box::new(f));
        self
    }

    /// Returns true if `name` has an interpretation.
    #[must_use]
    pub fn is_registered(&self, name: &str) -> bool {
        self.functions.contains_key(name)
    }

    /// Evaluates `expr` with the given symbol bindings.
    ///
    /// # Errors
    ///
    /// - [`ExprError::UnboundSymbol`] for a symbol without a binding
    /// - [`ExprError::UnknownFunction`] for an unregistered function
    /// - [`ExprError::Inexact`] for a power with a non-integer exponent or a
    ///   function that declines to produce an exact value
    /// - [`ExprError::UndefinedExpression`] for zero raised to a
    ///   non-positive power
    pub fn evaluate<S: BuildHasher>(
        &self,
        arena: &ExprArena,
        expr: ExprHandle,
        bindings: &HashMap<ExprHandle, Rational, S>,
    ) -> Result<Rational> {
        let mut values: FxHashMap<ExprHandle, Rational> = FxHashMap::default();
        for handle in arena.post_order(expr) {
            if values.contains_key(&handle) {
                continue;
            }
            let value = self.evaluate_node(arena, handle, bindings, &values)?;
            values.insert(handle, value);
        }
        values.remove(&expr).ok_or(ExprError::Inexact)
    }

    /// Substitutes expressions into `expr`, then evaluates the canonical
    /// result with no further bindings.
    ///
    /// # Errors
    ///
    /// Construction errors from the substitution, then any error of
    /// [`Evaluator::evaluate`].
    pub fn substitute_and_evaluate<S: BuildHasher>(
        &self,
        arena: &mut ExprArena,
        expr: ExprHandle,
        mapping: &HashMap<ExprHandle, ExprHandle, S>,
    ) -> Result<Rational> {
        let substituted = arena.substitute(expr, mapping)?;
        self.evaluate(arena, substituted, &FxHashMap::default())
    }

    /// Compiles `expr` into a callable over positional parameters.
    ///
    /// # Errors
    ///
    /// - [`ExprError::NotASymbol`] if a parameter is not a symbol
    /// - [`ExprError::UnboundSymbol`] if `expr` has a free symbol that is
    ///   not a parameter
    pub fn compile<'a>(
        &'a self,
        arena: &'a ExprArena,
        expr: ExprHandle,
        params: &[ExprHandle],
    ) -> Result<CompiledExpr<'a>> {
        if params.iter().any(|&p| arena.symbol_name(p).is_none()) {
            return Err(ExprError::NotASymbol);
        }

        let declared: FxHashSet<ExprHandle> = params.iter().copied().collect();
        let mut missing: Vec<&str> = arena
            .free_symbols(expr)
            .into_iter()
            .filter(|s| !declared.contains(s))
            .filter_map(|s| arena.symbol_name(s))
            .collect();
        missing.sort_unstable();
        if let Some(first) = missing.first() {
            debug!(symbol = first, "compiled expression has an undeclared symbol");
            return Err(ExprError::UnboundSymbol((*first).to_string()));
        }

        Ok(CompiledExpr {
            evaluator: self,
            arena,
            expr,
            params: params.to_vec(),
        })
    }

    fn evaluate_node<S: BuildHasher>(
        &self,
        arena: &ExprArena,
        handle: ExprHandle,
        bindings: &HashMap<ExprHandle, Rational, S>,
        values: &FxHashMap<ExprHandle, Rational>,
    ) -> Result<Rational> {
        let value_of = |h: &ExprHandle| values.get(h).cloned().ok_or(ExprError::Inexact);

        match arena.get(handle) {
            ExprNode::Integer(_) | ExprNode::Rational(_) => {
                arena.as_rational(handle).ok_or(ExprError::Inexact)
            }
            ExprNode::Symbol(id) => bindings
                .get(&handle)
                .cloned()
                .ok_or_else(|| ExprError::UnboundSymbol(arena.name(*id).to_string())),
            ExprNode::Add(terms) => terms
                .iter()
                .try_fold(Rational::zero(), |acc, t| value_of(t).map(|v| acc + v)),
            ExprNode::Mul(factors) => factors
                .iter()
                .try_fold(Rational::one(), |acc, f| value_of(f).map(|v| acc * v)),
            ExprNode::Pow { base, exp } => {
                let base = value_of(base)?;
                let exp = value_of(exp)?;
                power(&base, exp)
            }
            ExprNode::Function { name, args } => {
                let name = arena.name(*name);
                let f = self
                    .functions
                    .get(name)
                    .ok_or_else(|| ExprError::UnknownFunction(name.to_string()))?;
                let args = args.iter().map(value_of).collect::<Result<Vec<_>>>()?;
                f(&args).ok_or(ExprError::Inexact)
            }
        }
    }
}

fn power(base: &Rational, exp: Rational) -> Result<Rational> {
    let k = exp.to_i64().ok_or(ExprError::Inexact)?;
    if base.is_zero() && k <= 0 {
        return Err(ExprError::UndefinedExpression { exponent: exp });
    }
    base.pow_i(k).ok_or(ExprError::Inexact)
}

/// An expression bound to an ordered parameter list.
#[derive(Debug)]
pub struct CompiledExpr<'a> {
    evaluator: &'a Evaluator,
    arena: &'a ExprArena,
    expr: ExprHandle,
    params: Vec<ExprHandle>,
}

impl CompiledExpr<'_> {
    /// The parameters, in call order.
    #[must_use]
    pub fn params(&self) -> &[ExprHandle] {
        &self.params
    }

    /// Evaluates the expression with `args` bound positionally.
    ///
    /// # Errors
    ///
    /// [`ExprError::Arity`] when `args.len()` differs from the parameter
    /// count, otherwise any error of [`Evaluator::evaluate`].
    pub fn call(&self, args: &[Rational]) -> Result<Rational> {
        if args.len() != self.params.len() {
            return Err(ExprError::Arity {
                expected: self.params.len(),
                found: args.len(),
            });
        }
        let bindings: FxHashMap<ExprHandle, Rational> = self
            .params
            .iter()
            .copied()
            .zip(args.iter().cloned())
            .collect();
        self.evaluator.evaluate(self.arena, self.expr, &bindings)
    }
}
