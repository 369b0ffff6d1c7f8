//! Property-based tests for canonical forms.

#[cfg(test)]
mod tests {
    use std::cmp::Ordering;

    use proptest::prelude::*;
    use proptest::test_runner::TestCaseError;

    use crate::{ExprArena, ExprHandle, ExprNode, Result};

    /// A construction recipe, replayed against an arena.
    #[derive(Debug, Clone)]
    enum Recipe {
        Int(i64),
        Frac(i64, i64),
        Sym(u8),
        Add(Vec<Recipe>),
        Mul(Vec<Recipe>),
        Neg(Box<Recipe>),
        Sub(Box<Recipe>, Box<Recipe>),
        Div(Box<Recipe>, Box<Recipe>),
        /// `base ^ (n / d)`
        Pow(Box<Recipe>, i64, i64),
        Apply(u8, Vec<Recipe>),
    }

    fn recipe() -> impl Strategy<Value = Recipe> {
        let leaf = prop_oneof![
            (-4i64..5).prop_map(Recipe::Int),
            (-4i64..5, 1i64..4).prop_map(|(n, d)| Recipe::Frac(n, d)),
            (0u8..3).prop_map(Recipe::Sym),
        ];
        leaf.prop_recursive(3, 24, 4, |inner| {
            prop_oneof![
                prop::collection::vec(inner.clone(), 0..4).prop_map(Recipe::Add),
                prop::collection::vec(inner.clone(), 0..4).prop_map(Recipe::Mul),
                inner.clone().prop_map(|a| Recipe::Neg(Box::new(a))),
                (inner.clone(), inner.clone())
                    .prop_map(|(a, b)| Recipe::Sub(Box::new(a), Box::new(b))),
                (inner.clone(), inner.clone())
                    .prop_map(|(a, b)| Recipe::Div(Box::new(a), Box::new(b))),
                (inner.clone(), -3i64..4, 1i64..3)
                    .prop_map(|(b, n, d)| Recipe::Pow(Box::new(b), n, d)),
                (0u8..2, prop::collection::vec(inner, 0..3))
                    .prop_map(|(f, args)| Recipe::Apply(f, args)),
            ]
        })
    }

    fn build(arena: &mut ExprArena, r: &Recipe) -> Result<ExprHandle> {
        Ok(match r {
            Recipe::Int(n) => arena.integer(*n),
            Recipe::Frac(n, d) => arena.rational(*n, *d)?,
            Recipe::Sym(i) => arena.symbol(["x", "y", "z"][*i as usize]),
            Recipe::Add(terms) => {
                let terms = terms
                    .iter()
                    .map(|t| build(arena, t))
                    .collect::<Result<Vec<_>>>()?;
                arena.add(terms)
            }
            Recipe::Mul(factors) => {
                let factors = factors
                    .iter()
                    .map(|f| build(arena, f))
                    .collect::<Result<Vec<_>>>()?;
                arena.mul(factors)?
            }
            Recipe::Neg(a) => {
                let a = build(arena, a)?;
                arena.neg(a)?
            }
            Recipe::Sub(a, b) => {
                let (a, b) = (build(arena, a)?, build(arena, b)?);
                arena.sub(a, b)?
            }
            Recipe::Div(a, b) => {
                let (a, b) = (build(arena, a)?, build(arena, b)?);
                arena.div(a, b)?
            }
            Recipe::Pow(base, n, d) => {
                let base = build(arena, base)?;
                let exp = arena.rational(*n, *d)?;
                arena.pow(base, exp)?
            }
            Recipe::Apply(f, args) => {
                let args = args
                    .iter()
                    .map(|a| build(arena, a))
                    .collect::<Result<Vec<_>>>()?;
                arena.apply(["f", "g"][*f as usize], args)
            }
        })
    }

    /// Builds a recipe, rejecting the case if it divides by zero.
    fn built(
        arena: &mut ExprArena,
        r: &Recipe,
    ) -> std::result::Result<ExprHandle, TestCaseError> {
        build(arena, r).map_err(|e| TestCaseError::reject(e.to_string()))
    }

    fn is_strictly_sorted(arena: &ExprArena, items: &[ExprHandle]) -> bool {
        items
            .windows(2)
            .all(|w| arena.compare(w[0], w[1]) == Ordering::Less)
    }

    /// Checks the node-level invariants of every sub-expression.
    fn check_canonical(
        arena: &ExprArena,
        root: ExprHandle,
    ) -> std::result::Result<(), TestCaseError> {
        for h in arena.visit(root) {
            match arena.get(h) {
                ExprNode::Rational(q) => {
                    prop_assert!(q.to_integer().is_none(), "integral rational {:?}", q);
                }
                ExprNode::Add(terms) => {
                    prop_assert!(terms.len() >= 2);
                    prop_assert!(terms.iter().all(|t| !matches!(arena.get(*t), ExprNode::Add(_))));
                    prop_assert!(terms.iter().skip(1).all(|t| !arena.get(*t).is_number()));
                    prop_assert!(!arena.get(terms[0]).is_zero());
                    prop_assert!(is_strictly_sorted(arena, terms));
                }
                ExprNode::Mul(factors) => {
                    prop_assert!(factors.len() >= 2);
                    prop_assert!(factors.iter().all(|f| !matches!(arena.get(*f), ExprNode::Mul(_))));
                    prop_assert!(factors.iter().skip(1).all(|f| !arena.get(*f).is_number()));
                    let lead = arena.get(factors[0]);
                    prop_assert!(!lead.is_zero() && !lead.is_one());
                    let symbolic = if lead.is_number() { &factors[1..] } else { &factors[..] };
                    prop_assert!(is_strictly_sorted(arena, symbolic));
                    if lead.is_number() && factors.len() == 2 {
                        prop_assert!(!matches!(arena.get(factors[1]), ExprNode::Add(_)));
                    }
                }
                ExprNode::Pow { exp, .. } => {
                    let exp = arena.get(*exp);
                    prop_assert!(!exp.is_zero() && !exp.is_one());
                }
                _ => {}
            }
        }
        Ok(())
    }

    proptest! {
        #[test]
        fn constructors_produce_canonical_nodes(a in recipe()) {
            let mut arena = ExprArena::new();
            let a = built(&mut arena, &a)?;
            check_canonical(&arena, a)?;
        }

        #[test]
        fn add_is_order_independent(a in recipe(), b in recipe(), c in recipe()) {
            let mut arena = ExprArena::new();
            let (a, b, c) = (built(&mut arena, &a)?, built(&mut arena, &b)?, built(&mut arena, &c)?);
            let abc = arena.add([a, b, c]);
            prop_assert_eq!(abc, arena.add([c, a, b]));
            prop_assert_eq!(abc, arena.add([b, c, a]));
            check_canonical(&arena, abc)?;
        }

        #[test]
        fn mul_is_order_independent(a in recipe(), b in recipe(), c in recipe()) {
            let mut arena = ExprArena::new();
            let (a, b, c) = (built(&mut arena, &a)?, built(&mut arena, &b)?, built(&mut arena, &c)?);
            let abc = arena.mul([a, b, c]);
            prop_assert_eq!(&abc, &arena.mul([c, a, b]));
            prop_assert_eq!(&abc, &arena.mul([b, c, a]));
            if let Ok(abc) = abc {
                check_canonical(&arena, abc)?;
            }
        }

        #[test]
        fn add_flattens(a in recipe(), b in recipe(), c in recipe()) {
            let mut arena = ExprArena::new();
            let (a, b, c) = (built(&mut arena, &a)?, built(&mut arena, &b)?, built(&mut arena, &c)?);
            let inner = arena.add([a, b]);
            let nested = arena.add([inner, c]);
            prop_assert_eq!(nested, arena.add([a, b, c]));
        }

        #[test]
        fn mul_flattens(a in recipe(), b in recipe(), c in recipe()) {
            let mut arena = ExprArena::new();
            let (a, b, c) = (built(&mut arena, &a)?, built(&mut arena, &b)?, built(&mut arena, &c)?);
            let inner = arena.mul([a, b]);
            prop_assume!(inner.is_ok());
            let nested = arena.mul([inner.unwrap(), c]);
            prop_assert_eq!(nested, arena.mul([a, b, c]));
        }

        #[test]
        fn identities_hold(a in recipe()) {
            let mut arena = ExprArena::new();
            let a = built(&mut arena, &a)?;
            let zero = arena.integer(0);
            let one = arena.integer(1);
            prop_assert_eq!(arena.add([a, zero]), a);
            prop_assert_eq!(arena.mul([a, one]), Ok(a));
            prop_assert_eq!(arena.mul([a, zero]), Ok(zero));
            prop_assert_eq!(arena.pow(a, one), Ok(a));
            if a != zero {
                prop_assert_eq!(arena.pow(a, zero), Ok(one));
            }
        }

        #[test]
        fn self_cancellation(a in recipe()) {
            let mut arena = ExprArena::new();
            let a = built(&mut arena, &a)?;
            let zero = arena.integer(0);
            let one = arena.integer(1);
            prop_assert_eq!(arena.sub(a, a), Ok(zero));
            let negated = arena.neg(a)?;
            prop_assert_eq!(arena.add([negated, a]), zero);
            if a != zero {
                prop_assert_eq!(arena.div(a, a), Ok(one));
            }
        }

        #[test]
        fn constructors_fix_canonical_nodes(a in recipe()) {
            let mut arena = ExprArena::new();
            let a = built(&mut arena, &a)?;
            let nodes: Vec<_> = arena.visit(a).collect();
            for node in nodes {
                let rebuilt = match arena.get(node).clone() {
                    ExprNode::Add(terms) => Ok(arena.add(terms)),
                    ExprNode::Mul(factors) => arena.mul(factors),
                    ExprNode::Pow { base, exp } => arena.pow(base, exp),
                    _ => Ok(node),
                };
                prop_assert_eq!(rebuilt, Ok(node));
            }
            let len = arena.len();
            prop_assert_eq!(arena.map_bottom_up(a, |_, n| Ok(n)), Ok(a));
            prop_assert_eq!(arena.len(), len);
        }

        #[test]
        fn compare_is_a_total_order(a in recipe(), b in recipe(), c in recipe()) {
            let mut arena = ExprArena::new();
            let (a, b, c) = (built(&mut arena, &a)?, built(&mut arena, &b)?, built(&mut arena, &c)?);

            prop_assert_eq!(arena.compare(a, b) == Ordering::Equal, a == b);
            prop_assert_eq!(arena.compare(a, b), arena.compare(b, a).reverse());
            if arena.compare(a, b) != Ordering::Greater && arena.compare(b, c) != Ordering::Greater {
                prop_assert_ne!(arena.compare(a, c), Ordering::Greater);
            }
        }

        #[test]
        fn substitution_is_idempotent(a in recipe(), v in recipe()) {
            let mut arena = ExprArena::new();
            let a = built(&mut arena, &a)?;
            let v = built(&mut arena, &v)?;
            let x = arena.symbol("x");
            prop_assume!(!arena.contains(v, x));

            let once = arena.replace(a, x, v);
            prop_assume!(once.is_ok());
            let once = once.unwrap();
            prop_assert_eq!(arena.replace(once, x, v), Ok(once));
            prop_assert!(!arena.free_symbols(once).contains(&x));
            check_canonical(&arena, once)?;
        }

        #[test]
        fn independent_arenas_agree_on_shape(a in recipe(), b in recipe()) {
            let mut first = ExprArena::new();
            let mut second = ExprArena::new();
            // build in opposite orders so handle indices differ
            let (fa, fb) = (built(&mut first, &a)?, built(&mut first, &b)?);
            let (sb, sa) = (built(&mut second, &b)?, built(&mut second, &a)?);
            prop_assert_eq!(first.compare(fa, fb), second.compare(sa, sb));
        }
    }
}
