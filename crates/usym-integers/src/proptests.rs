//! Property-based tests for exact arithmetic.

#[cfg(test)]
mod tests {
    use std::collections::hash_map::DefaultHasher;
    use std::hash::{Hash, Hasher};

    use num_traits::{One, Zero};
    use proptest::prelude::*;

    use crate::{Integer, Rational};

    fn small_int() -> impl Strategy<Value = i64> {
        -1000i64..1000i64
    }

    fn non_zero_int() -> impl Strategy<Value = i64> {
        prop_oneof![(-1000i64..=-1i64), (1i64..=1000i64)]
    }

    fn rational() -> impl Strategy<Value = Rational> {
        (small_int(), non_zero_int()).prop_map(|(n, d)| Rational::from_i64(n, d).unwrap())
    }

    fn hash_of(r: &Rational) -> u64 {
        let mut hasher = DefaultHasher::new();
        r.hash(&mut hasher);
        hasher.finish()
    }

    proptest! {
        #[test]
        fn equal_fractions_are_one_value(n in small_int(), d in non_zero_int(), k in non_zero_int()) {
            let reduced = Rational::from_i64(n, d).unwrap();
            let scaled = Rational::from_i64(n * k, d * k).unwrap();
            prop_assert_eq!(&reduced, &scaled);
            prop_assert_eq!(hash_of(&reduced), hash_of(&scaled));
        }

        #[test]
        fn integral_values_round_trip(n in small_int()) {
            let r = Rational::from(n);
            prop_assert_eq!(r.to_integer(), Some(Integer::new(n)));
            prop_assert_eq!(r.to_i64(), Some(n));
            prop_assert_eq!(Rational::from_integer(Integer::new(n)), r);
        }

        #[test]
        fn rational_add_commutative(a in rational(), b in rational()) {
            prop_assert_eq!(&a + &b, &b + &a);
        }

        #[test]
        fn rational_distributive(a in rational(), b in rational(), c in rational()) {
            prop_assert_eq!(&a * &(&b + &c), &(&a * &b) + &(&a * &c));
        }

        #[test]
        fn order_is_compatible_with_addition(a in rational(), b in rational(), c in rational()) {
            prop_assert_eq!(a.cmp(&b), (&a + &c).cmp(&(&b + &c)));
        }

        #[test]
        fn rational_multiplicative_inverse(n in non_zero_int(), d in non_zero_int()) {
            let a = Rational::from_i64(n, d).unwrap();
            let inv = a.checked_recip().unwrap();
            prop_assert!((a * inv).is_one());
        }

        #[test]
        fn rational_signed_pow_inverts(a in rational(), e in 0i64..6) {
            prop_assume!(!a.is_zero());
            let up = a.pow_i(e).unwrap();
            let down = a.pow_i(-e).unwrap();
            prop_assert!((up * down).is_one());
        }
    }
}
