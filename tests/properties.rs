use std::cmp::Ordering;
use std::str::FromStr;

use bigdec::{BigDecimal, BigInt, MathContext, RoundingMode, Sign};
use num_traits::{One, ToPrimitive, Zero};
use proptest::prelude::*;

fn arb_bigint() -> impl Strategy<Value = BigInt> {
    (any::<bool>(), prop::collection::vec(any::<u32>(), 0..6)).prop_map(|(negative, limbs)| {
        BigInt::new(if negative { Sign::Minus } else { Sign::Plus }, limbs)
    })
}

fn arb_nonzero_bigint() -> impl Strategy<Value = BigInt> {
    arb_bigint().prop_filter("divisor must be non-zero", |n| !n.is_zero())
}

fn arb_decimal() -> impl Strategy<Value = BigDecimal> {
    (arb_bigint(), -20i64..20).prop_map(|(unscaled, scale)| BigDecimal::new(unscaled, scale))
}

fn arb_rounding_mode() -> impl Strategy<Value = RoundingMode> {
    prop::sample::select(RoundingMode::ALL[..7].to_vec())
}

proptest! {
    #[test]
    fn ring_laws(a in arb_bigint(), b in arb_bigint(), c in arb_bigint()) {
        prop_assert_eq!(&a + &b, &b + &a);
        prop_assert_eq!(&a * &b, &b * &a);
        prop_assert_eq!((&a + &b) + &c, &a + (&b + &c));
        prop_assert_eq!((&a * &b) * &c, &a * (&b * &c));
        prop_assert_eq!(&a * (&b + &c), &a * &b + &a * &c);
        prop_assert_eq!(&a - &a, BigInt::zero());
        prop_assert_eq!(&a + -&a, BigInt::zero());
        prop_assert_eq!(&a * BigInt::one(), a.clone());
    }

    #[test]
    fn agrees_with_i128(a in any::<i64>(), b in any::<i64>()) {
        let (x, y) = (BigInt::from(a), BigInt::from(b));
        let (a, b) = (i128::from(a), i128::from(b));
        prop_assert_eq!((&x + &y).to_i128(), Some(a + b));
        prop_assert_eq!((&x - &y).to_i128(), Some(a - b));
        prop_assert_eq!((&x * &y).to_i128(), Some(a * b));
        if b != 0 {
            let (q, r) = x.div_rem(&y).unwrap();
            prop_assert_eq!(q.to_i128(), Some(a / b));
            prop_assert_eq!(r.to_i128(), Some(a % b));
        }
        prop_assert_eq!((&x & &y).to_i128(), Some(a & b));
        prop_assert_eq!((&x ^ &y).to_i128(), Some(a ^ b));
        prop_assert_eq!(x.cmp(&y), a.cmp(&b));
    }

    #[test]
    fn integer_division_identity(a in arb_bigint(), b in arb_nonzero_bigint()) {
        let (q, r) = a.div_rem(&b).unwrap();
        prop_assert_eq!(&q * &b + &r, a.clone());
        prop_assert_eq!(r.cmp_abs(&b), Ordering::Less);
        prop_assert!(r.is_zero() || r.signum() == a.signum());
        let m = b.abs();
        let modulo = a.modulo(&m).unwrap();
        prop_assert!(!modulo.is_negative() && modulo < m);
    }

    #[test]
    fn radix_round_trip(n in arb_bigint(), radix in 2u32..=36) {
        let s = n.to_str_radix(radix).unwrap();
        prop_assert_eq!(BigInt::from_str_radix(&s, radix).unwrap(), n.clone());
        prop_assert_eq!(BigInt::from_str(&n.to_string()).unwrap(), n);
    }

    #[test]
    fn mod_pow_matches_repeated_multiplication(
        base in arb_bigint(),
        exp in 0u32..40,
        modulus in arb_nonzero_bigint(),
    ) {
        let m = modulus.abs();
        let mut naive = BigInt::one().modulo(&m).unwrap();
        for _ in 0..exp {
            naive = (&naive * &base).modulo(&m).unwrap();
        }
        prop_assert_eq!(base.mod_pow(&BigInt::from(exp), &m).unwrap(), naive);
    }

    #[test]
    fn extended_gcd_identity(a in arb_bigint(), b in arb_bigint()) {
        let (g, x, y) = a.extended_gcd(&b);
        prop_assert_eq!(&a * &x + &b * &y, g.clone());
        prop_assert_eq!(g, a.gcd(&b));
    }

    #[test]
    fn decimal_string_round_trip(d in arb_decimal()) {
        prop_assert_eq!(BigDecimal::from_str(&d.to_string()).unwrap(), d.clone());
        let plain = BigDecimal::from_str(&d.to_plain_string()).unwrap();
        prop_assert_eq!(plain.compare_to(&d), Ordering::Equal);
        let eng = BigDecimal::from_str(&d.to_engineering_string()).unwrap();
        prop_assert_eq!(eng.compare_to(&d), Ordering::Equal);
    }

    #[test]
    fn decimal_addition(a in arb_decimal(), b in arb_decimal()) {
        let sum = &a + &b;
        prop_assert_eq!(sum.scale(), a.scale().max(b.scale()));
        prop_assert_eq!(&sum, &(&b + &a));
        prop_assert_eq!((&sum - &b).compare_to(&a), Ordering::Equal);
        prop_assert_eq!(a.compare_to(&b), (&a - &b).signum().cmp(&0));
    }

    #[test]
    fn decimal_division_identity(a in arb_decimal(), b in arb_decimal()) {
        prop_assume!(!b.is_zero());
        let (q, r) = a.divide_and_remainder(&b).unwrap();
        prop_assert_eq!((&q * &b + &r).compare_to(&a), Ordering::Equal);
        prop_assert_eq!(r.abs().compare_to(&b.abs()), Ordering::Less);
    }

    #[test]
    fn rounded_division_stays_within_one_ulp(
        a in arb_decimal(),
        b in arb_decimal(),
        precision in 1u32..30,
        mode in arb_rounding_mode(),
    ) {
        prop_assume!(!b.is_zero() && !a.is_zero());
        let mc = MathContext::with_rounding(precision, mode);
        let q = a.divide(&b, &mc).unwrap();
        prop_assert!(q.precision() <= u64::from(precision));
        // |q * b - a| < ulp(q) * |b|
        let err = (&q * &b - &a).abs();
        prop_assert_eq!(err.compare_to(&(q.ulp() * b.abs())), Ordering::Less);
    }

    #[test]
    fn set_scale_round_trip(d in arb_decimal(), extra in 0i64..10, mode in arb_rounding_mode()) {
        let widened = d.set_scale(d.scale() + extra, RoundingMode::Unnecessary).unwrap();
        prop_assert_eq!(widened.compare_to(&d), Ordering::Equal);
        prop_assert_eq!(widened.set_scale(d.scale(), mode).unwrap(), d);
    }
}
