use core::iter::{Product, Sum};
use core::ops::{Add, AddAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_traits::{One, Zero};

use super::{checked_scale, decimal_digits, BigDecimal};
use crate::bigint::{forward_all_binop, forward_assign_op, BigInt};
use crate::context::MathContext;
use crate::error::{Error, Result};

/// Largest exponent magnitude accepted by [`BigDecimal::pow_with_context`].
const MAX_POW_EXPONENT: i64 = 999_999_999;

impl Add<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    /// Exact sum at the larger of the two scales.
    fn add(self, other: &BigDecimal) -> BigDecimal {
        let (a, b, scale) = self.align(other);
        BigDecimal::new(&*a + &*b, scale)
    }
}

impl Sub<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    fn sub(self, other: &BigDecimal) -> BigDecimal {
        let (a, b, scale) = self.align(other);
        BigDecimal::new(&*a - &*b, scale)
    }
}

impl Mul<&BigDecimal> for &BigDecimal {
    type Output = BigDecimal;

    /// Exact product; the scales add.
    ///
    /// # Panics
    ///
    /// If the sum of the scales does not fit in an `i64`.
    fn mul(self, other: &BigDecimal) -> BigDecimal {
        let scale = self.scale.checked_add(other.scale).expect("scale overflow");
        BigDecimal::new(&self.int_val * &other.int_val, scale)
    }
}

forward_all_binop!(impl Add for BigDecimal, add);
forward_all_binop!(impl Sub for BigDecimal, sub);
forward_all_binop!(impl Mul for BigDecimal, mul);
forward_assign_op!(impl AddAssign for BigDecimal, add_assign, Add, add);
forward_assign_op!(impl SubAssign for BigDecimal, sub_assign, Sub, sub);
forward_assign_op!(impl MulAssign for BigDecimal, mul_assign, Mul, mul);

impl Neg for BigDecimal {
    type Output = BigDecimal;

    #[inline]
    fn neg(self) -> BigDecimal {
        BigDecimal::new(-self.int_val, self.scale)
    }
}

impl Neg for &BigDecimal {
    type Output = BigDecimal;

    #[inline]
    fn neg(self) -> BigDecimal {
        BigDecimal::new(-&self.int_val, self.scale)
    }
}

impl<T> Sum<T> for BigDecimal
where
    BigDecimal: Add<T, Output = BigDecimal>,
{
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(BigDecimal::zero(), |a, b| a + b)
    }
}

impl<T> Product<T> for BigDecimal
where
    BigDecimal: Mul<T, Output = BigDecimal>,
{
    fn product<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(BigDecimal::one(), |a, b| a * b)
    }
}

impl BigDecimal {
    /// `self^n`, exactly, at scale `scale × n`.
    pub fn pow(&self, n: u32) -> Result<BigDecimal> {
        let scale = checked_scale("pow", i128::from(self.scale) * i128::from(n))?;
        Ok(BigDecimal::new(self.int_val.pow(n), scale))
    }

    /// `self^n` rounded once to `mc`.
    ///
    /// The power is computed exactly and rounded at the end; a negative `n`
    /// divides one by that power under `mc`, so it needs a finite precision.
    /// `0^0` is one.
    ///
    /// Fails with [`Error::Domain`] when `|n|` exceeds 999 999 999 or when
    /// `n` is negative under an unlimited context, and with
    /// [`Error::PrecisionOverflow`] when `n` has more digits than a finite
    /// precision allows.
    pub fn pow_with_context(&self, n: i64, mc: &MathContext) -> Result<BigDecimal> {
        const OP: &str = "pow_with_context";

        if !(-MAX_POW_EXPONENT..=MAX_POW_EXPONENT).contains(&n) {
            return Err(Error::domain(OP, alloc::format!("exponent {n} out of range")));
        }
        if n < 0 && mc.is_unlimited() {
            return Err(Error::domain(OP, "negative exponent needs a finite precision"));
        }
        if !mc.is_unlimited() {
            let required = decimal_digits(&BigInt::from(n));
            if required > u64::from(mc.precision()) {
                return Err(Error::PrecisionOverflow {
                    op: OP,
                    required,
                    precision: mc.precision(),
                });
            }
        }
        if n == 0 {
            return Ok(BigDecimal::one());
        }

        // |n| <= 999_999_999 fits a u32
        let exact = self.pow(n.unsigned_abs() as u32)?;
        if n > 0 {
            exact.round_with_sticky(mc, false, OP)
        } else {
            BigDecimal::one().divide(&exact, mc)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rounding::RoundingMode;
    use core::str::FromStr;

    fn dec(s: &str) -> BigDecimal {
        BigDecimal::from_str(s).unwrap()
    }

    #[test]
    fn test_add_aligns_scales() {
        let sum = dec("1.10") + dec("2.9");
        assert_eq!(sum.unscaled_value(), &BigInt::from(400));
        assert_eq!(sum.scale(), 2);
        assert_eq!(sum.to_string(), "4.00");
        assert_eq!((dec("1E+2") + dec("0.5")).to_string(), "100.5");
        assert_eq!((dec("-3.25") - dec("1.75")).to_string(), "-5.00");
    }

    #[test]
    fn test_mul_adds_scales() {
        let p = dec("1.5") * dec("-0.20");
        assert_eq!(p.to_string(), "-0.300");
        assert_eq!(p.scale(), 3);
        assert_eq!((dec("2E+3") * dec("0.5")).to_string(), "1.0E+3");
    }

    #[test]
    fn test_assign_ops() {
        let mut x = dec("1.5");
        x += dec("0.25");
        assert_eq!(x, dec("1.75"));
        x -= &dec("2");
        assert_eq!(x, dec("-0.25"));
        x *= dec("4");
        assert_eq!(x, dec("-1.00"));
        assert_eq!(-&x, dec("1.00"));
    }

    #[test]
    fn test_sum_product() {
        let xs = [dec("0.1"), dec("0.2"), dec("0.3")];
        assert_eq!(xs.iter().sum::<BigDecimal>(), dec("0.6"));
        assert_eq!(xs.iter().product::<BigDecimal>(), dec("0.006"));
    }

    #[test]
    fn test_pow() {
        assert_eq!(dec("1.1").pow(2).unwrap(), dec("1.21"));
        assert_eq!(dec("-0.5").pow(3).unwrap(), dec("-0.125"));
        assert_eq!(dec("7.0").pow(0).unwrap(), dec("1"));
        assert!(matches!(
            BigDecimal::new(BigInt::one(), i64::MAX / 2).pow(3),
            Err(Error::Domain { .. })
        ));
    }

    #[test]
    fn test_pow_with_context() {
        let mc = MathContext::with_rounding(5, RoundingMode::HalfEven);
        assert_eq!(dec("1.1").pow_with_context(10, &mc).unwrap(), dec("2.5937"));
        assert_eq!(dec("2").pow_with_context(-2, &mc).unwrap(), dec("0.25"));
        assert_eq!(dec("3").pow_with_context(-1, &mc).unwrap(), dec("0.33333"));
        assert_eq!(dec("0").pow_with_context(0, &mc).unwrap(), dec("1"));
        assert_eq!(
            dec("1.5").pow_with_context(3, &MathContext::UNLIMITED).unwrap(),
            dec("3.375")
        );
    }

    #[test]
    fn test_pow_with_context_errors() {
        let mc = MathContext::new(3);
        assert!(matches!(
            dec("2").pow_with_context(1_000_000_000, &mc),
            Err(Error::Domain { .. })
        ));
        assert!(matches!(
            dec("2").pow_with_context(-2, &MathContext::UNLIMITED),
            Err(Error::Domain { .. })
        ));
        assert_eq!(
            dec("2").pow_with_context(1234, &mc),
            Err(Error::PrecisionOverflow {
                op: "pow_with_context",
                required: 4,
                precision: 3
            })
        );
    }
}
