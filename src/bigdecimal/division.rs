use core::cmp::max;

use num_traits::{One, Zero};

use super::{checked_scale, decimal_digits, round_quotient, ten_to_the, BigDecimal};
use crate::bigint::BigInt;
use crate::context::MathContext;
use crate::error::{Error, Result};
use crate::rounding::{Fraction, RoundingMode};

/// `(a × 10^shift, b)` for a non-negative `shift`, `(a, b × 10^-shift)`
/// otherwise.
fn scale_operands(a: &BigInt, b: &BigInt, shift: i128, op: &'static str) -> Result<(BigInt, BigInt)> {
    let power = u64::try_from(shift.unsigned_abs())
        .map_err(|_| Error::domain(op, alloc::format!("scale difference {shift} overflows")))?;
    if power == 0 {
        Ok((a.clone(), b.clone()))
    } else if shift > 0 {
        Ok((a * ten_to_the(power), b.clone()))
    } else {
        Ok((a.clone(), b * ten_to_the(power)))
    }
}

impl BigDecimal {
    fn check_divisor(divisor: &BigDecimal, op: &'static str) -> Result<()> {
        if divisor.is_zero() {
            Err(Error::DivideByZero { op })
        } else {
            Ok(())
        }
    }

    fn preferred_scale(&self, divisor: &BigDecimal, op: &'static str) -> Result<i64> {
        checked_scale(op, i128::from(self.scale) - i128::from(divisor.scale))
    }

    /// `self / divisor` under `mc`.
    ///
    /// With a finite precision the quotient is rounded to that many
    /// significant digits. Under an unlimited context the quotient must have
    /// a terminating decimal expansion, otherwise the division fails with
    /// [`Error::NonTerminating`].
    ///
    /// Exact quotients keep as few trailing zeros as they can without going
    /// below the preferred scale `self.scale() - divisor.scale()`.
    ///
    /// ```
    /// use bigdec::{BigDecimal, Error, MathContext};
    /// use core::str::FromStr;
    ///
    /// let one = BigDecimal::from_str("1").unwrap();
    /// let three = BigDecimal::from_str("3").unwrap();
    /// let third = one.divide(&three, &MathContext::new(5)).unwrap();
    /// assert_eq!(third.to_string(), "0.33333");
    /// assert!(matches!(
    ///     one.divide(&three, &MathContext::UNLIMITED),
    ///     Err(Error::NonTerminating { .. })
    /// ));
    /// ```
    pub fn divide(&self, divisor: &BigDecimal, mc: &MathContext) -> Result<BigDecimal> {
        const OP: &str = "divide";

        BigDecimal::check_divisor(divisor, OP)?;
        let preferred = self.preferred_scale(divisor, OP)?;
        if self.is_zero() {
            return Ok(BigDecimal::new(BigInt::zero(), preferred));
        }

        if mc.is_unlimited() {
            self.divide_exact(divisor, preferred)
        } else {
            self.divide_rounded(divisor, preferred, mc)
        }
    }

    /// Exact quotient, or `NonTerminating` when the reduced denominator has a
    /// prime factor other than 2 and 5.
    fn divide_exact(&self, divisor: &BigDecimal, preferred: i64) -> Result<BigDecimal> {
        const OP: &str = "divide";

        let g = self.int_val.gcd(&divisor.int_val);
        let mut num = self.int_val.div_rem_nonzero(&g).0;
        let mut den = divisor.int_val.div_rem_nonzero(&g).0;
        if den.is_negative() {
            num = -num;
            den = -den;
        }

        let twos = den.lowest_set_bit().unwrap_or(0);
        den = den.shift_right(twos as usize);
        let mut fives = 0u64;
        loop {
            let (q, r) = den.div_rem_digit(5);
            if r != 0 {
                break;
            }
            den = q;
            fives += 1;
        }
        if !den.is_one() {
            log::debug!("rejecting non-terminating quotient {self} / {divisor}");
            return Err(Error::NonTerminating {
                dividend: alloc::format!("{self}"),
                divisor: alloc::format!("{divisor}"),
            });
        }

        // num / (2^twos 5^fives) == num × 2^(k - twos) × 5^(k - fives) / 10^k
        let k = max(twos, fives);
        let q = num
            * BigInt::from(2u32).pow_u64(k - twos)
            * BigInt::from(5u32).pow_u64(k - fives);
        let scale = checked_scale(OP, i128::from(preferred) + i128::from(k))?;
        Ok(BigDecimal::new(q, scale).strip_zeros_to(preferred))
    }

    /// Quotient with `precision + 1` or more significant digits, rounded
    /// with the remainder as a sticky bit.
    fn divide_rounded(&self, divisor: &BigDecimal, preferred: i64, mc: &MathContext) -> Result<BigDecimal> {
        const OP: &str = "divide";

        let precision = u64::from(mc.precision());
        // |a| × 10^shift / |b| >= 10^precision
        let shift = (i128::from(precision) + 1 + i128::from(decimal_digits(&divisor.int_val))
            - i128::from(self.precision()))
        .max(0);
        let (num, den) = scale_operands(&self.int_val, &divisor.int_val, shift, OP)?;
        let (q, r) = num.div_rem_nonzero(&den);
        let scale = checked_scale(OP, i128::from(preferred) + shift)?;
        let quotient = BigDecimal::new(q, scale);

        if !r.is_zero() {
            return quotient.round_with_sticky(mc, true, OP);
        }
        let stripped = quotient.strip_zeros_to(preferred);
        if stripped.precision() <= precision {
            Ok(stripped)
        } else {
            stripped.round_with_sticky(mc, false, OP)
        }
    }

    /// `self / divisor` at exactly `scale`, rounded with `mode`.
    ///
    /// ```
    /// use bigdec::{BigDecimal, RoundingMode};
    /// use core::str::FromStr;
    ///
    /// let two = BigDecimal::from_str("2").unwrap();
    /// let three = BigDecimal::from_str("3").unwrap();
    /// let q = two.divide_with_scale(&three, 3, RoundingMode::HalfUp).unwrap();
    /// assert_eq!(q.to_string(), "0.667");
    /// ```
    pub fn divide_with_scale(&self, divisor: &BigDecimal, scale: i64, mode: RoundingMode) -> Result<BigDecimal> {
        const OP: &str = "divide_with_scale";

        BigDecimal::check_divisor(divisor, OP)?;
        let preferred = self.preferred_scale(divisor, OP)?;
        let shift = i128::from(scale) - i128::from(preferred);
        let (num, den) = scale_operands(&self.int_val, &divisor.int_val, shift, OP)?;
        let (q, r) = num.div_rem_nonzero(&den);
        let sign = self.signum() * divisor.signum();
        let q = round_quotient(q, Fraction::of(&r, &den), sign, mode, OP)?;
        Ok(BigDecimal::new(q, scale))
    }

    /// The integer part of `self / divisor`, truncated toward zero.
    ///
    /// The result is brought as close as it exactly can to the preferred
    /// scale `self.scale() - divisor.scale()`: zeros are appended when that
    /// scale is positive and trailing zeros stripped when it is negative.
    pub fn divide_to_integral_value(&self, divisor: &BigDecimal) -> Result<BigDecimal> {
        const OP: &str = "divide_to_integral_value";

        BigDecimal::check_divisor(divisor, OP)?;
        let preferred = self.preferred_scale(divisor, OP)?;
        let q = BigDecimal::new(self.integral_quotient(divisor, OP)?, 0);
        if preferred > 0 {
            q.set_scale(preferred, RoundingMode::Unnecessary)
        } else {
            Ok(q.strip_zeros_to(preferred))
        }
    }

    /// [`divide_to_integral_value`](BigDecimal::divide_to_integral_value)
    /// limited to the precision of `mc`.
    ///
    /// Fails with [`Error::PrecisionOverflow`] when the integer part needs
    /// more digits than `mc` allows. Zeros toward a positive preferred scale
    /// are appended only while they fit.
    pub fn divide_to_integral_value_with_context(
        &self,
        divisor: &BigDecimal,
        mc: &MathContext,
    ) -> Result<BigDecimal> {
        const OP: &str = "divide_to_integral_value_with_context";

        if mc.is_unlimited() {
            return self.divide_to_integral_value(divisor);
        }
        BigDecimal::check_divisor(divisor, OP)?;
        let preferred = self.preferred_scale(divisor, OP)?;
        let q = BigDecimal::new(self.integral_quotient(divisor, OP)?, 0);

        let precision = u64::from(mc.precision());
        let required = q.strip_trailing_zeros().precision();
        if required > precision {
            return Err(Error::PrecisionOverflow {
                op: OP,
                required,
                precision: mc.precision(),
            });
        }

        if preferred > 0 {
            let room = precision.saturating_sub(q.precision());
            let pad = i64::try_from(room).map_or(preferred, |room| room.min(preferred));
            return q.set_scale(pad, RoundingMode::Unnecessary);
        }
        let q = q.strip_zeros_to(preferred);
        if q.precision() > precision {
            // only trailing zeros are dropped here
            q.round_with_sticky(mc, false, OP)
        } else {
            Ok(q)
        }
    }

    /// `trunc(self / divisor)` as an integer.
    fn integral_quotient(&self, divisor: &BigDecimal, op: &'static str) -> Result<BigInt> {
        // a / 10^sa ÷ b / 10^sb == a × 10^(sb - sa) / b
        let shift = i128::from(divisor.scale) - i128::from(self.scale);
        let (num, den) = scale_operands(&self.int_val, &divisor.int_val, shift, op)?;
        Ok(num.div_rem_nonzero(&den).0)
    }

    /// `(q, r)` where `q` is
    /// [`divide_to_integral_value`](BigDecimal::divide_to_integral_value) and
    /// `r = self - q × divisor`.
    pub fn divide_and_remainder(&self, divisor: &BigDecimal) -> Result<(BigDecimal, BigDecimal)> {
        let q = self.divide_to_integral_value(divisor)?;
        let r = self - &q * divisor;
        Ok((q, r))
    }

    /// [`divide_and_remainder`](BigDecimal::divide_and_remainder) with the
    /// quotient limited to the precision of `mc`.
    pub fn divide_and_remainder_with_context(
        &self,
        divisor: &BigDecimal,
        mc: &MathContext,
    ) -> Result<(BigDecimal, BigDecimal)> {
        let q = self.divide_to_integral_value_with_context(divisor, mc)?;
        let r = self - &q * divisor;
        Ok((q, r))
    }

    /// `self - trunc(self / divisor) × divisor`; takes the sign of `self`.
    pub fn remainder(&self, divisor: &BigDecimal) -> Result<BigDecimal> {
        Ok(self.divide_and_remainder(divisor)?.1)
    }
}
