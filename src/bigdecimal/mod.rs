//! Arbitrary-precision decimals as an unscaled [`BigInt`] and a scale.

use alloc::borrow::Cow;
use core::cmp::Ordering;
use core::fmt;

use num_traits::{One, Zero};

use crate::bigint::BigInt;
use crate::context::MathContext;
use crate::error::{Error, Result};
use crate::rounding::{Fraction, RoundingMode};

mod arithmetic;
mod division;
mod format;
mod parse;
mod serde;

/// An immutable decimal number `unscaled × 10^-scale`.
///
/// Trailing zeros are significant: `1.00` (unscaled 100, scale 2) and `1`
/// (unscaled 1, scale 0) are different values under `==` and `Hash`, and
/// equal under [`compare_to`](BigDecimal::compare_to). Use
/// [`strip_trailing_zeros`](BigDecimal::strip_trailing_zeros) to normalize.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct BigDecimal {
    int_val: BigInt,
    scale: i64,
}

/// `10^n`.
pub(crate) fn ten_to_the(n: u64) -> BigInt {
    BigInt::from(10u32).pow_u64(n)
}

/// Number of decimal digits in `|n|`, 1 for zero.
pub(crate) fn decimal_digits(n: &BigInt) -> u64 {
    if n.is_zero() {
        return 1;
    }
    // 1233 / 4096 < log10(2), so this never overshoots.
    let estimate = ((u128::from(n.bits() - 1) * 1233) >> 12) as u64;
    let mut digits = estimate + 1;
    let mut power = ten_to_the(digits);
    while n.cmp_abs(&power) != Ordering::Less {
        power = power.mul_digit(10);
        digits += 1;
    }
    digits
}

/// Narrows a scale computed in `i128` back to `i64`.
pub(crate) fn checked_scale(op: &'static str, scale: i128) -> Result<i64> {
    i64::try_from(scale).map_err(|_| Error::domain(op, alloc::format!("scale {scale} overflows")))
}

/// Applies `mode` to a truncated quotient `q` given the classified
/// remainder and the sign of the exact value.
pub(crate) fn round_quotient(
    q: BigInt,
    fraction: Fraction,
    sign: i32,
    mode: RoundingMode,
    op: &'static str,
) -> Result<BigInt> {
    match mode.adjustment_for(op, fraction, sign, q.is_odd())? {
        0 => Ok(q),
        adj => Ok(q + BigInt::from(adj)),
    }
}

impl BigDecimal {
    /// `unscaled × 10^-scale`.
    #[inline]
    pub fn new(unscaled: BigInt, scale: i64) -> BigDecimal {
        BigDecimal {
            int_val: unscaled,
            scale,
        }
    }

    /// `unscaled × 10^-scale`, rounded to `mc`.
    pub fn with_context(unscaled: BigInt, scale: i64, mc: &MathContext) -> Result<BigDecimal> {
        BigDecimal::new(unscaled, scale).round(mc)
    }

    #[inline]
    pub fn unscaled_value(&self) -> &BigInt {
        &self.int_val
    }

    #[inline]
    pub fn scale(&self) -> i64 {
        self.scale
    }

    /// Number of significant digits in the unscaled value; 1 for zero.
    pub fn precision(&self) -> u64 {
        decimal_digits(&self.int_val)
    }

    #[inline]
    pub fn signum(&self) -> i32 {
        self.int_val.signum()
    }

    #[inline]
    pub fn is_zero(&self) -> bool {
        self.int_val.is_zero()
    }

    pub fn abs(&self) -> BigDecimal {
        BigDecimal::new(self.int_val.abs(), self.scale)
    }

    /// `precision - 1 - scale`: the exponent of the leading digit.
    pub(crate) fn adjusted_exponent(&self) -> i128 {
        i128::from(self.precision()) - 1 - i128::from(self.scale)
    }

    /// Both unscaled values brought to the larger of the two scales.
    pub(crate) fn align<'a>(&'a self, other: &'a BigDecimal) -> (Cow<'a, BigInt>, Cow<'a, BigInt>, i64) {
        match self.scale.cmp(&other.scale) {
            Ordering::Equal => (Cow::Borrowed(&self.int_val), Cow::Borrowed(&other.int_val), self.scale),
            Ordering::Less => {
                let shift = other.scale.abs_diff(self.scale);
                let a = &self.int_val * ten_to_the(shift);
                (Cow::Owned(a), Cow::Borrowed(&other.int_val), other.scale)
            }
            Ordering::Greater => {
                let shift = self.scale.abs_diff(other.scale);
                let b = &other.int_val * ten_to_the(shift);
                (Cow::Borrowed(&self.int_val), Cow::Owned(b), self.scale)
            }
        }
    }

    /// Numeric comparison, ignoring scale: `2.0` and `2.00` compare equal.
    pub fn compare_to(&self, other: &BigDecimal) -> Ordering {
        let (sa, sb) = (self.signum(), other.signum());
        if sa != sb {
            return sa.cmp(&sb);
        }
        if sa == 0 {
            return Ordering::Equal;
        }
        // Compare leading-digit positions first to avoid rescaling.
        match self.adjusted_exponent().cmp(&other.adjusted_exponent()) {
            Ordering::Equal => {}
            by_exponent => {
                return if sa > 0 { by_exponent } else { by_exponent.reverse() };
            }
        }
        let (a, b, _) = self.align(other);
        a.cmp(&b)
    }

    /// The numerically smaller of the two; `self` on ties.
    pub fn min<'a>(&'a self, other: &'a BigDecimal) -> &'a BigDecimal {
        if self.compare_to(other) != Ordering::Greater { self } else { other }
    }

    /// The numerically larger of the two; `self` on ties.
    pub fn max<'a>(&'a self, other: &'a BigDecimal) -> &'a BigDecimal {
        if self.compare_to(other) != Ordering::Less { self } else { other }
    }

    /// The same value at `new_scale`.
    ///
    /// Raising the scale appends zeros and is always exact. Lowering it drops
    /// digits, rounding with `mode`; if every digit is dropped the result is
    /// decided by `mode` and the sign alone.
    ///
    /// ```
    /// use bigdec::{BigDecimal, RoundingMode};
    /// use core::str::FromStr;
    ///
    /// let x = BigDecimal::from_str("2.5").unwrap();
    /// assert_eq!(x.set_scale(0, RoundingMode::HalfEven).unwrap().to_string(), "2");
    /// let y = BigDecimal::from_str("3.5").unwrap();
    /// assert_eq!(y.set_scale(0, RoundingMode::HalfEven).unwrap().to_string(), "4");
    /// ```
    pub fn set_scale(&self, new_scale: i64, mode: RoundingMode) -> Result<BigDecimal> {
        self.rescale(new_scale, mode, false, "set_scale")
    }

    /// `set_scale` where `sticky` records that the exact value has further
    /// non-zero digits beyond the ones this decimal holds.
    pub(crate) fn rescale(
        &self,
        new_scale: i64,
        mode: RoundingMode,
        sticky: bool,
        op: &'static str,
    ) -> Result<BigDecimal> {
        if new_scale >= self.scale {
            let pad = new_scale.abs_diff(self.scale);
            let int_val = if pad == 0 {
                self.int_val.clone()
            } else {
                &self.int_val * ten_to_the(pad)
            };
            let exact = BigDecimal::new(int_val, new_scale);
            if !sticky {
                return Ok(exact);
            }
            let adjusted = round_quotient(
                exact.int_val,
                Fraction::BelowHalf,
                self.signum(),
                mode,
                op,
            )?;
            return Ok(BigDecimal::new(adjusted, new_scale));
        }

        let drop = self.scale.abs_diff(new_scale);
        let sign = self.signum();
        let (q, fraction) = if drop > self.precision() {
            let fraction = if self.is_zero() {
                Fraction::Zero
            } else {
                Fraction::BelowHalf
            };
            (BigInt::zero(), fraction)
        } else {
            let divisor = ten_to_the(drop);
            let (q, r) = self.int_val.div_rem_nonzero(&divisor);
            (q, Fraction::of(&r, &divisor))
        };
        let q = round_quotient(q, fraction.with_sticky(sticky), sign, mode, op)?;
        Ok(BigDecimal::new(q, new_scale))
    }

    /// Brings the value to exactly the precision of `mc`.
    ///
    /// Longer values are rounded with the context's mode. Shorter ones are
    /// padded with trailing zeros, which is exact: `1.5` at precision 4 is
    /// `1.500`. An unlimited context returns the value unchanged.
    pub fn round(&self, mc: &MathContext) -> Result<BigDecimal> {
        const OP: &str = "round";
        let precision = u64::from(mc.precision());
        let digits = self.precision();
        if precision == 0 || digits >= precision {
            return self.round_with_sticky(mc, false, OP);
        }
        let pad = precision - digits;
        let new_scale = checked_scale(OP, i128::from(self.scale) + i128::from(pad))?;
        self.rescale(new_scale, mc.rounding_mode(), false, OP)
    }

    /// Same as [`round`](BigDecimal::round).
    #[inline]
    pub fn plus(&self, mc: &MathContext) -> Result<BigDecimal> {
        self.round(mc)
    }

    pub(crate) fn round_with_sticky(
        &self,
        mc: &MathContext,
        sticky: bool,
        op: &'static str,
    ) -> Result<BigDecimal> {
        let precision = u64::from(mc.precision());
        if precision == 0 {
            return Ok(self.clone());
        }
        let digits = self.precision();
        if digits <= precision && !sticky {
            return Ok(self.clone());
        }

        let drop = digits.saturating_sub(precision);
        let new_scale = checked_scale(op, i128::from(self.scale) - i128::from(drop))?;
        let rounded = self.rescale(new_scale, mc.rounding_mode(), sticky, op)?;
        if rounded.precision() <= precision {
            return Ok(rounded);
        }
        // A carry such as 9.99 -> 10.0 added a digit; dropping it is exact.
        let new_scale = checked_scale(op, i128::from(new_scale) - 1)?;
        rounded.rescale(new_scale, mc.rounding_mode(), false, op)
    }

    /// Removes trailing zeros from the unscaled value. Zero becomes `0` with
    /// scale 0.
    pub fn strip_trailing_zeros(&self) -> BigDecimal {
        if self.is_zero() {
            return BigDecimal::zero();
        }
        self.strip_zeros_to(i64::MIN)
    }

    /// Strips trailing zeros but keeps the scale at or above `preferred`.
    pub(crate) fn strip_zeros_to(&self, preferred: i64) -> BigDecimal {
        let mut int_val = self.int_val.clone();
        let mut scale = self.scale;
        while scale > preferred && !int_val.is_zero() {
            let (q, r) = int_val.div_rem_digit(10);
            if r != 0 {
                break;
            }
            int_val = q;
            scale -= 1;
        }
        BigDecimal::new(int_val, scale)
    }

    /// Moves the decimal point `n` places left. The result never has a
    /// negative scale.
    pub fn move_point_left(&self, n: i64) -> Result<BigDecimal> {
        let scale = checked_scale("move_point_left", i128::from(self.scale) + i128::from(n))?;
        BigDecimal::new(self.int_val.clone(), scale).non_negative_scale()
    }

    /// Moves the decimal point `n` places right. The result never has a
    /// negative scale.
    pub fn move_point_right(&self, n: i64) -> Result<BigDecimal> {
        let scale = checked_scale("move_point_right", i128::from(self.scale) - i128::from(n))?;
        BigDecimal::new(self.int_val.clone(), scale).non_negative_scale()
    }

    fn non_negative_scale(self) -> Result<BigDecimal> {
        if self.scale < 0 {
            self.set_scale(0, RoundingMode::Unnecessary)
        } else {
            Ok(self)
        }
    }

    /// `self × 10^n`, keeping the unscaled value.
    pub fn scale_by_power_of_ten(&self, n: i64) -> Result<BigDecimal> {
        let scale = checked_scale("scale_by_power_of_ten", i128::from(self.scale) - i128::from(n))?;
        Ok(BigDecimal::new(self.int_val.clone(), scale))
    }

    /// One unit in the last place: `1 × 10^-scale`.
    pub fn ulp(&self) -> BigDecimal {
        BigDecimal::new(BigInt::one(), self.scale)
    }

    /// The integer part, truncated toward zero.
    pub fn to_bigint(&self) -> BigInt {
        if self.scale <= 0 {
            &self.int_val * ten_to_the(self.scale.unsigned_abs())
        } else if self.scale.unsigned_abs() > self.precision() {
            BigInt::zero()
        } else {
            self.int_val.div_rem_nonzero(&ten_to_the(self.scale.unsigned_abs())).0
        }
    }

    /// The value as an integer, failing with [`Error::RoundingRequired`] if
    /// it has a non-zero fractional part.
    pub fn to_bigint_exact(&self) -> Result<BigInt> {
        Ok(self
            .rescale(0, RoundingMode::Unnecessary, false, "to_bigint_exact")?
            .int_val)
    }
}

impl Default for BigDecimal {
    #[inline]
    fn default() -> BigDecimal {
        BigDecimal::zero()
    }
}

impl Zero for BigDecimal {
    #[inline]
    fn zero() -> BigDecimal {
        BigDecimal::new(BigInt::zero(), 0)
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.int_val.is_zero()
    }
}

impl One for BigDecimal {
    #[inline]
    fn one() -> BigDecimal {
        BigDecimal::new(BigInt::one(), 0)
    }
}

impl fmt::Debug for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BigDecimal")
            .field("int_val", &self.int_val)
            .field("scale", &self.scale)
            .finish()
    }
}
