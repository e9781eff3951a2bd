//! Rounding rules for discarding decimal digits.

use core::fmt;
use core::str::FromStr;

use crate::bigint::BigInt;
use crate::error::{Error, Result};

/// How a value is rounded when digits are discarded.
///
/// Each rule looks at the discarded part, classified as a [`Fraction`] of one
/// unit in the last retained place, together with the sign of the value and
/// (for [`HalfEven`](RoundingMode::HalfEven)) the parity of the retained
/// digit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Away from zero whenever anything non-zero is discarded.
    Up,
    /// Toward zero; plain truncation.
    Down,
    /// Toward positive infinity.
    Ceiling,
    /// Toward negative infinity.
    Floor,
    /// To the nearest neighbour, ties away from zero.
    HalfUp,
    /// To the nearest neighbour, ties toward zero.
    HalfDown,
    /// To the nearest neighbour, ties to the even neighbour.
    HalfEven,
    /// Asserts that nothing non-zero is discarded.
    Unnecessary,
}

/// The discarded part of a value relative to half a unit in the last
/// retained place.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Fraction {
    Zero,
    BelowHalf,
    Half,
    AboveHalf,
}

impl Fraction {
    /// Classifies `rem / div`, where `|rem| < |div|` and `div != 0`.
    pub fn of(rem: &BigInt, div: &BigInt) -> Fraction {
        if rem.is_zero() {
            return Fraction::Zero;
        }
        match (rem.abs() << 1).cmp_abs(div) {
            core::cmp::Ordering::Less => Fraction::BelowHalf,
            core::cmp::Ordering::Equal => Fraction::Half,
            core::cmp::Ordering::Greater => Fraction::AboveHalf,
        }
    }

    /// Adjusts for further non-zero digits beyond the ones already
    /// classified.
    pub fn with_sticky(self, sticky: bool) -> Fraction {
        match (self, sticky) {
            (Fraction::Zero, true) => Fraction::BelowHalf,
            (Fraction::Half, true) => Fraction::AboveHalf,
            (f, _) => f,
        }
    }

    #[inline]
    pub fn is_zero(self) -> bool {
        self == Fraction::Zero
    }
}

impl RoundingMode {
    /// Every mode, in declaration order.
    pub const ALL: [RoundingMode; 8] = [
        RoundingMode::Up,
        RoundingMode::Down,
        RoundingMode::Ceiling,
        RoundingMode::Floor,
        RoundingMode::HalfUp,
        RoundingMode::HalfDown,
        RoundingMode::HalfEven,
        RoundingMode::Unnecessary,
    ];

    /// The upper-snake name, e.g. `HALF_EVEN`.
    pub fn as_str(self) -> &'static str {
        match self {
            RoundingMode::Up => "UP",
            RoundingMode::Down => "DOWN",
            RoundingMode::Ceiling => "CEILING",
            RoundingMode::Floor => "FLOOR",
            RoundingMode::HalfUp => "HALF_UP",
            RoundingMode::HalfDown => "HALF_DOWN",
            RoundingMode::HalfEven => "HALF_EVEN",
            RoundingMode::Unnecessary => "UNNECESSARY",
        }
    }

    /// The amount to add to the truncated value: `0`, or `±1` in the
    /// direction of `sign`.
    ///
    /// `sign` is the sign of the value being rounded (`-1`, `0` or `1`);
    /// `kept_is_odd` is the parity of the last retained digit.
    ///
    /// ```
    /// use bigdec::{Fraction, RoundingMode};
    ///
    /// assert_eq!(RoundingMode::HalfEven.adjustment(Fraction::Half, 1, false), Ok(0));
    /// assert_eq!(RoundingMode::HalfEven.adjustment(Fraction::Half, 1, true), Ok(1));
    /// assert_eq!(RoundingMode::Floor.adjustment(Fraction::BelowHalf, -1, false), Ok(-1));
    /// ```
    pub fn adjustment(self, fraction: Fraction, sign: i32, kept_is_odd: bool) -> Result<i8> {
        self.adjustment_for("round", fraction, sign, kept_is_odd)
    }

    /// [`adjustment`](Self::adjustment) with the calling operation's name for
    /// the [`Error::RoundingRequired`] it may return.
    pub(crate) fn adjustment_for(
        self,
        op: &'static str,
        fraction: Fraction,
        sign: i32,
        kept_is_odd: bool,
    ) -> Result<i8> {
        if fraction.is_zero() {
            return Ok(0);
        }
        let away = match self {
            RoundingMode::Up => true,
            RoundingMode::Down => false,
            RoundingMode::Ceiling => sign > 0,
            RoundingMode::Floor => sign < 0,
            RoundingMode::HalfUp => fraction >= Fraction::Half,
            RoundingMode::HalfDown => fraction > Fraction::Half,
            RoundingMode::HalfEven => {
                fraction > Fraction::Half || (fraction == Fraction::Half && kept_is_odd)
            }
            RoundingMode::Unnecessary => return Err(Error::RoundingRequired { op }),
        };
        Ok(match (away, sign) {
            (false, _) | (true, 0) => 0,
            (true, s) if s < 0 => -1,
            (true, _) => 1,
        })
    }
}

impl fmt::Display for RoundingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundingMode {
    type Err = Error;

    /// Accepts the upper-snake names case-insensitively.
    fn from_str(s: &str) -> Result<RoundingMode> {
        RoundingMode::ALL
            .into_iter()
            .find(|mode| mode.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| Error::parse(s, "unknown rounding mode"))
    }
}
