use core::fmt;
use core::str::FromStr;

use crate::error::{Error, Result};
use crate::rounding::RoundingMode;

/// Precision and rounding for decimal operations.
///
/// `precision` is the number of significant digits a result may keep; zero
/// means unlimited, in which case operations are exact and only explicit
/// scale changes consult the rounding mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MathContext {
    precision: u32,
    rounding: RoundingMode,
}

impl MathContext {
    /// Exact arithmetic.
    pub const UNLIMITED: MathContext = MathContext::with_rounding(0, RoundingMode::HalfUp);

    /// The precision of an IEEE 754 decimal32.
    pub const DECIMAL32: MathContext = MathContext::with_rounding(7, RoundingMode::HalfEven);

    /// The precision of an IEEE 754 decimal64.
    pub const DECIMAL64: MathContext = MathContext::with_rounding(16, RoundingMode::HalfEven);

    /// The precision of an IEEE 754 decimal128.
    pub const DECIMAL128: MathContext = MathContext::with_rounding(34, RoundingMode::HalfEven);

    /// `precision` significant digits, rounding [`HalfUp`](RoundingMode::HalfUp).
    pub const fn new(precision: u32) -> MathContext {
        MathContext::with_rounding(precision, RoundingMode::HalfUp)
    }

    pub const fn with_rounding(precision: u32, rounding: RoundingMode) -> MathContext {
        MathContext {
            precision,
            rounding,
        }
    }

    #[inline]
    pub const fn precision(&self) -> u32 {
        self.precision
    }

    #[inline]
    pub const fn rounding_mode(&self) -> RoundingMode {
        self.rounding
    }

    #[inline]
    pub const fn is_unlimited(&self) -> bool {
        self.precision == 0
    }
}

impl Default for MathContext {
    fn default() -> MathContext {
        MathContext::UNLIMITED
    }
}

impl fmt::Display for MathContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "precision={} roundingMode={}", self.precision, self.rounding)
    }
}

impl FromStr for MathContext {
    type Err = Error;

    /// Parses the [`Display`](fmt::Display) form,
    /// `precision=<digits> roundingMode=<MODE>`.
    fn from_str(s: &str) -> Result<MathContext> {
        let mut fields = s.split_whitespace();
        let (Some(precision), Some(rounding), None) = (fields.next(), fields.next(), fields.next())
        else {
            return Err(Error::parse(s, "expected two fields"));
        };

        let precision = precision
            .strip_prefix("precision=")
            .ok_or_else(|| Error::parse(s, "missing precision="))?
            .parse::<u32>()
            .map_err(|_| Error::parse(s, "precision is not a non-negative integer"))?;
        let rounding = rounding
            .strip_prefix("roundingMode=")
            .ok_or_else(|| Error::parse(s, "missing roundingMode="))?
            .parse::<RoundingMode>()
            .map_err(|_| Error::parse(s, "unknown rounding mode"))?;

        Ok(MathContext::with_rounding(precision, rounding))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_presets() {
        assert_eq!(MathContext::UNLIMITED.precision(), 0);
        assert!(MathContext::UNLIMITED.is_unlimited());
        assert_eq!(MathContext::UNLIMITED.rounding_mode(), RoundingMode::HalfUp);
        assert_eq!(MathContext::DECIMAL32.precision(), 7);
        assert_eq!(MathContext::DECIMAL64.precision(), 16);
        assert_eq!(MathContext::DECIMAL128.precision(), 34);
        assert_eq!(MathContext::DECIMAL128.rounding_mode(), RoundingMode::HalfEven);
        assert_eq!(MathContext::default(), MathContext::UNLIMITED);
        assert_eq!(MathContext::new(5).rounding_mode(), RoundingMode::HalfUp);
    }

    #[test]
    fn test_display_round_trip() {
        let mc = MathContext::DECIMAL128;
        assert_eq!(mc.to_string(), "precision=34 roundingMode=HALF_EVEN");
        assert_eq!(mc.to_string().parse::<MathContext>().unwrap(), mc);
        let mc = MathContext::with_rounding(3, RoundingMode::Floor);
        assert_eq!("  precision=3   roundingMode=FLOOR ".parse::<MathContext>().unwrap(), mc);
    }

    #[test]
    fn test_parse_errors() {
        for bad in [
            "",
            "precision=3",
            "precision=-3 roundingMode=UP",
            "precision=3 roundingMode=SIDEWAYS",
            "roundingMode=UP precision=3",
            "precision=3 roundingMode=UP extra",
        ] {
            assert!(matches!(bad.parse::<MathContext>(), Err(Error::Parse { .. })), "{bad:?}");
        }
    }
}
