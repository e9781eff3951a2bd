use alloc::string::String;
use core::str::FromStr;

use super::BigDecimal;
use crate::bigint::BigInt;
use crate::error::{Error, Result};
use crate::rounding::RoundingMode;

fn all_digits(s: &str) -> bool {
    s.bytes().all(|b| b.is_ascii_digit())
}

impl FromStr for BigDecimal {
    type Err = Error;

    /// Parses `[sign] digits [. digits] [(e|E) [sign] digits]`. Whitespace is
    /// stripped anywhere in the input first, so `"1 234.5"` reads as
    /// `1234.5`. The integer part may be empty but the fraction, when its
    /// point is present, may not.
    ///
    /// ```
    /// use bigdec::BigDecimal;
    /// use core::str::FromStr;
    ///
    /// let d = BigDecimal::from_str(" -1.50E+3 ").unwrap();
    /// assert_eq!(d.scale(), -1);
    /// assert_eq!(d.to_plain_string(), "-1500");
    /// assert_eq!(BigDecimal::from_str("1 000.5").unwrap().to_string(), "1000.5");
    /// assert!(BigDecimal::from_str("1.").is_err());
    /// ```
    fn from_str(input: &str) -> Result<BigDecimal> {
        let compact: String = input.chars().filter(|c| !c.is_whitespace()).collect();
        let s = compact.as_str();

        let (mantissa, exponent) = match s.find(['e', 'E']) {
            Some(i) => (&s[..i], Some(&s[i + 1..])),
            None => (s, None),
        };

        let (negative, unsigned) = match mantissa.as_bytes().first() {
            Some(b'-') => (true, &mantissa[1..]),
            Some(b'+') => (false, &mantissa[1..]),
            _ => (false, mantissa),
        };
        let (int_part, frac_part) = match unsigned.split_once('.') {
            Some((int_part, frac_part)) => {
                if frac_part.is_empty() {
                    return Err(Error::parse(input, "no digits after the decimal point"));
                }
                (int_part, frac_part)
            }
            None => (unsigned, ""),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return Err(Error::parse(input, "no digits"));
        }
        if !all_digits(int_part) || !all_digits(frac_part) {
            return Err(Error::parse(input, "invalid character in mantissa"));
        }

        let exponent = match exponent {
            None => 0,
            Some(exp) => {
                let unsigned_exp = exp.strip_prefix(['+', '-']).unwrap_or(exp);
                if unsigned_exp.is_empty() || !all_digits(unsigned_exp) {
                    return Err(Error::parse(input, "malformed exponent"));
                }
                exp.parse::<i64>()
                    .map_err(|_| Error::parse(input, "exponent out of range"))?
            }
        };

        let scale = i128::try_from(frac_part.len())
            .map(|frac_len| frac_len - i128::from(exponent))
            .ok()
            .and_then(|scale| i64::try_from(scale).ok())
            .ok_or_else(|| Error::parse(input, "scale out of range"))?;

        let mut digits = String::with_capacity(int_part.len() + frac_part.len() + 1);
        if negative {
            digits.push('-');
        }
        digits.push_str(int_part);
        digits.push_str(frac_part);
        let int_val = BigInt::from_str_radix(&digits, 10)?;

        Ok(BigDecimal::new(int_val, scale))
    }
}

impl TryFrom<f64> for BigDecimal {
    type Error = Error;

    /// The shortest decimal that round-trips to `value`, at a scale of at
    /// least zero. NaN and the infinities are rejected.
    fn try_from(value: f64) -> Result<BigDecimal> {
        if !value.is_finite() {
            return Err(Error::domain("try_from_f64", alloc::format!("{value} is not finite")));
        }
        let d = BigDecimal::from_str(&alloc::format!("{value:e}"))?;
        if d.scale < 0 {
            d.set_scale(0, RoundingMode::Unnecessary)
        } else {
            Ok(d)
        }
    }
}

impl From<BigInt> for BigDecimal {
    #[inline]
    fn from(n: BigInt) -> BigDecimal {
        BigDecimal::new(n, 0)
    }
}

impl From<&BigInt> for BigDecimal {
    #[inline]
    fn from(n: &BigInt) -> BigDecimal {
        BigDecimal::new(n.clone(), 0)
    }
}

macro_rules! impl_from_int {
    ($($t:ty),*) => {
        $(
            impl From<$t> for BigDecimal {
                #[inline]
                fn from(n: $t) -> BigDecimal {
                    BigDecimal::new(BigInt::from(n), 0)
                }
            }
        )*
    };
}

impl_from_int!(i8, i16, i32, i64, i128, isize, u8, u16, u32, u64, u128, usize);
