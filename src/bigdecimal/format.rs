use alloc::string::{String, ToString};
use core::fmt;

use super::BigDecimal;

/// Appends `E+n` / `E-n`, or nothing for a zero exponent.
fn push_exponent(buf: &mut String, exponent: i128) {
    if exponent != 0 {
        buf.push('E');
        if exponent > 0 {
            buf.push('+');
        }
        buf.push_str(&exponent.to_string());
    }
}

fn push_zeros(buf: &mut String, n: usize) {
    buf.extend(core::iter::repeat_n('0', n));
}

impl BigDecimal {
    /// The canonical string form, also used by `Display`.
    ///
    /// Plain notation is used when the scale is non-negative and the
    /// adjusted exponent is at least -6; otherwise one digit precedes the
    /// point and an exponent follows.
    ///
    /// ```
    /// use bigdec::BigDecimal;
    /// use core::str::FromStr;
    ///
    /// let d = |s| BigDecimal::from_str(s).unwrap().to_sci_string();
    /// assert_eq!(d("0.000001"), "0.000001");
    /// assert_eq!(d("0.0000001"), "1E-7");
    /// assert_eq!(d("-123E+3"), "-1.23E+5");
    /// ```
    pub fn to_sci_string(&self) -> String {
        self.layout(false)
    }

    /// Like [`to_sci_string`](BigDecimal::to_sci_string) but with the
    /// exponent lowered to a multiple of three, leaving one to three digits
    /// before the point.
    pub fn to_engineering_string(&self) -> String {
        self.layout(true)
    }

    /// The value without an exponent, padding with zeros as needed.
    pub fn to_plain_string(&self) -> String {
        let coeff = self.int_val.abs_str_radix(10);
        let mut buf = String::with_capacity(coeff.len() + 2);
        if self.int_val.is_negative() {
            buf.push('-');
        }
        match usize::try_from(self.scale) {
            Ok(0) => buf.push_str(&coeff),
            Ok(scale) => push_point(&mut buf, &coeff, scale),
            Err(_) if self.is_zero() => buf.push('0'),
            Err(_) => {
                buf.push_str(&coeff);
                push_zeros(&mut buf, self.scale.unsigned_abs() as usize);
            }
        }
        buf
    }

    fn layout(&self, engineering: bool) -> String {
        let coeff = self.int_val.abs_str_radix(10);
        let mut buf = String::with_capacity(coeff.len() + 8);
        if self.int_val.is_negative() {
            buf.push('-');
        }

        let mut adjusted = self.adjusted_exponent();
        if self.scale >= 0 && adjusted >= -6 {
            match usize::try_from(self.scale) {
                Ok(0) | Err(_) => buf.push_str(&coeff),
                Ok(scale) => push_point(&mut buf, &coeff, scale),
            }
            return buf;
        }

        if !engineering {
            buf.push_str(&coeff[..1]);
            if coeff.len() > 1 {
                buf.push('.');
                buf.push_str(&coeff[1..]);
            }
            push_exponent(&mut buf, adjusted);
            return buf;
        }

        // digits before the point, 1..=3
        let sig = adjusted.rem_euclid(3) as usize + 1;
        adjusted -= sig as i128 - 1;
        if self.is_zero() {
            match sig {
                1 => buf.push('0'),
                2 => {
                    buf.push_str("0.00");
                    adjusted += 3;
                }
                _ => {
                    buf.push_str("0.0");
                    adjusted += 3;
                }
            }
        } else if sig >= coeff.len() {
            buf.push_str(&coeff);
            push_zeros(&mut buf, sig - coeff.len());
        } else {
            buf.push_str(&coeff[..sig]);
            buf.push('.');
            buf.push_str(&coeff[sig..]);
        }
        push_exponent(&mut buf, adjusted);
        buf
    }
}

/// Writes `coeff × 10^-scale` for a positive scale.
fn push_point(buf: &mut String, coeff: &str, scale: usize) {
    if coeff.len() > scale {
        let (int, frac) = coeff.split_at(coeff.len() - scale);
        buf.push_str(int);
        buf.push('.');
        buf.push_str(frac);
    } else {
        buf.push_str("0.");
        push_zeros(buf, scale - coeff.len());
        buf.push_str(coeff);
    }
}

impl fmt::Display for BigDecimal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(&self.to_sci_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::bigint::BigInt;
    use core::str::FromStr;

    fn dec(unscaled: i64, scale: i64) -> BigDecimal {
        BigDecimal::new(BigInt::from(unscaled), scale)
    }

    #[test]
    fn test_sci_string() {
        let cases = [
            (123, 0, "123"),
            (-123, 0, "-123"),
            (123, -1, "1.23E+3"),
            (123, 3, "0.123"),
            (123, 10, "1.23E-8"),
            (-123, 12, "-1.23E-10"),
            (5, -3, "5E+3"),
            (1, 6, "0.000001"),
            (1, 7, "1E-7"),
            (0, 0, "0"),
            (0, 2, "0.00"),
            (0, -2, "0E+2"),
            (0, 8, "0E-8"),
            (-5, 9, "-5E-9"),
        ];
        for (unscaled, scale, expected) in cases {
            assert_eq!(dec(unscaled, scale).to_string(), expected, "({unscaled}, {scale})");
        }
    }

    #[test]
    fn test_engineering_string() {
        let cases = [
            (123, -1, "1.23E+3"),
            (123, -3, "123E+3"),
            (123, -4, "1.23E+6"),
            (12, -5, "1.2E+6"),
            (1, -4, "10E+3"),
            (123, 10, "12.3E-9"),
            (1, 7, "100E-9"),
            (0, -1, "0.00E+3"),
            (0, -2, "0.0E+3"),
            (0, -3, "0E+3"),
            (0, 9, "0E-9"),
            (-7, 8, "-70E-9"),
            (123, 2, "1.23"),
        ];
        for (unscaled, scale, expected) in cases {
            assert_eq!(dec(unscaled, scale).to_engineering_string(), expected, "({unscaled}, {scale})");
        }
    }

    #[test]
    fn test_plain_string() {
        let cases = [
            (123, -3, "123000"),
            (-123, 5, "-0.00123"),
            (0, -4, "0"),
            (0, 3, "0.000"),
            (1, 7, "0.0000001"),
            (42, 0, "42"),
        ];
        for (unscaled, scale, expected) in cases {
            assert_eq!(dec(unscaled, scale).to_plain_string(), expected, "({unscaled}, {scale})");
        }
    }

    #[test]
    fn test_string_forms_reparse() {
        for (unscaled, scale) in [(123, -7), (-45, 9), (1, 0), (0, 4), (987654321, 3)] {
            let d = dec(unscaled, scale);
            assert_eq!(BigDecimal::from_str(&d.to_sci_string()).unwrap(), d);
            let eng = BigDecimal::from_str(&d.to_engineering_string()).unwrap();
            assert_eq!(eng.compare_to(&d), core::cmp::Ordering::Equal);
            let plain = BigDecimal::from_str(&d.to_plain_string()).unwrap();
            assert_eq!(plain.compare_to(&d), core::cmp::Ordering::Equal);
        }
    }

    #[test]
    fn test_display_pads() {
        assert_eq!(alloc::format!("{:>8}", dec(-15, 1)), "    -1.5");
    }
}
