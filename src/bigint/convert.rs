use alloc::string::{String, ToString};
use alloc::vec::Vec;
use core::fmt;
use core::str::FromStr;

use num_traits::{FromPrimitive, ToPrimitive};

use super::addition::add_digit;
use super::division::div_rem_digit;
use super::multiplication::scalar_mul;
use super::{BigInt, Minus, Plus, Sign};
use crate::big_digit::{BigDigit, BITS};
use crate::error::{Error, Result};

/// The largest power of `radix` that fits a limb, and its exponent.
fn get_radix_base(radix: u32) -> (BigDigit, usize) {
    debug_assert!((2..=36).contains(&radix));
    let mut base = radix;
    let mut power = 1;
    while let Some(next) = base.checked_mul(radix) {
        base = next;
        power += 1;
    }
    (base, power)
}

fn check_radix(radix: u32) -> Result<()> {
    if (2..=36).contains(&radix) {
        Ok(())
    } else {
        Err(Error::InvalidRadix(radix))
    }
}

fn split_sign(s: &str) -> (Sign, &str) {
    if let Some(rest) = s.strip_prefix('-') {
        (Minus, rest)
    } else if let Some(rest) = s.strip_prefix('+') {
        (Plus, rest)
    } else {
        (Plus, s)
    }
}

/// Builds a magnitude from digits in `radix`.
///
/// Digits are folded in chunks of the largest radix power that fits a limb,
/// so each chunk costs one limb-wide multiply-accumulate pass.
fn from_radix_digits(input: &str, digits: &str, radix: u32) -> Result<Vec<BigDigit>> {
    if digits.is_empty() {
        return Err(Error::parse(input, "no digits"));
    }
    let values = digits
        .chars()
        .map(|c| {
            c.to_digit(radix).ok_or_else(|| Error::InvalidDigit {
                input: input.into(),
                digit: c,
                radix,
            })
        })
        .collect::<Result<Vec<u32>>>()?;

    let (base, power) = get_radix_base(radix);
    let fold = |chunk: &[u32]| chunk.iter().fold(0, |acc: BigDigit, &d| acc * radix + d);

    let head = values.len() % power;
    let mut data = Vec::with_capacity(values.len() / power + 1);
    if head > 0 {
        add_digit(&mut data, fold(&values[..head]));
    }
    for chunk in values[head..].chunks(power) {
        scalar_mul(&mut data, base);
        add_digit(&mut data, fold(chunk));
    }
    Ok(data)
}

fn push_chunk(out: &mut Vec<u8>, mut n: BigDigit, radix: u32, width: usize) {
    let start = out.len();
    while n != 0 {
        out.push((n % radix) as u8);
        n /= radix;
    }
    while out.len() - start < width {
        out.push(0);
    }
}

/// Digit values of a magnitude in `radix`, least significant first.
///
/// Repeatedly divides by the largest radix power fitting a limb; every chunk
/// except the most significant is zero-padded to the full chunk width.
fn to_radix_digits_le(data: &[BigDigit], radix: u32) -> Vec<u8> {
    if data.is_empty() {
        return alloc::vec![0];
    }
    let (base, power) = get_radix_base(radix);
    let mut out = Vec::with_capacity(data.len() * BITS / 3);
    let mut mag = data.to_vec();
    while mag.len() > 1 {
        let (q, r) = div_rem_digit(mag, base);
        push_chunk(&mut out, r, radix, power);
        mag = q;
    }
    if let Some(&top) = mag.first() {
        push_chunk(&mut out, top, radix, 0);
    }
    while out.len() > 1 && out.last() == Some(&0) {
        out.pop();
    }
    out
}

impl BigInt {
    /// Parses an integer literal, detecting the radix from its prefix:
    /// `0x` for hexadecimal, `0b` for binary, a leading `0` for octal and
    /// decimal otherwise. An optional `+` or `-` comes first.
    ///
    /// ```
    /// use bigdec::BigInt;
    ///
    /// assert_eq!(BigInt::parse("-0x1f").unwrap(), BigInt::from(-31));
    /// assert_eq!(BigInt::parse("017").unwrap(), BigInt::from(15));
    /// assert!(BigInt::parse("09").is_err());
    /// ```
    pub fn parse(s: &str) -> Result<BigInt> {
        let (sign, body) = split_sign(s);
        let (radix, digits) = if let Some(rest) = body
            .strip_prefix("0x")
            .or_else(|| body.strip_prefix("0X"))
        {
            (16, rest)
        } else if let Some(rest) = body
            .strip_prefix("0b")
            .or_else(|| body.strip_prefix("0B"))
        {
            (2, rest)
        } else if body.len() > 1 && body.starts_with('0') {
            (8, &body[1..])
        } else {
            (10, body)
        };
        Ok(BigInt::new(sign, from_radix_digits(s, digits, radix)?))
    }

    /// Parses digits in an explicit `radix` (2 to 36) with an optional sign.
    /// No prefix is recognized.
    pub fn from_str_radix(s: &str, radix: u32) -> Result<BigInt> {
        check_radix(radix)?;
        let (sign, digits) = split_sign(s);
        Ok(BigInt::new(sign, from_radix_digits(s, digits, radix)?))
    }

    /// Renders the value in `radix` (2 to 36) using lowercase letters.
    ///
    /// ```
    /// use bigdec::BigInt;
    ///
    /// assert_eq!(BigInt::from(-255).to_str_radix(16).unwrap(), "-ff");
    /// ```
    pub fn to_str_radix(&self, radix: u32) -> Result<String> {
        check_radix(radix)?;
        let mut s = String::new();
        if self.is_negative() {
            s.push('-');
        }
        s.push_str(&self.abs_str_radix(radix));
        Ok(s)
    }

    /// Renders the magnitude in `radix` without a sign.
    pub(crate) fn abs_str_radix(&self, radix: u32) -> String {
        to_radix_digits_le(&self.data, radix)
            .iter()
            .rev()
            .filter_map(|&d| char::from_digit(u32::from(d), radix))
            .collect()
    }

    /// Creates a `BigInt` from big-endian bytes of the magnitude.
    pub fn from_bytes_be(sign: Sign, bytes: &[u8]) -> BigInt {
        let data = bytes
            .rchunks(BITS / 8)
            .map(|chunk| chunk.iter().fold(0, |acc: BigDigit, &b| (acc << 8) | BigDigit::from(b)))
            .collect();
        BigInt::new(sign, data)
    }

    /// The sign and big-endian bytes of the magnitude. Zero is `[0]`.
    pub fn to_bytes_be(&self) -> (Sign, Vec<u8>) {
        let mut bytes: Vec<u8> = self
            .data
            .iter()
            .rev()
            .flat_map(|d| d.to_be_bytes())
            .skip_while(|&b| b == 0)
            .collect();
        if bytes.is_empty() {
            bytes.push(0);
        }
        (self.sign, bytes)
    }
}

impl FromStr for BigInt {
    type Err = Error;

    /// Same as [`BigInt::parse`].
    #[inline]
    fn from_str(s: &str) -> Result<BigInt> {
        BigInt::parse(s)
    }
}

impl fmt::Display for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "", &self.abs_str_radix(10))
    }
}

impl fmt::LowerHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0x", &self.abs_str_radix(16))
    }
}

impl fmt::UpperHex for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut s = self.abs_str_radix(16);
        s.make_ascii_uppercase();
        f.pad_integral(!self.is_negative(), "0x", &s)
    }
}

impl fmt::Octal for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0o", &self.abs_str_radix(8))
    }
}

impl fmt::Binary for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad_integral(!self.is_negative(), "0b", &self.abs_str_radix(2))
    }
}

impl From<u128> for BigInt {
    fn from(mut n: u128) -> Self {
        let mut data = Vec::new();
        while n != 0 {
            data.push(n as BigDigit);
            n >>= BITS;
        }
        BigInt::new(Plus, data)
    }
}

impl From<i128> for BigInt {
    fn from(n: i128) -> Self {
        let mag = BigInt::from(n.unsigned_abs());
        if n < 0 { -mag } else { mag }
    }
}

macro_rules! impl_from_unsigned {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            #[inline]
            fn from(n: $t) -> Self {
                BigInt::from(n as u128)
            }
        }
    )*};
}

macro_rules! impl_from_signed {
    ($($t:ty),*) => {$(
        impl From<$t> for BigInt {
            #[inline]
            fn from(n: $t) -> Self {
                BigInt::from(n as i128)
            }
        }
    )*};
}

impl_from_unsigned!(u8, u16, u32, u64, usize);
impl_from_signed!(i8, i16, i32, i64, isize);

impl ToPrimitive for BigInt {
    fn to_i64(&self) -> Option<i64> {
        self.to_i128().and_then(|n| i64::try_from(n).ok())
    }

    fn to_u64(&self) -> Option<u64> {
        self.to_u128().and_then(|n| u64::try_from(n).ok())
    }

    fn to_i128(&self) -> Option<i128> {
        let mag = self.magnitude_u128()?;
        match self.sign {
            Minus if mag == i128::MIN.unsigned_abs() => Some(i128::MIN),
            Minus => i128::try_from(mag).ok().map(|m| -m),
            _ => i128::try_from(mag).ok(),
        }
    }

    fn to_u128(&self) -> Option<u128> {
        match self.sign {
            Minus => None,
            _ => self.magnitude_u128(),
        }
    }

    fn to_f64(&self) -> Option<f64> {
        if let Some(n) = self.to_i64() {
            return Some(n as f64);
        }
        self.to_string().parse().ok()
    }
}

impl BigInt {
    fn magnitude_u128(&self) -> Option<u128> {
        if self.data.len() > 128 / BITS {
            return None;
        }
        Some(
            self.data
                .iter()
                .rev()
                .fold(0u128, |acc, &d| (acc << BITS) | u128::from(d)),
        )
    }
}

impl FromPrimitive for BigInt {
    #[inline]
    fn from_i64(n: i64) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_u64(n: u64) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_i128(n: i128) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    #[inline]
    fn from_u128(n: u128) -> Option<BigInt> {
        Some(BigInt::from(n))
    }

    /// Truncates toward zero; `None` for NaN and infinities.
    fn from_f64(n: f64) -> Option<BigInt> {
        if !n.is_finite() {
            return None;
        }
        let text = alloc::format!("{:.0}", num_traits::float::FloatCore::trunc(n));
        let n: BigInt = text.trim_start_matches('-').parse().ok()?;
        Some(if text.starts_with('-') { -n } else { n })
    }
}
