use alloc::vec::Vec;
use core::cmp::Ordering::{self, Equal};
use core::fmt;
use core::ops::{Mul, Neg};

use num_traits::{One, Zero};

use crate::big_digit::{self, BigDigit};

pub(crate) mod addition;
pub(crate) mod division;
pub(crate) mod multiplication;
pub(crate) mod shift;

mod bits;
mod convert;
mod power;
mod serde;
mod zeroize;

pub use self::Sign::{Minus, NoSign, Plus};

/// A `Sign` is a [`BigInt`]'s composing element.
#[derive(PartialEq, PartialOrd, Eq, Ord, Copy, Clone, Debug, Hash)]
pub enum Sign {
    Minus,
    NoSign,
    Plus,
}

impl Sign {
    /// `-1`, `0` or `1`.
    #[inline]
    pub fn as_i32(self) -> i32 {
        match self {
            Minus => -1,
            NoSign => 0,
            Plus => 1,
        }
    }
}

impl Neg for Sign {
    type Output = Sign;

    #[inline]
    fn neg(self) -> Sign {
        match self {
            Minus => Plus,
            NoSign => NoSign,
            Plus => Minus,
        }
    }
}

impl Mul<Sign> for Sign {
    type Output = Sign;

    #[inline]
    fn mul(self, other: Sign) -> Sign {
        match (self, other) {
            (NoSign, _) | (_, NoSign) => NoSign,
            (Plus, Plus) | (Minus, Minus) => Plus,
            (Plus, Minus) | (Minus, Plus) => Minus,
        }
    }
}

/// An arbitrary-precision signed integer.
///
/// The magnitude is a vector of 32-bit limbs, least significant first, and is
/// always normalized: there is never a most-significant zero limb, and zero
/// is the empty vector with [`Sign::NoSign`]. Values are immutable; every
/// operation returns a fresh `BigInt`.
#[derive(Clone, Hash, PartialEq, Eq)]
pub struct BigInt {
    sign: Sign,
    data: Vec<BigDigit>,
}

impl BigInt {
    /// Creates a `BigInt` from a sign and little-endian limbs.
    ///
    /// Trailing zero limbs are trimmed. A zero magnitude, or `NoSign`, yields zero.
    pub fn new(sign: Sign, digits: Vec<BigDigit>) -> BigInt {
        let mut n = BigInt { sign, data: digits };
        n.normalize();
        n
    }

    /// Creates a `BigInt` from a sign and a slice of little-endian limbs.
    #[inline]
    pub fn from_slice(sign: Sign, slice: &[BigDigit]) -> BigInt {
        BigInt::new(sign, slice.to_vec())
    }

    /// Trims most-significant zero limbs and fixes up the sign of zero.
    pub(crate) fn normalize(&mut self) {
        while let Some(&0) = self.data.last() {
            self.data.pop();
        }
        if self.data.is_empty() || self.sign == NoSign {
            self.data.clear();
            self.sign = NoSign;
        }
    }

    #[inline]
    pub fn sign(&self) -> Sign {
        self.sign
    }

    /// `-1`, `0` or `1` according to the sign.
    #[inline]
    pub fn signum(&self) -> i32 {
        self.sign.as_i32()
    }

    /// The magnitude limbs, least significant first.
    #[inline]
    pub fn digits(&self) -> &[BigDigit] {
        &self.data
    }

    /// Splits into sign and magnitude limbs.
    #[inline]
    pub fn into_parts(self) -> (Sign, Vec<BigDigit>) {
        (self.sign, self.data)
    }

    /// Whether this is zero. Same as [`Zero::is_zero`].
    #[inline]
    pub fn is_zero(&self) -> bool {
        self.sign == NoSign
    }

    #[inline]
    pub fn is_negative(&self) -> bool {
        self.sign == Minus
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.sign == Plus
    }

    #[inline]
    pub fn is_even(&self) -> bool {
        self.data.first().is_none_or(|d| d & 1 == 0)
    }

    #[inline]
    pub fn is_odd(&self) -> bool {
        !self.is_even()
    }

    /// The absolute value.
    pub fn abs(&self) -> BigInt {
        match self.sign {
            Minus => BigInt {
                sign: Plus,
                data: self.data.clone(),
            },
            _ => self.clone(),
        }
    }

    /// Number of bits in the magnitude, 0 for zero.
    pub fn bits(&self) -> u64 {
        match self.data.last() {
            None => 0,
            Some(&top) => {
                let zeros = u64::from(top.leading_zeros());
                self.data.len() as u64 * big_digit::BITS as u64 - zeros
            }
        }
    }

    /// Compares magnitudes, ignoring signs.
    #[inline]
    pub fn cmp_abs(&self, other: &BigInt) -> Ordering {
        cmp_slice(&self.data, &other.data)
    }
}

/// Compares two normalized little-endian magnitudes.
pub fn cmp_slice(a: &[BigDigit], b: &[BigDigit]) -> Ordering {
    debug_assert!(a.last() != Some(&0));
    debug_assert!(b.last() != Some(&0));

    match a.len().cmp(&b.len()) {
        Equal => {}
        other => return other,
    }
    for (ai, bi) in a.iter().rev().zip(b.iter().rev()) {
        match ai.cmp(bi) {
            Equal => continue,
            other => return other,
        }
    }
    Equal
}

impl PartialOrd for BigInt {
    #[inline]
    fn partial_cmp(&self, other: &BigInt) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for BigInt {
    fn cmp(&self, other: &BigInt) -> Ordering {
        let scmp = self.sign.cmp(&other.sign);
        if scmp != Equal {
            return scmp;
        }

        match self.sign {
            NoSign => Equal,
            Plus => cmp_slice(&self.data, &other.data),
            Minus => cmp_slice(&other.data, &self.data),
        }
    }
}

impl Default for BigInt {
    #[inline]
    fn default() -> BigInt {
        Zero::zero()
    }
}

impl Zero for BigInt {
    #[inline]
    fn zero() -> BigInt {
        BigInt {
            sign: NoSign,
            data: Vec::new(),
        }
    }

    #[inline]
    fn is_zero(&self) -> bool {
        self.sign == NoSign
    }
}

impl One for BigInt {
    #[inline]
    fn one() -> BigInt {
        BigInt {
            sign: Plus,
            data: alloc::vec![1],
        }
    }

    #[inline]
    fn is_one(&self) -> bool {
        self.sign == Plus && self.data[..] == [1]
    }
}

impl Neg for BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(mut self) -> BigInt {
        self.sign = -self.sign;
        self
    }
}

impl Neg for &BigInt {
    type Output = BigInt;

    #[inline]
    fn neg(self) -> BigInt {
        -self.clone()
    }
}

impl fmt::Debug for BigInt {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(self, f)
    }
}

/// Generates the by-value and mixed-reference forms of a binary operator from
/// the `&BigInt op &BigInt` implementation.
macro_rules! forward_all_binop {
    (impl $imp:ident for $res:ty, $method:ident) => {
        impl $imp<$res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                $imp::$method(&self, &other)
            }
        }

        impl<'a> $imp<&'a $res> for $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: &$res) -> $res {
                $imp::$method(&self, other)
            }
        }

        impl<'a> $imp<$res> for &'a $res {
            type Output = $res;

            #[inline]
            fn $method(self, other: $res) -> $res {
                $imp::$method(self, &other)
            }
        }
    };
}

/// Generates `op=` for owned and borrowed right-hand sides.
macro_rules! forward_assign_op {
    (impl $imp:ident for $res:ty, $method:ident, $op:ident, $op_method:ident) => {
        impl $imp<$res> for $res {
            #[inline]
            fn $method(&mut self, other: $res) {
                *self = $op::$op_method(&*self, &other);
            }
        }

        impl<'a> $imp<&'a $res> for $res {
            #[inline]
            fn $method(&mut self, other: &$res) {
                *self = $op::$op_method(&*self, other);
            }
        }
    };
}

pub(crate) use {forward_all_binop, forward_assign_op};

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_normalizes() {
        let n = BigInt::new(Plus, alloc::vec![5, 0, 0]);
        assert_eq!(n.digits(), &[5]);

        let z = BigInt::new(Minus, alloc::vec![0, 0]);
        assert!(z.is_zero());
        assert_eq!(z.sign(), NoSign);
        assert!(z.digits().is_empty());

        let z = BigInt::new(NoSign, alloc::vec![7]);
        assert!(z.is_zero());
    }

    #[test]
    fn test_cmp_sign_then_magnitude() {
        let a = BigInt::from(-5);
        let b = BigInt::from(3);
        let c = BigInt::from(-(1i64 << 40));
        assert!(a < b);
        assert!(c < a);
        assert!(BigInt::zero() > a);
        assert_eq!(BigInt::from(1u64 << 40).cmp(&BigInt::from(1u64 << 40)), Equal);
    }

    #[test]
    fn test_bits() {
        assert_eq!(BigInt::zero().bits(), 0);
        assert_eq!(BigInt::from(1).bits(), 1);
        assert_eq!(BigInt::from(255).bits(), 8);
        assert_eq!(BigInt::from(-256).bits(), 9);
        assert_eq!(BigInt::from(1u64 << 32).bits(), 33);
    }

    #[test]
    fn test_sign_algebra() {
        assert_eq!(Minus * Minus, Plus);
        assert_eq!(Plus * Minus, Minus);
        assert_eq!(NoSign * Minus, NoSign);
        assert_eq!(-Minus, Plus);
    }
}
