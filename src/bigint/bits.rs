//! Bitwise operations with two's-complement semantics.
//!
//! Magnitudes are stored unsigned, so each operation first converts its
//! operands to the two's-complement limbs a fixed-width register would hold,
//! combines those limb-wise, and converts the result back. The width is wide
//! enough for both operands plus a sign bit.

use alloc::vec::Vec;
use core::cmp::max;
use core::ops::{BitAnd, BitOr, BitXor, Not};

use num_traits::One;

use super::{forward_all_binop, BigInt, Sign};
use crate::big_digit::{BigDigit, BITS};

/// Replaces `limbs` with its two's-complement negation at the same width.
fn negate_in_place(limbs: &mut [BigDigit]) {
    let mut carry = true;
    for d in limbs.iter_mut() {
        let (v, c) = (!*d).overflowing_add(BigDigit::from(carry));
        *d = v;
        carry = c;
    }
}

/// Limb count that can hold a magnitude of `bits` bits plus a sign bit.
#[inline]
fn width_for(bits: u64) -> usize {
    bits as usize / BITS + 1
}

impl BigInt {
    /// The two's-complement limbs of `self`, least significant first.
    ///
    /// The result has `width` limbs, or more when `width` leaves no room for
    /// the magnitude plus a sign bit, so the value is never truncated.
    pub fn to_twos_complement(&self, width: usize) -> Vec<BigDigit> {
        let width = max(width, width_for(self.bits()));
        let mut limbs = self.data.clone();
        limbs.resize(width, 0);
        if self.is_negative() {
            negate_in_place(&mut limbs);
        }
        limbs
    }

    /// Reads two's-complement limbs back into a `BigInt`; a set top bit means
    /// the value is negative.
    pub fn from_twos_complement(mut limbs: Vec<BigDigit>) -> BigInt {
        match limbs.last() {
            Some(&top) if top >> (BITS - 1) == 1 => {
                negate_in_place(&mut limbs);
                BigInt::new(Sign::Minus, limbs)
            }
            _ => BigInt::new(Sign::Plus, limbs),
        }
    }

    fn bitwise(&self, other: &BigInt, op: impl Fn(BigDigit, BigDigit) -> BigDigit) -> BigInt {
        let width = width_for(max(self.bits(), other.bits()));
        let a = self.to_twos_complement(width);
        let b = other.to_twos_complement(width);
        let limbs = a.iter().zip(&b).map(|(&x, &y)| op(x, y)).collect();
        BigInt::from_twos_complement(limbs)
    }

    /// `self & !other`.
    pub fn and_not(&self, other: &BigInt) -> BigInt {
        self.bitwise(other, |x, y| x & !y)
    }

    /// Applies `op` to the bit at position `bit` of the two's-complement value.
    fn with_bit(&self, bit: u64, op: impl Fn(BigDigit, BigDigit) -> BigDigit) -> BigInt {
        let width = width_for(max(self.bits(), bit + 1));
        let mut limbs = self.to_twos_complement(width);
        let idx = (bit / BITS as u64) as usize;
        limbs[idx] = op(limbs[idx], 1 << (bit % BITS as u64));
        BigInt::from_twos_complement(limbs)
    }

    /// Whether bit `bit` of the two's-complement value is set.
    pub fn test_bit(&self, bit: u64) -> bool {
        let idx = (bit / BITS as u64) as usize;
        if idx >= self.data.len() {
            return self.is_negative();
        }
        let limbs = self.to_twos_complement(width_for(self.bits()));
        (limbs[idx] >> (bit % BITS as u64)) & 1 == 1
    }

    pub fn set_bit(&self, bit: u64) -> BigInt {
        self.with_bit(bit, |d, mask| d | mask)
    }

    pub fn clear_bit(&self, bit: u64) -> BigInt {
        self.with_bit(bit, |d, mask| d & !mask)
    }

    pub fn flip_bit(&self, bit: u64) -> BigInt {
        self.with_bit(bit, |d, mask| d ^ mask)
    }

    /// Index of the lowest set bit, or `None` for zero. The same for `x`
    /// and `-x`.
    pub fn lowest_set_bit(&self) -> Option<u64> {
        let (i, d) = self.data.iter().enumerate().find(|(_, d)| **d != 0)?;
        Some(i as u64 * BITS as u64 + u64::from(d.trailing_zeros()))
    }

    /// Length of the minimal two's-complement representation, excluding the
    /// sign bit: `bits()` for non-negative values and `(|self| - 1).bits()`
    /// for negative ones.
    ///
    /// This differs from [`bits`](BigInt::bits) only for negatives. `bits` is
    /// the index of the highest set magnitude bit plus one, the length that
    /// random generation and prime sizes are measured in.
    pub fn bit_length(&self) -> u64 {
        if self.is_negative() {
            (self.abs() - BigInt::one()).bits()
        } else {
            self.bits()
        }
    }

    /// Number of bits that differ from the sign bit: the population count of
    /// the magnitude, or of `|self| - 1` for negative values.
    pub fn bit_count(&self) -> u64 {
        let popcount = |n: &BigInt| n.data.iter().map(|d| u64::from(d.count_ones())).sum();
        if self.is_negative() {
            popcount(&(self.abs() - BigInt::one()))
        } else {
            popcount(self)
        }
    }
}

impl BitAnd<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitand(self, other: &BigInt) -> BigInt {
        self.bitwise(other, |x, y| x & y)
    }
}

impl BitOr<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitor(self, other: &BigInt) -> BigInt {
        self.bitwise(other, |x, y| x | y)
    }
}

impl BitXor<&BigInt> for &BigInt {
    type Output = BigInt;

    fn bitxor(self, other: &BigInt) -> BigInt {
        self.bitwise(other, |x, y| x ^ y)
    }
}

forward_all_binop!(impl BitAnd for BigInt, bitand);
forward_all_binop!(impl BitOr for BigInt, bitor);
forward_all_binop!(impl BitXor for BigInt, bitxor);

impl Not for &BigInt {
    type Output = BigInt;

    fn not(self) -> BigInt {
        let limbs = self
            .to_twos_complement(width_for(self.bits()))
            .into_iter()
            .map(|d| !d)
            .collect();
        BigInt::from_twos_complement(limbs)
    }
}

impl Not for BigInt {
    type Output = BigInt;

    #[inline]
    fn not(self) -> BigInt {
        !&self
    }
}
