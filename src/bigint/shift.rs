use alloc::vec::Vec;
use core::ops::{Shl, Shr};

use super::BigInt;
use crate::big_digit::{BigDigit, BITS};

/// Shifts a magnitude left by `bits`: whole limbs are prepended as zeros,
/// then the remaining sub-limb shift carries bits upward.
pub fn mag_shl(n: &[BigDigit], bits: usize) -> Vec<BigDigit> {
    if n.is_empty() {
        return Vec::new();
    }
    let n_unit = bits / BITS;
    let n_bits = bits % BITS;

    let mut data = alloc::vec![0; n_unit];
    data.reserve(n.len() + 1);
    if n_bits == 0 {
        data.extend_from_slice(n);
    } else {
        let mut carry = 0;
        for &elem in n {
            data.push((elem << n_bits) | carry);
            carry = elem >> (BITS - n_bits);
        }
        if carry != 0 {
            data.push(carry);
        }
    }
    data
}

/// Shifts a magnitude right by `bits`, discarding the bits shifted out.
pub fn mag_shr(n: &[BigDigit], bits: usize) -> Vec<BigDigit> {
    let n_unit = bits / BITS;
    if n_unit >= n.len() {
        return Vec::new();
    }
    let n_bits = bits % BITS;

    let mut data: Vec<BigDigit> = n[n_unit..].to_vec();
    if n_bits > 0 {
        let mut borrow = 0;
        for elem in data.iter_mut().rev() {
            let new_borrow = *elem << (BITS - n_bits);
            *elem = (*elem >> n_bits) | borrow;
            borrow = new_borrow;
        }
    }

    while let Some(&0) = data.last() {
        data.pop();
    }
    data
}

impl BigInt {
    /// `self × 2^n`.
    pub fn shift_left(&self, n: usize) -> BigInt {
        BigInt::new(self.sign, mag_shl(&self.data, n))
    }

    /// `floor(self / 2^n)`, the arithmetic right shift of the two's-complement
    /// value: negative values round toward negative infinity.
    pub fn shift_right(&self, n: usize) -> BigInt {
        let shifted = BigInt::new(self.sign, mag_shr(&self.data, n));
        if self.is_negative() && self.lowest_set_bit().is_some_and(|low| low < n as u64) {
            shifted - BigInt::from(1)
        } else {
            shifted
        }
    }
}

impl Shl<usize> for BigInt {
    type Output = BigInt;

    #[inline]
    fn shl(self, rhs: usize) -> BigInt {
        self.shift_left(rhs)
    }
}

impl Shl<usize> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn shl(self, rhs: usize) -> BigInt {
        self.shift_left(rhs)
    }
}

impl Shr<usize> for BigInt {
    type Output = BigInt;

    #[inline]
    fn shr(self, rhs: usize) -> BigInt {
        self.shift_right(rhs)
    }
}

impl Shr<usize> for &BigInt {
    type Output = BigInt;

    #[inline]
    fn shr(self, rhs: usize) -> BigInt {
        self.shift_right(rhs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shl_limb_and_bits() {
        let one = BigInt::from(1);
        assert_eq!(&one << 32, BigInt::from(1u64 << 32));
        assert_eq!(&one << 35, BigInt::from(1u64 << 35));
        assert_eq!(BigInt::from(-3) << 4, BigInt::from(-48));
    }

    #[test]
    fn test_shr_positive() {
        assert_eq!(BigInt::from(1u64 << 40) >> 8, BigInt::from(1u64 << 32));
        assert_eq!(BigInt::from(5) >> 1, BigInt::from(2));
        assert_eq!(BigInt::from(5) >> 100, BigInt::from(0));
    }

    #[test]
    fn test_shr_negative_floors() {
        assert_eq!(BigInt::from(-5) >> 1, BigInt::from(-3));
        assert_eq!(BigInt::from(-4) >> 1, BigInt::from(-2));
        assert_eq!(BigInt::from(-1) >> 10, BigInt::from(-1));
        assert_eq!(BigInt::from(-(1i64 << 40)) >> 40, BigInt::from(-1));
        assert_eq!(BigInt::from(-(1i64 << 40) - 1) >> 40, BigInt::from(-2));
        for v in -300i64..300 {
            for s in 0..12 {
                assert_eq!(BigInt::from(v) >> s, BigInt::from(v >> s), "{v} >> {s}");
            }
        }
    }
}
