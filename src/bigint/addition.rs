use alloc::vec::Vec;
use core::cmp::Ordering::{Equal, Greater, Less};
use core::iter::Sum;
use core::ops::{Add, AddAssign, Sub, SubAssign};

use num_traits::Zero;

use super::{cmp_slice, forward_all_binop, forward_assign_op, BigInt, Sign};
use crate::big_digit::{BigDigit, DoubleBigDigit, BITS};

/// Add with carry: returns the low limb of `a + b + *acc` and leaves the
/// carry in `acc`.
#[inline]
pub fn adc(a: BigDigit, b: BigDigit, acc: &mut DoubleBigDigit) -> BigDigit {
    *acc += DoubleBigDigit::from(a);
    *acc += DoubleBigDigit::from(b);
    let lo = *acc as BigDigit;
    *acc >>= BITS;
    lo
}

/// Subtract with borrow: returns the low limb of `a - b - borrow` and sets
/// `borrow` to 1 when the subtraction wrapped.
#[inline]
pub fn sbb(a: BigDigit, b: BigDigit, borrow: &mut BigDigit) -> BigDigit {
    let (d, b1) = a.overflowing_sub(b);
    let (d, b2) = d.overflowing_sub(*borrow);
    *borrow = BigDigit::from(b1 || b2);
    d
}

/// `a += b`, returning the carry out of the most significant limb of `a`.
///
/// `a` must be at least as long as `b`.
pub fn __add2(a: &mut [BigDigit], b: &[BigDigit]) -> BigDigit {
    debug_assert!(a.len() >= b.len());

    let mut carry = 0;
    let (a_lo, a_hi) = a.split_at_mut(b.len());

    for (a, b) in a_lo.iter_mut().zip(b) {
        *a = adc(*a, *b, &mut carry);
    }

    if carry != 0 {
        for a in a_hi {
            *a = adc(*a, 0, &mut carry);
            if carry == 0 {
                break;
            }
        }
    }

    carry as BigDigit
}

/// `a += b` where the sum is known to fit in `a`.
pub fn add2(a: &mut [BigDigit], b: &[BigDigit]) {
    let carry = __add2(a, b);
    assert!(carry == 0, "carry overflow during addition");
}

/// `a -= b` where `a >= b`.
pub fn sub2(a: &mut [BigDigit], b: &[BigDigit]) {
    let mut borrow = 0;

    let len = a.len().min(b.len());
    let (a_lo, a_hi) = a.split_at_mut(len);
    let (b_lo, b_hi) = b.split_at(len);

    for (a, b) in a_lo.iter_mut().zip(b_lo) {
        *a = sbb(*a, *b, &mut borrow);
    }

    if borrow != 0 {
        for a in a_hi {
            *a = sbb(*a, 0, &mut borrow);
            if borrow == 0 {
                break;
            }
        }
    }

    assert!(
        borrow == 0 && b_hi.iter().all(|x| *x == 0),
        "Cannot subtract b from a because b is larger than a."
    );
}

/// Adds a single limb into a magnitude, growing it on carry.
pub(crate) fn add_digit(a: &mut Vec<BigDigit>, d: BigDigit) {
    if d == 0 {
        return;
    }
    if a.is_empty() {
        a.push(d);
        return;
    }
    let carry = __add2(a, &[d]);
    if carry != 0 {
        a.push(carry);
    }
}

/// `|a| + |b|` as a fresh magnitude.
pub(crate) fn add_mag(a: &[BigDigit], b: &[BigDigit]) -> Vec<BigDigit> {
    let (long, short) = if a.len() >= b.len() { (a, b) } else { (b, a) };
    let mut sum = Vec::with_capacity(long.len() + 1);
    sum.extend_from_slice(long);
    let carry = __add2(&mut sum, short);
    if carry != 0 {
        sum.push(carry);
    }
    sum
}

/// `|a| - |b|` as a fresh magnitude, where `|a| >= |b|`.
pub(crate) fn sub_mag(a: &[BigDigit], b: &[BigDigit]) -> Vec<BigDigit> {
    let mut diff = a.to_vec();
    sub2(&mut diff, b);
    diff
}

/// Adds two signed magnitudes. Differing signs subtract the smaller magnitude
/// from the larger and keep the larger operand's sign.
fn add_signed(a_sign: Sign, a: &[BigDigit], b_sign: Sign, b: &[BigDigit]) -> BigInt {
    match (a_sign, b_sign) {
        (_, Sign::NoSign) => BigInt::from_slice(a_sign, a),
        (Sign::NoSign, _) => BigInt::from_slice(b_sign, b),
        (x, y) if x == y => BigInt::new(x, add_mag(a, b)),
        _ => match cmp_slice(a, b) {
            Equal => BigInt::zero(),
            Greater => BigInt::new(a_sign, sub_mag(a, b)),
            Less => BigInt::new(b_sign, sub_mag(b, a)),
        },
    }
}

impl Add<&BigInt> for &BigInt {
    type Output = BigInt;

    fn add(self, other: &BigInt) -> BigInt {
        add_signed(self.sign, &self.data, other.sign, &other.data)
    }
}

impl Sub<&BigInt> for &BigInt {
    type Output = BigInt;

    fn sub(self, other: &BigInt) -> BigInt {
        add_signed(self.sign, &self.data, -other.sign, &other.data)
    }
}

forward_all_binop!(impl Add for BigInt, add);
forward_all_binop!(impl Sub for BigInt, sub);
forward_assign_op!(impl AddAssign for BigInt, add_assign, Add, add);
forward_assign_op!(impl SubAssign for BigInt, sub_assign, Sub, sub);

impl<T> Sum<T> for BigInt
where
    BigInt: Add<T, Output = BigInt>,
{
    fn sum<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(BigInt::zero(), |a, b| a + b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_adc_carries() {
        let mut acc = 0;
        assert_eq!(adc(BigDigit::MAX, 1, &mut acc), 0);
        assert_eq!(acc, 1);
    }

    #[test]
    fn test_add_across_limbs() {
        let a = BigInt::from(u32::MAX);
        let b = BigInt::from(1);
        assert_eq!(&a + &b, BigInt::from(1u64 << 32));
    }

    #[test]
    fn test_mixed_signs() {
        let a = BigInt::from(5);
        let b = BigInt::from(-8);
        assert_eq!(&a + &b, BigInt::from(-3));
        assert_eq!(&b + &a, BigInt::from(-3));
        assert_eq!(&a - &b, BigInt::from(13));
        assert_eq!(&b - &a, BigInt::from(-13));
    }

    #[test]
    fn test_cancel_to_zero() {
        let a = BigInt::from(-(1i128 << 100));
        let z = &a - &a;
        assert!(z.is_zero());
        assert_eq!(z.sign(), Sign::NoSign);
        assert!(z.digits().is_empty());
    }

    #[test]
    fn test_borrow_shrinks() {
        let a = BigInt::from(1u64 << 32);
        let b = BigInt::from(1);
        let d = a - b;
        assert_eq!(d.digits(), &[u32::MAX]);
    }

    #[test]
    fn test_sum() {
        let total: BigInt = (1..=100).map(BigInt::from).sum();
        assert_eq!(total, BigInt::from(5050));
    }
}
