use alloc::vec::Vec;
use core::iter::Product;
use core::ops::{Mul, MulAssign};

use num_traits::One;

use super::addition::adc;
use super::{forward_all_binop, forward_assign_op, BigInt};
use crate::big_digit::{BigDigit, DoubleBigDigit, BITS};

/// Returns the low limb of `a + b * c + *acc`, leaving the high part in `acc`.
///
/// The sum is at most `(2^32 - 1) + (2^32 - 1)^2 + (2^32 - 1) = 2^64 - 1`, so
/// it always fits a `DoubleBigDigit`.
#[inline]
pub fn mac_with_carry(a: BigDigit, b: BigDigit, c: BigDigit, acc: &mut DoubleBigDigit) -> BigDigit {
    *acc += DoubleBigDigit::from(a);
    *acc += DoubleBigDigit::from(b) * DoubleBigDigit::from(c);
    let lo = *acc as BigDigit;
    *acc >>= BITS;
    lo
}

/// `acc += b * c`, where `acc` is long enough to hold the carry.
pub fn mac_digit(acc: &mut [BigDigit], b: &[BigDigit], c: BigDigit) {
    if c == 0 {
        return;
    }

    let mut carry = 0;
    let (a_lo, a_hi) = acc.split_at_mut(b.len());

    for (a, &b) in a_lo.iter_mut().zip(b) {
        *a = mac_with_carry(*a, b, c, &mut carry);
    }

    let mut a_hi = a_hi.iter_mut();
    while carry != 0 {
        let a = a_hi.next().expect("carry overflow during multiplication!");
        *a = adc(*a, 0, &mut carry);
    }
}

/// Schoolbook product of two magnitudes.
///
/// Each limb of `x` multiplies all of `y` into the product shifted by that
/// limb's position.
pub fn mul3(x: &[BigDigit], y: &[BigDigit]) -> Vec<BigDigit> {
    if x.is_empty() || y.is_empty() {
        return Vec::new();
    }

    let (x, y) = if x.len() < y.len() { (x, y) } else { (y, x) };
    let mut prod = alloc::vec![0; x.len() + y.len() + 1];
    for (i, &xi) in x.iter().enumerate() {
        mac_digit(&mut prod[i..], y, xi);
    }

    while let Some(&0) = prod.last() {
        prod.pop();
    }
    prod
}

/// `a *= b` in place, growing `a` by one limb on overflow.
pub fn scalar_mul(a: &mut Vec<BigDigit>, b: BigDigit) {
    match b {
        0 => a.clear(),
        1 => {}
        _ => {
            let mut carry = 0;
            for a in a.iter_mut() {
                *a = mac_with_carry(0, *a, b, &mut carry);
            }
            if carry != 0 {
                a.push(carry as BigDigit);
            }
        }
    }
}

impl Mul<&BigInt> for &BigInt {
    type Output = BigInt;

    fn mul(self, other: &BigInt) -> BigInt {
        BigInt::new(self.sign * other.sign, mul3(&self.data, &other.data))
    }
}

forward_all_binop!(impl Mul for BigInt, mul);
forward_assign_op!(impl MulAssign for BigInt, mul_assign, Mul, mul);

impl BigInt {
    /// Multiplies by a single limb.
    pub(crate) fn mul_digit(&self, d: BigDigit) -> BigInt {
        let mut data = self.data.clone();
        scalar_mul(&mut data, d);
        BigInt::new(self.sign, data)
    }
}

impl<T> Product<T> for BigInt
where
    BigInt: Mul<T, Output = BigInt>,
{
    fn product<I: Iterator<Item = T>>(iter: I) -> Self {
        iter.fold(BigInt::one(), |a, b| a * b)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;

    #[test]
    fn test_mac_with_carry_max() {
        let mut acc = BigDigit::MAX as DoubleBigDigit;
        let lo = mac_with_carry(BigDigit::MAX, BigDigit::MAX, BigDigit::MAX, &mut acc);
        assert_eq!(lo, BigDigit::MAX);
        assert_eq!(acc, BigDigit::MAX as DoubleBigDigit);
    }

    #[test]
    fn test_mul_signs() {
        let a = BigInt::from(-12);
        let b = BigInt::from(12);
        assert_eq!(&a * &b, BigInt::from(-144));
        assert_eq!(&a * &a, BigInt::from(144));
        assert_eq!(&a * BigInt::from(0), BigInt::from(0));
    }

    #[test]
    fn test_mul_multi_limb() {
        let a = BigInt::from_str("123456789012345678901234567890").unwrap();
        let b = BigInt::from_str("987654321098765432109876543210").unwrap();
        let expected =
            BigInt::from_str("121932631137021795226185032733622923332237463801111263526900")
                .unwrap();
        assert_eq!(a * b, expected);
    }

    #[test]
    fn test_factorial_product() {
        let f: BigInt = (1..=25u32).map(BigInt::from).product();
        assert_eq!(f.to_string(), "15511210043330985984000000");
    }
}
