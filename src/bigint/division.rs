use alloc::vec::Vec;
use core::cmp::Ordering::Less;

use super::addition::sub2;
use super::{cmp_slice, BigInt, Sign};
use crate::big_digit::{self, BigDigit, DoubleBigDigit, BITS};
use crate::error::{Error, Result};

/// Divides a magnitude by a single limb, returning quotient and remainder.
pub fn div_rem_digit(mut a: Vec<BigDigit>, b: BigDigit) -> (Vec<BigDigit>, BigDigit) {
    assert!(b != 0, "attempt to divide by zero");

    let mut rem: DoubleBigDigit = 0;
    for d in a.iter_mut().rev() {
        let lhs = big_digit::to_doublebigdigit(rem as BigDigit, *d);
        *d = (lhs / DoubleBigDigit::from(b)) as BigDigit;
        rem = lhs % DoubleBigDigit::from(b);
    }

    while let Some(&0) = a.last() {
        a.pop();
    }
    (a, rem as BigDigit)
}

/// Remainder of a magnitude modulo a single limb.
pub fn rem_digit(a: &[BigDigit], b: BigDigit) -> BigDigit {
    let mut rem: DoubleBigDigit = 0;
    for &d in a.iter().rev() {
        rem = big_digit::to_doublebigdigit(rem as BigDigit, d) % DoubleBigDigit::from(b);
    }
    rem as BigDigit
}

/// Shifts `r` left by one bit and brings `bit` in at the bottom.
fn shl1_in(r: &mut Vec<BigDigit>, bit: BigDigit) {
    let mut carry = bit;
    for d in r.iter_mut() {
        let next = *d >> (BITS - 1);
        *d = (*d << 1) | carry;
        carry = next;
    }
    if carry != 0 {
        r.push(carry);
    }
}

/// Truncating division of magnitudes.
///
/// Single-limb divisors use [`div_rem_digit`]. Otherwise this is binary long
/// division: the dividend's bits are shifted into a running remainder from the
/// most significant end, and whenever the remainder reaches the divisor it is
/// reduced and the matching quotient bit is set.
pub fn div_rem_mag(u: &[BigDigit], d: &[BigDigit]) -> (Vec<BigDigit>, Vec<BigDigit>) {
    assert!(!d.is_empty(), "attempt to divide by zero");

    if cmp_slice(u, d) == Less {
        return (Vec::new(), u.to_vec());
    }
    if d.len() == 1 {
        let (q, r) = div_rem_digit(u.to_vec(), d[0]);
        let r = if r == 0 { Vec::new() } else { alloc::vec![r] };
        return (q, r);
    }

    let mut q = alloc::vec![0; u.len()];
    let mut r: Vec<BigDigit> = Vec::with_capacity(d.len() + 1);

    let total_bits = u.len() * BITS - u[u.len() - 1].leading_zeros() as usize;
    for i in (0..total_bits).rev() {
        let bit = (u[i / BITS] >> (i % BITS)) & 1;
        shl1_in(&mut r, bit);
        if cmp_slice(&r, d) != Less {
            sub2(&mut r, d);
            while let Some(&0) = r.last() {
                r.pop();
            }
            q[i / BITS] |= 1 << (i % BITS);
        }
    }

    while let Some(&0) = q.last() {
        q.pop();
    }
    (q, r)
}

impl BigInt {
    /// Truncating division for a divisor already known to be non-zero.
    pub(crate) fn div_rem_nonzero(&self, other: &BigInt) -> (BigInt, BigInt) {
        debug_assert!(!other.is_zero());
        let (q, r) = div_rem_mag(&self.data, &other.data);
        (
            BigInt::new(self.sign * other.sign, q),
            BigInt::new(self.sign, r),
        )
    }

    /// Divides by a single limb, returning a quotient with this value's sign
    /// and the remainder's magnitude.
    pub(crate) fn div_rem_digit(&self, d: BigDigit) -> (BigInt, BigDigit) {
        let (q, r) = div_rem_digit(self.data.clone(), d);
        (BigInt::new(self.sign, q), r)
    }

    /// Truncating division: `self == q * other + r`, with `r` taking the
    /// sign of `self` and `|r| < |other|`.
    ///
    /// ```
    /// use bigdec::BigInt;
    ///
    /// let (q, r) = BigInt::from(-7).div_rem(&BigInt::from(2)).unwrap();
    /// assert_eq!((q, r), (BigInt::from(-3), BigInt::from(-1)));
    /// ```
    pub fn div_rem(&self, other: &BigInt) -> Result<(BigInt, BigInt)> {
        if other.is_zero() {
            return Err(Error::DivideByZero { op: "div_rem" });
        }
        Ok(self.div_rem_nonzero(other))
    }

    /// Quotient rounded toward zero.
    pub fn div(&self, other: &BigInt) -> Result<BigInt> {
        if other.is_zero() {
            return Err(Error::DivideByZero { op: "div" });
        }
        Ok(self.div_rem_nonzero(other).0)
    }

    /// Remainder with the sign of `self`.
    pub fn rem(&self, other: &BigInt) -> Result<BigInt> {
        if other.is_zero() {
            return Err(Error::DivideByZero { op: "rem" });
        }
        Ok(self.div_rem_nonzero(other).1)
    }

    /// Non-negative remainder of `self` modulo `m`.
    ///
    /// Fails with [`Error::DivideByZero`] for a zero modulus and with
    /// [`Error::Domain`] for a negative one.
    pub fn modulo(&self, m: &BigInt) -> Result<BigInt> {
        check_modulus("modulo", m)?;
        Ok(self.mod_floor_unchecked(m))
    }

    /// `self mod m` for a positive `m`.
    pub(crate) fn mod_floor_unchecked(&self, m: &BigInt) -> BigInt {
        debug_assert!(m.sign == Sign::Plus);
        let (_, r) = div_rem_mag(&self.data, &m.data);
        let r = BigInt::new(Sign::Plus, r);
        if self.is_negative() && !r.is_zero() {
            m - r
        } else {
            r
        }
    }
}

pub(crate) fn check_modulus(op: &'static str, m: &BigInt) -> Result<()> {
    match m.sign {
        Sign::NoSign => Err(Error::DivideByZero { op }),
        Sign::Minus => Err(Error::domain(op, alloc::format!("modulus {m} is negative"))),
        Sign::Plus => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::str::FromStr;
    use num_traits::Zero;

    #[test]
    fn test_div_rem_digit() {
        let (q, r) = div_rem_digit(alloc::vec![0, 1], 3);
        // 2^32 = 3 * 1431655765 + 1
        assert_eq!(q, alloc::vec![1_431_655_765]);
        assert_eq!(r, 1);
    }

    #[test]
    fn test_truncating_signs() {
        let cases = [(7, 2, 3, 1), (-7, 2, -3, -1), (7, -2, -3, 1), (-7, -2, 3, -1)];
        for (a, b, q, r) in cases {
            let (qq, rr) = BigInt::from(a).div_rem(&BigInt::from(b)).unwrap();
            assert_eq!(qq, BigInt::from(q), "{a} / {b}");
            assert_eq!(rr, BigInt::from(r), "{a} % {b}");
        }
    }

    #[test]
    fn test_div_by_zero() {
        let err = BigInt::from(1).div_rem(&BigInt::zero()).unwrap_err();
        assert_eq!(err, Error::DivideByZero { op: "div_rem" });
        assert!(BigInt::from(1).rem(&BigInt::zero()).is_err());
        assert!(BigInt::from(1).modulo(&BigInt::zero()).is_err());
    }

    #[test]
    fn test_multi_limb_long_division() {
        let a = BigInt::from_str("340282366920938463463374607431768211457").unwrap();
        let b = BigInt::from_str("18446744073709551629").unwrap();
        let (q, r) = a.div_rem(&b).unwrap();
        assert_eq!(&q * &b + &r, a);
        assert!(r.cmp_abs(&b) == Less);
        assert!(!r.is_negative());
    }

    #[test]
    fn test_modulo_is_non_negative() {
        let m = BigInt::from(5);
        assert_eq!(BigInt::from(-7).modulo(&m).unwrap(), BigInt::from(3));
        assert_eq!(BigInt::from(-10).modulo(&m).unwrap(), BigInt::from(0));
        assert_eq!(BigInt::from(7).modulo(&m).unwrap(), BigInt::from(2));
        assert!(matches!(
            BigInt::from(7).modulo(&BigInt::from(-5)),
            Err(Error::Domain { op: "modulo", .. })
        ));
    }
}
