use num_traits::One;

use super::division::check_modulus;
use super::BigInt;
use crate::algorithms::{self, mod_inverse};
use crate::big_digit::BITS;
use crate::error::{Error, Result};

impl BigInt {
    /// `self^exp` by repeated squaring.
    pub fn pow(&self, exp: u32) -> BigInt {
        self.pow_u64(u64::from(exp))
    }

    pub(crate) fn pow_u64(&self, mut exp: u64) -> BigInt {
        let mut base = self.clone();
        let mut acc = BigInt::one();
        while exp > 0 {
            if exp & 1 == 1 {
                acc = &acc * &base;
            }
            exp >>= 1;
            if exp > 0 {
                base = &base * &base;
            }
        }
        acc
    }

    /// `self^exponent mod modulus`, always in `[0, modulus)`.
    ///
    /// The exponent's limbs drive a square-and-multiply loop that reduces
    /// after every product. A negative exponent raises the modular inverse
    /// of `self`, failing with [`Error::Domain`] when none exists.
    ///
    /// ```
    /// use bigdec::BigInt;
    ///
    /// let r = BigInt::from(17).mod_pow(&BigInt::from(13), &BigInt::from(19));
    /// assert_eq!(r.unwrap(), BigInt::from(16));
    /// ```
    pub fn mod_pow(&self, exponent: &BigInt, modulus: &BigInt) -> Result<BigInt> {
        check_modulus("mod_pow", modulus)?;

        let mut base = if exponent.is_negative() {
            self.mod_inverse(modulus)?
        } else {
            self.mod_floor_unchecked(modulus)
        };
        let mut acc = BigInt::one().mod_floor_unchecked(modulus);

        let limbs = exponent.digits();
        for (i, &limb) in limbs.iter().enumerate() {
            let top = i + 1 == limbs.len();
            let mut bits = limb;
            for _ in 0..BITS {
                if top && bits == 0 {
                    break;
                }
                if bits & 1 == 1 {
                    acc = (&acc * &base).mod_floor_unchecked(modulus);
                }
                bits >>= 1;
                base = (&base * &base).mod_floor_unchecked(modulus);
            }
        }
        Ok(acc)
    }

    /// Greatest common divisor, always non-negative; `gcd(0, 0) == 0`.
    pub fn gcd(&self, other: &BigInt) -> BigInt {
        algorithms::gcd(self, other)
    }

    /// Returns `(g, x, y)` with `self * x + other * y == g == gcd(self, other)`.
    pub fn extended_gcd(&self, other: &BigInt) -> (BigInt, BigInt, BigInt) {
        algorithms::extended_gcd(self, other)
    }

    /// The inverse of `self` modulo a positive `m`, in `[0, m)`.
    ///
    /// Fails with [`Error::Domain`] when `gcd(self, m) != 1`.
    pub fn mod_inverse(&self, m: &BigInt) -> Result<BigInt> {
        check_modulus("mod_inverse", m)?;
        mod_inverse(self, m).ok_or_else(|| {
            Error::domain(
                "mod_inverse",
                alloc::format!("{self} is not invertible modulo {m}"),
            )
        })
    }
}
