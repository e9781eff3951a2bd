use crate::BigInt;
use crate::algorithms::{extended_gcd, mod_inverse};

/// Modular inverse as an `Option`, for generic code.
///
/// `None` covers both a non-positive modulus and `gcd(self, m) != 1`. The
/// inherent [`BigInt::mod_inverse`] reports those cases as errors.
pub trait ModInverse<R: Sized>: Sized {
    type Output: Sized;

    fn mod_inverse(self, m: R) -> Option<Self::Output>;
}

/// Bezout coefficients by value: `(g, x, y)` with `self * x + other * y == g`.
///
/// See [`BigInt::extended_gcd`] for the sign conventions.
pub trait ExtendedGcd<R: Sized>: Sized {
    fn extended_gcd(self, other: R) -> (BigInt, BigInt, BigInt);
}

impl ModInverse<&BigInt> for BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: &BigInt) -> Option<BigInt> {
        if !m.is_positive() {
            return None;
        }
        mod_inverse(&self, m)
    }
}

impl ModInverse<BigInt> for BigInt {
    type Output = BigInt;

    fn mod_inverse(self, m: BigInt) -> Option<BigInt> {
        ModInverse::mod_inverse(self, &m)
    }
}

impl ExtendedGcd<&BigInt> for BigInt {
    fn extended_gcd(self, other: &BigInt) -> (BigInt, BigInt, BigInt) {
        extended_gcd(&self, other)
    }
}

impl ExtendedGcd<BigInt> for BigInt {
    fn extended_gcd(self, other: BigInt) -> (BigInt, BigInt, BigInt) {
        ExtendedGcd::extended_gcd(self, &other)
    }
}
