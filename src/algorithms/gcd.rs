use core::mem;

use num_traits::{One, Zero};

use crate::BigInt;

/// Greatest common divisor of `a` and `b`, never negative.
///
/// `gcd(0, 0)` is zero and `gcd(a, 0)` is `|a|`.
pub fn gcd(a: &BigInt, b: &BigInt) -> BigInt {
    let mut a = a.abs();
    let mut b = b.abs();
    while !b.is_zero() {
        let (_, r) = a.div_rem_nonzero(&b);
        a = mem::replace(&mut b, r);
    }
    a
}

/// Extended Euclid: returns `(g, x, y)` with `a*x + b*y == g == gcd(a, b)`.
///
/// Signs of the inputs are free. When one side is zero the cofactor of the
/// other is its sign, so `extended_gcd(0, -7) == (7, 0, -1)`; both zero
/// gives all zeros.
pub fn extended_gcd(a: &BigInt, b: &BigInt) -> (BigInt, BigInt, BigInt) {
    let unit = |n: &BigInt| BigInt::from(n.signum());

    match (a.is_zero(), b.is_zero()) {
        (true, true) => return (BigInt::zero(), BigInt::zero(), BigInt::zero()),
        (true, false) => return (b.abs(), BigInt::zero(), unit(b)),
        (false, true) => return (a.abs(), unit(a), BigInt::zero()),
        (false, false) => {}
    }

    // run on magnitudes tracking only a's cofactor
    let (mut r0, mut r1) = (a.abs(), b.abs());
    let (mut s0, mut s1) = (BigInt::one(), BigInt::zero());
    while !r1.is_zero() {
        let (q, r) = r0.div_rem_nonzero(&r1);
        r0 = mem::replace(&mut r1, r);
        let next = &s0 - &q * &s1;
        s0 = mem::replace(&mut s1, next);
    }

    let x = if a.is_negative() { -s0 } else { s0 };
    // the remainder is exactly zero, so truncating division recovers y
    let (y, _) = (&r0 - a * &x).div_rem_nonzero(b);
    (r0, x, y)
}
