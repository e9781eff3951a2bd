use num_traits::One;

use super::extended_gcd;
use crate::BigInt;

/// Calculate the modular inverse of `g` modulo a positive `n`.
///
/// Implementation is based on the extended Euclidean algorithm: `g` is first
/// reduced into `[0, n)`, and the Bézout cofactor of `g` is the inverse when
/// the gcd is one.
///
/// Returns `None` if no inverse exists.
pub fn mod_inverse(g: &BigInt, n: &BigInt) -> Option<BigInt> {
    debug_assert!(n.is_positive());

    let g = g.mod_floor_unchecked(n);
    let (d, x, _) = extended_gcd(&g, n);
    d.is_one().then(|| x.mod_floor_unchecked(n))
}
