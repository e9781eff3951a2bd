//! Probabilistic primality testing.

use num_traits::One;

use crate::bigint::BigInt;
use crate::bigrand::{RandBigInt, RandomSource};
use crate::error::{Error, Result};

/// Odd primes below 100, used for trial division before Miller-Rabin.
const SMALL_PRIMES: [u32; 24] = [
    3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53, 59, 61, 67, 71, 73, 79, 83, 89, 97,
];

/// Certainty used by [`BigInt::next_probable_prime`].
pub const DEFAULT_CERTAINTY: u32 = 100;

/// Upper bound on the candidates [`BigInt::next_probable_prime`] examines.
pub const NEXT_PRIME_SEARCH_LIMIT: u64 = 1 << 20;

/// Tests `n` for primality with a false-positive probability of at most
/// `2^-certainty`.
///
/// Values below two are never prime. Trial division by the odd primes below 100
/// settles small and easily factored inputs; the rest get
/// `max(1, certainty / 2)` Miller-Rabin rounds with witnesses drawn
/// uniformly from `[1, n)`.
pub fn probably_prime<R: RandomSource + ?Sized>(n: &BigInt, certainty: u32, rng: &mut R) -> bool {
    if !n.is_positive() || n.is_one() {
        return false;
    }
    if n.is_even() {
        return n.digits() == [2];
    }

    for &p in &SMALL_PRIMES {
        let (_, r) = n.div_rem_digit(p);
        if r == 0 {
            return n.digits() == [p];
        }
    }

    if certainty == 0 {
        return true;
    }

    let rounds = (certainty / 2).max(1);
    miller_rabin(n, rounds, rng)
}

/// `rounds` Miller-Rabin iterations on an odd `n > 2`.
fn miller_rabin<R: RandomSource + ?Sized>(n: &BigInt, rounds: u32, rng: &mut R) -> bool {
    let one = BigInt::one();
    let n_minus_one = n - &one;

    // n - 1 = q * 2^k with q odd
    let k = n_minus_one
        .lowest_set_bit()
        .expect("n - 1 is non-zero for odd n > 2");
    let q = n_minus_one.shift_right(k as usize);

    'witness: for round in 0..rounds {
        let a = rng.gen_bigint_range(&one, n);
        let mut y = a
            .mod_pow(&q, n)
            .expect("modulus is a positive odd number");

        if y.is_one() || y == n_minus_one {
            continue;
        }
        for _ in 1..k {
            y = (&y * &y).mod_floor_unchecked(n);
            if y == n_minus_one {
                continue 'witness;
            }
            if y.is_one() {
                break;
            }
        }
        log::trace!("{n} failed Miller-Rabin round {round} with witness {a}");
        return false;
    }
    true
}

impl BigInt {
    /// Whether `self` is probably prime, with a false-positive probability of
    /// at most `2^-certainty`. A certainty of zero accepts anything that
    /// survives trial division.
    ///
    /// Negative numbers, zero and one are never prime.
    pub fn is_probable_prime<R: RandomSource + ?Sized>(&self, certainty: u32, rng: &mut R) -> bool {
        probably_prime(self, certainty, rng)
    }

    /// The first probable prime greater than `self`, tested with a certainty
    /// of [`DEFAULT_CERTAINTY`].
    ///
    /// Fails with [`Error::Domain`] for a negative receiver and with
    /// [`Error::SearchExhausted`] if no prime turns up among
    /// [`NEXT_PRIME_SEARCH_LIMIT`] candidates.
    pub fn next_probable_prime<R: RandomSource + ?Sized>(&self, rng: &mut R) -> Result<BigInt> {
        if self.is_negative() {
            return Err(Error::domain(
                "next_probable_prime",
                alloc::format!("{self} is negative"),
            ));
        }

        let two = BigInt::from(2u32);
        let mut candidate = self + BigInt::one();
        if candidate <= two {
            return Ok(two);
        }
        if candidate.is_even() {
            candidate += BigInt::one();
        }

        for searched in 1..=NEXT_PRIME_SEARCH_LIMIT {
            if probably_prime(&candidate, DEFAULT_CERTAINTY, rng) {
                log::debug!("found probable prime after {self} in {searched} candidates");
                return Ok(candidate);
            }
            candidate += &two;
        }

        Err(Error::SearchExhausted {
            op: "next_probable_prime",
            limit: NEXT_PRIME_SEARCH_LIMIT,
        })
    }
}
