//! Randomization of big integers

use alloc::vec;

use num_integer::Integer;
use num_traits::ToPrimitive;

use crate::BigInt;
use crate::Sign::*;

/// A source of random bits.
///
/// This is the only external collaborator the crate needs: prime generation
/// and Miller-Rabin witness selection draw from it. With the `rand` feature,
/// every [`rand::Rng`] is a `RandomSource`.
pub trait RandomSource {
    /// A uniformly distributed value in `[0, bound)`. `bound` must be non-zero.
    fn next_int(&mut self, bound: u32) -> u32;

    /// Fills `buf` with random bytes.
    fn next_bytes(&mut self, buf: &mut [u8]);
}

#[cfg(feature = "rand")]
#[cfg_attr(docsrs, doc(cfg(feature = "rand")))]
impl<R: rand::Rng + ?Sized> RandomSource for R {
    #[inline]
    fn next_int(&mut self, bound: u32) -> u32 {
        self.random_range(0..bound)
    }

    #[inline]
    fn next_bytes(&mut self, buf: &mut [u8]) {
        self.fill_bytes(buf);
    }
}

/// A trait for sampling random big integers.
///
/// Implemented for every [`RandomSource`].
pub trait RandBigInt {
    /// Generate a random non-negative [`BigInt`] below `2^bit_size`.
    fn gen_bigint_bits(&mut self, bit_size: u64) -> BigInt;

    /// Generate a random [`BigInt`] of the given bit size with a random sign.
    fn gen_signed_bigint(&mut self, bit_size: u64) -> BigInt;

    /// Generate a random [`BigInt`] in `[0, bound)`.
    ///
    /// # Panics
    ///
    /// Panics when the bound is not positive.
    fn gen_bigint_below(&mut self, bound: &BigInt) -> BigInt;

    /// Generate a random [`BigInt`] in `[lbound, ubound)`.
    ///
    /// # Panics
    ///
    /// Panics unless `lbound < ubound`.
    fn gen_bigint_range(&mut self, lbound: &BigInt, ubound: &BigInt) -> BigInt;
}

/// Fills `data` with random limbs, keeping only `rem` bits of the top limb
/// when `rem` is non-zero.
fn gen_bits<R: RandomSource + ?Sized>(rng: &mut R, data: &mut [u32], rem: u64) {
    let mut bytes = vec![0u8; data.len() * 4];
    rng.next_bytes(&mut bytes);
    for (digit, chunk) in data.iter_mut().zip(bytes.chunks_exact(4)) {
        *digit = u32::from_le_bytes([chunk[0], chunk[1], chunk[2], chunk[3]]);
    }
    if rem > 0 {
        let last = data.len() - 1;
        data[last] >>= 32 - rem;
    }
}

impl<R: RandomSource + ?Sized> RandBigInt for R {
    fn gen_bigint_bits(&mut self, bit_size: u64) -> BigInt {
        let (digits, rem) = bit_size.div_rem(&32);
        let len = (digits + (rem > 0) as u64)
            .to_usize()
            .expect("capacity overflow");
        let mut data = vec![0u32; len];
        gen_bits(self, &mut data, rem);
        BigInt::new(Plus, data)
    }

    fn gen_signed_bigint(&mut self, bit_size: u64) -> BigInt {
        loop {
            let magnitude = self.gen_bigint_bits(bit_size);
            let negative = self.next_int(2) == 1;
            match (magnitude.is_zero(), negative) {
                // -0 and +0 collapse, so reject half of the zero draws
                (true, true) => continue,
                (_, true) => return -magnitude,
                (_, false) => return magnitude,
            }
        }
    }

    fn gen_bigint_below(&mut self, bound: &BigInt) -> BigInt {
        assert!(bound.is_positive());
        let bits = bound.bits();
        loop {
            let n = self.gen_bigint_bits(bits);
            if n < *bound {
                return n;
            }
        }
    }

    fn gen_bigint_range(&mut self, lbound: &BigInt, ubound: &BigInt) -> BigInt {
        assert!(*lbound < *ubound);
        if lbound.is_zero() {
            self.gen_bigint_below(ubound)
        } else {
            let delta = ubound - lbound;
            lbound + self.gen_bigint_below(&delta)
        }
    }
}

#[cfg(feature = "rand")]
mod uniform {
    use num_traits::One;
    use rand::Rng;
    use rand::distr::uniform::{Error, SampleBorrow, SampleUniform, UniformSampler};

    use super::RandBigInt;
    use crate::BigInt;

    /// Uniform sampling over a half-open `BigInt` interval; what
    /// `rand::distr::Uniform<BigInt>` runs on.
    #[derive(Clone, Debug)]
    pub struct UniformBigInt {
        low: BigInt,
        width: BigInt,
    }

    impl UniformBigInt {
        fn half_open(low: &BigInt, high: &BigInt) -> Result<UniformBigInt, Error> {
            if low < high {
                Ok(UniformBigInt {
                    low: low.clone(),
                    width: high - low,
                })
            } else {
                Err(Error::EmptyRange)
            }
        }
    }

    impl UniformSampler for UniformBigInt {
        type X = BigInt;

        fn new<B1, B2>(low: B1, high: B2) -> Result<Self, Error>
        where
            B1: SampleBorrow<BigInt> + Sized,
            B2: SampleBorrow<BigInt> + Sized,
        {
            Self::half_open(low.borrow(), high.borrow())
        }

        fn new_inclusive<B1, B2>(low: B1, high: B2) -> Result<Self, Error>
        where
            B1: SampleBorrow<BigInt> + Sized,
            B2: SampleBorrow<BigInt> + Sized,
        {
            Self::half_open(low.borrow(), &(high.borrow() + BigInt::one()))
        }

        fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> BigInt {
            &self.low + rng.gen_bigint_below(&self.width)
        }

        fn sample_single<R: Rng + ?Sized, B1, B2>(
            low: B1,
            high: B2,
            rng: &mut R,
        ) -> Result<BigInt, Error>
        where
            B1: SampleBorrow<BigInt> + Sized,
            B2: SampleBorrow<BigInt> + Sized,
        {
            let (low, high) = (low.borrow(), high.borrow());
            if low < high {
                Ok(rng.gen_bigint_range(low, high))
            } else {
                Err(Error::EmptyRange)
            }
        }
    }

    impl SampleUniform for BigInt {
        type Sampler = UniformBigInt;
    }
}

#[cfg(feature = "rand")]
#[cfg_attr(docsrs, doc(cfg(feature = "rand")))]
pub use self::uniform::UniformBigInt;

/// Distribution of signed [`BigInt`]s with magnitude below `2^bits`.
///
/// Zero is no more likely than any other value.
#[cfg(feature = "rand")]
#[cfg_attr(docsrs, doc(cfg(feature = "rand")))]
#[derive(Clone, Copy, Debug)]
pub struct RandomBits {
    bits: u64,
}

#[cfg(feature = "rand")]
impl RandomBits {
    pub fn new(bits: u64) -> RandomBits {
        RandomBits { bits }
    }
}

#[cfg(feature = "rand")]
impl rand::distr::Distribution<BigInt> for RandomBits {
    fn sample<R: rand::Rng + ?Sized>(&self, rng: &mut R) -> BigInt {
        rng.gen_signed_bigint(self.bits)
    }
}

/// Random probable-prime generation.
///
/// The result is only as unpredictable as the [`RandomSource`] behind it.
///
/// # Example
#[cfg_attr(feature = "std", doc = " ```")]
#[cfg_attr(not(feature = "std"), doc = " ```ignore")]
/// use bigdec::RandPrime;
///
/// let mut rng = rand::rng();
/// let p = rng.gen_prime(128).unwrap();
/// assert_eq!(p.bits(), 128);
/// ```
#[cfg(feature = "prime")]
#[cfg_attr(docsrs, doc(cfg(feature = "prime")))]
pub trait RandPrime {
    /// A probable prime of exactly `bits` bits, tested with 40
    /// Miller-Rabin rounds.
    ///
    /// Fails with [`Error::Domain`](crate::Error::Domain) when `bits < 2`.
    fn gen_prime(&mut self, bits: u64) -> crate::Result<BigInt>;
}

/// Odd primes used to sieve prime candidates, cut off where their product
/// would no longer fit a `u64`. Candidates are always odd, so 2 is absent.
#[cfg(feature = "prime")]
const SMALL_PRIMES: [u8; 15] = [3, 5, 7, 11, 13, 17, 19, 23, 29, 31, 37, 41, 43, 47, 53];

/// Product of [`SMALL_PRIMES`]; one `rem_u64` against it lets the sieve run
/// on machine words.
#[cfg(feature = "prime")]
const SMALL_PRIMES_PRODUCT: u64 = 16_294_579_238_595_022_365;

/// How far the sieve walks from a candidate before drawing a new one.
#[cfg(feature = "prime")]
const SIEVE_SPAN: u64 = 1 << 20;

/// Remainder of a magnitude modulo a `u64`, folding limbs from the top.
#[cfg(feature = "prime")]
fn rem_u64(n: &BigInt, m: u64) -> u64 {
    let m = u128::from(m);
    let rem = n
        .digits()
        .iter()
        .rev()
        .fold(0u128, |acc, &d| ((acc << 32) | u128::from(d)) % m);
    rem as u64
}

/// Turns random big-endian bytes into an odd candidate of exactly `bit_size`
/// bits whose top two bits are set, so a product of two keeps full width.
#[cfg(feature = "prime")]
fn shape_candidate(bytes: &mut [u8], bit_size: u64) {
    let top_bits = match (bit_size % 8) as u32 {
        0 => 8,
        b => b,
    };
    bytes[0] &= ((1u32 << top_bits) - 1) as u8;
    if top_bits >= 2 {
        bytes[0] |= 3 << (top_bits - 2);
    } else {
        bytes[0] |= 1;
        if let Some(next) = bytes.get_mut(1) {
            *next |= 0x80;
        }
    }
    if let Some(last) = bytes.last_mut() {
        *last |= 1;
    }
}

/// Smallest even offset that makes `rem + offset` free of [`SMALL_PRIMES`]
/// factors. Tiny sizes may land on a small prime itself.
#[cfg(feature = "prime")]
fn sieve_offset(rem: u64, bit_size: u64) -> Option<u64> {
    (0..SIEVE_SPAN).step_by(2).find(|delta| {
        let m = rem + delta;
        SMALL_PRIMES.iter().all(|&prime| {
            let prime = u64::from(prime);
            !m.is_multiple_of(prime) || (bit_size <= 6 && m == prime)
        })
    })
}

#[cfg(feature = "prime")]
#[cfg_attr(docsrs, doc(cfg(feature = "prime")))]
impl<R: RandomSource + ?Sized> RandPrime for R {
    fn gen_prime(&mut self, bit_size: u64) -> crate::Result<BigInt> {
        use crate::prime::probably_prime;

        if bit_size < 2 {
            return Err(crate::Error::domain(
                "gen_prime",
                "prime size must be at least 2-bit",
            ));
        }

        let bytes_len = bit_size.div_ceil(8).to_usize().expect("capacity overflow");
        let mut bytes = vec![0u8; bytes_len];

        let mut candidates = 0u64;
        loop {
            candidates += 1;
            self.next_bytes(&mut bytes);
            shape_candidate(&mut bytes, bit_size);

            let mut p = BigInt::from_bytes_be(Plus, &bytes);
            let Some(delta) = sieve_offset(rem_u64(&p, SMALL_PRIMES_PRODUCT), bit_size) else {
                continue;
            };
            p += BigInt::from(delta);

            // the sieve step can carry into an extra bit
            if p.bits() == bit_size && probably_prime(&p, 40, self) {
                log::debug!("generated {bit_size}-bit probable prime after {candidates} candidates");
                return Ok(p);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_traits::Zero;

    /// SplitMix64; enough to drive the generators without `rand`.
    struct SplitMix(u64);

    impl SplitMix {
        fn next_u64(&mut self) -> u64 {
            self.0 = self.0.wrapping_add(0x9E37_79B9_7F4A_7C15);
            let mut z = self.0;
            z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
            z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
            z ^ (z >> 31)
        }
    }

    impl RandomSource for SplitMix {
        fn next_int(&mut self, bound: u32) -> u32 {
            (self.next_u64() % u64::from(bound)) as u32
        }

        fn next_bytes(&mut self, buf: &mut [u8]) {
            for chunk in buf.chunks_mut(8) {
                let bytes = self.next_u64().to_le_bytes();
                chunk.copy_from_slice(&bytes[..chunk.len()]);
            }
        }
    }

    #[test]
    fn test_gen_bits_respects_size() {
        let mut rng = SplitMix(0);
        for bits in [0u64, 1, 7, 31, 32, 33, 64, 100] {
            let n = rng.gen_bigint_bits(bits);
            assert!(n.bits() <= bits, "{n} has more than {bits} bits");
            assert!(!n.is_negative());
        }
        assert!(rng.gen_bigint_bits(0).is_zero());
    }

    #[test]
    fn test_below_and_range() {
        let mut rng = SplitMix(3);
        let bound = BigInt::from(1000);
        for _ in 0..200 {
            let n = rng.gen_bigint_below(&bound);
            assert!(!n.is_negative() && n < bound);
        }
        let lo = BigInt::from(-50);
        let hi = BigInt::from(-40);
        for _ in 0..200 {
            let n = rng.gen_bigint_range(&lo, &hi);
            assert!(lo <= n && n < hi);
        }
    }

    #[test]
    #[should_panic]
    fn test_below_zero_bound() {
        SplitMix(0).gen_bigint_below(&BigInt::zero());
    }

    #[test]
    #[cfg(feature = "rand")]
    fn test_rand_uniform_and_bits() {
        use rand::distr::{Distribution, Uniform};
        use rand::{Rng, SeedableRng};
        use rand_xorshift::XorShiftRng;

        let mut rng = XorShiftRng::from_seed([1u8; 16]);
        let lo = BigInt::from(-1000);
        let hi = BigInt::from(1000);
        let uniform = Uniform::new(&lo, &hi).unwrap();
        for _ in 0..500 {
            let n: BigInt = uniform.sample(&mut rng);
            assert!(lo <= n && n < hi);
        }
        let n: BigInt = rng.random_range(lo.clone()..=hi.clone());
        assert!(lo <= n && n <= hi);

        let dist = RandomBits::new(70);
        let mut saw_negative = false;
        for _ in 0..100 {
            let n: BigInt = dist.sample(&mut rng);
            assert!(n.bits() <= 70);
            saw_negative |= n.is_negative();
        }
        assert!(saw_negative);
    }

    #[test]
    #[cfg(feature = "prime")]
    fn test_rem_u64() {
        let n = BigInt::from(u128::MAX);
        assert_eq!(
            u128::from(rem_u64(&n, SMALL_PRIMES_PRODUCT)),
            u128::MAX % u128::from(SMALL_PRIMES_PRODUCT)
        );
    }

    #[test]
    #[cfg(feature = "prime")]
    fn test_candidate_shape_and_sieve() {
        for bits in [9u64, 16, 17, 61] {
            let mut bytes = vec![0u8; bits.div_ceil(8) as usize];
            shape_candidate(&mut bytes, bits);
            let n = BigInt::from_bytes_be(Plus, &bytes);
            assert_eq!(n.bits(), bits);
            assert!(n.is_odd() && n.test_bit(bits - 2));
        }

        // every odd number from 9 to 57 has a factor of at most 53
        assert_eq!(sieve_offset(1, 64), Some(0));
        assert_eq!(sieve_offset(9, 64), Some(50));
        assert_eq!(sieve_offset(5, 64), Some(54));
        // tiny sizes may keep a small prime
        assert_eq!(sieve_offset(5, 3), Some(0));
    }

    #[test]
    #[cfg(feature = "prime")]
    fn test_gen_prime_sizes() {
        let mut rng = SplitMix(11);
        for bits in [2u64, 3, 5, 8, 16, 33, 64, 128] {
            let p = rng.gen_prime(bits).unwrap();
            assert_eq!(p.bits(), bits);
            assert!(p.is_probable_prime(50, &mut rng), "{p} is not prime");
        }
        assert!(rng.gen_prime(1).is_err());
    }
}
