//! Arbitrary-precision integers and scaled decimals.
//!
//! This crate provides two value types:
//!
//! - [`BigInt`], a sign-magnitude integer stored as little-endian 32-bit limbs.
//!   Besides the ring operations it supports truncating division, modular
//!   arithmetic, extended GCD, bitwise logic with two's-complement semantics
//!   and Miller–Rabin primality testing.
//! - [`BigDecimal`], an unscaled [`BigInt`] together with a decimal scale, so
//!   that its value is `unscaled × 10^-scale`. Rounding is controlled by a
//!   [`RoundingMode`], and precision-limited operations take a
//!   [`MathContext`].
//!
//! Every fallible operation returns a [`Result`] with an [`Error`] naming the
//! failing operation.
//!
//! ## Example
//!
//! ```rust
//! use bigdec::{BigDecimal, BigInt, MathContext, RoundingMode};
//! use core::str::FromStr;
//!
//! let a = BigInt::from(17);
//! let r = a.mod_pow(&BigInt::from(13), &BigInt::from(19)).unwrap();
//! assert_eq!(r, BigInt::from(16));
//!
//! let x = BigDecimal::from_str("10").unwrap();
//! let y = BigDecimal::from_str("4").unwrap();
//! assert_eq!(x.divide(&y, &MathContext::UNLIMITED).unwrap().to_string(), "2.5");
//!
//! let half = BigDecimal::from_str("2.5").unwrap();
//! assert_eq!(half.set_scale(0, RoundingMode::HalfEven).unwrap().to_string(), "2");
//! ```
//!
//! ## Randomness
//!
//! Primality testing and random generation draw from a [`RandomSource`].
//! With the `rand` feature (enabled by default) every [`rand::Rng`] is a
//! random source:
//!
#![cfg_attr(feature = "std", doc = " ```")]
#![cfg_attr(not(feature = "std"), doc = " ```ignore")]
//! use bigdec::BigInt;
//!
//! let mut rng = rand::rng();
//! assert!(BigInt::from(7919).is_probable_prime(100, &mut rng));
//! ```
//!
//! ## Features
//!
//! - `std` (default): implements `std::error::Error` for [`Error`].
//! - `rand` (default): [`RandomSource`] for every `rand::Rng`, and
//!   [`RandomBits`].
//! - `prime` (default): random probable-prime generation via [`RandPrime`].
//! - `zeroize`: `Zeroize` for [`BigInt`].
//! - `serde`: string-form serialization of [`BigInt`] and [`BigDecimal`].

#![cfg_attr(docsrs, feature(doc_cfg))]
#![cfg_attr(not(feature = "std"), no_std)]

extern crate alloc;

mod bigdecimal;
mod bigint;
mod bigrand;
mod context;
mod error;
mod prime;
mod rounding;
mod traits;

pub mod algorithms;

pub use crate::bigdecimal::BigDecimal;
pub use crate::bigint::{BigInt, Sign};
pub use crate::bigrand::{RandBigInt, RandomSource};
pub use crate::context::MathContext;
pub use crate::error::{Error, Result};
pub use crate::prime::{DEFAULT_CERTAINTY, NEXT_PRIME_SEARCH_LIMIT};
pub use crate::rounding::{Fraction, RoundingMode};
pub use crate::traits::{ExtendedGcd, ModInverse};

#[cfg(feature = "rand")]
pub use crate::bigrand::{RandomBits, UniformBigInt};

#[cfg(feature = "prime")]
pub use crate::bigrand::RandPrime;

/// Limb width and the double-width type used for limb products.
pub mod big_digit {
    /// A single limb of a [`BigInt`](crate::BigInt) magnitude.
    pub type BigDigit = u32;

    /// Holds the product of two limbs plus two carries without overflow.
    pub type DoubleBigDigit = u64;

    pub const BITS: usize = 32;

    /// Join two `BigDigit`s into one `DoubleBigDigit`.
    #[inline]
    pub fn to_doublebigdigit(hi: BigDigit, lo: BigDigit) -> DoubleBigDigit {
        DoubleBigDigit::from(lo) | (DoubleBigDigit::from(hi) << BITS)
    }
}
