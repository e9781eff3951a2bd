//! Limb-level primitives and number-theoretic helpers.
//!
//! The slice functions operate on normalized little-endian magnitudes, the
//! same representation [`BigInt::digits`](crate::BigInt::digits) exposes.
//! They are what the operator impls of [`BigInt`](crate::BigInt) are built on.

#![allow(clippy::many_single_char_names)]

pub use crate::bigint::addition::{__add2, adc, add2, sbb, sub2};
pub use crate::bigint::cmp_slice;
pub use crate::bigint::division::{div_rem_digit, div_rem_mag, rem_digit};
pub use crate::bigint::multiplication::{mac_digit, mac_with_carry, mul3, scalar_mul};
pub use crate::bigint::shift::{mag_shl, mag_shr};

mod gcd;
mod mod_inverse;

pub use self::gcd::{extended_gcd, gcd};
pub use self::mod_inverse::mod_inverse;
