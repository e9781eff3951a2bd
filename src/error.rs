use alloc::string::String;

use thiserror::Error;

/// Errors produced by integer and decimal operations.
///
/// Every variant names the operation that failed. Failing operations never
/// modify their operands.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum Error {
    /// The literal does not match the integer or decimal grammar.
    #[error("cannot parse {input:?}: {reason}")]
    Parse { input: String, reason: &'static str },

    /// A digit is out of range for the detected or requested radix.
    #[error("invalid digit {digit:?} for radix {radix} in {input:?}")]
    InvalidDigit {
        input: String,
        digit: char,
        radix: u32,
    },

    #[error("radix {0} is not in the range 2..=36")]
    InvalidRadix(u32),

    #[error("{op}: division by zero")]
    DivideByZero { op: &'static str },

    /// The operands are outside the domain of the operation, e.g. a negative
    /// modulus or a non-invertible element.
    #[error("{op}: {reason}")]
    Domain { op: &'static str, reason: String },

    /// The exact result needs more significant digits than the context allows.
    #[error("{op}: result needs {required} digits but precision is {precision}")]
    PrecisionOverflow {
        op: &'static str,
        required: u64,
        precision: u32,
    },

    /// An unlimited-precision quotient has a periodic decimal expansion.
    #[error("non-terminating decimal expansion of {dividend} / {divisor}")]
    NonTerminating { dividend: String, divisor: String },

    /// `RoundingMode::Unnecessary` met a non-zero discarded fraction.
    #[error("{op}: rounding necessary")]
    RoundingRequired { op: &'static str },

    /// A bounded search ran out of candidates.
    #[error("{op}: nothing found within {limit} candidates")]
    SearchExhausted { op: &'static str, limit: u64 },
}

impl Error {
    pub(crate) fn domain(op: &'static str, reason: impl Into<String>) -> Self {
        Error::Domain {
            op,
            reason: reason.into(),
        }
    }

    pub(crate) fn parse(input: &str, reason: &'static str) -> Self {
        Error::Parse {
            input: input.into(),
            reason,
        }
    }
}

/// Result alias used throughout the crate.
pub type Result<T> = core::result::Result<T, Error>;
