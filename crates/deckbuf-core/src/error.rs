//! Error types for builder operations.
//!
//! Two categories only: a logical index or range outside the live region,
//! and an argument the operation cannot act on. Both are reported before
//! any mutation happens, so a rejected call leaves the builder untouched.

use std::error::Error;
use std::fmt;

/// Errors returned by fallible [`Builder`](crate::Builder) operations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum BuilderError {
    /// A single logical index is outside the allowed space.
    ///
    /// Element accesses allow `[0, len)`; insertion points allow `[0, len]`.
    IndexOutOfRange {
        /// The rejected index.
        index: usize,
        /// Length of the live region at the time of the call.
        len: usize,
    },
    /// A `start + count` range does not fit inside `[0, len]`.
    RangeOutOfBounds {
        /// First logical index of the range.
        start: usize,
        /// Number of elements in the range.
        count: usize,
        /// Length of the live region at the time of the call.
        len: usize,
    },
    /// An argument the operation cannot act on (zero interval, empty
    /// padding pattern, invalid configuration, ...).
    InvalidArgument {
        /// Name of the offending parameter.
        name: &'static str,
        /// Why it was rejected.
        reason: String,
    },
}

impl BuilderError {
    pub(crate) fn invalid(name: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            name,
            reason: reason.into(),
        }
    }
}

impl fmt::Display for BuilderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::IndexOutOfRange { index, len } => {
                write!(f, "index {index} out of range for length {len}")
            }
            Self::RangeOutOfBounds { start, count, len } => {
                write!(
                    f,
                    "range of {count} elements at {start} out of bounds for length {len}"
                )
            }
            Self::InvalidArgument { name, reason } => {
                write!(f, "invalid argument `{name}`: {reason}")
            }
        }
    }
}

impl Error for BuilderError {}
