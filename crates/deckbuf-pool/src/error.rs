//! Pool-specific error types.

use std::error::Error;
use std::fmt;

/// Errors that can occur while setting up an array pool.
///
/// Renting and returning never fail: allocation failure aborts the process
/// exactly as it does for `Vec`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum PoolError {
    /// The supplied [`PoolConfig`](crate::PoolConfig) violates its invariants.
    InvalidConfig {
        /// Which invariant was violated.
        reason: String,
    },
}

impl fmt::Display for PoolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidConfig { reason } => write!(f, "invalid pool config: {reason}"),
        }
    }
}

impl Error for PoolError {}
