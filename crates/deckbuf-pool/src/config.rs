//! Pool configuration parameters.

use crate::error::PoolError;

/// Configuration for an [`ArrayPool`](crate::ArrayPool).
///
/// Controls the range of pooled size classes and how many idle blocks each
/// class keeps. Validated at construction; immutable afterwards.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Smallest block length handed out, in elements.
    ///
    /// Default: 16. Must be a power of two. Requests below this are
    /// rounded up to it.
    pub min_block_len: usize,

    /// Largest block length that is kept for reuse, in elements.
    ///
    /// Default: 1_048_576. Must be a power of two and `>= min_block_len`.
    /// Larger requests are still served (rounded to a power of two), but
    /// the block is dropped instead of pooled when it comes back.
    pub max_block_len: usize,

    /// How many idle blocks each size class retains.
    ///
    /// Default: 8. Blocks given back to a full class are dropped.
    pub max_retained_per_class: usize,
}

impl PoolConfig {
    /// Default smallest block length.
    pub const DEFAULT_MIN_BLOCK_LEN: usize = 16;

    /// Default largest pooled block length (1M elements).
    pub const DEFAULT_MAX_BLOCK_LEN: usize = 1 << 20;

    /// Default number of idle blocks kept per size class.
    pub const DEFAULT_MAX_RETAINED_PER_CLASS: usize = 8;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            min_block_len: Self::DEFAULT_MIN_BLOCK_LEN,
            max_block_len: Self::DEFAULT_MAX_BLOCK_LEN,
            max_retained_per_class: Self::DEFAULT_MAX_RETAINED_PER_CLASS,
        }
    }

    /// Check the invariants documented on each field.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if either bound is not a power
    /// of two or the bounds are inverted.
    pub fn validate(&self) -> Result<(), PoolError> {
        if !self.min_block_len.is_power_of_two() {
            return Err(PoolError::InvalidConfig {
                reason: format!(
                    "min_block_len must be a power of two, got {}",
                    self.min_block_len
                ),
            });
        }
        if !self.max_block_len.is_power_of_two() {
            return Err(PoolError::InvalidConfig {
                reason: format!(
                    "max_block_len must be a power of two, got {}",
                    self.max_block_len
                ),
            });
        }
        if self.min_block_len > self.max_block_len {
            return Err(PoolError::InvalidConfig {
                reason: format!(
                    "min_block_len {} exceeds max_block_len {}",
                    self.min_block_len, self.max_block_len
                ),
            });
        }
        Ok(())
    }

    /// Number of pooled size classes (`min_block_len ..= max_block_len`).
    pub fn class_count(&self) -> usize {
        (self.max_block_len.trailing_zeros() - self.min_block_len.trailing_zeros()) as usize + 1
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        assert!(PoolConfig::default().validate().is_ok());
    }

    #[test]
    fn default_class_count_spans_16_to_1m() {
        // 2^4 ..= 2^20
        assert_eq!(PoolConfig::new().class_count(), 17);
    }

    #[test]
    fn non_power_of_two_min_rejected() {
        let config = PoolConfig {
            min_block_len: 12,
            ..PoolConfig::new()
        };
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn inverted_bounds_rejected() {
        let config = PoolConfig {
            min_block_len: 64,
            max_block_len: 32,
            ..PoolConfig::new()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("exceeds"));
    }

    #[test]
    fn single_class_config_is_valid() {
        let config = PoolConfig {
            min_block_len: 32,
            max_block_len: 32,
            max_retained_per_class: 1,
        };
        assert!(config.validate().is_ok());
        assert_eq!(config.class_count(), 1);
    }
}
