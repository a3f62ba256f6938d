//! Builder configuration parameters.

use crate::error::BuilderError;

/// Which side of the live region an interior insert shifts.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum InsertShift {
    /// Always shift the elements before the insertion point towards the
    /// front. Pairs with [`Builder::ensure_uniform`](crate::Builder::ensure_uniform)
    /// so either side can absorb later growth.
    Left,
    /// Shift whichever side holds fewer elements. Pairs with
    /// `ensure_prepend` or `ensure_append` for the chosen side.
    #[default]
    Shorter,
}

/// Configuration for a [`Builder`](crate::Builder).
///
/// Validated when passed to [`Builder::with_config`](crate::Builder::with_config);
/// immutable for the builder's lifetime.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct BuilderConfig {
    /// Smallest backing block the builder will rent, in elements.
    ///
    /// Default: 16. Must be a power of two. The pool may round this up
    /// further to its own smallest size class.
    pub min_capacity: usize,

    /// Shift direction for interior inserts.
    ///
    /// Default: [`InsertShift::Shorter`].
    pub insert_shift: InsertShift,
}

impl BuilderConfig {
    /// Default minimum capacity.
    pub const DEFAULT_MIN_CAPACITY: usize = 16;

    /// Create a config with default values.
    pub fn new() -> Self {
        Self {
            min_capacity: Self::DEFAULT_MIN_CAPACITY,
            insert_shift: InsertShift::default(),
        }
    }

    /// Check the invariants documented on each field.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if `min_capacity` is not a
    /// power of two.
    pub fn validate(&self) -> Result<(), BuilderError> {
        if !self.min_capacity.is_power_of_two() {
            return Err(BuilderError::invalid(
                "min_capacity",
                format!("must be a power of two, got {}", self.min_capacity),
            ));
        }
        Ok(())
    }
}

impl Default for BuilderConfig {
    fn default() -> Self {
        Self::new()
    }
}
