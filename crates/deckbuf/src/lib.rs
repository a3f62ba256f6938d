//! deckbuf: growable double-ended buffers with pooled storage.
//!
//! This is the top-level facade crate that re-exports the public API from
//! the deckbuf sub-crates. For most users, adding `deckbuf` as a single
//! dependency is sufficient.
//!
//! # Quick start
//!
//! ```rust
//! use deckbuf::prelude::*;
//!
//! let mut b = Builder::from("  1234567 ");
//! b.trim(&' ');
//! b.insert_every(&[','], 3).unwrap();
//! b.pad_left(12, &[' ']).unwrap();
//! assert_eq!(b.to_string(), "   1,234,567");
//!
//! let mut words = Builder::from("a  b\t\tc");
//! words.normalize_all(' ', |c| c.is_whitespace());
//! words.duplicate(&[' '], 1);
//! assert_eq!(words.to_string(), "a  b  c");
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`builder`] | `deckbuf-core` | `Builder`, comparers, configuration, errors |
//! | [`pool`] | `deckbuf-pool` | `ArrayPool`, pool configuration and statistics |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// The builder and its editing surface (`deckbuf-core`).
pub use deckbuf_core as builder;

/// Size-classed array pool (`deckbuf-pool`).
///
/// Use [`pool::ArrayPool::with_config`] to give a group of builders their
/// own pool instead of the process-wide shared one.
pub use deckbuf_pool as pool;

/// Common imports for typical deckbuf usage.
///
/// ```rust
/// use deckbuf::prelude::*;
/// ```
pub mod prelude {
    // Builder and configuration
    pub use deckbuf_core::{Builder, BuilderConfig, InsertShift, PadBias};

    // Equality strategies
    pub use deckbuf_core::{Comparer, DefaultComparer, IgnoreAsciiCase};

    // Errors
    pub use deckbuf_core::BuilderError;
    pub use deckbuf_pool::PoolError;

    // Pool
    pub use deckbuf_pool::{ArrayPool, PoolConfig, PoolStats, SharedPool};
}
