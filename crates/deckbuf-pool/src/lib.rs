//! Size-classed array pool for deckbuf builders.
//!
//! Builders never allocate their backing storage directly. They rent a
//! power-of-two block from an [`ArrayPool`], and give it back whenever they
//! outgrow it or are dropped. Blocks move by value, so a returned block can
//! never be read by its previous owner.
//!
//! # Architecture
//!
//! ```text
//! ArrayPool<T>
//! ├── PoolConfig (min/max pooled block length, per-class retention)
//! ├── FreeList<T> × class_count (Mutex<Vec<Box<[T]>>> per size class)
//! └── Counters (rents, returns, fresh allocations, reuses, discards)
//! ```
//!
//! [`ArrayPool::shared`] exposes one process-wide pool per element type;
//! builders use it unless handed a pool explicitly.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

mod class;
pub mod config;
pub mod error;
pub mod pool;

pub use class::class_len;
pub use config::PoolConfig;
pub use error::PoolError;
pub use pool::{ArrayPool, PoolStats, SharedPool};
