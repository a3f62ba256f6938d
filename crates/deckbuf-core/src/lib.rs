//! Growable double-ended buffer with pooled storage.
//!
//! A [`Builder`] keeps its content in the middle of a rented block so both
//! ends can grow in amortized constant time. On top of the cursor pair it
//! offers index-safe positional editors and a set of in-place bulk
//! transformers that are the building blocks of text and array
//! manipulation: duplicate, normalize, replace, insert/remove every N,
//! pad, trim, repeat.
//!
//! # Architecture
//!
//! ```text
//! Builder<T>
//! ├── buffer state (builder)       storage: Box<[T]>, head, tail
//! ├── capacity manager (capacity)  ensure_append / ensure_prepend / ensure_uniform
//! ├── positional editors (edit)    push, insert, remove, copy, splice, reverse
//! └── bulk transformers            transform, pad, search, text
//!         └── Comparer<T>          injectable equality (comparer)
//! ArrayPool<T> (deckbuf-pool)      rent / give_back of power-of-two blocks
//! ```
//!
//! Every public editor validates first and mutates second: an `Err` return
//! means the builder is exactly as it was.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod builder;
mod capacity;
pub mod comparer;
pub mod config;
mod edit;
pub mod error;
pub mod pad;
mod search;
mod text;
mod transform;

pub use builder::Builder;
pub use comparer::{Comparer, DefaultComparer, IgnoreAsciiCase};
pub use config::{BuilderConfig, InsertShift};
pub use error::BuilderError;
pub use pad::PadBias;

pub use deckbuf_pool::{ArrayPool, PoolConfig, PoolError, PoolStats, SharedPool};

// Compile-time assertion: builders can move between threads when their
// elements can.
const _: fn() = || {
    fn assert<T: Send + Sync>() {}
    assert::<Builder<char>>();
    assert::<Builder<String>>();
};
