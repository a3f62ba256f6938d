//! The size-classed array pool.
//!
//! An [`ArrayPool`] hands out `Box<[T]>` blocks whose length is a power of
//! two and takes them back for reuse. Blocks move by value: once a block is
//! given back the caller no longer holds it, so it cannot be read after
//! return.

use std::any::{Any, TypeId};
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use indexmap::IndexMap;

use crate::class::{class_len, FreeList};
use crate::config::PoolConfig;
use crate::error::PoolError;

/// Shared handle to a pool, cloned into every builder that rents from it.
pub type SharedPool<T> = Arc<ArrayPool<T>>;

/// Process-wide pools, one per element type.
type Registry = Mutex<IndexMap<TypeId, Box<dyn Any + Send + Sync>>>;

static REGISTRY: OnceLock<Registry> = OnceLock::new();

/// Point-in-time counters for a pool.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PoolStats {
    /// Blocks handed out by [`ArrayPool::rent`].
    pub rents: u64,
    /// Non-empty blocks received by [`ArrayPool::give_back`].
    pub returns: u64,
    /// Rents that had to allocate a new block.
    pub fresh_allocations: u64,
    /// Rents served from an idle block.
    pub reuses: u64,
    /// Returned blocks that were dropped instead of parked.
    pub discarded: u64,
}

impl PoolStats {
    /// Blocks currently rented and not yet given back.
    pub fn outstanding(&self) -> u64 {
        self.rents.saturating_sub(self.returns)
    }
}

#[derive(Default)]
struct Counters {
    rents: AtomicU64,
    returns: AtomicU64,
    fresh_allocations: AtomicU64,
    reuses: AtomicU64,
    discarded: AtomicU64,
}

/// A pool of reusable `T` blocks keyed by power-of-two size class.
///
/// Safe to share between threads (`ArrayPool<T>: Sync` when `T: Send`):
/// each size class has its own lock and the counters are atomic. Blocks
/// are reset to `T::default()` when they come back, so a rented block
/// never exposes values left behind by a previous owner.
pub struct ArrayPool<T> {
    config: PoolConfig,
    /// One free list per class, smallest first.
    classes: Vec<FreeList<T>>,
    counters: Counters,
}

// Compile-time assertion: pools of sendable elements are Send + Sync.
const _: fn() = || {
    fn assert<P: Send + Sync>() {}
    assert::<ArrayPool<char>>();
    assert::<ArrayPool<String>>();
};

impl<T: Default> ArrayPool<T> {
    /// Create a pool with the default [`PoolConfig`].
    pub fn new() -> Self {
        Self::build(PoolConfig::new())
    }

    /// Create a pool with a custom configuration.
    ///
    /// # Errors
    ///
    /// Returns [`PoolError::InvalidConfig`] if `config` fails
    /// [`PoolConfig::validate`].
    pub fn with_config(config: PoolConfig) -> Result<Self, PoolError> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: PoolConfig) -> Self {
        let classes = (0..config.class_count())
            .map(|i| FreeList::new(config.min_block_len << i, config.max_retained_per_class))
            .collect();
        Self {
            config,
            classes,
            counters: Counters::default(),
        }
    }

    /// The configuration this pool was built with.
    pub fn config(&self) -> &PoolConfig {
        &self.config
    }

    /// Length of the block [`rent`](Self::rent) would return for
    /// `min_len`.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the rounded length does not fit
    /// in `usize`.
    pub fn class_len(&self, min_len: usize) -> usize {
        class_len(min_len, self.config.min_block_len)
    }

    /// Rent a block of at least `min_len` elements.
    ///
    /// The returned block's length is [`class_len(min_len)`](Self::class_len)
    /// and every slot holds `T::default()`.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the rounded length does not fit
    /// in `usize`.
    pub fn rent(&self, min_len: usize) -> Box<[T]> {
        let len = self.class_len(min_len);
        self.counters.rents.fetch_add(1, Ordering::Relaxed);

        if let Some(block) = self.free_list(len).and_then(FreeList::take) {
            self.counters.reuses.fetch_add(1, Ordering::Relaxed);
            return block;
        }

        self.counters.fresh_allocations.fetch_add(1, Ordering::Relaxed);
        std::iter::repeat_with(T::default).take(len).collect()
    }

    /// Give a block back to the pool.
    ///
    /// The block is reset to `T::default()` and parked in its size class.
    /// Blocks that do not belong to a pooled class, or whose class is
    /// already full, are dropped. Empty blocks are ignored.
    pub fn give_back(&self, mut block: Box<[T]>) {
        let len = block.len();
        if len == 0 {
            return;
        }
        self.counters.returns.fetch_add(1, Ordering::Relaxed);

        let Some(list) = self.free_list(len) else {
            tracing::debug!(len, "dropping block outside pooled size classes");
            self.counters.discarded.fetch_add(1, Ordering::Relaxed);
            return;
        };

        block.fill_with(T::default);
        if list.put(block).is_err() {
            tracing::debug!(len, "size class full, dropping returned block");
            self.counters.discarded.fetch_add(1, Ordering::Relaxed);
        }
    }

    /// Snapshot of the pool counters.
    pub fn stats(&self) -> PoolStats {
        PoolStats {
            rents: self.counters.rents.load(Ordering::Relaxed),
            returns: self.counters.returns.load(Ordering::Relaxed),
            fresh_allocations: self.counters.fresh_allocations.load(Ordering::Relaxed),
            reuses: self.counters.reuses.load(Ordering::Relaxed),
            discarded: self.counters.discarded.load(Ordering::Relaxed),
        }
    }

    /// Total idle blocks across all size classes.
    pub fn idle_blocks(&self) -> usize {
        self.classes.iter().map(FreeList::idle_count).sum()
    }

    /// Drop every idle block, releasing the memory to the allocator.
    ///
    /// Counters are left untouched.
    pub fn trim(&self) {
        for list in &self.classes {
            list.clear();
        }
    }

    /// Free list serving blocks of exactly `len` elements, if pooled.
    fn free_list(&self, len: usize) -> Option<&FreeList<T>> {
        if !len.is_power_of_two()
            || len < self.config.min_block_len
            || len > self.config.max_block_len
        {
            return None;
        }
        let index = (len.trailing_zeros() - self.config.min_block_len.trailing_zeros()) as usize;
        let list = self.classes.get(index)?;
        debug_assert_eq!(list.block_len(), len);
        Some(list)
    }
}

impl<T: Default + Send + 'static> ArrayPool<T> {
    /// The process-wide pool for element type `T`.
    ///
    /// Created with the default configuration on first use; every later
    /// call returns a handle to the same pool.
    pub fn shared() -> SharedPool<T> {
        let registry = REGISTRY.get_or_init(|| Mutex::new(IndexMap::new()));
        let mut pools = registry.lock().unwrap_or_else(PoisonError::into_inner);
        let entry = pools
            .entry(TypeId::of::<T>())
            .or_insert_with(|| Box::new(Arc::new(ArrayPool::<T>::new())));
        match entry.downcast_ref::<SharedPool<T>>() {
            Some(pool) => Arc::clone(pool),
            // Entries are keyed by TypeId, so the stored pool always has
            // element type T.
            None => unreachable!("shared pool registry holds a mismatched type"),
        }
    }
}

impl<T: Default> Default for ArrayPool<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> fmt::Debug for ArrayPool<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ArrayPool")
            .field("config", &self.config)
            .field("classes", &self.classes.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn small_pool() -> ArrayPool<u32> {
        ArrayPool::with_config(PoolConfig {
            min_block_len: 4,
            max_block_len: 64,
            max_retained_per_class: 2,
        })
        .unwrap()
    }

    #[test]
    fn rent_rounds_to_size_class() {
        let pool = small_pool();
        assert_eq!(pool.rent(0).len(), 4);
        assert_eq!(pool.rent(5).len(), 8);
        assert_eq!(pool.rent(64).len(), 64);
    }

    #[test]
    fn rented_block_is_defaulted() {
        let pool = small_pool();
        let block = pool.rent(10);
        assert!(block.iter().all(|&v| v == 0));
    }

    #[test]
    fn returned_block_is_reused_and_reset() {
        let pool = small_pool();
        let mut block = pool.rent(8);
        block.fill(7);
        pool.give_back(block);
        assert_eq!(pool.idle_blocks(), 1);

        let again = pool.rent(8);
        assert!(again.iter().all(|&v| v == 0));
        let stats = pool.stats();
        assert_eq!(stats.reuses, 1);
        assert_eq!(stats.fresh_allocations, 1);
        assert_eq!(pool.idle_blocks(), 0);
    }

    #[test]
    fn oversized_block_served_but_not_pooled() {
        let pool = small_pool();
        let block = pool.rent(100);
        assert_eq!(block.len(), 128);
        pool.give_back(block);
        assert_eq!(pool.idle_blocks(), 0);
        assert_eq!(pool.stats().discarded, 1);
    }

    #[test]
    fn foreign_block_length_is_discarded() {
        let pool = small_pool();
        pool.give_back(vec![1u32; 6].into_boxed_slice());
        assert_eq!(pool.idle_blocks(), 0);
        assert_eq!(pool.stats().discarded, 1);
    }

    #[test]
    fn empty_block_is_ignored() {
        let pool = small_pool();
        pool.give_back(Box::default());
        assert_eq!(pool.stats(), PoolStats::default());
    }

    #[test]
    fn full_class_discards_extra_blocks() {
        let pool = small_pool();
        let blocks: Vec<_> = (0..3).map(|_| pool.rent(4)).collect();
        for block in blocks {
            pool.give_back(block);
        }
        assert_eq!(pool.idle_blocks(), 2);
        assert_eq!(pool.stats().discarded, 1);
    }

    #[test]
    fn outstanding_tracks_unreturned_blocks() {
        let pool = small_pool();
        let a = pool.rent(4);
        let _b = pool.rent(4);
        assert_eq!(pool.stats().outstanding(), 2);
        pool.give_back(a);
        assert_eq!(pool.stats().outstanding(), 1);
    }

    #[test]
    fn trim_releases_idle_blocks() {
        let pool = small_pool();
        let block = pool.rent(16);
        pool.give_back(block);
        pool.trim();
        assert_eq!(pool.idle_blocks(), 0);
        assert_eq!(pool.stats().returns, 1);
    }

    #[test]
    fn invalid_config_rejected() {
        let result = ArrayPool::<u8>::with_config(PoolConfig {
            min_block_len: 3,
            ..PoolConfig::new()
        });
        assert!(matches!(result, Err(PoolError::InvalidConfig { .. })));
    }

    #[test]
    fn shared_returns_same_pool_per_type() {
        let a = ArrayPool::<i64>::shared();
        let b = ArrayPool::<i64>::shared();
        assert!(Arc::ptr_eq(&a, &b));
    }

    #[test]
    fn shared_pools_are_distinct_across_types() {
        let ints = ArrayPool::<i16>::shared();
        let chars = ArrayPool::<char>::shared();
        assert_eq!(ints.config(), chars.config());
        assert_eq!(ArrayPool::<i16>::shared().rent(1).len(), 16);
    }

    #[test]
    fn concurrent_rent_and_return() {
        let pool = Arc::new(small_pool());
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let pool = Arc::clone(&pool);
                std::thread::spawn(move || {
                    for i in 0..100 {
                        let block = pool.rent(i % 40);
                        pool.give_back(block);
                    }
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }
        let stats = pool.stats();
        assert_eq!(stats.rents, 400);
        assert_eq!(stats.returns, 400);
        assert_eq!(stats.reuses + stats.fresh_allocations, 400);
    }

    #[cfg(not(miri))]
    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn rent_len_is_smallest_fitting_power_of_two(min_len in 0usize..5000) {
                let pool = ArrayPool::<u8>::new();
                let block = pool.rent(min_len);
                prop_assert!(block.len() >= min_len);
                prop_assert!(block.len().is_power_of_two());
                prop_assert!(block.len() >= PoolConfig::DEFAULT_MIN_BLOCK_LEN);
                prop_assert!(block.len() / 2 < min_len.max(PoolConfig::DEFAULT_MIN_BLOCK_LEN));
            }

            #[test]
            fn idle_blocks_never_exceed_retention(
                lens in proptest::collection::vec(0usize..64, 1..40),
            ) {
                let pool = small_pool();
                let blocks: Vec<_> = lens.iter().map(|&n| pool.rent(n)).collect();
                for block in blocks {
                    pool.give_back(block);
                }
                let max_idle = pool.config().class_count() * 2;
                prop_assert!(pool.idle_blocks() <= max_idle);
                let stats = pool.stats();
                prop_assert_eq!(stats.returns, lens.len() as u64);
            }
        }
    }
}
