//! Buffer state: the owned block, the two cursors, and the read surface.
//!
//! The live content of a [`Builder`] is `storage[head..tail)`. Free slots
//! before `head` are prepend capacity, free slots after `tail` are append
//! capacity. Every slot outside the live region holds `T::default()`, which
//! lets the editors move elements with slice rotation instead of raw copies
//! and guarantees no stale value outlives its removal.

use std::fmt;
use std::ops::{Index, IndexMut};

use deckbuf_pool::{ArrayPool, SharedPool};
use smallvec::SmallVec;

use crate::capacity::repeated_len;
use crate::config::BuilderConfig;
use crate::error::BuilderError;

/// A growable double-ended buffer with pooled storage.
///
/// Appends and prepends are amortized O(1); interior inserts and removals
/// move whichever side is cheaper (see [`InsertShift`](crate::InsertShift)).
/// The backing block is rented from an [`ArrayPool`] and given back exactly
/// once: when it is outgrown, or when the builder is dropped.
///
/// A builder is a single-owner value. It performs no locking; `&mut self`
/// on every mutation is what keeps two writers apart.
///
/// ```
/// use deckbuf_core::Builder;
///
/// let mut b: Builder<char> = Builder::from("234");
/// b.push_front('1');
/// b.append(&['5', '6', '7']);
/// b.insert_every(&[','], 3).unwrap();
/// assert_eq!(b.to_string(), "1,234,567");
/// ```
pub struct Builder<T: Default> {
    /// Rented block; its length is the builder's capacity.
    pub(crate) storage: Box<[T]>,
    /// First live slot (storage coordinates).
    pub(crate) head: usize,
    /// One past the last live slot (storage coordinates).
    pub(crate) tail: usize,
    pub(crate) config: BuilderConfig,
    pub(crate) pool: SharedPool<T>,
}

impl<T: Default + Send + 'static> Builder<T> {
    /// Create an empty builder backed by the shared pool for `T`.
    pub fn new() -> Self {
        Self::with_pool(ArrayPool::shared())
    }

    /// Create an empty builder with room for at least `capacity` elements.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if `capacity` cannot be rounded up to
    /// a power of two.
    pub fn with_capacity(capacity: usize) -> Self {
        Self::build(BuilderConfig::new(), ArrayPool::shared(), capacity)
    }
}

impl<T: Clone + Default + Send + 'static> Builder<T> {
    /// Create a builder holding `value` repeated `count` times.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the total length overflows.
    pub fn from_value(value: T, count: usize) -> Self {
        Self::from_slice(std::slice::from_ref(&value), count)
    }

    /// Create a builder holding `seq` repeated `count` times.
    ///
    /// The block is sized for the whole result up front, so seeding never
    /// regrows.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the total length overflows.
    pub fn from_slice(seq: &[T], count: usize) -> Self {
        let mut builder = Self::with_capacity(repeated_len(seq.len(), count));
        builder.center_for(repeated_len(seq.len(), count));
        builder.append_repeat(seq, count);
        builder
    }

    /// Create a builder holding the items of a fixed-size collection
    /// repeated `count` times.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the total length overflows.
    pub fn from_collection<I>(items: I, count: usize) -> Self
    where
        I: IntoIterator<Item = T>,
        I::IntoIter: ExactSizeIterator,
    {
        let items: SmallVec<[T; 16]> = items.into_iter().collect();
        Self::from_slice(&items, count)
    }
}

impl<T: Default> Builder<T> {
    /// Create an empty builder that rents from `pool`.
    pub fn with_pool(pool: SharedPool<T>) -> Self {
        Self::build(BuilderConfig::new(), pool, 0)
    }

    /// Create an empty builder with a custom configuration and pool.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if `config` fails
    /// [`BuilderConfig::validate`].
    pub fn with_config(config: BuilderConfig, pool: SharedPool<T>) -> Result<Self, BuilderError> {
        config.validate()?;
        Ok(Self::build(config, pool, 0))
    }

    fn build(config: BuilderConfig, pool: SharedPool<T>, capacity: usize) -> Self {
        let storage = pool.rent(capacity.max(config.min_capacity));
        let mid = storage.len() / 2;
        Self {
            storage,
            head: mid,
            tail: mid,
            config,
            pool,
        }
    }

    /// Place the (empty) live region so `total` elements fit after it with
    /// the spare space split evenly.
    pub(crate) fn center_for(&mut self, total: usize) {
        debug_assert!(self.is_empty());
        let head = self.storage.len().saturating_sub(total) / 2;
        self.head = head;
        self.tail = head;
    }

    // ── Queries ─────────────────────────────────────────────────────

    /// Number of live elements.
    pub fn len(&self) -> usize {
        self.tail - self.head
    }

    /// Whether the builder holds no elements.
    pub fn is_empty(&self) -> bool {
        self.head == self.tail
    }

    /// Length of the backing block.
    pub fn capacity(&self) -> usize {
        self.storage.len()
    }

    /// Free slots before the live region (prepend capacity).
    pub fn front_capacity(&self) -> usize {
        self.head
    }

    /// Free slots after the live region (append capacity).
    pub fn back_capacity(&self) -> usize {
        self.storage.len() - self.tail
    }

    /// The configuration this builder was created with.
    pub fn config(&self) -> &BuilderConfig {
        &self.config
    }

    /// The pool this builder rents from.
    pub fn pool(&self) -> &SharedPool<T> {
        &self.pool
    }

    // ── Read surface ────────────────────────────────────────────────

    /// Zero-copy view of the live region.
    pub fn as_slice(&self) -> &[T] {
        &self.storage[self.head..self.tail]
    }

    /// Mutable zero-copy view of the live region.
    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.storage[self.head..self.tail]
    }

    /// Iterate over the live elements, front to back.
    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Mutably iterate over the live elements, front to back.
    pub fn iter_mut(&mut self) -> std::slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    /// First live element.
    pub fn first(&self) -> Option<&T> {
        self.as_slice().first()
    }

    /// Last live element.
    pub fn last(&self) -> Option<&T> {
        self.as_slice().last()
    }

    /// Checked read of the element at logical `index`.
    pub fn get(&self, index: usize) -> Option<&T> {
        self.as_slice().get(index)
    }

    /// Checked mutable access to the element at logical `index`.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        self.as_mut_slice().get_mut(index)
    }

    /// Overwrite the element at `index`, returning the previous value.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `index >= len`.
    pub fn set(&mut self, index: usize, value: T) -> Result<T, BuilderError> {
        self.check_index(index)?;
        let slot = self.slot(index);
        Ok(std::mem::replace(&mut self.storage[slot], value))
    }

    /// Move the live elements out into a `Vec` and give the block back.
    pub fn into_vec(mut self) -> Vec<T> {
        let (head, tail) = (self.head, self.tail);
        self.storage[head..tail].iter_mut().map(std::mem::take).collect()
    }

    // ── Coordinate translation and validation ───────────────────────

    /// Storage coordinate of logical `index`. Callers validate first.
    pub(crate) fn slot(&self, index: usize) -> usize {
        self.head + index
    }

    /// `index` must address an element: `index < len`.
    pub(crate) fn check_index(&self, index: usize) -> Result<(), BuilderError> {
        if index >= self.len() {
            return Err(BuilderError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// `index` must be an insertion point: `index <= len`.
    pub(crate) fn check_position(&self, index: usize) -> Result<(), BuilderError> {
        if index > self.len() {
            return Err(BuilderError::IndexOutOfRange {
                index,
                len: self.len(),
            });
        }
        Ok(())
    }

    /// `[start, start + count)` must lie within `[0, len]`.
    pub(crate) fn check_range(&self, start: usize, count: usize) -> Result<(), BuilderError> {
        match start.checked_add(count) {
            Some(end) if end <= self.len() => Ok(()),
            _ => Err(BuilderError::RangeOutOfBounds {
                start,
                count,
                len: self.len(),
            }),
        }
    }
}

impl<T: Clone + Default> Builder<T> {
    /// Copy the live elements into a new `Vec`.
    pub fn to_vec(&self) -> Vec<T> {
        self.as_slice().to_vec()
    }
}

impl<T: Default> Drop for Builder<T> {
    fn drop(&mut self) {
        let block = std::mem::take(&mut self.storage);
        self.pool.give_back(block);
    }
}

impl<T: Default + Send + 'static> Default for Builder<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Clone + Default> Clone for Builder<T> {
    /// Rents a block of the same capacity from the same pool and clones the
    /// live region into the same position.
    fn clone(&self) -> Self {
        let mut storage = self.pool.rent(self.storage.len());
        storage[self.head..self.tail].clone_from_slice(self.as_slice());
        Self {
            storage,
            head: self.head,
            tail: self.tail,
            config: self.config.clone(),
            pool: self.pool.clone(),
        }
    }
}

impl<T: Default + fmt::Debug> fmt::Debug for Builder<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Default + PartialEq> PartialEq for Builder<T> {
    fn eq(&self, other: &Self) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Default + Eq> Eq for Builder<T> {}

impl<T: Default + PartialEq> PartialEq<[T]> for Builder<T> {
    fn eq(&self, other: &[T]) -> bool {
        self.as_slice() == other
    }
}

impl<T: Default + PartialEq> PartialEq<&[T]> for Builder<T> {
    fn eq(&self, other: &&[T]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: Default + PartialEq, const N: usize> PartialEq<[T; N]> for Builder<T> {
    fn eq(&self, other: &[T; N]) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Default + PartialEq> PartialEq<Vec<T>> for Builder<T> {
    fn eq(&self, other: &Vec<T>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T: Default> Index<usize> for Builder<T> {
    type Output = T;

    /// # Panics
    ///
    /// Panics if `index >= len`.
    fn index(&self, index: usize) -> &T {
        match self.get(index) {
            Some(value) => value,
            None => panic!("index {index} out of range for builder of length {}", self.len()),
        }
    }
}

impl<T: Default> IndexMut<usize> for Builder<T> {
    fn index_mut(&mut self, index: usize) -> &mut T {
        let len = self.len();
        match self.get_mut(index) {
            Some(value) => value,
            None => panic!("index {index} out of range for builder of length {len}"),
        }
    }
}

impl<T: Default> AsRef<[T]> for Builder<T> {
    fn as_ref(&self) -> &[T] {
        self.as_slice()
    }
}

impl<T: Default> AsMut<[T]> for Builder<T> {
    fn as_mut(&mut self) -> &mut [T] {
        self.as_mut_slice()
    }
}

impl<'a, T: Default> IntoIterator for &'a Builder<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T: Default> IntoIterator for &'a mut Builder<T> {
    type Item = &'a mut T;
    type IntoIter = std::slice::IterMut<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T: Default> Extend<T> for Builder<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        let iter = iter.into_iter();
        self.ensure_append(iter.size_hint().0);
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<'a, T: Copy + Default + 'a> Extend<&'a T> for Builder<T> {
    fn extend<I: IntoIterator<Item = &'a T>>(&mut self, iter: I) {
        self.extend(iter.into_iter().copied());
    }
}

impl<T: Default + Send + 'static> FromIterator<T> for Builder<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let hint = iter.size_hint().0;
        let mut builder = Self::with_capacity(hint);
        builder.center_for(hint);
        builder.extend(iter);
        builder
    }
}

impl<T: Clone + Default + Send + 'static> From<&[T]> for Builder<T> {
    fn from(seq: &[T]) -> Self {
        Self::from_slice(seq, 1)
    }
}

impl<T: Default + Send + 'static> From<Vec<T>> for Builder<T> {
    fn from(values: Vec<T>) -> Self {
        let mut builder = Self::with_capacity(values.len());
        builder.center_for(values.len());
        builder.extend(values);
        builder
    }
}
