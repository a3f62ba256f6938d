//! Power-of-two size classes and their idle-block free lists.
//!
//! Every block the pool hands out has a power-of-two length. A
//! [`FreeList`] holds the idle blocks of one such length; the pool keeps
//! one free list per class between `min_block_len` and `max_block_len`.

use std::sync::{Mutex, PoisonError};

/// Round a requested element count up to its size class.
///
/// The result is the next power of two that is at least
/// `max(requested, floor)`.
///
/// # Panics
///
/// Panics with "capacity overflow" if the rounded length does not fit in
/// `usize`, matching the behaviour of `Vec` growth.
pub fn class_len(requested: usize, floor: usize) -> usize {
    match requested.max(floor).checked_next_power_of_two() {
        Some(len) => len,
        None => panic!("capacity overflow: {requested} elements requested"),
    }
}

/// Idle blocks of one size class.
///
/// Blocks stored here are already reset to `T::default()`; a rent pops one
/// and hands it out as-is.
pub(crate) struct FreeList<T> {
    /// Length of every block in this list.
    block_len: usize,
    /// Upper bound on `idle.len()`.
    max_retained: usize,
    idle: Mutex<Vec<Box<[T]>>>,
}

impl<T> FreeList<T> {
    pub(crate) fn new(block_len: usize, max_retained: usize) -> Self {
        Self {
            block_len,
            max_retained,
            idle: Mutex::new(Vec::with_capacity(max_retained)),
        }
    }

    /// Length of the blocks this list serves.
    pub(crate) fn block_len(&self) -> usize {
        self.block_len
    }

    /// Pop an idle block, if any.
    pub(crate) fn take(&self) -> Option<Box<[T]>> {
        self.lock().pop()
    }

    /// Park a reset block. Hands the block back when the list is full.
    pub(crate) fn put(&self, block: Box<[T]>) -> Result<(), Box<[T]>> {
        debug_assert_eq!(block.len(), self.block_len);
        let mut idle = self.lock();
        if idle.len() >= self.max_retained {
            return Err(block);
        }
        idle.push(block);
        Ok(())
    }

    /// Number of idle blocks currently parked.
    pub(crate) fn idle_count(&self) -> usize {
        self.lock().len()
    }

    /// Drop every idle block.
    pub(crate) fn clear(&self) {
        self.lock().clear();
    }

    // A poisoned list only means a panic happened while another thread held
    // the lock; the Vec itself is always in a consistent state.
    fn lock(&self) -> std::sync::MutexGuard<'_, Vec<Box<[T]>>> {
        self.idle.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn class_len_rounds_up_to_power_of_two() {
        assert_eq!(class_len(17, 16), 32);
        assert_eq!(class_len(32, 16), 32);
        assert_eq!(class_len(33, 16), 64);
    }

    #[test]
    fn class_len_respects_floor() {
        assert_eq!(class_len(0, 16), 16);
        assert_eq!(class_len(3, 16), 16);
        assert_eq!(class_len(3, 1), 4);
    }

    #[test]
    #[should_panic(expected = "capacity overflow")]
    fn class_len_overflow_panics() {
        class_len(usize::MAX, 16);
    }

    #[test]
    fn free_list_is_lifo() {
        let list: FreeList<u8> = FreeList::new(4, 2);
        let a: Box<[u8]> = vec![1; 4].into_boxed_slice();
        let b: Box<[u8]> = vec![2; 4].into_boxed_slice();
        list.put(a).unwrap();
        list.put(b).unwrap();
        assert_eq!(list.take().unwrap()[0], 2);
        assert_eq!(list.take().unwrap()[0], 1);
        assert!(list.take().is_none());
    }

    #[test]
    fn free_list_rejects_past_retention_limit() {
        let list: FreeList<u8> = FreeList::new(4, 1);
        list.put(vec![0; 4].into_boxed_slice()).unwrap();
        let rejected = list.put(vec![0; 4].into_boxed_slice());
        assert!(rejected.is_err());
        assert_eq!(list.idle_count(), 1);
    }

    #[test]
    fn clear_empties_list() {
        let list: FreeList<u8> = FreeList::new(8, 4);
        list.put(vec![0; 8].into_boxed_slice()).unwrap();
        list.clear();
        assert_eq!(list.idle_count(), 0);
        assert_eq!(list.block_len(), 8);
    }
}
