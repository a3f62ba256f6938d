//! Capacity manager: guarantees free slots before an editor writes.
//!
//! Each `ensure_*` call is a no-op when the requested room already exists.
//! Otherwise the live region is either re-centered inside the current block
//! (when the result still leaves at least half the block free) or moved into
//! a freshly rented power-of-two block at least twice as large, with the old
//! block given back to the pool. In both cases the spare space left after
//! honouring the request is split evenly between the two sides.
//!
//! A re-center moves at most half a block to free at least a quarter of it
//! on the requested side, and a reallocation doubles, so any run of pushes
//! at either end is amortized O(1).

use crate::builder::Builder;

/// `len * count`, treating overflow as a fatal capacity overflow.
///
/// # Panics
///
/// Panics with "capacity overflow" if the product does not fit in `usize`.
pub(crate) fn repeated_len(len: usize, count: usize) -> usize {
    match len.checked_mul(count) {
        Some(total) => total,
        None => capacity_overflow(),
    }
}

#[cold]
pub(crate) fn capacity_overflow() -> ! {
    panic!("capacity overflow")
}

impl<T: Default> Builder<T> {
    /// Guarantee at least `n` free slots after the live region.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if `len + n` overflows.
    pub fn ensure_append(&mut self, n: usize) {
        if self.back_capacity() >= n {
            return;
        }
        self.relocate(0, n);
    }

    /// Guarantee at least `n` free slots before the live region.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if `len + n` overflows.
    pub fn ensure_prepend(&mut self, n: usize) {
        if self.front_capacity() >= n {
            return;
        }
        self.relocate(n, 0);
    }

    /// Guarantee at least `n` free slots on both sides at once.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if `len + 2n` overflows.
    pub fn ensure_uniform(&mut self, n: usize) {
        if self.front_capacity() >= n && self.back_capacity() >= n {
            return;
        }
        self.relocate(n, n);
    }

    /// Give the block back in exchange for the smallest one that still
    /// holds the live region. No-op when no smaller class fits.
    pub fn shrink_to_fit(&mut self) {
        let target = self.pool.class_len(self.len().max(self.config.min_capacity));
        if target >= self.storage.len() {
            return;
        }
        self.move_to_new_block(target, 0, 0);
    }

    /// Reposition the live region so `front` and `back` free slots surround
    /// it, reallocating when the block is less than twice the requirement.
    fn relocate(&mut self, front: usize, back: usize) {
        let required = match self
            .len()
            .checked_add(front)
            .and_then(|r| r.checked_add(back))
        {
            Some(required) => required,
            None => capacity_overflow(),
        };

        let capacity = self.storage.len();
        if required <= capacity / 2 {
            let new_head = front + (capacity - required) / 2;
            tracing::trace!(
                len = self.len(),
                capacity,
                from = self.head,
                to = new_head,
                "re-centering builder live region"
            );
            self.shift_live(new_head);
        } else {
            let min_len = required
                .max(capacity.saturating_add(1))
                .max(self.config.min_capacity);
            self.move_to_new_block(min_len, front, back);
        }
    }

    /// Rent a block of at least `min_len`, move the live region into it
    /// with `front`/`back` room plus evenly split spare, and give the old
    /// block back.
    fn move_to_new_block(&mut self, min_len: usize, front: usize, back: usize) {
        let len = self.len();
        let mut block = self.pool.rent(min_len);
        let spare = block.len() - len - front - back;
        let new_head = front + spare / 2;

        for (dst, src) in block[new_head..new_head + len]
            .iter_mut()
            .zip(&mut self.storage[self.head..self.tail])
        {
            std::mem::swap(dst, src);
        }

        tracing::trace!(
            len,
            old_capacity = self.storage.len(),
            new_capacity = block.len(),
            "reallocated builder storage"
        );

        let old = std::mem::replace(&mut self.storage, block);
        self.pool.give_back(old);
        self.head = new_head;
        self.tail = new_head + len;
    }

    /// Move the live region to start at `new_head` inside the current block.
    ///
    /// Slots outside the live region hold defaults, so rotating the span
    /// that covers both the old and new positions is an element-wise move.
    pub(crate) fn shift_live(&mut self, new_head: usize) {
        let len = self.len();
        debug_assert!(new_head + len <= self.storage.len());
        if new_head < self.head {
            self.storage[new_head..self.tail].rotate_left(self.head - new_head);
        } else if new_head > self.head {
            self.storage[self.head..new_head + len].rotate_right(new_head - self.head);
        }
        self.head = new_head;
        self.tail = new_head + len;
    }
}
