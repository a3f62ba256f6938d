//! Bulk transformers: composite in-place algorithms over the live region.
//!
//! Growing transformers (duplicate, insert-every, repeat) reserve all the
//! room they need once and then fill right to left, so each element moves
//! at most once. Shrinking ones (normalize, remove) compact survivors to
//! the front in a single left-to-right pass and truncate the rest.

use crate::builder::Builder;
use crate::capacity::repeated_len;
use crate::comparer::{in_set, slices_equal, Comparer, DefaultComparer};
use crate::edit::fill_cycled;
use crate::error::BuilderError;

impl<T: Default> Builder<T> {
    /// Keep the elements for which `keep(index, value)` holds, preserving
    /// order. Returns how many were dropped.
    pub(crate) fn retain_indexed<F>(&mut self, mut keep: F) -> usize
    where
        F: FnMut(usize, &T) -> bool,
    {
        let len = self.len();
        let base = self.head;
        let mut write = 0;
        for read in 0..len {
            if !keep(read, &self.storage[base + read]) {
                continue;
            }
            if write != read {
                self.storage.swap(base + write, base + read);
            }
            write += 1;
        }
        self.truncate(write);
        len - write
    }

    /// Remove every element matching `predicate`, preserving the order of
    /// the rest. Returns the number removed.
    pub fn remove_all<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.retain_indexed(|_, value| !predicate(value))
    }

    /// Remove one element every `interval` positions, counting from the
    /// right and never removing position 0.
    ///
    /// This undoes [`insert_every`](Self::insert_every) with a one-element
    /// separator: `"1,234,567"` with interval 3 becomes `"1234567"`.
    /// Returns the number removed.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if `interval` is 0.
    pub fn remove_every(&mut self, interval: usize) -> Result<usize, BuilderError> {
        if interval == 0 {
            return Err(BuilderError::invalid("interval", "must be at least 1"));
        }
        let Some(period) = interval.checked_add(1) else {
            return Ok(0);
        };
        let last = match self.len().checked_sub(1) {
            Some(last) => last,
            None => return Ok(0),
        };
        Ok(self.retain_indexed(|i, _| i == 0 || (last - i) % period != interval))
    }

    /// Apply `f` to every element, right to left.
    pub fn map_in_place<F>(&mut self, mut f: F)
    where
        F: FnMut(&T) -> T,
    {
        for slot in self.as_mut_slice().iter_mut().rev() {
            let next = f(slot);
            *slot = next;
        }
    }
}

impl<T: Clone + Default> Builder<T> {
    /// After every element found in `match_set` (every element, when the
    /// set is empty) insert `count` extra copies of it. Copies are never
    /// matched again. Returns the number of elements duplicated.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the grown length overflows.
    pub fn duplicate(&mut self, match_set: &[T], count: usize) -> usize
    where
        T: PartialEq,
    {
        self.duplicate_by(match_set, count, &DefaultComparer)
    }

    /// [`duplicate`](Self::duplicate) with a custom comparer.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the grown length overflows.
    pub fn duplicate_by<C>(&mut self, match_set: &[T], count: usize, cmp: &C) -> usize
    where
        C: Comparer<T> + ?Sized,
    {
        let hits = |value: &T| match_set.is_empty() || in_set(match_set, value, cmp);
        if count == 0 {
            return 0;
        }
        let matched = self.iter().filter(|v| hits(*v)).count();
        if matched == 0 {
            return 0;
        }

        let extra = repeated_len(matched, count);
        self.ensure_append(extra);

        let mut dst = self.tail + extra;
        let mut src = self.tail;
        while src > self.head {
            src -= 1;
            if hits(&self.storage[src]) {
                for _ in 0..count {
                    dst -= 1;
                    self.storage[dst] = self.storage[src].clone();
                }
            }
            dst -= 1;
            if dst != src {
                self.storage.swap(dst, src);
            }
        }
        self.tail += extra;
        matched
    }

    /// Cap every run of matching adjacent elements at `max_run`.
    ///
    /// With an empty `match_set` a run is a stretch of equal elements;
    /// otherwise it is a stretch whose elements are all members of the set
    /// (`"a \t\t b"` with set `[' ', '\t']` and `max_run` 1 becomes
    /// `"a b"`). Returns the number of elements removed.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if `max_run` is 0.
    pub fn normalize_adjacent(
        &mut self,
        max_run: usize,
        match_set: &[T],
    ) -> Result<usize, BuilderError>
    where
        T: PartialEq,
    {
        self.normalize_adjacent_by(max_run, match_set, &DefaultComparer)
    }

    /// [`normalize_adjacent`](Self::normalize_adjacent) with a custom
    /// comparer. Each element is compared with the last element kept.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if `max_run` is 0.
    pub fn normalize_adjacent_by<C>(
        &mut self,
        max_run: usize,
        match_set: &[T],
        cmp: &C,
    ) -> Result<usize, BuilderError>
    where
        C: Comparer<T> + ?Sized,
    {
        if max_run == 0 {
            return Err(BuilderError::invalid("max_run", "must be at least 1"));
        }
        let len = self.len();
        if len == 0 {
            return Ok(0);
        }

        let base = self.head;
        let mut write = 1;
        let mut run = 1;
        for read in 1..len {
            let prev = &self.storage[base + write - 1];
            let cur = &self.storage[base + read];
            let continues = if match_set.is_empty() {
                cmp.equals(prev, cur)
            } else {
                in_set(match_set, prev, cmp) && in_set(match_set, cur, cmp)
            };
            run = if continues { run + 1 } else { 1 };
            if run > max_run {
                continue;
            }
            if write != read {
                self.storage.swap(base + write, base + read);
            }
            write += 1;
        }
        self.truncate(write);
        Ok(len - write)
    }

    /// Collapse every maximal run of elements matching `predicate` into a
    /// single `replacement`, dropping leading and trailing runs entirely.
    ///
    /// `"  a   b  "` with `char::is_whitespace` and `' '` becomes `"a b"`.
    pub fn normalize_all<P>(&mut self, replacement: T, mut predicate: P)
    where
        P: FnMut(&T) -> bool,
    {
        let len = self.len();
        let base = self.head;
        let mut write = 0;
        let mut pending = false;
        for read in 0..len {
            if predicate(&self.storage[base + read]) {
                pending |= write > 0;
                continue;
            }
            if pending {
                // The skipped run left at least one free slot behind `read`.
                self.storage[base + write] = replacement.clone();
                write += 1;
                pending = false;
            }
            if write != read {
                self.storage.swap(base + write, base + read);
            }
            write += 1;
        }
        self.truncate(write);
    }

    /// Replace each element with the sequence `f` returns for it, scanning
    /// right to left. `None` keeps the element; an empty sequence deletes
    /// it. Returns the number of elements replaced.
    pub fn replace_with<F, R>(&mut self, mut f: F) -> usize
    where
        F: FnMut(&T) -> Option<R>,
        R: AsRef<[T]>,
    {
        let mut replaced = 0;
        let mut i = self.len();
        while i > 0 {
            i -= 1;
            if let Some(seq) = f(&self.storage[self.slot(i)]) {
                self.splice_at(i, 1, seq.as_ref());
                replaced += 1;
            }
        }
        replaced
    }

    /// Replace every element matching `predicate` with `replacement`,
    /// scanning right to left. Returns the number replaced.
    pub fn replace_all<P>(&mut self, mut predicate: P, replacement: &[T]) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.replace_with(|value| predicate(value).then_some(replacement))
    }

    /// If the live content at `offset` starts with `key`, substitute it
    /// with `value`. Returns whether the substitution happened.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `offset > len`, or
    /// [`BuilderError::InvalidArgument`] if `key` is empty.
    pub fn replace_if_equal_at(
        &mut self,
        offset: usize,
        key: &[T],
        value: &[T],
    ) -> Result<bool, BuilderError>
    where
        T: PartialEq,
    {
        self.replace_if_equal_at_by(offset, key, value, &DefaultComparer)
    }

    /// [`replace_if_equal_at`](Self::replace_if_equal_at) with a custom
    /// comparer.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `offset > len`, or
    /// [`BuilderError::InvalidArgument`] if `key` is empty.
    pub fn replace_if_equal_at_by<C>(
        &mut self,
        offset: usize,
        key: &[T],
        value: &[T],
        cmp: &C,
    ) -> Result<bool, BuilderError>
    where
        C: Comparer<T> + ?Sized,
    {
        self.check_position(offset)?;
        if key.is_empty() {
            return Err(BuilderError::invalid("key", "must not be empty"));
        }
        let Some(candidate) = self.as_slice().get(offset..offset + key.len()) else {
            return Ok(false);
        };
        if !slices_equal(candidate, key, cmp) {
            return Ok(false);
        }
        self.splice_at(offset, key.len(), value);
        Ok(true)
    }

    /// Insert `seq` before every `interval`-th element counted from the
    /// right, never before position 0.
    ///
    /// `"1234567"` with `[',']` and interval 3 becomes `"1,234,567"`.
    /// Returns the number of separators inserted.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if `interval` is 0.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the grown length overflows.
    pub fn insert_every(&mut self, seq: &[T], interval: usize) -> Result<usize, BuilderError> {
        if interval == 0 {
            return Err(BuilderError::invalid("interval", "must be at least 1"));
        }
        let len = self.len();
        if seq.is_empty() || len <= interval {
            return Ok(0);
        }

        let groups = (len - 1) / interval;
        let extra = repeated_len(groups, seq.len());
        self.ensure_append(extra);

        let mut dst = self.tail + extra;
        let mut src = self.tail;
        while src > self.head {
            src -= 1;
            dst -= 1;
            if dst != src {
                self.storage.swap(dst, src);
            }
            let position = src - self.head;
            if position > 0 && (len - position) % interval == 0 {
                dst -= seq.len();
                self.storage[dst..dst + seq.len()].clone_from_slice(seq);
            }
        }
        self.tail += extra;
        Ok(groups)
    }

    /// Make the content `count` back-to-back copies of itself.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if `count` is 0.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the grown length overflows.
    pub fn repeat(&mut self, count: usize) -> Result<(), BuilderError> {
        if count == 0 {
            return Err(BuilderError::invalid("count", "must be at least 1"));
        }
        let len = self.len();
        if count == 1 || len == 0 {
            return Ok(());
        }
        let extra = repeated_len(len, count - 1);
        self.ensure_append(extra);

        let (original, spare) = self.storage[self.head..].split_at_mut(len);
        fill_cycled(&mut spare[..extra], original);
        self.tail += extra;
        Ok(())
    }
}
