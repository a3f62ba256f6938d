//! Positional editors: index-safe primitive mutations.
//!
//! Every public editor validates its indices against the live region
//! before touching anything; the `*_at` helpers assume validated input and
//! are what the bulk transformers build on.

use crate::builder::Builder;
use crate::capacity::repeated_len;
use crate::config::InsertShift;
use crate::error::BuilderError;

/// Fill `dst` by cycling through `pattern`.
pub(crate) fn fill_cycled<T: Clone>(dst: &mut [T], pattern: &[T]) {
    debug_assert!(!pattern.is_empty() || dst.is_empty());
    for (slot, value) in dst.iter_mut().zip(pattern.iter().cycle()) {
        slot.clone_from(value);
    }
}

impl<T: Default> Builder<T> {
    /// Append one element. Amortized O(1).
    pub fn push_back(&mut self, value: T) {
        self.ensure_append(1);
        self.storage[self.tail] = value;
        self.tail += 1;
    }

    /// Prepend one element. Amortized O(1).
    pub fn push_front(&mut self, value: T) {
        self.ensure_prepend(1);
        self.head -= 1;
        self.storage[self.head] = value;
    }

    /// Remove and return the last element.
    pub fn pop_back(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        self.tail -= 1;
        Some(std::mem::take(&mut self.storage[self.tail]))
    }

    /// Remove and return the first element.
    pub fn pop_front(&mut self) -> Option<T> {
        if self.is_empty() {
            return None;
        }
        let value = std::mem::take(&mut self.storage[self.head]);
        self.head += 1;
        Some(value)
    }

    /// Remove every element, keeping the block and re-centering the cursors.
    pub fn clear(&mut self) {
        self.storage[self.head..self.tail].fill_with(T::default);
        let mid = self.storage.len() / 2;
        self.head = mid;
        self.tail = mid;
    }

    /// Shorten to `len` elements. No-op if already that short.
    pub fn truncate(&mut self, len: usize) {
        if len >= self.len() {
            return;
        }
        let end = self.slot(len);
        self.storage[end..self.tail].fill_with(T::default);
        self.tail = end;
    }

    /// Remove `count` elements starting at logical `start`.
    ///
    /// Moves whichever side of the removed range holds fewer elements.
    /// Vacated slots are reset to `T::default()`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::RangeOutOfBounds`] if `start + count > len`.
    pub fn remove(&mut self, start: usize, count: usize) -> Result<(), BuilderError> {
        self.check_range(start, count)?;
        self.remove_at(start, count);
        Ok(())
    }

    pub(crate) fn remove_at(&mut self, start: usize, count: usize) {
        if count == 0 {
            return;
        }
        let at = self.slot(start);
        self.storage[at..at + count].fill_with(T::default);

        let after = self.len() - start - count;
        if start < after {
            self.storage[self.head..at + count].rotate_right(count);
            self.head += count;
        } else {
            self.storage[at..self.tail].rotate_left(count);
            self.tail -= count;
        }
    }

    /// Exchange the elements at logical `i` and `j`. No-op when equal.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if either index is
    /// `>= len`.
    pub fn swap(&mut self, i: usize, j: usize) -> Result<(), BuilderError> {
        self.check_index(i)?;
        self.check_index(j)?;
        if i != j {
            let (a, b) = (self.slot(i), self.slot(j));
            self.storage.swap(a, b);
        }
        Ok(())
    }

    /// Reverse the whole live region in place.
    pub fn reverse(&mut self) {
        self.as_mut_slice().reverse();
    }

    /// Reverse the elements in `[start, end]` (inclusive) in place.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `end >= len`, or
    /// [`BuilderError::InvalidArgument`] if `start > end`.
    pub fn reverse_range(&mut self, start: usize, end: usize) -> Result<(), BuilderError> {
        self.check_index(end)?;
        if start > end {
            return Err(BuilderError::invalid(
                "start",
                format!("start {start} is past end {end}"),
            ));
        }
        self.as_mut_slice()[start..=end].reverse();
        Ok(())
    }

    /// Open a `count`-slot gap at logical `index` and return its storage
    /// offset. The gap holds defaults; the caller fills it.
    pub(crate) fn open_gap(&mut self, index: usize, count: usize) -> usize {
        debug_assert!(index <= self.len());
        let shift_left = match self.config.insert_shift {
            InsertShift::Left => {
                self.ensure_uniform(count);
                true
            }
            InsertShift::Shorter => {
                let left = index < self.len() - index;
                if left {
                    self.ensure_prepend(count);
                } else {
                    self.ensure_append(count);
                }
                left
            }
        };

        if shift_left {
            let new_head = self.head - count;
            let end = self.slot(index);
            self.storage[new_head..end].rotate_left(count);
            self.head = new_head;
            new_head + index
        } else {
            let at = self.slot(index);
            self.storage[at..self.tail + count].rotate_right(count);
            self.tail += count;
            at
        }
    }
}

impl<T: Clone + Default> Builder<T> {
    /// Append a sequence.
    pub fn append(&mut self, seq: &[T]) {
        self.append_repeat(seq, 1);
    }

    /// Append `seq` repeated `count` times.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the total length overflows.
    pub fn append_repeat(&mut self, seq: &[T], count: usize) {
        let total = repeated_len(seq.len(), count);
        if total == 0 {
            return;
        }
        self.ensure_append(total);
        let start = self.tail;
        fill_cycled(&mut self.storage[start..start + total], seq);
        self.tail += total;
    }

    /// Prepend a sequence, keeping its order: prepending `[a, b]` to
    /// `[c]` gives `[a, b, c]`.
    pub fn prepend(&mut self, seq: &[T]) {
        self.prepend_repeat(seq, 1);
    }

    /// Prepend `seq` repeated `count` times.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the total length overflows.
    pub fn prepend_repeat(&mut self, seq: &[T], count: usize) {
        let total = repeated_len(seq.len(), count);
        if total == 0 {
            return;
        }
        self.ensure_prepend(total);
        self.head -= total;
        let start = self.head;
        fill_cycled(&mut self.storage[start..start + total], seq);
    }

    /// Insert a sequence at logical `index` (`0..=len`).
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `index > len`.
    pub fn insert(&mut self, index: usize, seq: &[T]) -> Result<(), BuilderError> {
        self.insert_repeat(index, seq, 1)
    }

    /// Insert `seq` repeated `count` times at logical `index`.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::IndexOutOfRange`] if `index > len`.
    ///
    /// # Panics
    ///
    /// Panics with "capacity overflow" if the total length overflows.
    pub fn insert_repeat(
        &mut self,
        index: usize,
        seq: &[T],
        count: usize,
    ) -> Result<(), BuilderError> {
        self.check_position(index)?;
        self.insert_at(index, seq, count);
        Ok(())
    }

    pub(crate) fn insert_at(&mut self, index: usize, seq: &[T], count: usize) {
        let total = repeated_len(seq.len(), count);
        if total == 0 {
            return;
        }
        let gap = self.open_gap(index, total);
        fill_cycled(&mut self.storage[gap..gap + total], seq);
    }

    /// Clone `count` elements from logical `source` over logical `target`,
    /// with memmove semantics for overlapping ranges.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::RangeOutOfBounds`] if either range does not
    /// fit inside the live region.
    pub fn copy(&mut self, source: usize, target: usize, count: usize) -> Result<(), BuilderError> {
        self.check_range(source, count)?;
        self.check_range(target, count)?;
        if count == 0 || source == target {
            return Ok(());
        }
        let live = self.as_mut_slice();
        if target < source {
            for i in 0..count {
                let value = live[source + i].clone();
                live[target + i] = value;
            }
        } else {
            for i in (0..count).rev() {
                let value = live[source + i].clone();
                live[target + i] = value;
            }
        }
        Ok(())
    }

    /// Replace `remove_count` elements at `start` with `seq`.
    ///
    /// Overlapping positions are overwritten in place; only the length
    /// difference is inserted or removed.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::RangeOutOfBounds`] if
    /// `start + remove_count > len`.
    pub fn splice(
        &mut self,
        start: usize,
        remove_count: usize,
        seq: &[T],
    ) -> Result<(), BuilderError> {
        self.check_range(start, remove_count)?;
        self.splice_at(start, remove_count, seq);
        Ok(())
    }

    pub(crate) fn splice_at(&mut self, start: usize, remove_count: usize, seq: &[T]) {
        let overlap = remove_count.min(seq.len());
        let at = self.slot(start);
        self.storage[at..at + overlap].clone_from_slice(&seq[..overlap]);
        if seq.len() > overlap {
            self.insert_at(start + overlap, &seq[overlap..], 1);
        } else if remove_count > overlap {
            self.remove_at(start + overlap, remove_count - overlap);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use deckbuf_pool::ArrayPool;

    use super::*;
    use crate::config::BuilderConfig;

    fn chars(s: &str) -> Builder<char> {
        s.chars().collect()
    }

    fn text(b: &Builder<char>) -> String {
        b.iter().collect()
    }

    fn with_shift(shift: InsertShift, s: &str) -> Builder<char> {
        let config = BuilderConfig {
            insert_shift: shift,
            ..BuilderConfig::new()
        };
        let mut b = Builder::with_config(config, Arc::new(ArrayPool::new())).unwrap();
        b.extend(s.chars());
        b
    }

    #[test]
    fn push_and_pop_both_ends() {
        let mut b = chars("b");
        b.push_front('a');
        b.push_back('c');
        assert_eq!(text(&b), "abc");
        assert_eq!(b.pop_front(), Some('a'));
        assert_eq!(b.pop_back(), Some('c'));
        assert_eq!(b.pop_back(), Some('b'));
        assert_eq!(b.pop_back(), None);
        assert_eq!(b.pop_front(), None);
    }

    #[test]
    fn append_and_prepend_sequences() {
        let mut b = chars("c");
        b.prepend(&['a', 'b']);
        b.append(&['d', 'e']);
        assert_eq!(text(&b), "abcde");
        b.append_repeat(&['x', 'y'], 2);
        b.prepend_repeat(&['-'], 3);
        assert_eq!(text(&b), "---abcdexyxy");
    }

    #[test]
    fn insert_at_every_position() {
        for shift in [InsertShift::Left, InsertShift::Shorter] {
            for index in 0..=5 {
                let mut b = with_shift(shift, "abcde");
                b.insert(index, &['X', 'Y']).unwrap();
                let mut expected: Vec<char> = "abcde".chars().collect();
                expected.splice(index..index, ['X', 'Y']);
                assert_eq!(b.to_vec(), expected, "shift {shift:?} index {index}");
            }
        }
    }

    #[test]
    fn insert_repeat_grows_storage() {
        let mut b = chars("ab");
        b.insert_repeat(1, &['-'], 100).unwrap();
        assert_eq!(b.len(), 102);
        assert_eq!(b[0], 'a');
        assert_eq!(b[101], 'b');
        assert!(b.iter().skip(1).take(100).all(|&c| c == '-'));
    }

    #[test]
    fn insert_past_end_rejected_without_mutation() {
        let mut b = chars("abc");
        let err = b.insert(4, &['x']).unwrap_err();
        assert_eq!(err, BuilderError::IndexOutOfRange { index: 4, len: 3 });
        assert_eq!(text(&b), "abc");
    }

    #[test]
    fn left_shift_always_moves_prefix() {
        let mut b = with_shift(InsertShift::Left, "abcd");
        let back = b.back_capacity();
        b.insert(3, &['X']).unwrap();
        assert_eq!(text(&b), "abcXd");
        assert_eq!(b.back_capacity(), back);
    }

    #[test]
    fn shorter_shift_moves_suffix_near_end() {
        let mut b = with_shift(InsertShift::Shorter, "abcd");
        let front = b.front_capacity();
        b.insert(3, &['X']).unwrap();
        assert_eq!(text(&b), "abcXd");
        assert_eq!(b.front_capacity(), front);
    }

    #[test]
    fn remove_from_either_side() {
        let mut b = chars("abcdefgh");
        b.remove(1, 2).unwrap();
        assert_eq!(text(&b), "adefgh");
        b.remove(3, 2).unwrap();
        assert_eq!(text(&b), "adeh");
    }

    #[test]
    fn remove_clears_vacated_slots() {
        let mut b: Builder<String> = ["a", "b", "c", "d"].iter().map(|s| s.to_string()).collect();
        b.remove(0, 1).unwrap();
        b.remove(2, 1).unwrap();
        assert_eq!(b.to_vec(), vec!["b".to_string(), "c".to_string()]);
        let (head, tail) = (b.head, b.tail);
        assert!(b.storage[..head].iter().all(String::is_empty));
        assert!(b.storage[tail..].iter().all(String::is_empty));
    }

    #[test]
    fn remove_boundaries() {
        let mut b = chars("abc");
        b.remove(3, 0).unwrap();
        assert_eq!(text(&b), "abc");
        b.remove(0, 3).unwrap();
        assert!(b.is_empty());
    }

    #[test]
    fn remove_out_of_range_rejected() {
        let mut b = chars("abc");
        assert_eq!(
            b.remove(2, 2),
            Err(BuilderError::RangeOutOfBounds {
                start: 2,
                count: 2,
                len: 3
            })
        );
        assert_eq!(text(&b), "abc");
    }

    #[test]
    fn clear_recenters() {
        let mut b = chars("abcdef");
        b.clear();
        assert!(b.is_empty());
        assert_eq!(b.front_capacity(), b.capacity() / 2);
    }

    #[test]
    fn truncate_shortens() {
        let mut b = chars("abcdef");
        b.truncate(10);
        assert_eq!(b.len(), 6);
        b.truncate(2);
        assert_eq!(text(&b), "ab");
    }

    #[test]
    fn copy_handles_overlap_both_directions() {
        let mut b = chars("abcdef");
        b.copy(0, 2, 3).unwrap();
        assert_eq!(text(&b), "ababcf");

        let mut b = chars("abcdef");
        b.copy(2, 0, 3).unwrap();
        assert_eq!(text(&b), "cdedef");
    }

    #[test]
    fn copy_rejects_target_overrun() {
        let mut b = chars("abcdef");
        assert!(b.copy(0, 4, 3).is_err());
        assert!(b.copy(5, 0, 2).is_err());
        assert_eq!(text(&b), "abcdef");
    }

    #[test]
    fn swap_and_reverse() {
        let mut b = chars("abcde");
        b.swap(0, 4).unwrap();
        assert_eq!(text(&b), "ebcda");
        b.swap(2, 2).unwrap();
        assert!(b.swap(0, 5).is_err());
        b.reverse();
        assert_eq!(text(&b), "adcbe");
        b.reverse_range(1, 3).unwrap();
        assert_eq!(text(&b), "abcde");
        assert!(b.reverse_range(3, 1).is_err());
        assert!(b.reverse_range(0, 5).is_err());
    }

    #[test]
    fn splice_grows_shrinks_and_overwrites() {
        let mut b = chars("hello world");
        b.splice(0, 5, &['b', 'y', 'e']).unwrap();
        assert_eq!(text(&b), "bye world");
        b.splice(4, 5, &['t', 'h', 'e', 'r', 'e', '!']).unwrap();
        assert_eq!(text(&b), "bye there!");
        b.splice(3, 0, &[',']).unwrap();
        assert_eq!(text(&b), "bye, there!");
        assert!(b.splice(10, 2, &[]).is_err());
    }
}
