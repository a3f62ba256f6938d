//! Padding to a width and trimming at either end.

use crate::builder::Builder;
use crate::comparer::{Comparer, DefaultComparer};
use crate::edit::fill_cycled;
use crate::error::BuilderError;

/// Which side receives the extra element when [`Builder::pad_even`] has an
/// odd amount of padding to split.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum PadBias {
    /// The left side gets the larger half.
    #[default]
    Left,
    /// The right side gets the larger half.
    Right,
}

fn check_pattern<T>(name: &'static str, pattern: &[T], needed: usize) -> Result<(), BuilderError> {
    if needed > 0 && pattern.is_empty() {
        return Err(BuilderError::invalid(name, "must not be empty when padding is needed"));
    }
    Ok(())
}

impl<T: Clone + Default> Builder<T> {
    /// Grow to `width` by prepending `pattern` cycled from its first
    /// element. Returns the number of elements added.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if padding is needed and
    /// `pattern` is empty.
    pub fn pad_left(&mut self, width: usize, pattern: &[T]) -> Result<usize, BuilderError> {
        let needed = width.saturating_sub(self.len());
        check_pattern("pattern", pattern, needed)?;
        self.fill_front(needed, pattern);
        Ok(needed)
    }

    /// Grow to `width` by appending `pattern` cycled from its first
    /// element. Returns the number of elements added.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if padding is needed and
    /// `pattern` is empty.
    pub fn pad_right(&mut self, width: usize, pattern: &[T]) -> Result<usize, BuilderError> {
        let needed = width.saturating_sub(self.len());
        check_pattern("pattern", pattern, needed)?;
        self.fill_back(needed, pattern);
        Ok(needed)
    }

    /// Grow to `width` by padding both sides, centering the content.
    ///
    /// An odd amount of padding gives the extra element to the side named
    /// by `bias`: `"ab"` padded to 7 with [`PadBias::Left`] becomes
    /// `"---ab--"`. Returns the total number of elements added.
    ///
    /// # Errors
    ///
    /// Returns [`BuilderError::InvalidArgument`] if a side needs padding and
    /// its pattern is empty. Nothing is modified in that case.
    pub fn pad_even(
        &mut self,
        width: usize,
        left_pattern: &[T],
        right_pattern: &[T],
        bias: PadBias,
    ) -> Result<usize, BuilderError> {
        let needed = width.saturating_sub(self.len());
        let (left, right) = match bias {
            PadBias::Left => (needed - needed / 2, needed / 2),
            PadBias::Right => (needed / 2, needed - needed / 2),
        };
        check_pattern("left_pattern", left_pattern, left)?;
        check_pattern("right_pattern", right_pattern, right)?;

        self.ensure_prepend(left);
        self.ensure_append(right);
        self.fill_front(left, left_pattern);
        self.fill_back(right, right_pattern);
        Ok(needed)
    }

    fn fill_front(&mut self, count: usize, pattern: &[T]) {
        if count == 0 {
            return;
        }
        self.ensure_prepend(count);
        let start = self.head - count;
        fill_cycled(&mut self.storage[start..self.head], pattern);
        self.head = start;
    }

    fn fill_back(&mut self, count: usize, pattern: &[T]) {
        if count == 0 {
            return;
        }
        self.ensure_append(count);
        let end = self.tail + count;
        fill_cycled(&mut self.storage[self.tail..end], pattern);
        self.tail = end;
    }
}

impl<T: Default> Builder<T> {
    /// Drop leading elements while `predicate` holds. Returns how many.
    pub fn trim_left_matches<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let start = self.head;
        while self.head < self.tail && predicate(&self.storage[self.head]) {
            self.storage[self.head] = T::default();
            self.head += 1;
        }
        self.head - start
    }

    /// Drop trailing elements while `predicate` holds. Returns how many.
    pub fn trim_right_matches<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        let end = self.tail;
        while self.tail > self.head && predicate(&self.storage[self.tail - 1]) {
            self.tail -= 1;
            self.storage[self.tail] = T::default();
        }
        end - self.tail
    }

    /// Drop elements matching `predicate` from both ends.
    pub fn trim_matches<P>(&mut self, mut predicate: P) -> usize
    where
        P: FnMut(&T) -> bool,
    {
        self.trim_left_matches(&mut predicate) + self.trim_right_matches(predicate)
    }

    /// Drop leading copies of `value`.
    pub fn trim_left(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.trim_left_by(value, &DefaultComparer)
    }

    /// Drop trailing copies of `value`.
    pub fn trim_right(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.trim_right_by(value, &DefaultComparer)
    }

    /// Drop copies of `value` from both ends.
    pub fn trim(&mut self, value: &T) -> usize
    where
        T: PartialEq,
    {
        self.trim_by(value, &DefaultComparer)
    }

    /// [`trim_left`](Self::trim_left) with a custom comparer.
    pub fn trim_left_by<C: Comparer<T> + ?Sized>(&mut self, value: &T, cmp: &C) -> usize {
        self.trim_left_matches(|v| cmp.equals(v, value))
    }

    /// [`trim_right`](Self::trim_right) with a custom comparer.
    pub fn trim_right_by<C: Comparer<T> + ?Sized>(&mut self, value: &T, cmp: &C) -> usize {
        self.trim_right_matches(|v| cmp.equals(v, value))
    }

    /// [`trim`](Self::trim) with a custom comparer.
    pub fn trim_by<C: Comparer<T> + ?Sized>(&mut self, value: &T, cmp: &C) -> usize {
        self.trim_matches(|v| cmp.equals(v, value))
    }
}
