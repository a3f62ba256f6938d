//! Read-only matching over the live region.

use crate::builder::Builder;
use crate::comparer::{slices_equal, Comparer, DefaultComparer};

impl<T: Default> Builder<T> {
    /// Whether any element equals `value`.
    pub fn contains(&self, value: &T) -> bool
    where
        T: PartialEq,
    {
        self.contains_by(value, &DefaultComparer)
    }

    /// [`contains`](Self::contains) with a custom comparer.
    pub fn contains_by<C: Comparer<T> + ?Sized>(&self, value: &T, cmp: &C) -> bool {
        self.iter().any(|v| cmp.equals(v, value))
    }

    /// Logical index of the first occurrence of `seq`. An empty `seq`
    /// matches at 0.
    pub fn index_of(&self, seq: &[T]) -> Option<usize>
    where
        T: PartialEq,
    {
        self.index_of_by(seq, &DefaultComparer)
    }

    /// [`index_of`](Self::index_of) with a custom comparer.
    pub fn index_of_by<C: Comparer<T> + ?Sized>(&self, seq: &[T], cmp: &C) -> Option<usize> {
        if seq.is_empty() {
            return Some(0);
        }
        self.as_slice()
            .windows(seq.len())
            .position(|window| slices_equal(window, seq, cmp))
    }

    /// Whether the content begins with `seq`.
    pub fn starts_with(&self, seq: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.starts_with_by(seq, &DefaultComparer)
    }

    /// [`starts_with`](Self::starts_with) with a custom comparer.
    pub fn starts_with_by<C: Comparer<T> + ?Sized>(&self, seq: &[T], cmp: &C) -> bool {
        self.as_slice()
            .get(..seq.len())
            .is_some_and(|head| slices_equal(head, seq, cmp))
    }

    /// Whether the content ends with `seq`.
    pub fn ends_with(&self, seq: &[T]) -> bool
    where
        T: PartialEq,
    {
        self.ends_with_by(seq, &DefaultComparer)
    }

    /// [`ends_with`](Self::ends_with) with a custom comparer.
    pub fn ends_with_by<C: Comparer<T> + ?Sized>(&self, seq: &[T], cmp: &C) -> bool {
        let live = self.as_slice();
        live.len()
            .checked_sub(seq.len())
            .is_some_and(|start| slices_equal(&live[start..], seq, cmp))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::comparer::IgnoreAsciiCase;

    fn chars(s: &str) -> Builder<char> {
        s.chars().collect()
    }

    fn seq(s: &str) -> Vec<char> {
        s.chars().collect()
    }

    #[test]
    fn contains_value() {
        let b = chars("hello");
        assert!(b.contains(&'l'));
        assert!(!b.contains(&'L'));
        assert!(b.contains_by(&'L', &IgnoreAsciiCase));
    }

    #[test]
    fn index_of_finds_first_occurrence() {
        let b = chars("abcabc");
        assert_eq!(b.index_of(&seq("bc")), Some(1));
        assert_eq!(b.index_of(&seq("cd")), None);
        assert_eq!(b.index_of(&[]), Some(0));
        assert_eq!(b.index_of(&seq("abcabcx")), None);
        assert_eq!(b.index_of_by(&seq("CA"), &IgnoreAsciiCase), Some(2));
    }

    #[test]
    fn prefix_and_suffix() {
        let b = chars("prefix-body-suffix");
        assert!(b.starts_with(&seq("prefix")));
        assert!(!b.starts_with(&seq("body")));
        assert!(b.ends_with(&seq("suffix")));
        assert!(b.ends_with(&[]));
        assert!(!b.ends_with(&seq("x-prefix-body-suffix")));
        assert!(b.starts_with_by(&seq("PRE"), &IgnoreAsciiCase));
        assert!(b.ends_with_by(&seq("FIX"), &IgnoreAsciiCase));
    }

    #[test]
    fn empty_builder_matches_only_empty() {
        let b = chars("");
        assert!(b.starts_with(&[]));
        assert!(!b.starts_with(&['a']));
        assert_eq!(b.index_of(&['a']), None);
    }
}
