//! Injectable element equality for the bulk transformers.
//!
//! Every transformer that matches elements comes in two forms: a plain one
//! using [`DefaultComparer`] (`PartialEq`), and a `_by` form that takes any
//! [`Comparer`]. Closures of shape `Fn(&T, &T) -> bool` are comparers too.

/// Equality strategy over `T`.
///
/// Implementations should behave like an equivalence relation; run
/// detection in [`Builder::normalize_adjacent_by`](crate::Builder::normalize_adjacent_by)
/// compares each element with the last one kept.
pub trait Comparer<T: ?Sized> {
    /// Whether `a` and `b` are considered equal.
    fn equals(&self, a: &T, b: &T) -> bool;
}

/// Structural equality via `PartialEq`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DefaultComparer;

impl<T: PartialEq + ?Sized> Comparer<T> for DefaultComparer {
    fn equals(&self, a: &T, b: &T) -> bool {
        a == b
    }
}

/// ASCII case-insensitive equality for `char` and `u8`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct IgnoreAsciiCase;

impl Comparer<char> for IgnoreAsciiCase {
    fn equals(&self, a: &char, b: &char) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}

impl Comparer<u8> for IgnoreAsciiCase {
    fn equals(&self, a: &u8, b: &u8) -> bool {
        a.eq_ignore_ascii_case(b)
    }
}

impl<T, F> Comparer<T> for F
where
    F: Fn(&T, &T) -> bool,
{
    fn equals(&self, a: &T, b: &T) -> bool {
        self(a, b)
    }
}

/// Whether `value` equals any member of `set` under `cmp`.
pub(crate) fn in_set<T, C: Comparer<T> + ?Sized>(set: &[T], value: &T, cmp: &C) -> bool {
    set.iter().any(|member| cmp.equals(member, value))
}

/// Element-wise equality of two equally long slices under `cmp`.
pub(crate) fn slices_equal<T, C: Comparer<T> + ?Sized>(a: &[T], b: &[T], cmp: &C) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| cmp.equals(x, y))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_comparer_uses_partial_eq() {
        assert!(DefaultComparer.equals(&1, &1));
        assert!(!DefaultComparer.equals(&1, &2));
        assert!(DefaultComparer.equals("ab", "ab"));
    }

    #[test]
    fn ignore_ascii_case_for_chars_and_bytes() {
        assert!(IgnoreAsciiCase.equals(&'a', &'A'));
        assert!(!IgnoreAsciiCase.equals(&'a', &'b'));
        assert!(IgnoreAsciiCase.equals(&b'Z', &b'z'));
    }

    #[test]
    fn closures_are_comparers() {
        let same_parity = |a: &i32, b: &i32| a % 2 == b % 2;
        assert!(same_parity.equals(&2, &4));
        assert!(!same_parity.equals(&2, &3));
    }

    #[test]
    fn in_set_checks_membership() {
        assert!(in_set(&[' ', '\t'], &'\t', &DefaultComparer));
        assert!(!in_set(&[' ', '\t'], &'x', &DefaultComparer));
        assert!(!in_set(&[], &'x', &DefaultComparer));
    }

    #[test]
    fn slices_equal_requires_same_length() {
        assert!(slices_equal(&['a', 'B'], &['A', 'b'], &IgnoreAsciiCase));
        assert!(!slices_equal(&['a'], &['a', 'b'], &DefaultComparer));
    }
}
