//! Reference implementations of the bulk transformers over plain slices.
//!
//! These are written for obviousness, not speed: each one builds a fresh
//! `Vec` in a single forward pass. Property tests compare the in-place
//! builder algorithms against them.

/// Collect a string's characters.
pub fn chars(s: &str) -> Vec<char> {
    s.chars().collect()
}

/// `sep` before every `interval`-th element counted from the right,
/// never before position 0.
pub fn insert_every<T: Clone>(items: &[T], sep: &[T], interval: usize) -> Vec<T> {
    assert!(interval > 0);
    let len = items.len();
    let mut out = Vec::with_capacity(len);
    for (i, item) in items.iter().enumerate() {
        if i > 0 && (len - i) % interval == 0 {
            out.extend_from_slice(sep);
        }
        out.push(item.clone());
    }
    out
}

/// Drop one element every `interval` positions counted from the right,
/// never position 0.
pub fn remove_every<T: Clone>(items: &[T], interval: usize) -> Vec<T> {
    assert!(interval > 0);
    let len = items.len();
    items
        .iter()
        .enumerate()
        .filter(|(i, _)| *i == 0 || (len - 1 - i) % (interval + 1) != interval)
        .map(|(_, item)| item.clone())
        .collect()
}

/// Runs capped at `max_run`; with a non-empty `set` a run is adjacent set
/// members, otherwise adjacent equal elements.
pub fn normalize_adjacent<T: Clone + PartialEq>(items: &[T], max_run: usize, set: &[T]) -> Vec<T> {
    assert!(max_run > 0);
    let mut out: Vec<T> = Vec::with_capacity(items.len());
    let mut run = 0;
    for item in items {
        let continues = match out.last() {
            None => false,
            Some(prev) if set.is_empty() => prev == item,
            Some(prev) => set.contains(prev) && set.contains(item),
        };
        run = if continues { run + 1 } else { 1 };
        if run <= max_run {
            out.push(item.clone());
        }
    }
    out
}

/// Maximal matching runs become one `replacement`; leading and trailing
/// runs disappear.
pub fn normalize_all<T: Clone>(
    items: &[T],
    replacement: T,
    mut pred: impl FnMut(&T) -> bool,
) -> Vec<T> {
    let mut out = Vec::with_capacity(items.len());
    let mut pending = false;
    for item in items {
        if pred(item) {
            pending = !out.is_empty();
            continue;
        }
        if pending {
            out.push(replacement.clone());
            pending = false;
        }
        out.push(item.clone());
    }
    out
}

/// Each element matching `set` (every element, if empty) followed by
/// `count` copies of itself.
pub fn duplicate<T: Clone + PartialEq>(items: &[T], set: &[T], count: usize) -> Vec<T> {
    let mut out = Vec::new();
    for item in items {
        out.push(item.clone());
        if set.is_empty() || set.contains(item) {
            out.extend(std::iter::repeat(item.clone()).take(count));
        }
    }
    out
}
