//! Bulk transformer vocabulary and its `Vec` model.
//!
//! Values are drawn from a small alphabet so that match sets, runs and
//! keys actually hit.

use proptest::prelude::*;

use crate::{fixtures, Seq};

/// One whole-buffer transformation. [`Bulk::ReplaceIfEqualAt`] carries a
/// raw offset; call [`Bulk::resolve`] before applying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Bulk {
    Duplicate { only: Option<u8>, count: usize },
    InsertEvery { seq: Seq, interval: usize },
    RemoveEvery { interval: usize },
    NormalizeAdjacent { max_run: usize, use_set: bool },
    NormalizeAll { target: u8, replacement: u8 },
    ReplaceAll { target: u8, with: Seq },
    ReplaceIfEqualAt { offset: usize, key: Seq, value: Seq },
    PadLeft { width: usize, pattern: Seq },
    PadRight { width: usize, pattern: Seq },
    PadEven { width: usize, left: Seq, right: Seq, left_bias: bool },
    Repeat { count: usize },
    Trim(u8),
    RemoveAll(u8),
}

/// Match set used by [`Bulk::NormalizeAdjacent`] when `use_set` is on.
pub const RUN_SET: [u8; 2] = [0, 1];

impl Bulk {
    /// Fold raw positions into the valid range for a builder of `len`.
    pub fn resolve(&self, len: usize) -> Bulk {
        match self {
            Bulk::ReplaceIfEqualAt { offset, key, value } => Bulk::ReplaceIfEqualAt {
                offset: offset % (len + 1),
                key: key.clone(),
                value: value.clone(),
            },
            other => other.clone(),
        }
    }

    /// Whether the result can be a multiple of the input length.
    pub fn multiplies(&self) -> bool {
        matches!(
            self,
            Bulk::Duplicate { .. }
                | Bulk::InsertEvery { .. }
                | Bulk::ReplaceAll { .. }
                | Bulk::Repeat { .. }
        )
    }

    pub fn run_set(use_set: bool) -> &'static [u8] {
        if use_set {
            &RUN_SET
        } else {
            &[]
        }
    }
}

/// Apply a resolved transformation to the `Vec` model.
pub fn apply_bulk(model: &mut Vec<u8>, op: &Bulk) {
    match op {
        Bulk::Duplicate { only, count } => {
            let set: Vec<u8> = only.iter().copied().collect();
            *model = fixtures::duplicate(model, &set, *count);
        }
        Bulk::InsertEvery { seq, interval } => {
            *model = fixtures::insert_every(model, seq, *interval);
        }
        Bulk::RemoveEvery { interval } => {
            *model = fixtures::remove_every(model, *interval);
        }
        Bulk::NormalizeAdjacent { max_run, use_set } => {
            *model = fixtures::normalize_adjacent(model, *max_run, Bulk::run_set(*use_set));
        }
        Bulk::NormalizeAll { target, replacement } => {
            *model = fixtures::normalize_all(model, *replacement, |v| v == target);
        }
        Bulk::ReplaceAll { target, with } => {
            *model = model
                .iter()
                .flat_map(|v| if v == target { with.to_vec() } else { vec![*v] })
                .collect();
        }
        Bulk::ReplaceIfEqualAt { offset, key, value } => {
            let end = offset + key.len();
            if model.get(*offset..end) == Some(&key[..]) {
                model.splice(*offset..end, value.iter().copied());
            }
        }
        Bulk::PadLeft { width, pattern } => {
            let needed = width.saturating_sub(model.len());
            model.splice(0..0, pattern.iter().copied().cycle().take(needed));
        }
        Bulk::PadRight { width, pattern } => {
            let needed = width.saturating_sub(model.len());
            model.extend(pattern.iter().copied().cycle().take(needed));
        }
        Bulk::PadEven { width, left, right, left_bias } => {
            let needed = width.saturating_sub(model.len());
            let (front, back) = if *left_bias {
                (needed - needed / 2, needed / 2)
            } else {
                (needed / 2, needed - needed / 2)
            };
            model.splice(0..0, left.iter().copied().cycle().take(front));
            model.extend(right.iter().copied().cycle().take(back));
        }
        Bulk::Repeat { count } => *model = model.repeat(*count),
        Bulk::Trim(value) => {
            let start = model.iter().position(|v| v != value).unwrap_or(model.len());
            let end = model.iter().rposition(|v| v != value).map_or(start, |i| i + 1);
            *model = model[start..end].to_vec();
        }
        Bulk::RemoveAll(value) => model.retain(|v| v != value),
    }
}

fn small() -> impl Strategy<Value = u8> {
    0u8..4
}

fn small_seq(min: usize) -> impl Strategy<Value = Seq> {
    prop::collection::vec(small(), min..4).prop_map(Seq::from_vec)
}

/// Strategy over single bulk transformations.
pub fn bulk() -> impl Strategy<Value = Bulk> {
    prop_oneof![
        (prop::option::of(small()), 0usize..3)
            .prop_map(|(only, count)| Bulk::Duplicate { only, count }),
        (small_seq(0), 1usize..6).prop_map(|(seq, interval)| Bulk::InsertEvery { seq, interval }),
        (1usize..6).prop_map(|interval| Bulk::RemoveEvery { interval }),
        (1usize..4, any::<bool>())
            .prop_map(|(max_run, use_set)| Bulk::NormalizeAdjacent { max_run, use_set }),
        (small(), small())
            .prop_map(|(target, replacement)| Bulk::NormalizeAll { target, replacement }),
        (small(), small_seq(0)).prop_map(|(target, with)| Bulk::ReplaceAll { target, with }),
        (any::<usize>(), small_seq(1), small_seq(0))
            .prop_map(|(offset, key, value)| Bulk::ReplaceIfEqualAt { offset, key, value }),
        (0usize..80, small_seq(1)).prop_map(|(width, pattern)| Bulk::PadLeft { width, pattern }),
        (0usize..80, small_seq(1)).prop_map(|(width, pattern)| Bulk::PadRight { width, pattern }),
        (0usize..80, small_seq(1), small_seq(1), any::<bool>()).prop_map(
            |(width, left, right, left_bias)| Bulk::PadEven { width, left, right, left_bias }
        ),
        (1usize..4).prop_map(|count| Bulk::Repeat { count }),
        small().prop_map(Bulk::Trim),
        small().prop_map(Bulk::RemoveAll),
    ]
}

/// Strategy over transformation sequences of up to `max` steps.
pub fn bulks(max: usize) -> impl Strategy<Value = Vec<Bulk>> {
    prop::collection::vec(bulk(), 0..max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn model_pads_and_trims() {
        let mut model = vec![0, 2, 0];
        apply_bulk(&mut model, &Bulk::Trim(0));
        assert_eq!(model, vec![2]);
        let left = Seq::from_slice(&[1]);
        let right = Seq::from_slice(&[3]);
        apply_bulk(
            &mut model,
            &Bulk::PadEven { width: 4, left, right, left_bias: true },
        );
        assert_eq!(model, vec![1, 1, 2, 3]);
    }

    #[test]
    fn model_replaces_only_on_match() {
        let key = Seq::from_slice(&[1, 2]);
        let value = Seq::from_slice(&[9]);
        let mut model = vec![1, 2, 1, 2];
        let op = Bulk::ReplaceIfEqualAt { offset: 7, key, value };
        // 7 % 5 = 2
        apply_bulk(&mut model, &op.resolve(4));
        assert_eq!(model, vec![1, 2, 9]);
    }
}
