//! Test utilities for deckbuf development.
//!
//! Provides a random edit-operation vocabulary ([`Op`]) with proptest
//! strategies, and a `Vec` reference model ([`apply`]) that the builder is
//! checked against. Reference versions of the bulk transformers live in
//! [`fixtures`]; [`Bulk`] drives them as a second operation vocabulary.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

mod bulk;
pub mod fixtures;

pub use bulk::{apply_bulk, bulk, bulks, Bulk, RUN_SET};

use proptest::prelude::*;
use smallvec::SmallVec;

/// Inline payload for sequence-carrying operations.
pub type Seq = SmallVec<[u8; 8]>;

/// One positional edit. Raw positions are arbitrary; call
/// [`Op::resolve`] against the current length before applying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Op {
    PushBack(u8),
    PushFront(u8),
    PopBack,
    PopFront,
    Append(Seq),
    Prepend(Seq),
    Insert { index: usize, seq: Seq },
    Remove { start: usize, count: usize },
    Splice { start: usize, count: usize, seq: Seq },
    Truncate(usize),
    Reverse,
    Clear,
    /// Capacity-only: reserve room on both ends. No visible effect.
    Reserve { front: usize, back: usize },
    /// Capacity-only: move into the smallest fitting block.
    ShrinkToFit,
}

impl Op {
    /// Fold raw positions into the valid range for a builder of `len`.
    pub fn resolve(&self, len: usize) -> Op {
        match self {
            Op::Insert { index, seq } => Op::Insert {
                index: index % (len + 1),
                seq: seq.clone(),
            },
            Op::Remove { start, count } => {
                let start = start % (len + 1);
                Op::Remove {
                    start,
                    count: count % (len - start + 1),
                }
            }
            Op::Splice { start, count, seq } => {
                let start = start % (len + 1);
                Op::Splice {
                    start,
                    count: count % (len - start + 1),
                    seq: seq.clone(),
                }
            }
            Op::Truncate(to) => Op::Truncate(to % (len + 1)),
            other => other.clone(),
        }
    }
}

/// Apply a resolved operation to the `Vec` model.
pub fn apply(model: &mut Vec<u8>, op: &Op) {
    match op {
        Op::PushBack(v) => model.push(*v),
        Op::PushFront(v) => model.insert(0, *v),
        Op::PopBack => {
            model.pop();
        }
        Op::PopFront => {
            if !model.is_empty() {
                model.remove(0);
            }
        }
        Op::Append(seq) => model.extend_from_slice(seq),
        Op::Prepend(seq) => {
            model.splice(0..0, seq.iter().copied());
        }
        Op::Insert { index, seq } => {
            model.splice(*index..*index, seq.iter().copied());
        }
        Op::Remove { start, count } => {
            model.drain(*start..*start + *count);
        }
        Op::Splice { start, count, seq } => {
            model.splice(*start..*start + *count, seq.iter().copied());
        }
        Op::Truncate(to) => model.truncate(*to),
        Op::Reverse => model.reverse(),
        Op::Clear => model.clear(),
        Op::Reserve { .. } | Op::ShrinkToFit => {}
    }
}

fn seq() -> impl Strategy<Value = Seq> {
    prop::collection::vec(any::<u8>(), 0..8).prop_map(Seq::from_vec)
}

/// Strategy over single operations, weighted towards growth.
pub fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        3 => any::<u8>().prop_map(Op::PushBack),
        3 => any::<u8>().prop_map(Op::PushFront),
        1 => Just(Op::PopBack),
        1 => Just(Op::PopFront),
        2 => seq().prop_map(Op::Append),
        2 => seq().prop_map(Op::Prepend),
        3 => (any::<usize>(), seq()).prop_map(|(index, seq)| Op::Insert { index, seq }),
        2 => (any::<usize>(), any::<usize>())
            .prop_map(|(start, count)| Op::Remove { start, count }),
        1 => (any::<usize>(), any::<usize>(), seq())
            .prop_map(|(start, count, seq)| Op::Splice { start, count, seq }),
        1 => any::<usize>().prop_map(Op::Truncate),
        1 => Just(Op::Reverse),
        1 => Just(Op::Clear),
        1 => (0usize..40, 0usize..40).prop_map(|(front, back)| Op::Reserve { front, back }),
        1 => Just(Op::ShrinkToFit),
    ]
}

/// Strategy over operation sequences of up to `max` steps.
pub fn ops(max: usize) -> impl Strategy<Value = Vec<Op>> {
    prop::collection::vec(op(), 0..max)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolve_clamps_into_range() {
        let op = Op::Remove { start: 7, count: 9 }.resolve(4);
        // start 7 % 5 = 2, count 9 % 3 = 0
        assert_eq!(op, Op::Remove { start: 2, count: 0 });

        let op = Op::Insert { index: 10, seq: Seq::new() }.resolve(0);
        assert_eq!(op, Op::Insert { index: 0, seq: Seq::new() });
    }

    #[test]
    fn model_applies_edits() {
        let mut model = vec![1, 2, 3];
        apply(&mut model, &Op::Insert { index: 1, seq: Seq::from_slice(&[9, 9]) });
        apply(&mut model, &Op::Remove { start: 0, count: 1 });
        apply(&mut model, &Op::PushFront(0));
        assert_eq!(model, vec![0, 9, 9, 2, 3]);
    }
}
