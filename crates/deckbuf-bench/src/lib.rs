//! Benchmark workloads for deckbuf.
//!
//! Deterministic inputs shared by the criterion benches:
//!
//! - [`digits`]: a run of ASCII digits, the input for grouping benches
//! - [`ragged_text`]: words separated by irregular whitespace runs
//! - [`seeded_builder`]: a `Builder<char>` seeded from a string

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use deckbuf_core::Builder;

/// `len` ASCII digits cycling `0..=9`.
pub fn digits(len: usize) -> String {
    (0..len).map(|i| char::from(b'0' + (i % 10) as u8)).collect()
}

/// `words` short words joined by whitespace runs of 1 to 4 characters,
/// with leading and trailing runs. The mix of spaces, tabs and newlines is
/// derived from `seed` with a simple multiplicative hash.
pub fn ragged_text(words: usize, seed: u64) -> String {
    const WHITESPACE: [char; 3] = [' ', '\t', '\n'];
    let mut out = String::new();
    let mut state = seed;
    for w in 0..=words {
        state = state
            .wrapping_mul(6364136223846793005)
            .wrapping_add(1442695040888963407);
        let run = 1 + (state >> 60) as usize % 4;
        for k in 0..run {
            out.push(WHITESPACE[(state >> (8 * k)) as usize % WHITESPACE.len()]);
        }
        if w < words {
            out.push_str("word");
        }
    }
    out
}

/// A builder on the shared pool holding `s`.
pub fn seeded_builder(s: &str) -> Builder<char> {
    Builder::from(s)
}
