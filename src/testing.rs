// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Test utilities shared across unit, integration, and property tests.
//!
//! Always compiled, hidden from documentation. Canonical fixture builders
//! live here so unit tests, `tests/`, and proptest strategies all exercise
//! the same word lists and store shapes instead of each reinventing one.

#![doc(hidden)]

use crate::builder::Builder;
use crate::case::CaseFold;
use crate::store::Store;

/// A small, deliberately typo-adjacent word list: several pairs are one edit
/// apart from each other, which is what makes it useful for fuzzy-search
/// tests (it exercises near-miss collisions, not just isolated matches).
pub const SAMPLE_WORDS: &[&str] =
    &["cat", "cats", "car", "cart", "dog", "dogs", "do", "done", "kitten", "sitting", "form", "from", "hello", "help"];

/// Build a `Store<usize>` from `SAMPLE_WORDS`, mapping each word to its index.
pub fn sample_store(case: CaseFold) -> Store<usize> {
    let mut builder: Builder<usize> = Builder::new(case);
    for (i, word) in SAMPLE_WORDS.iter().enumerate() {
        builder.insert(word, i);
    }
    builder.build().expect("SAMPLE_WORDS contains no duplicates under either case policy")
}

/// Build a `Store<String>` from an arbitrary list of words, each mapped to
/// itself - convenient when a test wants to assert on the matched word
/// directly rather than an opaque index.
pub fn store_of_words(words: &[&str], case: CaseFold) -> Store<String> {
    let mut builder: Builder<String> = Builder::new(case);
    for word in words {
        builder.insert(word, (*word).to_string());
    }
    builder.build().expect("caller-provided word list must not contain fold-collisions")
}

/// Apply a single edit (substitution, deletion, insertion, or adjacent
/// transposition) to `s` at a deterministic position derived from `seed`, so
/// property tests can generate "one edit away" inputs without pulling in a
/// second RNG dependency.
pub fn mutate_one_edit(s: &str, seed: usize) -> String {
    let chars: Vec<char> = s.chars().collect();
    if chars.is_empty() {
        return "x".to_string();
    }
    let i = seed % chars.len();
    match seed % 4 {
        0 => {
            // substitution
            let mut out = chars.clone();
            out[i] = if out[i] == 'x' { 'y' } else { 'x' };
            out.into_iter().collect()
        }
        1 => {
            // deletion
            let mut out = chars.clone();
            out.remove(i);
            out.into_iter().collect()
        }
        2 => {
            // insertion
            let mut out = chars.clone();
            out.insert(i, 'q');
            out.into_iter().collect()
        }
        _ => {
            // adjacent transposition
            let mut out = chars.clone();
            if out.len() >= 2 {
                let j = if i + 1 < out.len() { i + 1 } else { i - 1 };
                out.swap(i, j);
            }
            out.into_iter().collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sample_store_contains_every_word() {
        let store = sample_store(CaseFold::Sensitive);
        for (i, word) in SAMPLE_WORDS.iter().enumerate() {
            assert_eq!(store.try_get(word).copied(), Some(i));
        }
    }

    #[test]
    fn mutate_one_edit_changes_the_string() {
        for seed in 0..8 {
            let mutated = mutate_one_edit("kitten", seed);
            assert_ne!(mutated, "kitten");
        }
    }
}
