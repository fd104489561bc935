// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! An in-memory fuzzy string index: a compact immutable trie walked in
//! lockstep with a Levenshtein automaton.
//!
//! Two halves, each usable on its own:
//!
//! - [`automaton`] and [`levenshtein_dfa`] implement the matcher: given a
//!   query, a distance bound, a metric, and a case policy, they produce
//!   something that can be driven one character at a time and asked "have I
//!   matched yet, and at what distance?" without ever materializing the
//!   edit-distance table for a specific candidate string.
//! - [`store`] and [`builder`] implement the trie: a flat, pointer-free
//!   arena that an automaton can walk character by character, pruning whole
//!   subtrees the moment the automaton reports no viable continuation.
//!
//! [`factory::Factory`] ties them together, memoizing the expensive,
//! query-independent part of the table-driven automaton backend. Most
//! callers just want [`Store::search_fuzzy`].
//!
//! ```
//! use levenshtrie::{Builder, CaseFold, Metric};
//!
//! let mut builder = Builder::new(CaseFold::Sensitive);
//! builder.insert("kitten", 1u32);
//! builder.insert("sitting", 2u32);
//! let store = builder.build().unwrap();
//!
//! let results = store.search_fuzzy("kitten", 2, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
//! assert_eq!(results, vec![(0, 1)]);
//! ```

pub mod automaton;
pub mod builder;
pub mod case;
pub mod contracts;
pub mod error;
pub mod factory;
pub mod fuzzy;
pub mod levenshtein_dfa;
pub mod metric;
pub mod store;

#[doc(hidden)]
pub mod testing;

pub use automaton::{Automaton, FuzzyAutomaton, FuzzyState};
pub use builder::Builder;
pub use case::CaseFold;
pub use error::{Error, Result};
pub use factory::Factory;
pub use fuzzy::levenshtein_within;
pub use metric::Metric;
pub use store::Store;

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{mutate_one_edit, sample_store, SAMPLE_WORDS};

    #[test]
    fn exact_match_at_k0() {
        let store = sample_store(CaseFold::Sensitive);
        let results = store.search_fuzzy("dog", 0, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
        assert_eq!(results.len(), 1);
        assert_eq!(SAMPLE_WORDS[results[0].1], "dog");
    }

    #[test]
    fn typo_tolerant_fuzzy_search() {
        let store = sample_store(CaseFold::Sensitive);
        let results = store.search_fuzzy("kittn", 2, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
        assert!(results.iter().any(|&(_, idx)| SAMPLE_WORDS[idx] == "kitten"));
    }

    #[test]
    fn restricted_edit_handles_adjacent_transposition_as_one_edit() {
        let store = sample_store(CaseFold::Sensitive);
        let results = store.search_fuzzy("form", 1, Metric::RestrictedEdit, CaseFold::Sensitive).unwrap();
        assert!(results.iter().any(|&(d, idx)| SAMPLE_WORDS[idx] == "from" && d == 1));
    }

    #[test]
    fn case_insensitive_store_matches_regardless_of_case() {
        let store = sample_store(CaseFold::Insensitive);
        let results = store.search_fuzzy("DOG", 0, Metric::Levenshtein, CaseFold::Insensitive).unwrap();
        assert!(results.iter().any(|&(_, idx)| SAMPLE_WORDS[idx] == "dog"));
    }

    #[test]
    fn distance_zero_excludes_non_identical_keys() {
        let store = sample_store(CaseFold::Sensitive);
        let results = store.search_fuzzy("cot", 0, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
        assert!(results.is_empty());
    }

    #[test]
    fn negative_distance_is_rejected() {
        let store = sample_store(CaseFold::Sensitive);
        let err = store.search_fuzzy("cat", -1, Metric::Levenshtein, CaseFold::Sensitive).unwrap_err();
        assert_eq!(err, Error::InvalidDistance { k: -1 });
    }

    proptest::proptest! {
        #[test]
        fn every_stored_key_is_found_at_distance_zero(word_idx in 0..SAMPLE_WORDS.len()) {
            let store = sample_store(CaseFold::Sensitive);
            let word = SAMPLE_WORDS[word_idx];
            let results = store.search_fuzzy(word, 0, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
            proptest::prop_assert!(results.iter().any(|&(d, idx)| d == 0 && SAMPLE_WORDS[idx] == word));
        }

        #[test]
        fn one_edit_away_is_found_within_k1(word_idx in 0..SAMPLE_WORDS.len(), seed in 0usize..100) {
            let store = sample_store(CaseFold::Sensitive);
            let word = SAMPLE_WORDS[word_idx];
            let mutated = mutate_one_edit(word, seed);
            let results = store.search_fuzzy(&mutated, 1, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
            // Every reported distance must be <= 1; finding `word` itself isn't
            // guaranteed (another stored word might be closer to `mutated`).
            proptest::prop_assert!(results.iter().all(|&(d, _)| d <= 1));
        }

        #[test]
        fn larger_k_never_finds_fewer_results(word_idx in 0..SAMPLE_WORDS.len(), seed in 0usize..100) {
            let store = sample_store(CaseFold::Sensitive);
            let word = SAMPLE_WORDS[word_idx];
            let mutated = mutate_one_edit(word, seed);
            let at_k1 = store.search_fuzzy(&mutated, 1, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
            let at_k2 = store.search_fuzzy(&mutated, 2, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
            proptest::prop_assert!(at_k2.len() >= at_k1.len());
        }

        #[test]
        fn restricted_edit_distance_never_exceeds_levenshtein(word_idx in 0..SAMPLE_WORDS.len(), seed in 0usize..100) {
            let store = sample_store(CaseFold::Sensitive);
            let word = SAMPLE_WORDS[word_idx];
            let mutated = mutate_one_edit(word, seed);
            let lev = store.search_fuzzy(&mutated, 3, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
            let osa = store.search_fuzzy(&mutated, 3, Metric::RestrictedEdit, CaseFold::Sensitive).unwrap();
            let lev_distance = |idx: usize| lev.iter().find(|&&(_, i)| i == idx).map(|&(d, _)| d);
            for &(d, idx) in &osa {
                if let Some(ld) = lev_distance(idx) {
                    proptest::prop_assert!(d <= ld);
                }
            }
        }
    }
}
