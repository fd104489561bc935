// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! End-to-end scenarios against the public API.

use levenshtrie::{Builder, CaseFold, Error, Metric};

fn words_store(words: &[&str], case: CaseFold) -> levenshtrie::Store<String> {
    let mut builder: Builder<String> = Builder::new(case);
    for w in words {
        builder.insert(w, (*w).to_string());
    }
    builder.build().unwrap()
}

#[test]
fn exact_match_returns_distance_zero() {
    let store = words_store(&["search", "research", "seasick"], CaseFold::Sensitive);
    let results = store.search_fuzzy("search", 0, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
    assert_eq!(results, vec![(0, "search".to_string())]);
}

#[test]
fn single_typo_found_at_k1_but_not_k0() {
    let store = words_store(&["levenshtein"], CaseFold::Sensitive);
    assert!(store.search_fuzzy("levenshtien", 0, Metric::Levenshtein, CaseFold::Sensitive).unwrap().is_empty());
    let results = store.search_fuzzy("levenshtien", 1, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
    assert_eq!(results, vec![(1, "levenshtein".to_string())]);
}

#[test]
fn restricted_edit_counts_transposition_as_one_edit_levenshtein_as_two() {
    let store = words_store(&["form"], CaseFold::Sensitive);

    let lev = store.search_fuzzy("from", 1, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
    assert!(lev.is_empty(), "transposition is two Levenshtein edits, shouldn't match at k=1");

    let osa = store.search_fuzzy("from", 1, Metric::RestrictedEdit, CaseFold::Sensitive).unwrap();
    assert_eq!(osa, vec![(1, "form".to_string())]);
}

#[test]
fn case_insensitive_keys_collide_as_duplicates() {
    let mut builder: Builder<String> = Builder::new(CaseFold::Insensitive);
    builder.insert("Rust", "Rust".to_string());
    builder.insert("rust", "rust".to_string());
    assert_eq!(builder.build().unwrap_err(), Error::DuplicateKey);
}

#[test]
fn case_insensitive_query_matches_differently_cased_key() {
    let store = words_store(&["Rust"], CaseFold::Insensitive);
    let results = store.search_fuzzy("RUST", 0, Metric::Levenshtein, CaseFold::Insensitive).unwrap();
    assert_eq!(results, vec![(0, "Rust".to_string())]);
}

#[test]
fn mismatched_case_policy_is_an_error_not_a_silent_miss() {
    let store = words_store(&["Rust"], CaseFold::Sensitive);
    let err = store.search_fuzzy("Rust", 0, Metric::Levenshtein, CaseFold::Insensitive).unwrap_err();
    assert_eq!(err, Error::CasePolicyMismatch);
}

#[test]
fn distance_bound_ceiling_is_enforced() {
    let store = words_store(&["anything"], CaseFold::Sensitive);
    let err = store.search_fuzzy("anything", 31, Metric::Levenshtein, CaseFold::Sensitive).unwrap_err();
    assert!(matches!(err, Error::DistanceCeilingExceeded { .. }));
}

#[test]
fn negative_distance_bound_is_rejected() {
    let store = words_store(&["anything"], CaseFold::Sensitive);
    let err = store.search_fuzzy("anything", -3, Metric::Levenshtein, CaseFold::Sensitive).unwrap_err();
    assert_eq!(err, Error::InvalidDistance { k: -3 });
}

#[test]
fn empty_store_returns_no_results() {
    let store: levenshtrie::Store<String> = Builder::new(CaseFold::Sensitive).build().unwrap();
    assert!(store.search_fuzzy("anything", 2, Metric::Levenshtein, CaseFold::Sensitive).unwrap().is_empty());
    assert_eq!(store.try_get("anything"), None);
}

#[test]
fn results_are_sorted_by_ascending_distance() {
    let store = words_store(&["cat", "bat", "cart", "cast"], CaseFold::Sensitive);
    let results = store.search_fuzzy("cat", 2, Metric::Levenshtein, CaseFold::Sensitive).unwrap();
    for pair in results.windows(2) {
        assert!(pair[0].0 <= pair[1].0);
    }
}
