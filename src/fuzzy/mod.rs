// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A standalone bounded-edit-distance check, separate from the automaton
//! backends that drive the trie walk.

mod levenshtein;

pub use levenshtein::levenshtein_within;
