// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The two edit-distance metrics the automaton backends can compute.

/// Which family of edit operations bounds a search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Metric {
    /// Insertion, deletion, substitution. Classical Levenshtein distance.
    Levenshtein,
    /// Levenshtein plus adjacent transposition, with the restriction that no
    /// substring is edited more than once (the "optimal string alignment"
    /// distance, not true unbounded Damerau-Levenshtein).
    RestrictedEdit,
}

impl Metric {
    #[inline]
    pub fn allows_transposition(self) -> bool {
        matches!(self, Metric::RestrictedEdit)
    }
}
