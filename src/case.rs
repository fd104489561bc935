// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Case-folding policy.
//!
//! A [`CaseFold`] is a total, pure `char -> char` function plus the equality it
//! induces. It is deliberately not full Unicode collation: no diacritic
//! stripping, no locale tailoring, no multi-scalar expansion. `to_lowercase()`
//! can yield more than one scalar for a handful of code points (e.g. German
//! sharp S); we keep only the first, so folding stays a one-to-one `char -> char`
//! map and every trie edge still corresponds to exactly one input character.

use std::cmp::Ordering;

/// Whether keys and queries are compared verbatim or case-folded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CaseFold {
    Sensitive,
    Insensitive,
}

impl CaseFold {
    /// Fold a single scalar under this policy.
    #[inline]
    pub fn fold(self, c: char) -> char {
        match self {
            CaseFold::Sensitive => c,
            CaseFold::Insensitive => c.to_lowercase().next().unwrap_or(c),
        }
    }

    /// Equality of two scalars under this policy.
    #[inline]
    pub fn equal(self, a: char, b: char) -> bool {
        match self {
            CaseFold::Sensitive => a == b,
            CaseFold::Insensitive => self.fold(a) == self.fold(b),
        }
    }

    /// Fold a whole string into the canonical form used as a trie path.
    pub fn fold_str(self, s: &str) -> String {
        match self {
            CaseFold::Sensitive => s.to_string(),
            CaseFold::Insensitive => s.chars().map(|c| self.fold(c)).collect(),
        }
    }

    /// The total order over scalar sequences used to sort keys before
    /// construction. Under `Insensitive`, this orders by each character's
    /// folded form first, so it agrees with `equal` on every equivalence
    /// class - two keys that fold to the same path sort adjacently.
    #[inline]
    pub fn compare(self, a: &[char], b: &[char]) -> Ordering {
        match self {
            CaseFold::Sensitive => a.cmp(b),
            CaseFold::Insensitive => {
                let folded_a = a.iter().map(|&c| self.fold(c));
                let folded_b = b.iter().map(|&c| self.fold(c));
                folded_a.cmp(folded_b)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sensitive_distinguishes_case() {
        assert!(!CaseFold::Sensitive.equal('A', 'a'));
        assert!(CaseFold::Sensitive.equal('a', 'a'));
    }

    #[test]
    fn insensitive_folds_ascii() {
        assert!(CaseFold::Insensitive.equal('A', 'a'));
        assert_eq!(CaseFold::Insensitive.fold('A'), 'a');
    }

    #[test]
    fn insensitive_stays_single_scalar() {
        // ß.to_lowercase() is just "ß" (one scalar); to_uppercase would give "SS".
        // We only ever call to_lowercase, so folding never changes character count.
        let folded: String = "Straße".chars().map(|c| CaseFold::Insensitive.fold(c)).collect();
        assert_eq!(folded.chars().count(), "Straße".chars().count());
    }

    #[test]
    fn fold_str_is_idempotent() {
        let once = CaseFold::Insensitive.fold_str("HeLLo");
        let twice = CaseFold::Insensitive.fold_str(&once);
        assert_eq!(once, twice);
    }

    #[test]
    fn sensitive_compare_orders_by_scalar_value() {
        let a: Vec<char> = "Zebra".chars().collect();
        let b: Vec<char> = "apple".chars().collect();
        // 'Z' (0x5A) sorts before 'a' (0x61) under plain ordinal comparison.
        assert_eq!(CaseFold::Sensitive.compare(&a, &b), Ordering::Less);
    }

    #[test]
    fn insensitive_compare_agrees_with_equal_on_fold_classes() {
        let a: Vec<char> = "Cat".chars().collect();
        let b: Vec<char> = "cat".chars().collect();
        assert_eq!(CaseFold::Insensitive.compare(&a, &b), Ordering::Equal);
    }

    #[test]
    fn insensitive_compare_orders_by_folded_form() {
        let a: Vec<char> = "Apple".chars().collect();
        let b: Vec<char> = "zebra".chars().collect();
        assert_eq!(CaseFold::Insensitive.compare(&a, &b), Ordering::Less);
    }
}
