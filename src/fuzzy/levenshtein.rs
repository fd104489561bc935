// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! A standalone bounded Levenshtein check, independent of the automaton
//! backends in `automaton.rs`.
//!
//! The key insight: `|len(a) - len(b)|` is a lower bound on edit distance. If
//! two strings differ in length by more than the threshold, skip the O(nm)
//! DP entirely. A second early exit abandons the DP mid-row once every cell
//! in the row already exceeds the bound, since no later row can recover.
//!
//! This isn't on the hot trie-walk path - it's a plain one-shot comparison
//! between two full strings, useful as a differential oracle for the
//! automaton backends and as a small public utility in its own right.

/// Are `a` and `b` within `max` edits of each other (classical Levenshtein,
/// case-sensitive, operating on `char`s rather than bytes)?
pub fn levenshtein_within(a: &str, b: &str, max: usize) -> bool {
    let a_len = a.chars().count();
    let b_len = b.chars().count();

    if (a_len as isize - b_len as isize).unsigned_abs() > max {
        return false;
    }

    let mut dp: Vec<usize> = (0..=b_len).collect();
    for (i, ac) in a.chars().enumerate() {
        let mut prev = dp[0];
        dp[0] = i + 1;
        let mut min_row = dp[0];

        for (j, bc) in b.chars().enumerate() {
            let temp = dp[j + 1];
            let cost = if ac == bc { 0 } else { 1 };
            dp[j + 1] = (dp[j + 1] + 1).min(dp[j] + 1).min(prev + cost);
            prev = temp;
            if dp[j + 1] < min_row {
                min_row = dp[j + 1];
            }
        }

        if min_row > max {
            return false;
        }
    }

    dp[b_len] <= max
}
