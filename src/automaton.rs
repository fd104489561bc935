// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The automaton contract and its concrete backends.
//!
//! An [`Automaton`] is a per-query matcher: it knows the query string, the
//! distance bound, and the case policy, and exposes the four operations a
//! trie walk needs to drive it one character at a time without ever
//! re-deriving the edit distance from scratch. `State` is the only thing that
//! changes during a walk; the automaton itself stays fixed for the whole
//! search, which is what lets a caller share one automaton across many trie
//! branches.
//!
//! Callers who want to compose matchers (e.g. an AND of two fuzzy automata)
//! can implement this trait on their own type instead of going through
//! [`crate::factory::Factory`]; `Store::search_with` is generic over any
//! `Automaton` impl, not just the ones built in here.

use std::sync::Arc;

use crate::case::CaseFold;
use crate::levenshtein_dfa::ParametricTable;
use crate::metric::Metric;

/// The executor protocol: the minimal interface a trie walk needs to drive a
/// fuzzy matcher.
pub trait Automaton {
    type State: Clone;

    /// The state before any input has been consumed.
    fn start(&self) -> Self::State;

    /// Consume one more input character. `None` means the automaton can never
    /// accept any continuation of this path - the walk should prune it.
    fn step(&self, state: &Self::State, c: char) -> Option<Self::State>;

    /// Whether the input consumed so far is within the distance bound of the
    /// whole query (not just a prefix of it).
    fn is_final(&self, state: &Self::State) -> bool;

    /// The edit distance for a final state. Unspecified when `!is_final`.
    fn distance(&self, state: &Self::State) -> usize;
}

// ---------------------------------------------------------------------------
// k = 0: exact match
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct ExactAutomaton {
    query: Arc<[char]>,
    case: CaseFold,
}

impl ExactAutomaton {
    pub fn new(query: Arc<[char]>, case: CaseFold) -> Self {
        ExactAutomaton { query, case }
    }
}

impl Automaton for ExactAutomaton {
    type State = usize;

    fn start(&self) -> usize {
        0
    }

    fn step(&self, state: &usize, c: char) -> Option<usize> {
        let i = *state;
        if i < self.query.len() && self.case.equal(c, self.query[i]) {
            Some(i + 1)
        } else {
            None
        }
    }

    fn is_final(&self, state: &usize) -> bool {
        *state == self.query.len()
    }

    fn distance(&self, _state: &usize) -> usize {
        0
    }
}

// ---------------------------------------------------------------------------
// k in 1..=3, Levenshtein: table-driven parametric automaton
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TableState {
    id: u16,
    base: i32,
}

#[derive(Debug, Clone)]
pub struct TableAutomaton {
    table: Arc<ParametricTable>,
    query: Arc<[char]>,
    case: CaseFold,
}

impl TableAutomaton {
    pub fn new(table: Arc<ParametricTable>, query: Arc<[char]>, case: CaseFold) -> Self {
        TableAutomaton { table, query, case }
    }
}

impl Automaton for TableAutomaton {
    type State = TableState;

    fn start(&self) -> TableState {
        TableState { id: 0, base: 0 }
    }

    fn step(&self, state: &TableState, c: char) -> Option<TableState> {
        let window = self.table.window();
        let mut mask = 0usize;
        for j in 0..window {
            let idx = state.base + j as i32;
            if idx >= 0 && (idx as usize) < self.query.len() && self.case.equal(c, self.query[idx as usize]) {
                mask |= 1 << j;
            }
        }
        let (next_id, shift) = self.table.transition(state.id, mask)?;
        Some(TableState { id: next_id, base: state.base + shift })
    }

    fn is_final(&self, state: &TableState) -> bool {
        self.remaining_errors(state).is_some()
    }

    fn distance(&self, state: &TableState) -> usize {
        self.remaining_errors(state).unwrap_or(u8::MAX) as usize
    }
}

impl TableAutomaton {
    fn remaining_errors(&self, state: &TableState) -> Option<u8> {
        let remaining = self.query.len() as i32 - state.base;
        if remaining < 0 {
            return None;
        }
        self.table.accept_errors(state.id, remaining as usize)
    }
}

// ---------------------------------------------------------------------------
// Otherwise: row-by-row dynamic programming
//
// Handles Levenshtein for k > MAX_TABLE_K and every RestrictedEdit query
// regardless of k. Always correct, generalizes to any k without a dedicated
// construction step; the cost is an O(|w|) state instead of O(1).
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub struct RowDpState {
    row: Arc<[u32]>,
    prev_row: Option<Arc<[u32]>>,
    last: Option<char>,
}

#[derive(Debug, Clone)]
pub struct RowDpAutomaton {
    query: Arc<[char]>,
    case: CaseFold,
    k: u32,
    metric: Metric,
}

impl RowDpAutomaton {
    pub fn new(query: Arc<[char]>, case: CaseFold, k: u32, metric: Metric) -> Self {
        RowDpAutomaton { query, case, k, metric }
    }
}

impl Automaton for RowDpAutomaton {
    type State = RowDpState;

    fn start(&self) -> RowDpState {
        let row: Vec<u32> = (0..=self.query.len() as u32).collect();
        RowDpState { row: row.into(), prev_row: None, last: None }
    }

    fn step(&self, state: &RowDpState, c: char) -> Option<RowDpState> {
        let m = self.query.len();
        let mut next_row = vec![0u32; m + 1];
        next_row[0] = state.row[0] + 1;
        for j in 1..=m {
            let q = self.query[j - 1];
            let sub_cost = if self.case.equal(c, q) { 0 } else { 1 };
            let mut best = (state.row[j] + 1)
                .min(next_row[j - 1] + 1)
                .min(state.row[j - 1] + sub_cost);

            if self.metric.allows_transposition() && j >= 2 {
                if let (Some(prev_row), Some(last_c)) = (&state.prev_row, state.last) {
                    if self.case.equal(last_c, q) && self.case.equal(c, self.query[j - 2]) {
                        best = best.min(prev_row[j - 2] + 1);
                    }
                }
            }
            next_row[j] = best;
        }

        if next_row.iter().copied().min().unwrap_or(u32::MAX) > self.k {
            return None;
        }

        Some(RowDpState {
            row: next_row.into(),
            prev_row: Some(Arc::clone(&state.row)),
            last: Some(c),
        })
    }

    fn is_final(&self, state: &RowDpState) -> bool {
        state.row[self.query.len()] <= self.k
    }

    fn distance(&self, state: &RowDpState) -> usize {
        state.row[self.query.len()] as usize
    }
}

// ---------------------------------------------------------------------------
// The factory-facing tagged union: one concrete type spanning every backend,
// so `Factory::construct` can return a single `impl Automaton` without boxing
// or a trait object, and the per-character dispatch cost is one match.
// ---------------------------------------------------------------------------

#[derive(Debug, Clone)]
pub enum FuzzyAutomaton {
    Exact(ExactAutomaton),
    Table(TableAutomaton),
    RowDp(RowDpAutomaton),
}

#[derive(Debug, Clone)]
pub enum FuzzyState {
    Exact(usize),
    Table(TableState),
    RowDp(RowDpState),
}

impl Automaton for FuzzyAutomaton {
    type State = FuzzyState;

    fn start(&self) -> FuzzyState {
        match self {
            FuzzyAutomaton::Exact(a) => FuzzyState::Exact(a.start()),
            FuzzyAutomaton::Table(a) => FuzzyState::Table(a.start()),
            FuzzyAutomaton::RowDp(a) => FuzzyState::RowDp(a.start()),
        }
    }

    fn step(&self, state: &FuzzyState, c: char) -> Option<FuzzyState> {
        match (self, state) {
            (FuzzyAutomaton::Exact(a), FuzzyState::Exact(s)) => a.step(s, c).map(FuzzyState::Exact),
            (FuzzyAutomaton::Table(a), FuzzyState::Table(s)) => a.step(s, c).map(FuzzyState::Table),
            (FuzzyAutomaton::RowDp(a), FuzzyState::RowDp(s)) => a.step(s, c).map(FuzzyState::RowDp),
            _ => unreachable!("FuzzyState always matches the FuzzyAutomaton variant that produced it"),
        }
    }

    fn is_final(&self, state: &FuzzyState) -> bool {
        match (self, state) {
            (FuzzyAutomaton::Exact(a), FuzzyState::Exact(s)) => a.is_final(s),
            (FuzzyAutomaton::Table(a), FuzzyState::Table(s)) => a.is_final(s),
            (FuzzyAutomaton::RowDp(a), FuzzyState::RowDp(s)) => a.is_final(s),
            _ => unreachable!("FuzzyState always matches the FuzzyAutomaton variant that produced it"),
        }
    }

    fn distance(&self, state: &FuzzyState) -> usize {
        match (self, state) {
            (FuzzyAutomaton::Exact(a), FuzzyState::Exact(s)) => a.distance(s),
            (FuzzyAutomaton::Table(a), FuzzyState::Table(s)) => a.distance(s),
            (FuzzyAutomaton::RowDp(a), FuzzyState::RowDp(s)) => a.distance(s),
            _ => unreachable!("FuzzyState always matches the FuzzyAutomaton variant that produced it"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn chars(s: &str) -> Arc<[char]> {
        s.chars().collect::<Vec<_>>().into()
    }

    fn run<A: Automaton>(a: &A, input: &str) -> Option<A::State> {
        let mut state = a.start();
        for c in input.chars() {
            state = a.step(&state, c)?;
        }
        Some(state)
    }

    #[test]
    fn exact_matches_only_identical_string() {
        let a = ExactAutomaton::new(chars("hello"), CaseFold::Sensitive);
        let s = run(&a, "hello").unwrap();
        assert!(a.is_final(&s));
        assert!(run(&a, "hallo").is_none());
    }

    #[test]
    fn table_accepts_one_substitution() {
        let table = Arc::new(ParametricTable::build(1));
        let a = TableAutomaton::new(table, chars("hello"), CaseFold::Sensitive);
        let s = run(&a, "hallo").unwrap();
        assert!(a.is_final(&s));
        assert_eq!(a.distance(&s), 1);
    }

    #[test]
    fn table_rejects_two_substitutions_at_k1() {
        let table = Arc::new(ParametricTable::build(1));
        let a = TableAutomaton::new(table, chars("hello"), CaseFold::Sensitive);
        let ended = run(&a, "hajjo");
        assert!(ended.is_none() || !a.is_final(&ended.unwrap()));
    }

    #[test]
    fn table_accepts_insertion_and_deletion() {
        let table = Arc::new(ParametricTable::build(1));
        let a = TableAutomaton::new(table, chars("cat"), CaseFold::Sensitive);
        assert!(a.is_final(&run(&a, "cats").unwrap()));
        assert!(a.is_final(&run(&a, "ct").unwrap()));
    }

    #[test]
    fn row_dp_matches_table_for_levenshtein() {
        let dp = RowDpAutomaton::new(chars("kitten"), CaseFold::Sensitive, 3, Metric::Levenshtein);
        let s = run(&dp, "sitting").unwrap();
        assert!(dp.is_final(&s));
        assert_eq!(dp.distance(&s), 3);
    }

    #[test]
    fn row_dp_restricted_edit_allows_transposition() {
        let dp = RowDpAutomaton::new(chars("form"), CaseFold::Sensitive, 1, Metric::RestrictedEdit);
        let s = run(&dp, "from").unwrap();
        assert!(dp.is_final(&s));
        assert_eq!(dp.distance(&s), 1);
    }

    #[test]
    fn row_dp_levenshtein_counts_transposition_as_two_edits() {
        let dp = RowDpAutomaton::new(chars("form"), CaseFold::Sensitive, 1, Metric::Levenshtein);
        let ended = run(&dp, "from");
        assert!(ended.is_none() || !dp.is_final(&ended.unwrap()));
    }
}
