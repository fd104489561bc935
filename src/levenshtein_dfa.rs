// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The parametric Levenshtein automaton table (Schulz & Mihov, 2002).
//!
//! A classical Levenshtein automaton for a fixed query word has O(|w|) states.
//! The parametric construction instead builds a table that depends only on
//! `k`, not on the query itself: each state is a canonical set of
//! `(offset, errors)` position pairs relative to a moving `base` index into the
//! query, and transitions are keyed by a *characteristic vector* - a bitmask of
//! which of the `2k+1` query characters around `base` match the next input
//! character - rather than by the character itself. Reuse the table across
//! every query of that `k`; only the per-query characteristic vector changes.
//!
//! This module builds that table once via BFS over the position-set state
//! space and exposes it as flat arrays so a lookup at query time is two array
//! reads, no allocation.
//!
//! Covers the classical Levenshtein metric only. Restricted-edit
//! (transposition) queries are served by the row-by-row DP backend instead -
//! seeding the position-set space with a "mid-transposition" marker is
//! possible but intricate to get exactly right, and a subtle error there would
//! corrupt every restricted-edit search silently. See `DESIGN.md`.

use std::collections::HashMap;
use std::collections::VecDeque;

/// Sentinel transition target meaning "no reachable state" (automaton dies).
pub const DEAD_STATE: u16 = u16::MAX;
/// Sentinel accept-distance meaning "not accepting at this remaining length".
pub const NOT_ACCEPTING: u8 = u8::MAX;
/// Largest `k` this table-driven backend will build. Above this, the state
/// space and the `2^(2k+1)`-entry transition row both grow too fast to be
/// worth it; the factory switches to the row DP backend instead.
pub const MAX_TABLE_K: u8 = 3;

/// A position in the Levenshtein NFA: `offset` characters past `base` into the
/// query, having already spent `errors` edits to get there.
type Position = (i32, u8);

/// Epsilon-close a position set under deletion moves: from `(i, e)` with
/// `e < k`, a query character can always be deleted at the cost of one more
/// error, landing on `(i + 1, e + 1)`.
fn close(positions: &mut Vec<Position>, k: u8) {
    let mut frontier = positions.clone();
    while let Some((i, e)) = frontier.pop() {
        if e < k {
            let next = (i + 1, e + 1);
            if !positions.contains(&next) {
                positions.push(next);
                frontier.push(next);
            }
        }
    }
}

/// Keep only the minimum-error position at each offset. A position strictly
/// dominated at its own offset can never produce a better outcome than the
/// surviving one, so dropping it changes no reachable result.
fn prune(positions: &mut Vec<Position>) {
    let mut best: HashMap<i32, u8> = HashMap::new();
    for &(i, e) in positions.iter() {
        best.entry(i).and_modify(|cur| *cur = (*cur).min(e)).or_insert(e);
    }
    positions.clear();
    positions.extend(best);
    positions.sort_unstable();
}

/// Shift every offset so the minimum becomes zero; return the shift so the
/// caller can advance its running `base` by the same amount.
fn normalize(positions: &[Position]) -> (Vec<Position>, i32) {
    let shift = positions.iter().map(|&(i, _)| i).min().unwrap_or(0);
    let shifted = positions.iter().map(|&(i, e)| (i - shift, e)).collect();
    (shifted, shift)
}

/// Consume one input character (represented by its characteristic-vector
/// bitmask relative to `base`) from `positions`, before closure/pruning.
fn step_positions(positions: &[Position], k: u8, window: usize, mask: usize) -> Vec<Position> {
    let mut next = Vec::new();
    for &(i, e) in positions {
        if i >= 0 && (i as usize) < window && (mask >> (i as usize)) & 1 == 1 {
            // Free diagonal move: the input character matched this query position.
            next.push((i + 1, e));
        }
        if e < k {
            next.push((i + 1, e + 1)); // substitution
            next.push((i, e + 1)); // insertion: input char has no query counterpart
        }
    }
    next
}

/// The query-independent transition table for one value of `k`.
#[derive(Debug, Clone)]
pub struct ParametricTable {
    k: u8,
    window: usize,
    num_classes: usize,
    num_states: u16,
    accept_width: usize,
    transitions: Vec<u16>,
    shifts: Vec<i8>,
    accept: Vec<u8>,
}

impl ParametricTable {
    /// Build the table for distance bound `k` (must be `1..=MAX_TABLE_K`).
    pub fn build(k: u8) -> Self {
        debug_assert!((1..=MAX_TABLE_K).contains(&k), "ParametricTable only covers k in 1..=3");
        let window = 2 * k as usize + 1;
        let num_classes = 1usize << window;
        let accept_width = 2 * k as usize + 2;

        let initial: Vec<Position> = (0..=k as i32).map(|i| (i, i as u8)).collect();
        let (initial, _) = normalize(&initial);

        let mut state_of: HashMap<Vec<Position>, u16> = HashMap::new();
        let mut states: Vec<Vec<Position>> = Vec::new();
        state_of.insert(initial.clone(), 0);
        states.push(initial);

        let mut transitions: Vec<u16> = Vec::new();
        let mut shifts: Vec<i8> = Vec::new();

        let mut queue: VecDeque<u16> = VecDeque::new();
        queue.push_back(0);
        let mut processed = 0usize;

        while let Some(sid) = queue.pop_front() {
            let positions = states[sid as usize].clone();
            let base = transitions.len();
            transitions.resize(base + num_classes, DEAD_STATE);
            shifts.resize(base + num_classes, 0);
            for mask in 0..num_classes {
                let mut next = step_positions(&positions, k, window, mask);
                close(&mut next, k);
                prune(&mut next);
                if next.is_empty() {
                    continue;
                }
                let (norm, shift) = normalize(&next);
                let id = match state_of.get(&norm) {
                    Some(&id) => id,
                    None => {
                        let id = states.len() as u16;
                        state_of.insert(norm.clone(), id);
                        states.push(norm);
                        queue.push_back(id);
                        id
                    }
                };
                transitions[base + mask] = id;
                shifts[base + mask] = shift as i8;
            }
            processed += 1;
            debug_assert!(processed < 20_000, "parametric state space did not converge");
        }

        let num_states = states.len() as u16;
        let mut accept = vec![NOT_ACCEPTING; states.len() * accept_width];
        for (sid, positions) in states.iter().enumerate() {
            for &(i, e) in positions {
                if i >= 0 && (i as usize) < accept_width {
                    let slot = &mut accept[sid * accept_width + i as usize];
                    *slot = (*slot).min(e);
                }
            }
        }

        ParametricTable { k, window, num_classes, num_states, accept_width, transitions, shifts, accept }
    }

    pub fn k(&self) -> u8 {
        self.k
    }

    pub fn window(&self) -> usize {
        self.window
    }

    pub fn num_states(&self) -> u16 {
        self.num_states
    }

    /// Look up the transition for `state` on characteristic vector `mask`.
    /// Returns `None` if the automaton dies.
    #[inline]
    pub fn transition(&self, state: u16, mask: usize) -> Option<(u16, i32)> {
        let idx = state as usize * self.num_classes + (mask & (self.num_classes - 1));
        let next = self.transitions[idx];
        if next == DEAD_STATE {
            None
        } else {
            Some((next, self.shifts[idx] as i32))
        }
    }

    /// The minimum number of errors this state has already spent, given that
    /// exactly `remaining` query characters are left to match. `None` if the
    /// state can't finish there within the table's bound.
    #[inline]
    pub fn accept_errors(&self, state: u16, remaining: usize) -> Option<u8> {
        if remaining >= self.accept_width {
            return None;
        }
        let v = self.accept[state as usize * self.accept_width + remaining];
        if v == NOT_ACCEPTING {
            None
        } else {
            Some(v)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn k1_builds_small_table() {
        let t = ParametricTable::build(1);
        assert_eq!(t.window(), 3);
        assert!(t.num_states() < 40, "k=1 state space should be tiny, got {}", t.num_states());
    }

    #[test]
    fn k2_builds_bounded_table() {
        let t = ParametricTable::build(2);
        assert_eq!(t.window(), 5);
        assert!(t.num_states() < 400, "k=2 state space exploded: {}", t.num_states());
    }

    #[test]
    fn k3_builds_bounded_table() {
        let t = ParametricTable::build(3);
        assert_eq!(t.window(), 7);
        assert!(t.num_states() < 4000, "k=3 state space exploded: {}", t.num_states());
    }

    #[test]
    fn initial_state_accepts_empty_query_at_zero_remaining() {
        let t = ParametricTable::build(1);
        assert_eq!(t.accept_errors(0, 0), Some(0));
    }

    #[test]
    fn dead_mask_still_allows_edits_from_initial_state() {
        let t = ParametricTable::build(1);
        // mask 0: no input character matches any window position, but
        // substitution/insertion are still available from the initial state.
        assert!(t.transition(0, 0).is_some());
    }
}
