// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The compact immutable trie.
//!
//! Nodes live in one flat `Vec`, children of a node are a contiguous,
//! character-sorted window of that same `Vec` rather than individually
//! allocated, and unary valueless chains are compressed into a tail string
//! shared by one node - no node objects, no pointers, no per-edge allocation.
//! Walking the trie for a fuzzy query threads an [`Automaton`] state through
//! this structure one edge at a time; the trie never needs to know which
//! backend produced that state.

use std::collections::hash_map::Entry as HashEntry;
use std::collections::HashMap;
use std::hash::Hash;

use crate::automaton::Automaton;
use crate::case::CaseFold;
use crate::contracts::{check_children_sorted, check_store_well_formed};
use crate::error::{Error, Result};
use crate::factory::Factory;
use crate::metric::Metric;

/// One trie node. Never constructed directly outside the builder; the
/// `Default` impl only exists so the builder can pre-size the arena before
/// filling it in.
#[derive(Debug, Clone, Default)]
pub struct Node {
    pub(crate) ch: char,
    pub(crate) value: Option<usize>,
    pub(crate) children_start: usize,
    pub(crate) children_len: usize,
    pub(crate) tail_start: usize,
    pub(crate) tail_len: usize,
    pub(crate) tail_value: Option<usize>,
}

/// An immutable fuzzy-searchable key/value index.
///
/// Cheap to share across readers: nothing here is mutated after `build`, and
/// searching never allocates more than the result vector and one walk stack.
#[derive(Debug)]
pub struct Store<V> {
    entries: Vec<Node>,
    values: Vec<V>,
    tail: Vec<char>,
    root_len: usize,
    root_value: Option<usize>,
    case: CaseFold,
    factory: Factory,
}

impl<V> Store<V> {
    pub(crate) fn from_parts(
        entries: Vec<Node>,
        values: Vec<V>,
        tail: Vec<char>,
        root_len: usize,
        root_value: Option<usize>,
        case: CaseFold,
    ) -> Self {
        let store = Store { entries, values, tail, root_len, root_value, case, factory: Factory::new() };
        check_store_well_formed(&store.entries, store.values.len(), store.tail.len());
        check_children_sorted(&store.entries, 0, store.root_len);
        store
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn case_policy(&self) -> CaseFold {
        self.case
    }

    pub(crate) fn entries(&self) -> &[Node] {
        &self.entries
    }

    pub(crate) fn values(&self) -> &[V] {
        &self.values
    }

    pub(crate) fn tail(&self) -> &[char] {
        &self.tail
    }

    pub(crate) fn root_len(&self) -> usize {
        self.root_len
    }

    fn find_child(&self, start: usize, len: usize, ch: char) -> Option<usize> {
        self.entries[start..start + len].binary_search_by_key(&ch, |n| n.ch).ok().map(|i| start + i)
    }

    /// Exact lookup under the store's case policy. O(key length * log branching).
    pub fn try_get(&self, key: &str) -> Option<&V> {
        let folded = self.case.fold_str(key);
        let chars: Vec<char> = folded.chars().collect();
        if chars.is_empty() {
            return self.root_value.map(|v| &self.values[v]);
        }

        let mut start = 0;
        let mut len = self.root_len;
        let mut i = 0;
        loop {
            let idx = self.find_child(start, len, chars[i])?;
            let node = &self.entries[idx];
            i += 1;

            if i == chars.len() {
                return node.value.map(|v| &self.values[v]);
            }
            if node.tail_len > 0 {
                let tail_slice = &self.tail[node.tail_start..node.tail_start + node.tail_len];
                return if chars[i..] == *tail_slice { node.tail_value.map(|v| &self.values[v]) } else { None };
            }
            start = node.children_start;
            len = node.children_len;
        }
    }

    /// Run a fuzzy search with a caller-supplied automaton, lazily.
    ///
    /// Results are not deduplicated or distance-sorted; use [`Store::search`]
    /// for that, or dedupe yourself if you need a different policy.
    pub fn enumerate_search<'a, A: Automaton>(&'a self, automaton: &'a A) -> SearchIter<'a, V, A> {
        let start_state = automaton.start();

        let mut buffered = Vec::new();
        if let Some(v) = self.root_value {
            if automaton.is_final(&start_state) {
                buffered.push((automaton.distance(&start_state), &self.values[v]));
            }
        }

        let mut stack = Vec::new();
        for i in (0..self.root_len).rev() {
            let child = &self.entries[i];
            if let Some(state) = automaton.step(&start_state, child.ch) {
                stack.push((i, state));
            }
        }

        SearchIter { store: self, automaton, stack, buffered }
    }

    /// Run a fuzzy search, deduplicating by value and keeping the smallest
    /// distance found for each one. Requires `V: Eq + Hash` so duplicates -
    /// the same value reachable via more than one key - can be merged.
    pub fn search<A: Automaton>(&self, automaton: &A) -> Vec<(usize, V)>
    where
        V: Clone + Eq + Hash,
    {
        let mut best: HashMap<V, usize> = HashMap::new();
        for (distance, value) in self.enumerate_search(automaton) {
            match best.entry(value.clone()) {
                HashEntry::Occupied(mut e) => {
                    if distance < *e.get() {
                        e.insert(distance);
                    }
                }
                HashEntry::Vacant(e) => {
                    e.insert(distance);
                }
            }
        }
        let mut results: Vec<(usize, V)> = best.into_iter().map(|(v, d)| (d, v)).collect();
        results.sort_by_key(|(d, _)| *d);
        results
    }

    /// Build an automaton via the store's factory and run [`Store::search`].
    pub fn search_fuzzy(&self, query: &str, k: i64, metric: Metric, case: CaseFold) -> Result<Vec<(usize, V)>>
    where
        V: Clone + Eq + Hash,
    {
        if case != self.case {
            return Err(Error::CasePolicyMismatch);
        }
        let automaton = self.factory.construct(query, k, metric, case)?;
        Ok(self.search(&automaton))
    }
}

/// A lazy, explicit-stack walk over a [`Store`] driven by an [`Automaton`].
///
/// Never recurses: the walk's own call stack is this struct's `stack` field,
/// so arbitrarily deep or wide tries can't overflow the native stack.
pub struct SearchIter<'a, V, A: Automaton> {
    store: &'a Store<V>,
    automaton: &'a A,
    stack: Vec<(usize, A::State)>,
    buffered: Vec<(usize, &'a V)>,
}

impl<'a, V, A: Automaton> Iterator for SearchIter<'a, V, A> {
    type Item = (usize, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(item) = self.buffered.pop() {
                return Some(item);
            }
            let (node_idx, state) = self.stack.pop()?;
            let node = &self.store.entries[node_idx];

            if let Some(v) = node.value {
                if self.automaton.is_final(&state) {
                    self.buffered.push((self.automaton.distance(&state), &self.store.values[v]));
                }
            }

            if node.tail_len > 0 {
                let mut cur = state;
                let mut alive = true;
                for &c in &self.store.tail[node.tail_start..node.tail_start + node.tail_len] {
                    match self.automaton.step(&cur, c) {
                        Some(next) => cur = next,
                        None => {
                            alive = false;
                            break;
                        }
                    }
                }
                if alive {
                    if let Some(v) = node.tail_value {
                        if self.automaton.is_final(&cur) {
                            self.buffered.push((self.automaton.distance(&cur), &self.store.values[v]));
                        }
                    }
                }
                continue;
            }

            for i in (node.children_start..node.children_start + node.children_len).rev() {
                let child = &self.store.entries[i];
                if let Some(next_state) = self.automaton.step(&state, child.ch) {
                    self.stack.push((i, next_state));
                }
            }
        }
    }
}
