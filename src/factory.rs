// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Builds [`FuzzyAutomaton`]s for a query, memoizing the expensive part (the
//! parametric transition table) across calls that share a `k`.
//!
//! The table built in `levenshtein_dfa` depends only on `k`, never on the
//! query string, so it's safe - and worth it - to build it once per `k` and
//! reuse it for every subsequent search at that distance. The first caller to
//! ask for a given `k` pays the BFS construction cost; everyone after gets
//! the cached table.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use crate::automaton::{ExactAutomaton, FuzzyAutomaton, RowDpAutomaton, TableAutomaton};
use crate::case::CaseFold;
use crate::error::{Error, Result};
use crate::levenshtein_dfa::{ParametricTable, MAX_TABLE_K};
use crate::metric::Metric;

/// Largest `k` any backend will serve. Above this the cost of a correct
/// answer (one DP row per input character, width proportional to the query)
/// stops being worth it for what is almost always a typo-tolerance feature.
pub const K_CEILING: u8 = 30;

/// Produces automatons for queries, caching the per-`k` parametric table.
#[derive(Debug, Default)]
pub struct Factory {
    tables: Mutex<HashMap<u8, Arc<ParametricTable>>>,
}

impl Factory {
    pub fn new() -> Self {
        Factory { tables: Mutex::new(HashMap::new()) }
    }

    /// Build the automaton for `query` at distance bound `k` under `metric`
    /// and `case`. Chooses among the exact, table-driven, and row-DP backends
    /// based on `k` and `metric`; see `automaton.rs` for the dispatch rule.
    pub fn construct(&self, query: &str, k: i64, metric: Metric, case: CaseFold) -> Result<FuzzyAutomaton> {
        if k < 0 {
            return Err(Error::InvalidDistance { k });
        }
        if k as u64 > K_CEILING as u64 {
            return Err(Error::DistanceCeilingExceeded { k, ceiling: K_CEILING });
        }
        let k = k as u8;
        let chars: Arc<[char]> = query.chars().collect::<Vec<_>>().into();

        if k == 0 {
            return Ok(FuzzyAutomaton::Exact(ExactAutomaton::new(chars, case)));
        }
        if metric == Metric::Levenshtein && k <= MAX_TABLE_K {
            let table = self.table_for(k);
            return Ok(FuzzyAutomaton::Table(TableAutomaton::new(table, chars, case)));
        }
        Ok(FuzzyAutomaton::RowDp(RowDpAutomaton::new(chars, case, k as u32, metric)))
    }

    fn table_for(&self, k: u8) -> Arc<ParametricTable> {
        let mut tables = self.tables.lock().expect("factory table cache poisoned");
        tables.entry(k).or_insert_with(|| Arc::new(ParametricTable::build(k))).clone()
    }
}
