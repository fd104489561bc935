// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Sort, partition, and suffix-compress a key/value collection into a
//! [`Store`](crate::store::Store).
//!
//! The trie is built bottom-up from a sorted key list rather than grown one
//! insertion at a time: every node and its final position in the flat arena
//! is known before anything is written, so there's no reallocation or
//! pointer-patching during construction.

use std::cmp::Ordering;

use crate::case::CaseFold;
use crate::error::{Error, Result};
use crate::store::{Node, Store};

/// Accumulates key/value pairs, then compiles them into an immutable [`Store`].
pub struct Builder<V> {
    case: CaseFold,
    items: Vec<(String, V)>,
}

impl<V> Builder<V> {
    pub fn new(case: CaseFold) -> Self {
        Builder { case, items: Vec::new() }
    }

    /// Queue a key/value pair. Keys are folded under the builder's case
    /// policy at `build` time, not here, so later changes to the policy
    /// (there are none - it's fixed per builder) can't desync insertion order.
    pub fn insert(&mut self, key: &str, value: V) {
        self.items.push((key.to_string(), value));
    }

    /// Queue a key supplied as raw Unicode code points rather than a
    /// validated `&str` - the path for callers whose keys originate from a
    /// `Vec<u32>`, WTF-8, or UTF-16 source instead of already-validated text.
    ///
    /// Every `char` reachable through `&str`/`.chars()` already excludes lone
    /// surrogates, which is why [`Builder::insert`] can never fail; this is
    /// the one place a lone (unpaired) surrogate half can actually surface as
    /// `Error::InvalidInput` instead of being silently replaced.
    pub fn insert_code_points(&mut self, code_points: &[u32], value: V) -> Result<()> {
        let key: String = code_points
            .iter()
            .map(|&cp| char::from_u32(cp).ok_or(Error::InvalidInput))
            .collect::<Result<String>>()?;
        self.insert(&key, value);
        Ok(())
    }

    pub fn with_capacity(case: CaseFold, capacity: usize) -> Self {
        Builder { case, items: Vec::with_capacity(capacity) }
    }

    /// Compile the queued entries into a `Store`.
    ///
    /// Returns `Error::DuplicateKey` if two keys fold to the same canonical
    /// path under the builder's case policy.
    pub fn build(self) -> Result<Store<V>> {
        let case = self.case;
        let mut folded: Vec<(Vec<char>, V)> = self
            .items
            .into_iter()
            .map(|(k, v)| (case.fold_str(&k).chars().collect::<Vec<char>>(), v))
            .collect();

        sort_items(&mut folded, case);
        check_no_duplicates(&folded)?;

        let mut root_value = None;
        let mut rest = Vec::with_capacity(folded.len());
        for (chars, value) in folded {
            if chars.is_empty() {
                root_value = Some(value);
            } else {
                rest.push((chars, value));
            }
        }

        let mut tail: Vec<char> = Vec::new();
        let mut values: Vec<V> = Vec::new();
        let root_value = root_value.map(|v| {
            values.push(v);
            values.len() - 1
        });

        let (root_len, entries) = build_level(rest, &mut tail, &mut values);

        Ok(Store::from_parts(entries, values, tail, root_len, root_value, case))
    }
}

#[cfg(feature = "parallel")]
fn sort_items<V: Send>(items: &mut [(Vec<char>, V)], case: CaseFold) {
    use rayon::slice::ParallelSliceMut;
    items.par_sort_by(|a, b| case.compare(&a.0, &b.0));
}

#[cfg(not(feature = "parallel"))]
fn sort_items<V>(items: &mut [(Vec<char>, V)], case: CaseFold) {
    items.sort_by(|a, b| case.compare(&a.0, &b.0));
}

fn check_no_duplicates<V>(items: &[(Vec<char>, V)]) -> Result<()> {
    for pair in items.windows(2) {
        if pair[0].0 == pair[1].0 {
            return Err(Error::DuplicateKey);
        }
    }
    Ok(())
}

/// One first-character group among a sorted run of remaining suffixes: the
/// character itself, a value if some key ends exactly here, and whatever
/// suffixes continue deeper.
type Group<V> = (char, Option<V>, Vec<(Vec<char>, V)>);

fn group_by_first_char<V>(items: Vec<(Vec<char>, V)>) -> Vec<Group<V>> {
    let mut groups: Vec<Group<V>> = Vec::new();
    for (suffix, value) in items {
        let ch = suffix[0];
        let rest = suffix[1..].to_vec();
        let is_new_group = match groups.last() {
            Some((last_ch, _, _)) => *last_ch != ch,
            None => true,
        };
        if is_new_group {
            if rest.is_empty() {
                groups.push((ch, Some(value), Vec::new()));
            } else {
                groups.push((ch, None, vec![(rest, value)]));
            }
        } else {
            let group = groups.last_mut().expect("just checked non-empty");
            if rest.is_empty() {
                debug_assert!(group.1.is_none(), "duplicate key escaped earlier rejection");
                group.1 = Some(value);
            } else {
                group.2.push((rest, value));
            }
        }
    }
    groups
}

/// Build one level of the trie from a sorted run of remaining suffixes.
///
/// Returns `(direct_child_count, arena)`, where `arena[0..direct_child_count]`
/// are this level's own nodes (in ascending character order) and anything
/// past that is deeper descendants, already flattened and offset-adjusted.
fn build_level<V>(items: Vec<(Vec<char>, V)>, tail: &mut Vec<char>, values: &mut Vec<V>) -> (usize, Vec<Node>) {
    let groups = group_by_first_char(items);
    let own_count = groups.len();
    let mut arena: Vec<Node> = (0..own_count).map(|_| Node::default()).collect();

    for (i, (ch, value_opt, sub_items)) in groups.into_iter().enumerate() {
        arena[i].ch = ch;
        let has_value = value_opt.is_some();
        if let Some(v) = value_opt {
            values.push(v);
            arena[i].value = Some(values.len() - 1);
        }

        // A node that already holds a value can't also collapse its single
        // remaining child into a tail - tail data and a value on the same
        // node would make `try_get` ambiguous about which one a key of the
        // node's own length should resolve to. Recurse into a real child
        // level instead, even though there's only one suffix to place there.
        match (has_value, sub_items.len().cmp(&1)) {
            (false, Ordering::Equal) => {
                let (tail_chars, tail_val) = sub_items.into_iter().next().expect("len == 1");
                let start = tail.len();
                tail.extend(tail_chars);
                values.push(tail_val);
                arena[i].tail_start = start;
                arena[i].tail_len = tail.len() - start;
                arena[i].tail_value = Some(values.len() - 1);
            }
            (_, Ordering::Greater) | (true, Ordering::Equal) => {
                let offset = arena.len();
                let (child_count, mut child_arena) = build_level(sub_items, tail, values);
                for node in &mut child_arena {
                    node.children_start += offset;
                }
                arena[i].children_start = offset;
                arena[i].children_len = child_count;
                arena.append(&mut child_arena);
            }
            (_, Ordering::Less) => {} // no deeper keys through this character
        }
    }

    (own_count, arena)
}
