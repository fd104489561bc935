// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! Runtime contracts mirroring the trie's structural invariants.
//!
//! Every function here is a `debug_assert!`-gated check: free in release
//! builds, a panic with a specific message the moment construction produces
//! a malformed arena in debug builds and tests. These aren't validating user
//! input - `Builder::build` already rejects duplicate keys - they're catching
//! bugs in the builder itself.

use crate::store::Node;

/// Check that every node's children window and tail window point inside
/// their respective arenas, that a children window is never paired with a
/// tail on the same node, and that a children window is sorted by character
/// with no duplicate edge labels.
#[inline]
pub fn check_store_well_formed(entries: &[Node], values_len: usize, tail_len: usize) {
    for (i, node) in entries.iter().enumerate() {
        check_node_well_formed(i, node, entries.len(), values_len, tail_len);
        if node.children_len > 0 {
            check_children_sorted(entries, node.children_start, node.children_len);
        }
    }
}

#[inline]
fn check_node_well_formed(index: usize, node: &Node, entries_len: usize, values_len: usize, tail_len: usize) {
    debug_assert!(
        node.children_start + node.children_len <= entries_len,
        "Contract violation: node {} children window [{}, {}) exceeds arena length {}",
        index,
        node.children_start,
        node.children_start + node.children_len,
        entries_len
    );

    debug_assert!(
        node.tail_start + node.tail_len <= tail_len,
        "Contract violation: node {} tail window [{}, {}) exceeds tail buffer length {}",
        index,
        node.tail_start,
        node.tail_start + node.tail_len,
        tail_len
    );

    debug_assert!(
        !(node.children_len > 0 && node.tail_len > 0),
        "Contract violation: node {} has both a children window and a tail",
        index
    );

    debug_assert!(
        !(node.value.is_some() && node.tail_len > 0),
        "Contract violation: node {} has both a value and a tail",
        index
    );

    if let Some(v) = node.value {
        debug_assert!(v < values_len, "Contract violation: node {} value index {} out of bounds", index, v);
    }
    if let Some(v) = node.tail_value {
        debug_assert!(v < values_len, "Contract violation: node {} tail_value index {} out of bounds", index, v);
    }
}

/// Check that a children window, considered on its own, is sorted ascending
/// by character with no duplicates - the property `Store::find_child`'s
/// binary search depends on.
#[inline]
pub fn check_children_sorted(entries: &[Node], start: usize, len: usize) {
    for i in 1..len {
        debug_assert!(
            entries[start + i - 1].ch < entries[start + i].ch,
            "Contract violation: children window [{}, {}) is not strictly sorted at offset {}",
            start,
            start + len,
            i
        );
    }
}
