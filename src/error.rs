// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

//! The error taxonomy for construction, query, and automaton-factory boundaries.
//!
//! Every variant here corresponds to one of the failure kinds in the design doc's
//! error-handling section. None are retryable: they all describe a malformed
//! argument, not a transient condition. The hot path (`Automaton::step` during a
//! walk) never produces one of these - rejection there is an ordinary `None`,
//! not an error.

use std::fmt;

/// Errors produced at the API boundary of trie construction and fuzzy search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Error {
    /// The same key (under the active case policy) was supplied twice to `build`.
    DuplicateKey,
    /// A key contained a lone (unpaired) surrogate code unit rather than a valid
    /// Unicode scalar value.
    InvalidInput,
    /// `k` was negative.
    InvalidDistance { k: i64 },
    /// An automaton was built with a case policy that disagrees with the store
    /// it's being used against.
    CasePolicyMismatch,
    /// `k` exceeded the largest distance any backend can represent.
    DistanceCeilingExceeded { k: i64, ceiling: u8 },
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::DuplicateKey => write!(f, "duplicate key under the active case policy"),
            Error::InvalidInput => {
                write!(f, "key contains a lone surrogate code unit, not a scalar value")
            }
            Error::InvalidDistance { k } => {
                write!(f, "distance bound {k} is negative")
            }
            Error::CasePolicyMismatch => {
                write!(f, "automaton case policy does not match the store's case policy")
            }
            Error::DistanceCeilingExceeded { k, ceiling } => {
                write!(f, "distance bound {k} exceeds the implementation ceiling of {ceiling}")
            }
        }
    }
}

impl std::error::Error for Error {}

pub type Result<T> = std::result::Result<T, Error>;
