//! Bounded, insertion-ordered set of accepted candidates.

use stanza_core::{Alternatives, Candidate};
use std::collections::HashSet;

/// Result of offering a candidate to a [`ResultSet`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InsertOutcome {
    /// Candidate text was new and has been stored
    Inserted,
    /// Identical text is already present
    Duplicate,
    /// The set already holds its target count
    Full,
}

/// Unique candidate lines keyed by exact text, bounded at a target size.
///
/// Text is compared verbatim; lines differing only in whitespace or
/// punctuation are distinct.
#[derive(Debug, Clone)]
pub struct ResultSet {
    capacity: usize,
    entries: Vec<(String, f64)>,
    seen: HashSet<String>,
}

impl ResultSet {
    /// Creates an empty set holding at most `capacity` entries.
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            entries: Vec::with_capacity(capacity),
            seen: HashSet::with_capacity(capacity),
        }
    }

    /// Stores the candidate unless its text is a duplicate or the set is full.
    pub fn insert(&mut self, candidate: Candidate) -> InsertOutcome {
        if self.is_full() {
            return InsertOutcome::Full;
        }
        let (text, temperature) = candidate.into_parts();
        if !self.seen.insert(text.clone()) {
            return InsertOutcome::Duplicate;
        }
        self.entries.push((text, temperature));
        InsertOutcome::Inserted
    }

    /// Number of stored candidates.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True when nothing has been stored.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// True once the target count is reached.
    pub fn is_full(&self) -> bool {
        self.entries.len() >= self.capacity
    }

    /// Slots left before the target count is reached.
    pub fn remaining(&self) -> usize {
        self.capacity.saturating_sub(self.entries.len())
    }

    /// True if `text` has already been accepted.
    pub fn contains(&self, text: &str) -> bool {
        self.seen.contains(text)
    }

    /// Consumes the set into the caller-facing result.
    pub fn into_alternatives(self, rounds: usize) -> Alternatives {
        Alternatives::from_pairs(self.entries, rounds)
    }
}
