//! Units of work submitted to a completion backend and what they produce.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One (prompt, temperature) pair dispatched during a generation round.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Attempt {
    /// Round this attempt belongs to (0-based)
    round: usize,
    /// Issue order within the round
    index: usize,
    /// Poem context sent to the backend
    prompt: String,
    /// Sampling temperature
    temperature: f64,
}

/// Raw text returned by one successful attempt.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct Candidate {
    /// Generated text, compared verbatim for uniqueness
    text: String,
    /// Temperature that produced it
    temperature: f64,
}

impl Candidate {
    /// Splits the candidate into its text and temperature.
    pub fn into_parts(self) -> (String, f64) {
        (self.text, self.temperature)
    }
}
