//! Request and response types for line generation.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Input to one generation: the poem written so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct GenerationRequest {
    /// Newline-delimited poem text
    #[new(into)]
    current_text: String,
}

/// Distinct candidate next-lines with the temperatures that produced them.
///
/// `alternatives` and `temperatures` always have the same length. A list
/// shorter than requested is a valid, degraded outcome.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize, Getters)]
pub struct Alternatives {
    /// Unique candidate lines in insertion order
    alternatives: Vec<String>,
    /// Temperature for each entry of `alternatives`
    temperatures: Vec<f64>,
    /// Number of rounds the engine executed
    #[serde(skip)]
    rounds: usize,
}

impl Alternatives {
    /// Builds a result from accepted `(text, temperature)` pairs.
    pub fn from_pairs(pairs: impl IntoIterator<Item = (String, f64)>, rounds: usize) -> Self {
        let (alternatives, temperatures) = pairs.into_iter().unzip();
        Self {
            alternatives,
            temperatures,
            rounds,
        }
    }

    /// Number of alternatives.
    pub fn len(&self) -> usize {
        self.alternatives.len()
    }

    /// True when no alternative was produced.
    pub fn is_empty(&self) -> bool {
        self.alternatives.is_empty()
    }

    /// Iterates over `(text, temperature)` pairs.
    pub fn iter(&self) -> impl Iterator<Item = (&str, f64)> {
        self.alternatives
            .iter()
            .map(String::as_str)
            .zip(self.temperatures.iter().copied())
    }
}
