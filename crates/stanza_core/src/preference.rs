//! The user's choice among generated alternatives.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// One recorded choice, stored as a single JSON line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct PreferenceRecord {
    /// Poem text the alternatives were generated for
    current_text: String,
    /// Alternatives that were offered
    alternatives: Vec<String>,
    /// The alternative the user picked
    chosen: String,
}
