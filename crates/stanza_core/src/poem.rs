//! Poem persistence DTOs.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Body of a save request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct SavePoemRequest {
    /// Client-assigned poem identifier
    #[serde(default)]
    id: String,
    /// Full poem text
    #[serde(default)]
    content: String,
}

/// Listing entry for a saved poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct PoemSummary {
    /// Poem identifier
    id: String,
    /// First line of the poem
    first_line: String,
    /// Save time, ISO-8601 without offset
    created: String,
    /// File name on disk
    filename: String,
}

/// Full text of a saved poem.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_new::new)]
pub struct PoemContent {
    /// Poem text
    content: String,
}
