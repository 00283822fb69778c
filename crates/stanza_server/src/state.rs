//! Shared handler state.

use stanza_completion::CompletionClient;
use stanza_engine::AlternativeEngine;
use stanza_storage::{PoemStore, PreferenceLog};
use std::path::Path;
use std::sync::Arc;

/// Engine over any completion backend.
pub type SharedEngine = AlternativeEngine<dyn CompletionClient>;

/// State cloned into every request handler.
#[derive(Clone)]
pub struct AppState {
    /// Line alternative generator
    pub engine: SharedEngine,
    /// Saved poems
    pub poems: PoemStore,
    /// Recorded choices
    pub preferences: Arc<PreferenceLog>,
    /// Bearer token for `/api` routes
    pub access_token: Option<Arc<str>>,
}

impl AppState {
    /// Builds state with storage rooted at `data_dir`.
    pub fn new(
        engine: SharedEngine,
        data_dir: impl AsRef<Path>,
        access_token: Option<String>,
    ) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            engine,
            poems: PoemStore::new(data_dir),
            preferences: Arc::new(PreferenceLog::new(data_dir)),
            access_token: access_token.map(Arc::from),
        }
    }
}
