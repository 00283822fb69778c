//! Interactive poem continuation with distinct LLM-generated line alternatives.
//!
//! This crate ties the workspace together: it loads [`StanzaConfig`], builds
//! the completion backend, and exposes the pieces the `stanza` binary runs.

mod config;
mod run;

pub use config::{
    CompletionConfig, CompletionConfigBuilder, StanzaConfig, StorageConfig, build_client,
    build_engine,
};
pub use run::{generate_once, run_server};

pub use stanza_completion::{
    CompletionClient, CompletionRequest, OpenAICompatibleClient, RateLimitedClient,
};
pub use stanza_core::{Alternatives, GenerationRequest, LogFormat, PreferenceRecord, init_tracing};
pub use stanza_engine::{AlternativeEngine, ContextSampler, EngineConfig, TemperatureScheduler};
pub use stanza_error::{
    CompletionError, CompletionErrorKind, ConfigError, HttpError, HttpErrorKind, StanzaError,
    StanzaResult, StorageError, StorageErrorKind,
};
pub use stanza_server::{AppState, ServerConfig, SharedEngine, create_router, serve};
pub use stanza_storage::{PoemStore, PreferenceLog};
