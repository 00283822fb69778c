//! HTTP API for Stanza line generation and poem storage.
//!
//! All application routes live under `/api`; `/health` is always open.

mod api;
mod auth;
mod config;
mod response;
mod state;

pub use api::{cors_layer, create_router, serve};
pub use config::{ServerConfig, ServerConfigBuilder};
pub use response::ApiError;
pub use state::{AppState, SharedEngine};
