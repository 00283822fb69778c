//! Entry points behind the `stanza` subcommands.

use crate::{StanzaConfig, build_engine};
use stanza_core::Alternatives;
use stanza_error::StanzaResult;
use stanza_server::{AppState, create_router, serve};
use tracing::{info, instrument};

/// Builds the backend and serves the HTTP API until shutdown.
///
/// # Errors
///
/// Returns a configuration error if the backend cannot be built, or an HTTP
/// error if the listener cannot be bound or the server fails.
#[instrument(skip_all, fields(address = %config.server().bind_address()))]
pub async fn run_server(config: &StanzaConfig) -> StanzaResult<()> {
    let engine = build_engine(config)?;
    let state = AppState::new(
        engine,
        config.storage().data_dir(),
        config.server().access_token().clone(),
    );
    info!("Starting Stanza server");
    serve(config.server(), create_router(state)).await?;
    Ok(())
}

/// Generates one set of alternatives for `text`.
///
/// # Errors
///
/// Returns a configuration error if the backend cannot be built. Backend
/// failures during generation only shorten the result.
#[instrument(skip_all, fields(text_len = text.len()))]
pub async fn generate_once(config: &StanzaConfig, text: &str) -> StanzaResult<Alternatives> {
    let engine = build_engine(config)?;
    Ok(engine.generate(text).await)
}
