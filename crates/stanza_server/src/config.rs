//! Listener and access settings for the HTTP server.

use derive_getters::Getters;
use serde::{Deserialize, Serialize};

/// Where the server listens and which bearer token it requires.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Getters, derive_builder::Builder)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct ServerConfig {
    /// Interface to bind
    host: String,
    /// TCP port
    port: u16,
    /// Bearer token required on `/api` routes; open when unset
    access_token: Option<String>,
    /// Browser origins allowed to call the API
    cors_origins: Vec<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".to_string(),
            port: 8888,
            access_token: None,
            cors_origins: vec!["http://localhost:8888".to_string()],
        }
    }
}

impl ServerConfig {
    /// Creates a new builder for ServerConfig.
    pub fn builder() -> ServerConfigBuilder {
        ServerConfigBuilder::default()
    }

    /// `host:port` string for binding.
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
