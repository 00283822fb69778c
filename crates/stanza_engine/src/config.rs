//! Engine tuning knobs.

use derive_builder::Builder;
use derive_getters::Getters;
use serde::{Deserialize, Serialize};
use stanza_error::ConfigError;
use std::time::Duration;

/// Limits and sampling parameters for [`crate::AlternativeEngine`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Getters, Builder)]
#[builder(default, setter(into))]
#[serde(default)]
pub struct EngineConfig {
    /// Number of distinct alternatives to aim for
    target_count: usize,
    /// Upper bound on generation rounds
    max_rounds: usize,
    /// Maximum completion calls in flight at once
    max_concurrency: usize,
    /// Per-attempt deadline in milliseconds
    attempt_timeout_ms: u64,
    /// Chance that an attempt sees truncated context
    truncation_probability: f64,
    /// Largest number of trailing lines kept when truncating
    max_context_lines: usize,
    /// Token budget for each completion
    max_tokens: u32,
    /// Stop sequences for each completion
    stop: Vec<String>,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            target_count: 5,
            max_rounds: 10,
            max_concurrency: 5,
            attempt_timeout_ms: 30_000,
            truncation_probability: 0.7,
            max_context_lines: 3,
            max_tokens: 100,
            stop: vec!["\n".to_string()],
        }
    }
}

impl EngineConfig {
    /// Creates a new builder for EngineConfig.
    pub fn builder() -> EngineConfigBuilder {
        EngineConfigBuilder::default()
    }

    /// Per-attempt deadline.
    pub fn attempt_timeout(&self) -> Duration {
        Duration::from_millis(self.attempt_timeout_ms)
    }

    /// Rejects settings the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns an error if a count is zero or the probability is outside `[0, 1]`.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.target_count == 0 {
            return Err(ConfigError::new("engine.target_count must be at least 1"));
        }
        if self.max_concurrency == 0 {
            return Err(ConfigError::new("engine.max_concurrency must be at least 1"));
        }
        if self.max_context_lines == 0 {
            return Err(ConfigError::new("engine.max_context_lines must be at least 1"));
        }
        if !(0.0..=1.0).contains(&self.truncation_probability) {
            return Err(ConfigError::new(format!(
                "engine.truncation_probability must be within [0, 1], got {}",
                self.truncation_probability
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        let config = EngineConfig::default();
        assert!(config.validate().is_ok());
        assert_eq!(*config.target_count(), 5);
        assert_eq!(*config.max_rounds(), 10);
        assert_eq!(config.attempt_timeout(), Duration::from_secs(30));
    }

    #[test]
    fn test_builder_overrides_and_keeps_defaults() {
        let config = EngineConfig::builder()
            .max_rounds(3usize)
            .build()
            .expect("Valid config");
        assert_eq!(*config.max_rounds(), 3);
        assert_eq!(*config.target_count(), 5);
    }

    #[test]
    fn test_rejects_bad_values() {
        let zero_target = EngineConfig::builder().target_count(0usize).build().unwrap();
        assert!(zero_target.validate().is_err());

        let zero_pool = EngineConfig::builder().max_concurrency(0usize).build().unwrap();
        assert!(zero_pool.validate().is_err());

        let bad_probability = EngineConfig::builder()
            .truncation_probability(1.5)
            .build()
            .unwrap();
        assert!(bad_probability.validate().is_err());
    }
}
