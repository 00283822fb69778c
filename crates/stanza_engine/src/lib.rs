//! Adaptive generation of distinct candidate poem lines.
//!
//! [`AlternativeEngine`] turns one poem into up to `target_count` unique
//! next-line candidates. Each round fans out concurrent completion calls with
//! randomly truncated context ([`ContextSampler`]) and escalating temperatures
//! ([`TemperatureScheduler`]), then folds the results into a deduplicating
//! [`ResultSet`] in issue order.

mod config;
mod engine;
mod pool;
mod result_set;
mod sampler;
mod temperature;

pub use config::{EngineConfig, EngineConfigBuilder};
pub use engine::AlternativeEngine;
pub use pool::WorkerPool;
pub use result_set::{InsertOutcome, ResultSet};
pub use sampler::ContextSampler;
pub use temperature::TemperatureScheduler;
