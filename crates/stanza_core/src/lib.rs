//! Core data types for the Stanza line-alternative generator.
//!
//! This crate provides the data types shared by the engine, the completion
//! backends, storage, and the HTTP layer.

mod attempt;
mod observability;
mod poem;
mod preference;
mod request;

pub use attempt::{Attempt, Candidate};
pub use observability::{LogFormat, init_tracing};
pub use poem::{PoemContent, PoemSummary, SavePoemRequest};
pub use preference::PreferenceRecord;
pub use request::{Alternatives, GenerationRequest};
