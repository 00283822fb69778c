//! Filesystem persistence for poems and line preferences.
//!
//! Poems live as plain text files under `{data_dir}/poems`; every choice
//! between generated alternatives is appended to
//! `{data_dir}/line_preferences.jsonl`.

mod poems;
mod preferences;
mod slug;

pub use poems::PoemStore;
pub use preferences::{PREFERENCES_FILE_NAME, PreferenceLog};
pub use slug::slugify;
