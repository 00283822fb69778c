//! Append-only log of chosen alternatives.

use stanza_core::PreferenceRecord;
use stanza_error::{StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::{debug, instrument};

/// File name of the preference log inside the data directory.
pub const PREFERENCES_FILE_NAME: &str = "line_preferences.jsonl";

/// JSON-lines log of [`PreferenceRecord`]s.
///
/// Appends through one handle are serialized so lines never interleave.
#[derive(Debug)]
pub struct PreferenceLog {
    path: PathBuf,
    write_lock: Mutex<()>,
}

impl PreferenceLog {
    /// Log stored as `line_preferences.jsonl` inside `data_dir`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            path: data_dir.as_ref().join(PREFERENCES_FILE_NAME),
            write_lock: Mutex::new(()),
        }
    }

    /// Location of the log file.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends one record as a single JSON line.
    ///
    /// # Errors
    ///
    /// Returns an error if the record cannot be encoded or the file cannot be written.
    #[instrument(skip(self, record), fields(path = %self.path.display()))]
    pub async fn append(&self, record: &PreferenceRecord) -> Result<(), StorageError> {
        let mut line = serde_json::to_string(record)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;
        line.push('\n');

        let _guard = self.write_lock.lock().await;
        if let Some(parent) = self.path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }
        let mut file = tokio::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .await?;
        file.write_all(line.as_bytes()).await?;
        file.flush().await?;

        debug!(chosen = %record.chosen(), "Recorded preference");
        Ok(())
    }

    /// Raw bytes of the log for download.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] when nothing has been recorded yet.
    pub async fn contents(&self) -> Result<Vec<u8>, StorageError> {
        match tokio::fs::read(&self.path).await {
            Ok(bytes) => Ok(bytes),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Err(StorageError::new(
                StorageErrorKind::NotFound("No preferences file found".to_string()),
            )),
            Err(e) => Err(e.into()),
        }
    }

    /// Every record in the log, oldest first. Blank lines are ignored.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is missing or a line is not a valid record.
    pub async fn records(&self) -> Result<Vec<PreferenceRecord>, StorageError> {
        let bytes = self.contents().await?;
        let text = String::from_utf8(bytes)
            .map_err(|e| StorageError::new(StorageErrorKind::Serialization(e.to_string())))?;

        text.lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line).map_err(|e| {
                    StorageError::new(StorageErrorKind::Serialization(e.to_string()))
                })
            })
            .collect()
    }
}
