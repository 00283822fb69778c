//! Poem files named `{timestamp}-{id}-{slug}.txt`.

use crate::slugify;
use chrono::{Local, NaiveDateTime};
use stanza_core::{PoemContent, PoemSummary};
use stanza_error::{StorageError, StorageErrorKind};
use std::path::{Path, PathBuf};
use tracing::{debug, info, instrument, warn};

const TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";
const CREATED_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";
const SLUG_SOURCE_CHARS: usize = 50;

/// Directory of saved poems, one file per poem id.
#[derive(Debug, Clone)]
pub struct PoemStore {
    dir: PathBuf,
}

/// Filename parts of a saved poem.
struct ParsedName {
    created: NaiveDateTime,
    id: String,
}

impl ParsedName {
    fn parse(path: &Path) -> Option<Self> {
        if path.extension().and_then(|e| e.to_str()) != Some("txt") {
            return None;
        }
        let stem = path.file_stem()?.to_str()?;
        let mut parts = stem.splitn(3, '-');
        let timestamp = parts.next()?;
        let id = parts.next()?;
        let created = NaiveDateTime::parse_from_str(timestamp, TIMESTAMP_FORMAT).ok()?;
        Some(Self {
            created,
            id: id.to_string(),
        })
    }
}

impl PoemStore {
    /// Store rooted at `{data_dir}/poems`.
    pub fn new(data_dir: impl AsRef<Path>) -> Self {
        Self {
            dir: data_dir.as_ref().join("poems"),
        }
    }

    /// Directory holding the poem files.
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Saves a poem stamped with the current local time.
    ///
    /// # Errors
    ///
    /// See [`PoemStore::save_at`].
    pub async fn save(&self, id: &str, content: &str) -> Result<String, StorageError> {
        self.save_at(id, content, Local::now().naive_local()).await
    }

    /// Saves a poem, replacing every earlier file for the same id.
    ///
    /// Returns the new file name.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::InvalidInput`] for empty content or an
    /// unusable id, and an I/O error if the directory cannot be written.
    #[instrument(skip(self, content), fields(dir = %self.dir.display()))]
    pub async fn save_at(
        &self,
        id: &str,
        content: &str,
        saved_at: NaiveDateTime,
    ) -> Result<String, StorageError> {
        let content = content.trim();
        if content.is_empty() {
            return Err(StorageError::new(StorageErrorKind::InvalidInput(
                "Empty poem".to_string(),
            )));
        }
        validate_id(id)?;

        let first_line: String = content
            .lines()
            .next()
            .unwrap_or_default()
            .chars()
            .take(SLUG_SOURCE_CHARS)
            .collect();
        let filename = format!(
            "{}-{}-{}.txt",
            saved_at.format(TIMESTAMP_FORMAT),
            id,
            slugify(&first_line)
        );

        tokio::fs::create_dir_all(&self.dir).await?;
        for old in self.files_for(id).await? {
            debug!(path = %old.display(), "Removing previous version");
            tokio::fs::remove_file(&old).await?;
        }
        tokio::fs::write(self.dir.join(&filename), content).await?;

        info!(%filename, "Saved poem");
        Ok(filename)
    }

    /// Lists saved poems, newest first. Files with malformed names are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if the directory cannot be read.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub async fn list(&self) -> Result<Vec<PoemSummary>, StorageError> {
        tokio::fs::create_dir_all(&self.dir).await?;

        let mut paths = self.txt_files().await?;
        paths.sort_by(|a, b| b.file_name().cmp(&a.file_name()));

        let mut poems = Vec::with_capacity(paths.len());
        for path in paths {
            let Some(parsed) = ParsedName::parse(&path) else {
                warn!(path = %path.display(), "Skipping malformed poem file");
                continue;
            };
            let content = match tokio::fs::read_to_string(&path).await {
                Ok(content) => content,
                Err(e) => {
                    warn!(path = %path.display(), error = %e, "Skipping unreadable poem file");
                    continue;
                }
            };
            let first_line = content.lines().next().unwrap_or_default().trim().to_string();
            let filename = path
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();

            poems.push(PoemSummary::new(
                parsed.id,
                first_line,
                parsed.created.format(CREATED_FORMAT).to_string(),
                filename,
            ));
        }

        Ok(poems)
    }

    /// Loads the poem saved under `id`.
    ///
    /// # Errors
    ///
    /// Returns [`StorageErrorKind::NotFound`] when no file exists for `id`.
    #[instrument(skip(self), fields(dir = %self.dir.display()))]
    pub async fn load(&self, id: &str) -> Result<PoemContent, StorageError> {
        let not_found = || StorageError::new(StorageErrorKind::NotFound("Poem not found".to_string()));
        if validate_id(id).is_err() {
            return Err(not_found());
        }

        match self.files_for(id).await?.into_iter().next() {
            Some(path) => {
                let content = tokio::fs::read_to_string(&path).await?;
                Ok(PoemContent::new(content))
            }
            None => Err(not_found()),
        }
    }

    async fn files_for(&self, id: &str) -> Result<Vec<PathBuf>, StorageError> {
        Ok(self
            .txt_files()
            .await?
            .into_iter()
            .filter(|path| ParsedName::parse(path).is_some_and(|p| p.id == id))
            .collect())
    }

    async fn txt_files(&self) -> Result<Vec<PathBuf>, StorageError> {
        let mut entries = match tokio::fs::read_dir(&self.dir).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(Vec::new()),
            Err(e) => return Err(e.into()),
        };

        let mut paths = Vec::new();
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("txt") {
                paths.push(path);
            }
        }
        Ok(paths)
    }
}

fn validate_id(id: &str) -> Result<(), StorageError> {
    if id.is_empty() {
        return Err(StorageError::new(StorageErrorKind::InvalidInput(
            "No poem ID provided".to_string(),
        )));
    }
    if id
        .chars()
        .any(|c| c == '-' || c == '.' || c == '/' || c == '\\' || c.is_whitespace())
    {
        return Err(StorageError::new(StorageErrorKind::InvalidInput(format!(
            "Invalid poem ID: {}",
            id
        ))));
    }
    Ok(())
}
