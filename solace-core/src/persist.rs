//! Resolution journal persistence.
//!
//! The journal is append-only: each arbitrated turn adds one immutable
//! record, and prior records are never rewritten. JSON on disk,
//! version-stamped for compatibility checking.

use crate::arbiter::TurnResolution;
use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tokio::fs;

/// Errors from persistence operations.
#[derive(Debug, Error)]
pub enum PersistError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Version mismatch: expected {expected}, found {found}")]
    VersionMismatch { expected: u32, found: u32 },
}

/// Current journal file version.
const JOURNAL_VERSION: u32 = 1;

/// Metadata about a journal for quick display.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JournalMetadata {
    /// Name of the tribe this journal belongs to.
    pub tribe_name: String,

    /// Number of turns resolved so far.
    pub turns_resolved: u32,

    /// When the journal was created.
    #[serde(default)]
    pub created_at: String,
}

/// An append-only journal of turn resolutions.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResolutionJournal {
    /// File format version for compatibility checking.
    pub version: u32,

    /// Quick-access metadata.
    pub metadata: JournalMetadata,

    /// The resolution records, oldest first. Private: append-only access.
    resolutions: Vec<TurnResolution>,
}

impl ResolutionJournal {
    /// Create an empty journal for a tribe.
    pub fn new(tribe_name: impl Into<String>) -> Self {
        Self {
            version: JOURNAL_VERSION,
            metadata: JournalMetadata {
                tribe_name: tribe_name.into(),
                turns_resolved: 0,
                created_at: now_rfc3339(),
            },
            resolutions: Vec::new(),
        }
    }

    /// Append one resolution record. Records are never mutated or removed.
    pub fn append(&mut self, resolution: TurnResolution) {
        self.resolutions.push(resolution);
        self.metadata.turns_resolved = self.resolutions.len() as u32;
    }

    /// All resolution records, oldest first.
    pub fn resolutions(&self) -> &[TurnResolution] {
        &self.resolutions
    }

    /// The most recent resolution, if any turn has been played.
    pub fn latest(&self) -> Option<&TurnResolution> {
        self.resolutions.last()
    }

    pub fn len(&self) -> usize {
        self.resolutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.resolutions.is_empty()
    }

    /// Save to a JSON file.
    pub async fn save_json(&self, path: impl AsRef<Path>) -> Result<(), PersistError> {
        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content).await?;
        Ok(())
    }

    /// Load from a JSON file.
    pub async fn load_json(path: impl AsRef<Path>) -> Result<Self, PersistError> {
        let content = fs::read_to_string(path).await?;
        let journal: Self = serde_json::from_str(&content)?;

        if journal.version != JOURNAL_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: JOURNAL_VERSION,
                found: journal.version,
            });
        }

        Ok(journal)
    }

    /// Get a journal's metadata without loading every record.
    pub async fn peek_metadata(path: impl AsRef<Path>) -> Result<JournalMetadata, PersistError> {
        let content = fs::read_to_string(path).await?;

        // Parse just enough to get metadata
        #[derive(Deserialize)]
        struct Partial {
            version: u32,
            metadata: JournalMetadata,
        }

        let partial: Partial = serde_json::from_str(&content)?;

        if partial.version != JOURNAL_VERSION {
            return Err(PersistError::VersionMismatch {
                expected: JOURNAL_VERSION,
                found: partial.version,
            });
        }

        Ok(partial.metadata)
    }
}

/// Information about a journal file.
#[derive(Debug, Clone)]
pub struct JournalInfo {
    /// Path to the journal file.
    pub path: String,

    /// Journal metadata.
    pub metadata: JournalMetadata,
}

/// List all journal files in a directory.
pub async fn list_journals(dir: impl AsRef<Path>) -> Result<Vec<JournalInfo>, PersistError> {
    let mut journals = Vec::new();

    let dir_path = dir.as_ref();
    if !dir_path.exists() {
        fs::create_dir_all(dir_path).await?;
        return Ok(journals);
    }

    let mut entries = fs::read_dir(dir_path).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        if path.extension().map(|e| e == "json").unwrap_or(false) {
            if let Ok(metadata) = ResolutionJournal::peek_metadata(&path).await {
                journals.push(JournalInfo {
                    path: path.to_string_lossy().to_string(),
                    metadata,
                });
            }
        }
    }

    // Sort by tribe name
    journals.sort_by(|a, b| a.metadata.tribe_name.cmp(&b.metadata.tribe_name));
    Ok(journals)
}

/// Generate a journal path for a tribe.
pub fn journal_path(dir: impl AsRef<Path>, tribe_name: &str) -> std::path::PathBuf {
    let sanitized = tribe_name
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect::<String>();
    dir.as_ref().join(format!("{sanitized}.json"))
}

/// Current timestamp as RFC 3339.
fn now_rfc3339() -> String {
    chrono::Utc::now().to_rfc3339()
}
