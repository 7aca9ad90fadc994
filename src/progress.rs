/*!
 * Persisted run progress.
 *
 * The progress file is a flat JSON object:
 * `{"translated": [<filename>, ...], "failed": [<filename>, ...]}`.
 * A missing file means a fresh run; a malformed one is a fatal error.
 */

use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

use crate::errors::ProgressError;

/// Names of pages already handled, by outcome
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgressRecord {
    /// Pages with an output file written
    #[serde(default)]
    pub translated: BTreeSet<String>,

    /// Pages whose last attempt failed
    #[serde(default)]
    pub failed: BTreeSet<String>,
}

impl ProgressRecord {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_translated(&self, file_name: &str) -> bool {
        self.translated.contains(file_name)
    }

    pub fn is_failed(&self, file_name: &str) -> bool {
        self.failed.contains(file_name)
    }

    /// Record a success. Returns whether the record changed.
    pub fn mark_translated(&mut self, file_name: &str) -> bool {
        let cleared = self.failed.remove(file_name);
        let added = self.translated.insert(file_name.to_string());
        cleared || added
    }

    /// Record a failure. Returns whether the record changed.
    pub fn mark_failed(&mut self, file_name: &str) -> bool {
        let cleared = self.translated.remove(file_name);
        let added = self.failed.insert(file_name.to_string());
        cleared || added
    }
}

/// Loads and saves a `ProgressRecord` at a fixed path
#[derive(Debug, Clone)]
pub struct ProgressStore {
    path: PathBuf,
}

impl ProgressStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the record, or an empty one if nothing has been persisted yet.
    pub fn load(&self) -> Result<ProgressRecord, ProgressError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!("No progress file at {:?}, starting fresh", self.path);
                return Ok(ProgressRecord::new());
            }
            Err(source) => {
                return Err(ProgressError::Io {
                    path: self.path.clone(),
                    source,
                });
            }
        };

        serde_json::from_str(&raw).map_err(|source| ProgressError::Corrupt {
            path: self.path.clone(),
            source,
        })
    }

    /// Persist the full record, replacing the previous file in one rename.
    pub fn save(&self, record: &ProgressRecord) -> Result<(), ProgressError> {
        let io_error = |source: std::io::Error| ProgressError::Io {
            path: self.path.clone(),
            source,
        };

        let json = serde_json::to_string_pretty(record).map_err(|e| io_error(e.into()))?;

        let dir = match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        };
        fs::create_dir_all(dir).map_err(io_error)?;

        let mut temp = NamedTempFile::new_in(dir).map_err(io_error)?;
        temp.write_all(json.as_bytes()).map_err(io_error)?;
        temp.persist(&self.path).map_err(|e| io_error(e.error))?;

        debug!(
            "Saved progress to {:?} ({} translated, {} failed)",
            self.path,
            record.translated.len(),
            record.failed.len()
        );
        Ok(())
    }
}
