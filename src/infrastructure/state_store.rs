// Durable date -> signature mapping
use std::collections::HashMap;
use std::path::PathBuf;

use crate::error::WatchError;

/// The last known signature per schedule date, loaded once per run and
/// written back at most once. One small record per distinct date; the
/// mapping grows without eviction.
pub struct StateStore {
    path: PathBuf,
    entries: HashMap<String, String>,
    dirty: bool,
}

impl StateStore {
    /// Load the mapping from disk. A missing or unreadable file starts an
    /// empty store: stale state only means every schedule looks new again.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let entries = match std::fs::read_to_string(&path) {
            Ok(raw) => match serde_json::from_str(&raw) {
                Ok(entries) => entries,
                Err(err) => {
                    tracing::warn!(path = %path.display(), error = %err, "state file is corrupt, starting empty");
                    HashMap::new()
                }
            },
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => HashMap::new(),
            Err(err) => {
                tracing::warn!(path = %path.display(), error = %err, "state file unreadable, starting empty");
                HashMap::new()
            }
        };
        Self {
            path,
            entries,
            dirty: false,
        }
    }

    pub fn get(&self, date: &str) -> Option<&str> {
        self.entries.get(date).map(String::as_str)
    }

    pub fn insert(&mut self, date: String, signature: String) {
        self.entries.insert(date, signature);
        self.dirty = true;
    }

    pub fn is_dirty(&self) -> bool {
        self.dirty
    }

    /// Write the whole mapping back, only when something changed this run.
    /// The bytes land in a sibling temp file first and move into place with
    /// a rename, so a crash never leaves a torn state file.
    pub fn save(&mut self) -> Result<(), WatchError> {
        if !self.dirty {
            return Ok(());
        }
        let raw = serde_json::to_string_pretty(&self.entries)
            .map_err(|err| WatchError::State(std::io::Error::other(err)))?;
        let staging = self.path.with_extension("tmp");
        std::fs::write(&staging, raw)?;
        std::fs::rename(&staging, &self.path)?;
        self.dirty = false;
        Ok(())
    }
}
