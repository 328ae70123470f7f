use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tracing::warn;

use crate::state::AppState;

/// Storage identifier carried over from the first shipped data format.
pub const STORAGE_KEY: &str = "habitnexus_v1_data";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to write state file: {0}")]
    Io(#[from] io::Error),
    #[error("failed to encode state: {0}")]
    Encode(#[from] serde_json::Error),
}

/// Load/save boundary for the whole [`AppState`], one JSON document in a
/// caller-chosen directory.
#[derive(Debug, Clone)]
pub struct StateStore {
    path: PathBuf,
}

impl StateStore {
    pub fn new(dir: impl AsRef<Path>) -> Self {
        Self {
            path: dir.as_ref().join(format!("{STORAGE_KEY}.json")),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Reads the persisted state. A missing file is a fresh install; an
    /// unreadable or corrupt file is logged and degrades to defaults
    /// rather than blocking startup.
    pub fn load(&self) -> AppState {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return AppState::default(),
            Err(err) => {
                warn!(path = %self.path.display(), %err, "could not read state file, starting fresh");
                return AppState::default();
            }
        };
        match serde_json::from_str(&raw) {
            Ok(state) => state,
            Err(err) => {
                warn!(path = %self.path.display(), %err, "state file is corrupt, starting fresh");
                AppState::default()
            }
        }
    }

    pub fn save(&self, state: &AppState) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)?;
        }
        let raw = serde_json::to_string_pretty(state)?;
        fs::write(&self.path, raw)?;
        Ok(())
    }
}
