//! High-score persistence.
//!
//! The record is a single integer. On disk it is a JSON number; a missing file
//! means no record yet. Anything unreadable is reported as an error and the
//! session falls back to 0.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use log::warn;
use thiserror::Error;

use crate::ports::HighScoreStore;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("high score file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("high score file {path} is corrupt: {source}")]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("high score storage unavailable")]
    Unavailable,
}

/// High score kept in a JSON file
#[derive(Debug, Clone)]
pub struct JsonFileStore {
    path: PathBuf,
}

impl JsonFileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl HighScoreStore for JsonFileStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        let bytes = match fs::read(&self.path) {
            Ok(bytes) => bytes,
            Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(0),
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };

        serde_json::from_slice(&bytes).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        let bytes = serde_json::to_vec(&score).map_err(|source| StoreError::Format {
            path: self.path.clone(),
            source,
        })?;

        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(|source| StoreError::Io {
                path: parent.to_path_buf(),
                source,
            })?;
        }

        fs::write(&self.path, bytes).map_err(|source| StoreError::Io {
            path: self.path.clone(),
            source,
        })
    }
}

/// In-memory high score that counts writes
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    value: Option<u32>,
    saves: u32,
    fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_value(value: u32) -> Self {
        Self {
            value: Some(value),
            ..Self::default()
        }
    }

    /// A store whose every load and save fails
    pub fn unavailable() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }

    pub fn value(&self) -> Option<u32> {
        self.value
    }

    pub fn saves(&self) -> u32 {
        self.saves
    }
}

impl HighScoreStore for MemoryStore {
    fn load(&mut self) -> Result<u32, StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable);
        }
        Ok(self.value.unwrap_or(0))
    }

    fn save(&mut self, score: u32) -> Result<(), StoreError> {
        if self.fail {
            return Err(StoreError::Unavailable);
        }
        self.value = Some(score);
        self.saves += 1;
        Ok(())
    }
}

/// Load the high score, treating any failure as 0
pub fn load_or_zero(store: &mut dyn HighScoreStore) -> u32 {
    match store.load() {
        Ok(score) => score,
        Err(err) => {
            warn!("{err}; starting from a high score of 0");
            0
        }
    }
}

/// Save the high score; failures are logged and dropped
pub fn save_or_discard(store: &mut dyn HighScoreStore, score: u32) -> bool {
    match store.save(score) {
        Ok(()) => true,
        Err(err) => {
            warn!("{err}; new high score {score} not saved");
            false
        }
    }
}
