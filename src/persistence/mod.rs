//! Best-score persistence
//!
//! The core only ever asks for two things: read the best score once at
//! startup, and write it when a session beats it. Both are best effort; the
//! driver logs failures and keeps playing.

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod web;

#[cfg(not(target_arch = "wasm32"))]
pub use file::FileStore;
#[cfg(target_arch = "wasm32")]
pub use web::LocalStorageStore;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors a score store can report
#[derive(Error, Debug)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("stored record is malformed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("storage unavailable: {0}")]
    Unavailable(String),

    #[error("unsupported record version {0}")]
    UnsupportedVersion(u32),
}

/// Storage for the best score
pub trait ScoreStore {
    /// Read the stored best score. A missing record is `Ok(0)`.
    fn load_best_score(&mut self) -> Result<u64, PersistenceError>;

    /// Overwrite the stored best score
    fn save_best_score(&mut self, score: u64) -> Result<(), PersistenceError>;
}

impl<S: ScoreStore + ?Sized> ScoreStore for Box<S> {
    fn load_best_score(&mut self) -> Result<u64, PersistenceError> {
        (**self).load_best_score()
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        (**self).save_best_score(score)
    }
}

/// Current on-disk record version
pub const RECORD_VERSION: u32 = 1;

/// Versioned JSON envelope shared by the file and LocalStorage backends
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BestScoreRecord {
    pub version: u32,
    pub best_score: u64,
}

impl BestScoreRecord {
    pub fn new(best_score: u64) -> Self {
        Self {
            version: RECORD_VERSION,
            best_score,
        }
    }

    pub fn to_json(&self) -> Result<String, PersistenceError> {
        Ok(serde_json::to_string(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self, PersistenceError> {
        let record: Self = serde_json::from_str(json)?;
        if record.version != RECORD_VERSION {
            return Err(PersistenceError::UnsupportedVersion(record.version));
        }
        Ok(record)
    }
}

/// In-memory store for tests and headless runs
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    pub best_score: Option<u64>,
    /// Number of successful saves
    pub saves: u32,
    /// Simulate a broken backend
    pub fail: bool,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_best(best_score: u64) -> Self {
        Self {
            best_score: Some(best_score),
            ..Self::default()
        }
    }

    pub fn failing() -> Self {
        Self {
            fail: true,
            ..Self::default()
        }
    }
}

impl ScoreStore for MemoryStore {
    fn load_best_score(&mut self) -> Result<u64, PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Unavailable("memory store offline".into()));
        }
        Ok(self.best_score.unwrap_or(0))
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        if self.fail {
            return Err(PersistenceError::Unavailable("memory store offline".into()));
        }
        self.best_score = Some(score);
        self.saves += 1;
        Ok(())
    }
}
