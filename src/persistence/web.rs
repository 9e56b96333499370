//! LocalStorage backend (wasm32)

use super::{BestScoreRecord, PersistenceError, ScoreStore};

/// Best score kept in the browser's LocalStorage
#[derive(Debug, Clone, Default)]
pub struct LocalStorageStore;

impl LocalStorageStore {
    /// LocalStorage key
    const STORAGE_KEY: &'static str = "dino_dash_best";

    pub fn new() -> Self {
        Self
    }

    fn storage() -> Result<web_sys::Storage, PersistenceError> {
        web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten()
            .ok_or_else(|| PersistenceError::Unavailable("LocalStorage not available".into()))
    }
}

impl ScoreStore for LocalStorageStore {
    fn load_best_score(&mut self) -> Result<u64, PersistenceError> {
        let storage = Self::storage()?;
        let json = storage
            .get_item(Self::STORAGE_KEY)
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))?;
        match json {
            Some(json) => {
                let record = BestScoreRecord::from_json(&json)?;
                log::info!("Loaded best score {}", record.best_score);
                Ok(record.best_score)
            }
            None => {
                log::info!("No best score found, starting fresh");
                Ok(0)
            }
        }
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        let storage = Self::storage()?;
        let json = BestScoreRecord::new(score).to_json()?;
        storage
            .set_item(Self::STORAGE_KEY, &json)
            .map_err(|e| PersistenceError::Unavailable(format!("{:?}", e)))?;
        log::info!("Best score saved ({})", score);
        Ok(())
    }
}
