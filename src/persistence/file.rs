//! JSON file backend (native)

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use super::{BestScoreRecord, PersistenceError, ScoreStore};

/// Best score kept in a small JSON file. Writes go to a sibling temp file
/// that is then renamed over the record.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn tmp_path(&self) -> PathBuf {
        let mut tmp = self.path.clone().into_os_string();
        tmp.push(".tmp");
        PathBuf::from(tmp)
    }
}

impl ScoreStore for FileStore {
    fn load_best_score(&mut self) -> Result<u64, PersistenceError> {
        let json = match fs::read_to_string(&self.path) {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                log::info!("No best score at {}, starting fresh", self.path.display());
                return Ok(0);
            }
            Err(e) => return Err(e.into()),
        };
        let record = BestScoreRecord::from_json(&json)?;
        log::info!("Loaded best score {}", record.best_score);
        Ok(record.best_score)
    }

    fn save_best_score(&mut self, score: u64) -> Result<(), PersistenceError> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        let tmp = self.tmp_path();
        fs::write(&tmp, BestScoreRecord::new(score).to_json()?)?;
        fs::rename(&tmp, &self.path)?;
        log::info!("Best score saved ({})", score);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_file_is_zero() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::new(dir.path().join("best.json"));
        assert_eq!(store.load_best_score().unwrap(), 0);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("best.json");
        let mut store = FileStore::new(&path);
        store.save_best_score(77).unwrap();
        assert!(path.exists());
        assert!(!store.tmp_path().exists());

        let mut reopened = FileStore::new(&path);
        assert_eq!(reopened.load_best_score().unwrap(), 77);
    }

    #[test]
    fn test_corrupt_file_errors() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("best.json");
        fs::write(&path, "{ broken").unwrap();
        let mut store = FileStore::new(&path);
        assert!(matches!(
            store.load_best_score(),
            Err(PersistenceError::Json(_))
        ));
    }
}
