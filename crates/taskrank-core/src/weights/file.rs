//! JSON file weight store.
//!
//! The record is a flat object:
//! `{"urgency_weight": 1.0, "importance_weight": 1.0, "effort_weight": 1.0}`.
//! Writes go to a sibling temp file that is renamed over the record.
//! Read-modify-write cycles hold an in-process mutex and an exclusive
//! advisory lock on `<record>.lock` so separate processes also serialize.

use std::fs::{File, OpenOptions};
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use fs2::FileExt;
use tracing::{debug, info, warn};

use super::{decode_weights, WeightStore, Weights};
use crate::error::WeightStoreError;

/// Weight store backed by a JSON file.
#[derive(Debug)]
pub struct FileWeightStore {
    path: PathBuf,
    guard: Mutex<()>,
}

impl FileWeightStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            guard: Mutex::new(()),
        }
    }

    /// Store at `weights.json` inside the data directory.
    ///
    /// # Errors
    ///
    /// Returns an error if the data directory cannot be created.
    pub fn open_default() -> crate::Result<Self> {
        Ok(Self::new(crate::config::data_dir()?.join("weights.json")))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn lock_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".lock");
        PathBuf::from(name)
    }

    fn tmp_path(&self) -> PathBuf {
        let mut name = self.path.as_os_str().to_owned();
        name.push(".tmp");
        PathBuf::from(name)
    }

    fn write_failed(&self, source: std::io::Error) -> WeightStoreError {
        WeightStoreError::WriteFailed {
            path: self.path.clone(),
            source,
        }
    }

    fn acquire_file_lock(&self) -> Result<File, WeightStoreError> {
        let lock_path = self.lock_path();
        let lock_failed = |source| WeightStoreError::LockFailed {
            path: lock_path.clone(),
            source,
        };
        if let Some(parent) = lock_path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(lock_failed)?;
        }
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .write(true)
            .open(&lock_path)
            .map_err(lock_failed)?;
        file.lock_exclusive().map_err(lock_failed)?;
        Ok(file)
    }

    fn read_unlocked(&self) -> Weights {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                if e.kind() != std::io::ErrorKind::NotFound {
                    warn!(path = %self.path.display(), error = %e, "weights unreadable, using defaults");
                }
                return Weights::default();
            }
        };
        decode_weights(&content).unwrap_or_else(|| {
            warn!(path = %self.path.display(), "weights record is corrupt, using defaults");
            Weights::default()
        })
    }

    fn write_unlocked(&self, weights: &Weights) -> Result<(), WeightStoreError> {
        let content = serde_json::to_string_pretty(weights)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| self.write_failed(e))?;
        }
        let tmp = self.tmp_path();
        std::fs::write(&tmp, content).map_err(|e| self.write_failed(e))?;
        std::fs::rename(&tmp, &self.path).map_err(|e| self.write_failed(e))?;
        debug!(path = %self.path.display(), ?weights, "weights saved");
        Ok(())
    }
}

impl WeightStore for FileWeightStore {
    fn load(&self) -> Weights {
        self.read_unlocked()
    }

    fn save(&self, weights: &Weights) -> Result<(), WeightStoreError> {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        let lock = self.acquire_file_lock()?;
        let result = self.write_unlocked(weights);
        let _ = lock.unlock();
        result
    }

    fn update(&self, apply: &mut dyn FnMut(&mut Weights)) -> Result<Weights, WeightStoreError> {
        let _guard = self.guard.lock().unwrap_or_else(|e| e.into_inner());
        let lock = self.acquire_file_lock()?;
        let mut weights = self.read_unlocked();
        apply(&mut weights);
        let result = self.write_unlocked(&weights);
        let _ = lock.unlock();
        result?;
        info!(
            urgency = weights.urgency_weight,
            importance = weights.importance_weight,
            effort = weights.effort_weight,
            "weights updated"
        );
        Ok(weights)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWeightStore::new(dir.path().join("weights.json"));
        assert_eq!(store.load(), Weights::default());
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWeightStore::new(dir.path().join("weights.json"));
        store.save(&Weights::new(1.2, 0.8, 0.4)).unwrap();
        assert_eq!(store.load(), Weights::new(1.2, 0.8, 0.4));
        assert!(!store.tmp_path().exists());
    }

    #[test]
    fn corrupt_file_loads_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.json");
        std::fs::write(&path, "{ urgency_weight: oops").unwrap();
        assert_eq!(FileWeightStore::new(&path).load(), Weights::default());
    }

    #[test]
    fn partial_record_defaults_missing_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.json");
        std::fs::write(&path, r#"{"importance_weight": 0.5}"#).unwrap();
        assert_eq!(FileWeightStore::new(&path).load(), Weights::new(1.0, 0.5, 1.0));
    }

    #[test]
    fn save_creates_parent_directories() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileWeightStore::new(dir.path().join("nested/deeper/weights.json"));
        store.save(&Weights::default()).unwrap();
        assert!(store.path().exists());
    }

    #[test]
    fn update_persists_result() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("weights.json");
        let store = FileWeightStore::new(&path);
        let updated = store.update(&mut |w| w.urgency_weight = 2.0).unwrap();
        assert_eq!(updated.urgency_weight, 2.0);
        assert_eq!(FileWeightStore::new(&path).load().urgency_weight, 2.0);
    }
}
