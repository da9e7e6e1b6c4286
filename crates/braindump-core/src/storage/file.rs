//! File-backed storage: one JSON file per snapshot key.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::board::BoardRegistry;
use std::fs;
use std::path::PathBuf;

/// Stores registry snapshots as JSON files in a base directory.
pub struct FileStorage {
    base_path: PathBuf,
}

impl FileStorage {
    /// Create a file storage rooted at `base_path`, creating the
    /// directory if needed.
    pub fn new(base_path: PathBuf) -> StorageResult<Self> {
        if !base_path.exists() {
            fs::create_dir_all(&base_path)
                .map_err(|e| StorageError::Io(format!("creating {}: {e}", base_path.display())))?;
        }
        Ok(Self { base_path })
    }

    /// Create file storage in the platform data directory
    /// (`.../braindump/boards`).
    pub fn default_location() -> StorageResult<Self> {
        let base = dirs::data_local_dir()
            .or_else(dirs::home_dir)
            .ok_or_else(|| StorageError::Io("no data directory available".to_string()))?;
        Self::new(base.join("braindump").join("boards"))
    }

    pub fn base_path(&self) -> &PathBuf {
        &self.base_path
    }

    /// File path for a key, with unsafe characters replaced.
    fn snapshot_path(&self, key: &str) -> PathBuf {
        let safe: String = key
            .chars()
            .map(|c| if c.is_alphanumeric() || c == '-' || c == '_' { c } else { '_' })
            .collect();
        self.base_path.join(format!("{safe}.json"))
    }
}

impl Storage for FileStorage {
    fn save(&self, key: &str, registry: &BoardRegistry) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.snapshot_path(key);
        let json = registry.to_json();
        Box::pin(async move {
            let json = json.map_err(|e| StorageError::Serialization(e.to_string()))?;
            fs::write(&path, json)
                .map_err(|e| StorageError::Io(format!("writing {}: {e}", path.display())))
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<BoardRegistry>> {
        let path = self.snapshot_path(key);
        let key = key.to_string();
        Box::pin(async move {
            if !path.exists() {
                return Err(StorageError::NotFound(key));
            }
            let json = fs::read_to_string(&path)
                .map_err(|e| StorageError::Io(format!("reading {}: {e}", path.display())))?;
            BoardRegistry::from_json(&json)
                .map_err(|e| StorageError::Serialization(format!("parsing {}: {e}", path.display())))
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let path = self.snapshot_path(key);
        Box::pin(async move {
            if path.exists() {
                fs::remove_file(&path)
                    .map_err(|e| StorageError::Io(format!("deleting {}: {e}", path.display())))?;
            }
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        let base = self.base_path.clone();
        Box::pin(async move {
            if !base.exists() {
                return Ok(Vec::new());
            }
            let entries = fs::read_dir(&base)
                .map_err(|e| StorageError::Io(format!("listing {}: {e}", base.display())))?;
            let mut keys = Vec::new();
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "json") {
                    if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                        keys.push(stem.to_string());
                    }
                }
            }
            Ok(keys)
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let path = self.snapshot_path(key);
        Box::pin(async move { Ok(path.exists()) })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{DEFAULT_BOARD_COLOR, InputMethod};
    use crate::storage::block_on;
    use tempfile::tempdir;

    #[test]
    fn save_load_roundtrip() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();

        let mut registry = BoardRegistry::new();
        let board = registry.add_board("Persisted", DEFAULT_BOARD_COLOR);
        registry.add_idea(board, "keep me", InputMethod::Dictated);

        block_on(storage.save("main", &registry)).unwrap();
        let loaded = block_on(storage.load("main")).unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn missing_key_is_not_found() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        assert!(matches!(
            block_on(storage.load("ghost")),
            Err(StorageError::NotFound(_))
        ));
    }

    #[test]
    fn list_and_delete() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let registry = BoardRegistry::new();

        block_on(storage.save("one", &registry)).unwrap();
        block_on(storage.save("two", &registry)).unwrap();
        let mut keys = block_on(storage.list()).unwrap();
        keys.sort();
        assert_eq!(keys, vec!["one".to_string(), "two".to_string()]);

        block_on(storage.delete("one")).unwrap();
        assert!(!block_on(storage.exists("one")).unwrap());
        assert!(block_on(storage.exists("two")).unwrap());
    }

    #[test]
    fn keys_are_sanitized_consistently() {
        let dir = tempdir().unwrap();
        let storage = FileStorage::new(dir.path().to_path_buf()).unwrap();
        let registry = BoardRegistry::new();

        block_on(storage.save("weird/key:name", &registry)).unwrap();
        assert!(block_on(storage.exists("weird/key:name")).unwrap());
        block_on(storage.load("weird/key:name")).unwrap();
    }
}
