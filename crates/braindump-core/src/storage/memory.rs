//! In-memory storage implementation.

use super::{BoxFuture, Storage, StorageError, StorageResult};
use crate::board::BoardRegistry;
use std::collections::HashMap;
use std::sync::RwLock;

/// In-memory storage for tests and ephemeral sessions.
#[derive(Default)]
pub struct MemoryStorage {
    snapshots: RwLock<HashMap<String, BoardRegistry>>,
}

impl MemoryStorage {
    /// Create a new empty memory storage.
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn save(&self, key: &str, registry: &BoardRegistry) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        let registry = registry.clone();
        Box::pin(async move {
            let mut snapshots = self
                .snapshots
                .write()
                .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;
            snapshots.insert(key, registry);
            Ok(())
        })
    }

    fn load(&self, key: &str) -> BoxFuture<'_, StorageResult<BoardRegistry>> {
        let key = key.to_string();
        Box::pin(async move {
            let snapshots = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;
            snapshots
                .get(&key)
                .cloned()
                .ok_or(StorageError::NotFound(key))
        })
    }

    fn delete(&self, key: &str) -> BoxFuture<'_, StorageResult<()>> {
        let key = key.to_string();
        Box::pin(async move {
            let mut snapshots = self
                .snapshots
                .write()
                .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;
            snapshots.remove(&key);
            Ok(())
        })
    }

    fn list(&self) -> BoxFuture<'_, StorageResult<Vec<String>>> {
        Box::pin(async move {
            let snapshots = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;
            Ok(snapshots.keys().cloned().collect())
        })
    }

    fn exists(&self, key: &str) -> BoxFuture<'_, StorageResult<bool>> {
        let key = key.to_string();
        Box::pin(async move {
            let snapshots = self
                .snapshots
                .read()
                .map_err(|e| StorageError::Other(format!("lock poisoned: {e}")))?;
            Ok(snapshots.contains_key(&key))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::block_on;

    #[test]
    fn save_then_load() {
        let storage = MemoryStorage::new();
        let registry = BoardRegistry::with_defaults();

        block_on(storage.save("main", &registry)).unwrap();
        let loaded = block_on(storage.load("main")).unwrap();
        assert_eq!(loaded, registry);
    }

    #[test]
    fn load_missing_key() {
        let storage = MemoryStorage::new();
        let result = block_on(storage.load("nope"));
        assert!(matches!(result, Err(StorageError::NotFound(_))));
    }

    #[test]
    fn delete_then_gone() {
        let storage = MemoryStorage::new();
        let registry = BoardRegistry::new();

        block_on(storage.save("main", &registry)).unwrap();
        assert!(block_on(storage.exists("main")).unwrap());

        block_on(storage.delete("main")).unwrap();
        assert!(!block_on(storage.exists("main")).unwrap());

        // Deleting a missing key stays quiet.
        block_on(storage.delete("main")).unwrap();
    }

    #[test]
    fn list_keys() {
        let storage = MemoryStorage::new();
        let registry = BoardRegistry::new();

        block_on(storage.save("a", &registry)).unwrap();
        block_on(storage.save("b", &registry)).unwrap();

        let mut keys = block_on(storage.list()).unwrap();
        keys.sort();
        assert_eq!(keys, vec!["a".to_string(), "b".to_string()]);
    }
}
