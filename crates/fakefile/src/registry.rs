//! Tracking of every file the generators wrote to disk
//!
//! The registry only knows how to delete its files; it does not own their
//! lifecycle. Removal is best effort: failures are logged, never returned.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};

use once_cell::sync::Lazy;
use tracing::{debug, error};

use crate::file::GeneratedFile;

static FILE_REGISTRY: Lazy<Arc<FileRegistry>> = Lazy::new(|| Arc::new(FileRegistry::new()));

/// Set of generated files guarded by a single lock
///
/// The lock is held for one set operation at a time and never while a file
/// is being deleted.
#[derive(Debug, Default)]
pub struct FileRegistry {
    files: Mutex<HashSet<GeneratedFile>>,
}

impl FileRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Process-wide registry used by `Generator::default()`
    pub fn global() -> Arc<FileRegistry> {
        FILE_REGISTRY.clone()
    }

    fn files(&self) -> MutexGuard<'_, HashSet<GeneratedFile>> {
        self.files.lock().unwrap_or_else(PoisonError::into_inner)
    }

    pub fn add(&self, file: GeneratedFile) {
        self.files().replace(file);
    }

    /// Find a registered file by its relative path
    pub fn search(&self, path: &str) -> Option<GeneratedFile> {
        self.files().get(path).cloned()
    }

    /// Deregister and delete a file
    ///
    /// Returns `false` when the path is unknown or when deleting failed.
    pub fn remove(&self, path: &str) -> bool {
        let Some(file) = self.files().take(path) else {
            return false;
        };
        match file.unlink() {
            Ok(()) => {
                debug!("removed {}", file);
                true
            }
            Err(e) => {
                error!("Failed to unlink file {}: {}", file.filename().display(), e);
                false
            }
        }
    }

    /// Delete every registered file
    ///
    /// Drains one file per lock acquisition, so concurrent `add` calls are
    /// never blocked for the whole sweep.
    pub fn clean_up(&self) {
        loop {
            let next = {
                let mut files = self.files();
                let key = files.iter().next().cloned();
                key.and_then(|key| files.take(&key))
            };
            let Some(file) = next else {
                break;
            };
            if let Err(e) = file.unlink() {
                error!("Failed to unlink file {}: {}", file.filename().display(), e);
            }
        }
    }

    pub fn len(&self) -> usize {
        self.files().len()
    }

    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::{MemoryStorage, Storage};

    fn write(storage: &Arc<dyn Storage>, basename: &str) -> GeneratedFile {
        let filename = storage.generate_filename("txt", None, Some(basename)).unwrap();
        storage.write_text(&filename, basename).unwrap();
        GeneratedFile::new(storage.clone(), filename, None).unwrap()
    }

    #[test]
    fn test_add_search_remove() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let registry = FileRegistry::new();
        let file = write(&storage, "one");

        registry.add(file.clone());
        assert_eq!(registry.search(&file), Some(file.clone()));

        assert!(registry.remove(&file));
        assert_eq!(registry.search(&file), None);
        assert!(!file.exists());

        // Unknown paths are left alone
        assert!(!registry.remove("tmp/unknown.txt"));
    }

    #[test]
    fn test_remove_already_deleted_file() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let registry = FileRegistry::new();
        let file = write(&storage, "deleted");
        registry.add(file.clone());
        file.unlink().unwrap();

        assert!(!registry.remove(&file));
        assert!(registry.is_empty());
    }

    #[test]
    fn test_clean_up_tolerates_missing_files() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let registry = FileRegistry::new();
        let files: Vec<_> = ["a", "b", "c"].iter().map(|name| write(&storage, name)).collect();
        for file in &files {
            registry.add(file.clone());
        }
        files[1].unlink().unwrap();

        registry.clean_up();
        assert!(registry.is_empty());
        assert!(files.iter().all(|file| !file.exists()));

        // Idempotent
        registry.clean_up();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_global_is_shared() {
        assert!(Arc::ptr_eq(&FileRegistry::global(), &FileRegistry::global()));
    }

    #[test]
    fn test_concurrent_add_and_clean_up() {
        let storage: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let registry = Arc::new(FileRegistry::new());

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let registry = registry.clone();
                let storage = storage.clone();
                std::thread::spawn(move || {
                    for j in 0..25 {
                        registry.add(write(&storage, &format!("t{i}_{j}")));
                    }
                    registry.clean_up();
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        registry.clean_up();
        assert!(registry.is_empty());
    }
}
