use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Mutex, MutexGuard, PoisonError};

use super::{Storage, file_name};
use crate::error::{FileSystemError, Result};

/// In-memory storage implementation for testing
///
/// Files live in a map keyed by their absolute path under a virtual root.
#[derive(Debug)]
pub struct MemoryStorage {
    root_path: PathBuf,
    rel_path: PathBuf,
    data: Mutex<HashMap<PathBuf, Vec<u8>>>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self {
            root_path: PathBuf::from("/memory"),
            rel_path: PathBuf::from("tmp"),
            data: Mutex::new(HashMap::new()),
        }
    }

    /// Get all stored paths (useful for testing)
    pub fn keys(&self) -> Vec<PathBuf> {
        self.files().keys().cloned().collect()
    }

    /// Get number of stored files
    pub fn len(&self) -> usize {
        self.files().len()
    }

    /// Check if storage is empty
    pub fn is_empty(&self) -> bool {
        self.files().is_empty()
    }

    fn files(&self) -> MutexGuard<'_, HashMap<PathBuf, Vec<u8>>> {
        self.data.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn resolve(&self, filename: &Path) -> PathBuf {
        if filename.is_absolute() {
            filename.to_path_buf()
        } else {
            self.root_path.join(filename)
        }
    }
}

impl Default for MemoryStorage {
    fn default() -> Self {
        Self::new()
    }
}

impl Storage for MemoryStorage {
    fn generate_filename(
        &self,
        extension: &str,
        prefix: Option<&str>,
        basename: Option<&str>,
    ) -> Result<PathBuf> {
        let name = file_name(extension, prefix, basename)?;
        Ok(self.root_path.join(&self.rel_path).join(name))
    }

    fn write_bytes(&self, filename: &Path, data: &[u8]) -> Result<usize> {
        self.files().insert(self.resolve(filename), data.to_vec());
        Ok(data.len())
    }

    fn read_bytes(&self, filename: &Path) -> Result<Vec<u8>> {
        let path = self.resolve(filename);
        self.files().get(&path).cloned().ok_or_else(|| {
            FileSystemError::NotFound {
                path: path.display().to_string(),
            }
            .into()
        })
    }

    fn exists(&self, filename: &Path) -> bool {
        self.files().contains_key(&self.resolve(filename))
    }

    fn relpath(&self, filename: &Path) -> Result<String> {
        let path = self.resolve(filename);
        let relative = path
            .strip_prefix(&self.root_path)
            .map_err(|_| FileSystemError::InvalidPath {
                path: filename.display().to_string(),
            })?;
        Ok(relative.to_string_lossy().into_owned())
    }

    fn abspath(&self, filename: &Path) -> PathBuf {
        self.resolve(filename)
    }

    fn unlink(&self, filename: &Path) -> Result<()> {
        let path = self.resolve(filename);
        match self.files().remove(&path) {
            Some(_) => Ok(()),
            None => Err(FileSystemError::NotFound {
                path: path.display().to_string(),
            }
            .into()),
        }
    }
}
