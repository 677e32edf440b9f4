use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

use super::{Storage, file_name};
use crate::error::{FileSystemError, Result};

/// File-based storage implementation
///
/// Files land in `root_path/rel_path`. A relative root is made absolute
/// against the current directory on construction, so allocated filenames
/// are always absolute. Relative paths given back to the storage are
/// resolved against `root_path`.
#[derive(Debug, Clone)]
pub struct FileSystemStorage {
    root_path: PathBuf,
    rel_path: PathBuf,
}

impl FileSystemStorage {
    /// Create a new file storage with the given root and relative directory
    pub fn new(root_path: impl AsRef<Path>, rel_path: impl AsRef<Path>) -> Self {
        Self {
            root_path: absolute_root(root_path.as_ref()),
            rel_path: rel_path.as_ref().to_path_buf(),
        }
    }

    pub fn root_path(&self) -> &Path {
        &self.root_path
    }

    pub fn rel_path(&self) -> &Path {
        &self.rel_path
    }

    /// Directory new files are allocated in
    fn target_dir(&self) -> PathBuf {
        self.root_path.join(&self.rel_path)
    }

    fn resolve(&self, filename: &Path) -> PathBuf {
        if filename.is_absolute() {
            filename.to_path_buf()
        } else {
            self.root_path.join(filename)
        }
    }
}

fn absolute_root(root: &Path) -> PathBuf {
    std::path::absolute(root)
        .or_else(|_| std::env::current_dir().map(|cwd| cwd.join(root)))
        .unwrap_or_else(|_| root.to_path_buf())
}

impl Default for FileSystemStorage {
    /// `<system temp dir>/tmp`
    fn default() -> Self {
        Self::new(std::env::temp_dir(), "tmp")
    }
}

impl Storage for FileSystemStorage {
    fn generate_filename(
        &self,
        extension: &str,
        prefix: Option<&str>,
        basename: Option<&str>,
    ) -> Result<PathBuf> {
        let dir_path = self.target_dir();
        fs::create_dir_all(&dir_path).map_err(|e| FileSystemError::from_io(&dir_path, e, true))?;

        let name = file_name(extension, prefix, basename)?;
        Ok(dir_path.join(name))
    }

    fn write_bytes(&self, filename: &Path, data: &[u8]) -> Result<usize> {
        let path = self.resolve(filename);
        fs::write(&path, data).map_err(|e| FileSystemError::from_io(&path, e, true))?;
        debug!("wrote {} bytes to {}", data.len(), path.display());
        Ok(data.len())
    }

    fn read_bytes(&self, filename: &Path) -> Result<Vec<u8>> {
        let path = self.resolve(filename);
        Ok(fs::read(&path).map_err(|e| FileSystemError::from_io(&path, e, false))?)
    }

    fn exists(&self, filename: &Path) -> bool {
        self.resolve(filename).exists()
    }

    fn relpath(&self, filename: &Path) -> Result<String> {
        let relative = if filename.is_absolute() {
            filename
                .strip_prefix(&self.root_path)
                .map_err(|_| FileSystemError::InvalidPath {
                    path: filename.display().to_string(),
                })?
        } else {
            filename
        };
        Ok(relative.to_string_lossy().into_owned())
    }

    fn abspath(&self, filename: &Path) -> PathBuf {
        self.resolve(filename)
    }

    fn unlink(&self, filename: &Path) -> Result<()> {
        let path = self.resolve(filename);
        fs::remove_file(&path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => FileSystemError::NotFound {
                path: path.display().to_string(),
            },
            _ => FileSystemError::DeleteError {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;
        debug!("deleted {}", path.display());
        Ok(())
    }
}
