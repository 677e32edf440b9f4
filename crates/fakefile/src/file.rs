//! Handle to a file written by one of the generators

use std::borrow::Borrow;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::ops::Deref;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::error::Result;
use crate::storage::Storage;

/// A generated file
///
/// Behaves like the path of the file relative to its storage root and keeps
/// the storage it was written to, so it can be read back or deleted later.
/// Equality and hashing only look at the relative path.
#[derive(Clone)]
pub struct GeneratedFile {
    value: String,
    storage: Arc<dyn Storage>,
    filename: PathBuf,
    content: Option<String>,
}

impl GeneratedFile {
    /// Wrap a file already written to `filename` in `storage`
    pub fn new(storage: Arc<dyn Storage>, filename: PathBuf, content: Option<String>) -> Result<Self> {
        let value = storage.relpath(&filename)?;
        Ok(Self {
            value,
            storage,
            filename,
            content,
        })
    }

    /// Path relative to the storage root
    pub fn as_str(&self) -> &str {
        &self.value
    }

    /// Path as it was allocated by the storage
    pub fn filename(&self) -> &Path {
        &self.filename
    }

    /// Absolute path of the file
    pub fn absolute_path(&self) -> PathBuf {
        self.storage.abspath(&self.filename)
    }

    /// Final path component, used as the entry name inside archives
    pub fn basename(&self) -> String {
        Path::new(&self.value)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.value.clone())
    }

    /// Human readable summary of the content, when the generator kept one
    pub fn content(&self) -> Option<&str> {
        self.content.as_deref()
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn exists(&self) -> bool {
        self.storage.exists(&self.filename)
    }

    pub fn read_bytes(&self) -> Result<Vec<u8>> {
        self.storage.read_bytes(&self.filename)
    }

    /// Delete the underlying file
    pub fn unlink(&self) -> Result<()> {
        self.storage.unlink(&self.filename)
    }
}

impl Deref for GeneratedFile {
    type Target = str;

    fn deref(&self) -> &str {
        &self.value
    }
}

impl AsRef<str> for GeneratedFile {
    fn as_ref(&self) -> &str {
        &self.value
    }
}

impl Borrow<str> for GeneratedFile {
    fn borrow(&self) -> &str {
        &self.value
    }
}

impl PartialEq for GeneratedFile {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value
    }
}

impl Eq for GeneratedFile {}

impl PartialEq<str> for GeneratedFile {
    fn eq(&self, other: &str) -> bool {
        self.value == other
    }
}

impl PartialEq<&str> for GeneratedFile {
    fn eq(&self, other: &&str) -> bool {
        self.value == *other
    }
}

impl Hash for GeneratedFile {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.value.hash(state);
    }
}

impl fmt::Display for GeneratedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.value)
    }
}

impl fmt::Debug for GeneratedFile {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GeneratedFile")
            .field("value", &self.value)
            .field("filename", &self.filename)
            .field("content", &self.content)
            .finish()
    }
}
