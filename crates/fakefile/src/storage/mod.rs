//! Storage abstraction for generated files
//!
//! A storage maps a logical `(extension, prefix, basename)` request to a
//! concrete location, performs the writes and deletes files again. Every
//! path argument may be given relative to the storage root or absolute.

mod file;
mod memory;

pub use file::FileSystemStorage;
pub use memory::MemoryStorage;

use std::path::{Path, PathBuf};

use rand::Rng;

use crate::error::{Result, invalid_format};

/// Characters used for random basenames
const BASENAME_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyz0123456789_";

/// Length of the random part of a generated basename
pub const BASENAME_LENGTH: usize = 8;

/// Prefix used when the caller does not give one
pub const DEFAULT_PREFIX: &str = "tmp";

/// Storage trait for generated file persistence
pub trait Storage: std::fmt::Debug + Send + Sync + 'static {
    /// Allocate a file path for the given extension
    ///
    /// With a `basename` the result is deterministic and the caller owns
    /// collisions; otherwise a random basename is drawn after `prefix`.
    fn generate_filename(
        &self,
        extension: &str,
        prefix: Option<&str>,
        basename: Option<&str>,
    ) -> Result<PathBuf>;

    /// Write bytes, replacing any previous content
    fn write_bytes(&self, filename: &Path, data: &[u8]) -> Result<usize>;

    /// Write UTF-8 text, replacing any previous content
    fn write_text(&self, filename: &Path, data: &str) -> Result<usize> {
        self.write_bytes(filename, data.as_bytes())
    }

    /// Read the whole file
    fn read_bytes(&self, filename: &Path) -> Result<Vec<u8>>;

    /// Check if the file exists
    fn exists(&self, filename: &Path) -> bool;

    /// Path relative to the storage root
    fn relpath(&self, filename: &Path) -> Result<String>;

    /// Absolute path of the file
    fn abspath(&self, filename: &Path) -> PathBuf;

    /// Delete the file; a missing file is an error
    fn unlink(&self, filename: &Path) -> Result<()>;
}

/// Generate `prefix` followed by `length` random characters from `[a-z0-9_]`
pub fn generate_basename(prefix: Option<&str>, length: usize) -> String {
    let prefix = match prefix {
        Some(prefix) if !prefix.is_empty() => prefix,
        _ => DEFAULT_PREFIX,
    };
    let mut rng = rand::thread_rng();
    let suffix: String = (0..length)
        .map(|_| BASENAME_ALPHABET[rng.gen_range(0..BASENAME_ALPHABET.len())] as char)
        .collect();
    format!("{prefix}{suffix}")
}

/// Build `{basename}.{extension}`, drawing a random basename when needed
pub(crate) fn file_name(extension: &str, prefix: Option<&str>, basename: Option<&str>) -> Result<String> {
    if extension.is_empty() {
        return Err(invalid_format("extension", "an extension shall be given"));
    }
    let basename = match basename {
        Some(basename) if !basename.is_empty() => basename.to_string(),
        _ => generate_basename(prefix, BASENAME_LENGTH),
    };
    Ok(format!("{basename}.{extension}"))
}
