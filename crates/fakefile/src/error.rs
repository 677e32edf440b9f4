//! Error types for the fakefile library
//!
//! Errors are organized by domain. Input errors are programming errors on the
//! caller side and are never retried; file system errors come from the
//! storage backends; encoding errors come from the container and
//! compression crates the archive builders delegate to.

use thiserror::Error;

/// Main error type for the fakefile library
#[derive(Error, Debug)]
pub enum FakefileError {
    /// Missing or malformed generator parameters
    #[error("Input error: {0}")]
    Input(#[from] InputError),

    /// Storage operations (writing, reading, deleting)
    #[error("File system error: {0}")]
    FileSystem(#[from] FileSystemError),

    /// Container or compression stream failures
    #[error("Encoding error: {0}")]
    Encoding(#[from] EncodingError),
}

/// Parameter errors raised before anything is encoded
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Missing input: {message}")]
    MissingInput { message: String },

    #[error("Invalid {parameter}: {reason}")]
    InvalidFormat { parameter: String, reason: String },
}

/// File system related errors
///
/// These errors occur during storage operations and carry the offending path.
#[derive(Error, Debug)]
pub enum FileSystemError {
    #[error("File not found: {path}")]
    NotFound { path: String },

    #[error("Permission denied: {path}")]
    PermissionDenied { path: String },

    #[error("Invalid file path: {path}")]
    InvalidPath { path: String },

    #[error("File read error: {path} - {reason}")]
    ReadError { path: String, reason: String },

    #[error("File write error: {path} - {reason}")]
    WriteError { path: String, reason: String },

    #[error("File delete error: {path} - {reason}")]
    DeleteError { path: String, reason: String },
}

/// Failures of the zip, tar and compression backends
#[derive(Error, Debug)]
pub enum EncodingError {
    #[error("Compression failed: {reason}")]
    Compression { reason: String },

    #[error("Archive {format} failed: {reason}")]
    Archive { format: String, reason: String },
}

/// Shorthand result type for fakefile operations
pub type Result<T> = std::result::Result<T, FakefileError>;

/// Create a missing input error
pub fn missing_input<S: Into<String>>(message: S) -> FakefileError {
    FakefileError::Input(InputError::MissingInput {
        message: message.into(),
    })
}

/// Create an invalid format error for a named parameter
pub fn invalid_format<P: Into<String>, R: Into<String>>(parameter: P, reason: R) -> FakefileError {
    FakefileError::Input(InputError::InvalidFormat {
        parameter: parameter.into(),
        reason: reason.into(),
    })
}

/// Narrow a value into a fixed-width header field
///
/// Values the field cannot hold are an `InvalidFormat` on `parameter`.
pub fn header_field<T, V>(parameter: &str, value: V) -> Result<T>
where
    T: TryFrom<V>,
    V: Copy + std::fmt::Display,
{
    T::try_from(value).map_err(|_| {
        invalid_format(
            parameter,
            format!("{value} does not fit the file header"),
        )
    })
}

impl FileSystemError {
    /// Classify an I/O error raised while working on `path`
    pub fn from_io(path: impl AsRef<std::path::Path>, error: std::io::Error, writing: bool) -> Self {
        let path = path.as_ref().display().to_string();
        match error.kind() {
            std::io::ErrorKind::NotFound => FileSystemError::NotFound { path },
            std::io::ErrorKind::PermissionDenied => FileSystemError::PermissionDenied { path },
            _ if writing => FileSystemError::WriteError {
                path,
                reason: error.to_string(),
            },
            _ => FileSystemError::ReadError {
                path,
                reason: error.to_string(),
            },
        }
    }
}

impl EncodingError {
    pub fn archive<F: Into<String>>(format: F, error: impl std::fmt::Display) -> Self {
        EncodingError::Archive {
            format: format.into(),
            reason: error.to_string(),
        }
    }
}

// ============================================================================
// From Implementations for External Error Types
// ============================================================================

/// Convert std::io::Error to FakefileError
///
/// Used for in-memory writers (compressors, archive builders) where no path
/// is involved, so the error is reported as an encoding failure.
impl From<std::io::Error> for FakefileError {
    fn from(error: std::io::Error) -> Self {
        FakefileError::Encoding(EncodingError::Compression {
            reason: error.to_string(),
        })
    }
}

impl From<zip::result::ZipError> for FakefileError {
    fn from(error: zip::result::ZipError) -> Self {
        FakefileError::Encoding(EncodingError::archive("zip", error))
    }
}

// ============================================================================
// Error Helper Functions
// ============================================================================

impl FakefileError {
    /// Whether the error came from the storage layer
    pub fn is_io_failure(&self) -> bool {
        matches!(self, FakefileError::FileSystem(_))
    }

    /// Whether the error is a missing `texts`/`nb_pages` style input
    pub fn is_missing_input(&self) -> bool {
        matches!(self, FakefileError::Input(InputError::MissingInput { .. }))
    }

    /// Whether the error is a malformed parameter
    pub fn is_invalid_format(&self) -> bool {
        matches!(self, FakefileError::Input(InputError::InvalidFormat { .. }))
    }

    /// Get a user-friendly error message
    pub fn user_message(&self) -> String {
        match self {
            FakefileError::Input(e) => match e {
                InputError::MissingInput { message } => {
                    format!("Nothing to generate: {}", message)
                }
                InputError::InvalidFormat { parameter, reason } => {
                    format!("Invalid value for `{}`: {}", parameter, reason)
                }
            },
            FakefileError::FileSystem(e) => match e {
                FileSystemError::NotFound { path } => {
                    format!("File not found: {}", path)
                }
                FileSystemError::PermissionDenied { path } => {
                    format!("Permission denied accessing: {}", path)
                }
                _ => format!("File system error: {}", e),
            },
            FakefileError::Encoding(e) => format!("Encoding error: {}", e),
        }
    }

    /// Check if retrying the same call could succeed
    ///
    /// Input errors never succeed on retry.
    pub fn is_recoverable(&self) -> bool {
        match self {
            FakefileError::Input(_) => false,
            FakefileError::FileSystem(FileSystemError::PermissionDenied { .. }) => false,
            FakefileError::FileSystem(FileSystemError::InvalidPath { .. }) => false,
            _ => true,
        }
    }
}
