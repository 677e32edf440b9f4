//! Fakefile generates synthetic files for tests and fixtures: PDF documents,
//! single-color images, WAV tones, DOCX/ODT documents and ZIP/TAR/EML
//! containers filled with other generated files.

pub mod archive;
pub mod audio;
pub mod binary;
pub mod compress;
pub mod content;
pub mod document;
pub mod error;
pub mod file;
pub mod generator;
pub mod image;
pub mod metadata;
pub mod pdf;
pub mod providers;
pub mod registry;
pub mod storage;

// Re-export core types
pub use archive::{ArchiveOptions, EmlOptions, InnerFileProducer, TarCompression};
pub use audio::WavOptions;
pub use binary::FileContent;
pub use content::{ContentProvider, LoremProvider, PageOptions};
pub use error::{EncodingError, FakefileError, FileSystemError, InputError, Result};
pub use file::GeneratedFile;
pub use generator::{FileTarget, Generator, GeneratorBuilder, TextFileOptions};
pub use image::{ImageFormat, ImageOptions, Rgb, Size};
pub use metadata::MetaData;
pub use pdf::{GraphicPdfOptions, PdfKind};
pub use providers::{PROVIDERS, ProviderArgs, ProviderOutput, ProviderSpec, find_provider, organize_providers};
pub use registry::FileRegistry;
pub use storage::{FileSystemStorage, MemoryStorage, Storage};

/// Get the library version
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}
