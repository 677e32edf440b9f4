//! Entry point tying the encoders to content, storage and the registry
//!
//! Every encoder has a bytes variant, which never touches storage, and a
//! `_file` variant, which writes through a [`Storage`], wraps the result in
//! a [`GeneratedFile`] and records it in the [`FileRegistry`].

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::archive::{self, ArchiveOptions, EmlOptions, TarCompression};
use crate::audio::{self, WavOptions};
use crate::binary::{self, FileContent};
use crate::content::{ContentProvider, LoremProvider, PageOptions};
use crate::document;
use crate::error::Result;
use crate::file::GeneratedFile;
use crate::image::{self, ImageFormat, ImageOptions};
use crate::metadata::MetaData;
use crate::pdf::{self, GraphicPdfOptions, PdfKind};
use crate::registry::FileRegistry;
use crate::storage::{FileSystemStorage, Storage};

/// Where and under which name a `_file` variant writes
///
/// Unset fields fall back to the generator's storage and a random basename
/// starting with `tmp`.
#[derive(Debug, Clone, Default)]
pub struct FileTarget {
    pub storage: Option<Arc<dyn Storage>>,
    pub basename: Option<String>,
    pub prefix: Option<String>,
}

impl FileTarget {
    pub fn with_storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    pub fn with_basename(mut self, basename: impl Into<String>) -> Self {
        self.basename = Some(basename.into());
        self
    }

    pub fn with_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.prefix = Some(prefix.into());
        self
    }

    /// Fill unset fields from `fallback`
    pub fn or(&self, fallback: &FileTarget) -> FileTarget {
        FileTarget {
            storage: self.storage.clone().or_else(|| fallback.storage.clone()),
            basename: self.basename.clone().or_else(|| fallback.basename.clone()),
            prefix: self.prefix.clone().or_else(|| fallback.prefix.clone()),
        }
    }
}

/// Text of a `.txt` file
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFileOptions {
    /// Written verbatim when set and non-empty
    pub text: Option<String>,
    /// Length of the generated text otherwise
    pub nb_chars: usize,
}

impl Default for TextFileOptions {
    fn default() -> Self {
        Self {
            text: None,
            nb_chars: 200,
        }
    }
}

impl TextFileOptions {
    pub fn with_text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    pub fn with_nb_chars(mut self, nb_chars: usize) -> Self {
        self.nb_chars = nb_chars;
        self
    }
}

/// Builder for [`Generator`]
#[derive(Debug, Default)]
pub struct GeneratorBuilder {
    content: Option<Arc<dyn ContentProvider>>,
    storage: Option<Arc<dyn Storage>>,
    registry: Option<Arc<FileRegistry>>,
}

impl GeneratorBuilder {
    pub fn content(mut self, content: Arc<dyn ContentProvider>) -> Self {
        self.content = Some(content);
        self
    }

    pub fn storage(mut self, storage: Arc<dyn Storage>) -> Self {
        self.storage = Some(storage);
        self
    }

    /// Use an isolated registry instead of the process-wide one
    pub fn registry(mut self, registry: Arc<FileRegistry>) -> Self {
        self.registry = Some(registry);
        self
    }

    pub fn build(self) -> Generator {
        Generator {
            content: self.content.unwrap_or_else(|| Arc::new(LoremProvider::new())),
            storage: self
                .storage
                .unwrap_or_else(|| Arc::new(FileSystemStorage::default())),
            registry: self.registry.unwrap_or_else(FileRegistry::global),
        }
    }
}

/// File generator
///
/// Cheap to clone; clones share content provider, storage and registry.
#[derive(Debug, Clone)]
pub struct Generator {
    content: Arc<dyn ContentProvider>,
    storage: Arc<dyn Storage>,
    registry: Arc<FileRegistry>,
}

impl Default for Generator {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl Generator {
    pub fn builder() -> GeneratorBuilder {
        GeneratorBuilder::default()
    }

    pub fn content(&self) -> &Arc<dyn ContentProvider> {
        &self.content
    }

    pub fn storage(&self) -> &Arc<dyn Storage> {
        &self.storage
    }

    pub fn registry(&self) -> &Arc<FileRegistry> {
        &self.registry
    }

    // ------------------------------------------------------------------
    // Bytes
    // ------------------------------------------------------------------

    /// PDF of either profile with default options otherwise
    pub fn pdf(&self, kind: PdfKind, nb_pages: usize, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
        match kind {
            PdfKind::Graphic => {
                let options = GraphicPdfOptions::default().with_nb_pages(nb_pages);
                pdf::graphic_pdf(&options, metadata)
            }
            PdfKind::Text => {
                let pages = PageOptions::empty().with_nb_pages(nb_pages);
                pdf::text_pdf(self.content.as_ref(), &pages, metadata)
            }
        }
    }

    pub fn text_pdf(&self, pages: &PageOptions, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
        pdf::text_pdf(self.content.as_ref(), pages, metadata)
    }

    pub fn graphic_pdf(&self, options: &GraphicPdfOptions, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
        pdf::graphic_pdf(options, metadata)
    }

    pub fn image(&self, format: ImageFormat, options: &ImageOptions) -> Result<Vec<u8>> {
        image::encode(format, options.size, options.color)
    }

    pub fn png(&self, options: &ImageOptions) -> Result<Vec<u8>> {
        image::png(options.size, options.color)
    }

    pub fn svg(&self, options: &ImageOptions) -> Vec<u8> {
        image::svg(options.size, options.color).into_bytes()
    }

    pub fn bmp(&self, options: &ImageOptions) -> Result<Vec<u8>> {
        image::bmp(options.size, options.color)
    }

    pub fn gif(&self, options: &ImageOptions) -> Result<Vec<u8>> {
        image::gif(options.size, options.color)
    }

    pub fn tif(&self, options: &ImageOptions) -> Result<Vec<u8>> {
        image::tiff(options.size, options.color)
    }

    pub fn ppm(&self, options: &ImageOptions) -> Vec<u8> {
        image::ppm(options.size, options.color)
    }

    pub fn wav(&self, options: &WavOptions) -> Result<Vec<u8>> {
        audio::wav(options)
    }

    pub fn docx(&self, pages: &PageOptions, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
        document::docx(self.content.as_ref(), pages, metadata)
    }

    pub fn odt(&self, pages: &PageOptions, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
        document::odt(self.content.as_ref(), pages, metadata)
    }

    pub fn bin(&self, length: usize) -> Vec<u8> {
        binary::bin(length)
    }

    pub fn zip(&self, options: &ArchiveOptions, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
        archive::zip(self, options, metadata)
    }

    pub fn tar(
        &self,
        options: &ArchiveOptions,
        compression: TarCompression,
        metadata: Option<&mut MetaData>,
    ) -> Result<Vec<u8>> {
        archive::tar(self, options, compression, metadata)
    }

    pub fn eml(&self, options: &EmlOptions, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
        archive::eml(self, options, metadata)
    }

    /// Resolved text of a `.txt` file
    pub fn text(&self, options: &TextFileOptions) -> String {
        match &options.text {
            Some(text) if !text.is_empty() => text.clone(),
            _ => self.content.text(options.nb_chars.max(1)),
        }
    }

    // ------------------------------------------------------------------
    // Files
    // ------------------------------------------------------------------

    /// Write `data`, wrap it and register it
    fn persist(
        &self,
        data: &[u8],
        extension: &str,
        target: &FileTarget,
        content: Option<String>,
    ) -> Result<GeneratedFile> {
        let storage = target.storage.clone().unwrap_or_else(|| self.storage.clone());
        let filename = storage.generate_filename(extension, target.prefix.as_deref(), target.basename.as_deref())?;
        storage.write_bytes(&filename, data)?;
        let file = GeneratedFile::new(storage, filename, content)?;
        self.registry.add(file.clone());
        debug!("generated {} ({} bytes)", file, data.len());
        Ok(file)
    }

    /// Encode with a local sidecar when the caller gave none, then persist
    /// with the sidecar content as summary
    fn persist_with_metadata<F>(
        &self,
        extension: &str,
        target: &FileTarget,
        metadata: Option<&mut MetaData>,
        encode: F,
    ) -> Result<GeneratedFile>
    where
        F: FnOnce(&mut MetaData) -> Result<Vec<u8>>,
    {
        let mut local = MetaData::new();
        let metadata = match metadata {
            Some(metadata) => metadata,
            None => &mut local,
        };
        let data = encode(&mut *metadata)?;
        self.persist(&data, extension, target, metadata.content.clone())
    }

    /// Remove a staged file from the registry and from its storage
    pub(crate) fn discard(&self, file: &GeneratedFile) -> Result<()> {
        if !self.registry.remove(file) && file.exists() {
            file.unlink()?;
        }
        Ok(())
    }

    pub fn pdf_file(
        &self,
        kind: PdfKind,
        nb_pages: usize,
        metadata: Option<&mut MetaData>,
        target: &FileTarget,
    ) -> Result<GeneratedFile> {
        self.persist_with_metadata("pdf", target, metadata, |metadata| {
            self.pdf(kind, nb_pages, Some(metadata))
        })
    }

    pub fn text_pdf_file(
        &self,
        pages: &PageOptions,
        metadata: Option<&mut MetaData>,
        target: &FileTarget,
    ) -> Result<GeneratedFile> {
        self.persist_with_metadata("pdf", target, metadata, |metadata| {
            self.text_pdf(pages, Some(metadata))
        })
    }

    pub fn graphic_pdf_file(
        &self,
        options: &GraphicPdfOptions,
        metadata: Option<&mut MetaData>,
        target: &FileTarget,
    ) -> Result<GeneratedFile> {
        self.persist_with_metadata("pdf", target, metadata, |metadata| {
            self.graphic_pdf(options, Some(metadata))
        })
    }

    pub fn image_file(&self, format: ImageFormat, options: &ImageOptions, target: &FileTarget) -> Result<GeneratedFile> {
        let data = self.image(format, options)?;
        self.persist(&data, format.extension(), target, None)
    }

    pub fn png_file(&self, options: &ImageOptions, target: &FileTarget) -> Result<GeneratedFile> {
        self.image_file(ImageFormat::Png, options, target)
    }

    pub fn svg_file(&self, options: &ImageOptions, target: &FileTarget) -> Result<GeneratedFile> {
        self.image_file(ImageFormat::Svg, options, target)
    }

    pub fn bmp_file(&self, options: &ImageOptions, target: &FileTarget) -> Result<GeneratedFile> {
        self.image_file(ImageFormat::Bmp, options, target)
    }

    pub fn gif_file(&self, options: &ImageOptions, target: &FileTarget) -> Result<GeneratedFile> {
        self.image_file(ImageFormat::Gif, options, target)
    }

    pub fn tif_file(&self, options: &ImageOptions, target: &FileTarget) -> Result<GeneratedFile> {
        self.image_file(ImageFormat::Tif, options, target)
    }

    pub fn ppm_file(&self, options: &ImageOptions, target: &FileTarget) -> Result<GeneratedFile> {
        self.image_file(ImageFormat::Ppm, options, target)
    }

    pub fn wav_file(&self, options: &WavOptions, target: &FileTarget) -> Result<GeneratedFile> {
        let data = self.wav(options)?;
        self.persist(&data, "wav", target, None)
    }

    pub fn docx_file(
        &self,
        pages: &PageOptions,
        metadata: Option<&mut MetaData>,
        target: &FileTarget,
    ) -> Result<GeneratedFile> {
        self.persist_with_metadata("docx", target, metadata, |metadata| {
            self.docx(pages, Some(metadata))
        })
    }

    pub fn odt_file(
        &self,
        pages: &PageOptions,
        metadata: Option<&mut MetaData>,
        target: &FileTarget,
    ) -> Result<GeneratedFile> {
        self.persist_with_metadata("odt", target, metadata, |metadata| {
            self.odt(pages, Some(metadata))
        })
    }

    pub fn bin_file(&self, length: usize, target: &FileTarget) -> Result<GeneratedFile> {
        self.persist(&self.bin(length), "bin", target, None)
    }

    pub fn zip_file(
        &self,
        options: &ArchiveOptions,
        metadata: Option<&mut MetaData>,
        target: &FileTarget,
    ) -> Result<GeneratedFile> {
        self.persist_with_metadata("zip", target, metadata, |metadata| {
            self.zip(options, Some(metadata))
        })
    }

    pub fn tar_file(
        &self,
        options: &ArchiveOptions,
        compression: TarCompression,
        metadata: Option<&mut MetaData>,
        target: &FileTarget,
    ) -> Result<GeneratedFile> {
        self.persist_with_metadata(compression.extension(), target, metadata, |metadata| {
            self.tar(options, compression, Some(metadata))
        })
    }

    pub fn eml_file(
        &self,
        options: &EmlOptions,
        metadata: Option<&mut MetaData>,
        target: &FileTarget,
    ) -> Result<GeneratedFile> {
        self.persist_with_metadata("eml", target, metadata, |metadata| {
            self.eml(options, Some(metadata))
        })
    }

    pub fn txt_file(&self, options: &TextFileOptions, target: &FileTarget) -> Result<GeneratedFile> {
        let text = self.text(options);
        self.persist(text.as_bytes(), "txt", target, Some(text.clone()))
    }

    /// Write caller-provided content under the given extension
    pub fn generic_file(
        &self,
        content: impl Into<FileContent>,
        extension: &str,
        target: &FileTarget,
    ) -> Result<GeneratedFile> {
        let content = content.into();
        let summary = content.as_text().map(str::to_string);
        self.persist(content.as_bytes(), extension, target, summary)
    }
}
