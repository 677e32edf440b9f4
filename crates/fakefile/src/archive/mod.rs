//! Archive and container builders (ZIP, TAR, EML)
//!
//! Builders do not generate their members themselves. They call an
//! [`InnerFileProducer`], which writes ordinary generated files into a
//! staging storage; every produced file is read back, embedded under
//! `directory/basename` and then deregistered and deleted.

mod eml;
mod tar;
mod zip;

pub use self::eml::{EmlOptions, eml};
pub use self::tar::{TarCompression, tar};
pub use self::zip::zip;

use std::fmt;
use std::sync::Arc;

use rand::seq::SliceRandom;
use tracing::debug;

use crate::audio::WavOptions;
use crate::content::PageOptions;
use crate::error::{Result, invalid_format};
use crate::file::GeneratedFile;
use crate::generator::{FileTarget, Generator, TextFileOptions};
use crate::image::{ImageFormat, ImageOptions};
use crate::pdf::{GraphicPdfOptions, PdfKind};
use crate::storage::Storage;

type ProduceOne = dyn Fn(&Generator, &FileTarget) -> Result<GeneratedFile> + Send + Sync;
type ProduceMany = dyn Fn(&Generator, &FileTarget) -> Result<Vec<GeneratedFile>> + Send + Sync;

/// Creates the files embedded in an archive
///
/// A `Single` producer is called `count` times, a `Many` producer once (the
/// archive `count` is ignored). Producers receive the archive's staging
/// target; naming set through [`InnerFileProducer::with_target`] wins.
#[derive(Clone)]
pub enum InnerFileProducer {
    Single(Arc<ProduceOne>),
    Many(Arc<ProduceMany>),
}

impl fmt::Debug for InnerFileProducer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InnerFileProducer::Single(_) => f.write_str("InnerFileProducer::Single"),
            InnerFileProducer::Many(_) => f.write_str("InnerFileProducer::Many"),
        }
    }
}

/// A text file of 200 characters
impl Default for InnerFileProducer {
    fn default() -> Self {
        InnerFileProducer::txt(TextFileOptions::default())
    }
}

impl InnerFileProducer {
    pub fn single<F>(produce: F) -> Self
    where
        F: Fn(&Generator, &FileTarget) -> Result<GeneratedFile> + Send + Sync + 'static,
    {
        InnerFileProducer::Single(Arc::new(produce))
    }

    pub fn many<F>(produce: F) -> Self
    where
        F: Fn(&Generator, &FileTarget) -> Result<Vec<GeneratedFile>> + Send + Sync + 'static,
    {
        InnerFileProducer::Many(Arc::new(produce))
    }

    /// Name (and optionally place) the produced files with `target`
    ///
    /// Fields left unset in `target` fall back to the archive's staging
    /// target.
    pub fn with_target(self, target: FileTarget) -> Self {
        match self {
            InnerFileProducer::Single(produce) => InnerFileProducer::single(move |generator, staging| {
                produce(generator, &target.or(staging))
            }),
            InnerFileProducer::Many(produce) => InnerFileProducer::many(move |generator, staging| {
                produce(generator, &target.or(staging))
            }),
        }
    }

    /// Run the producer, honouring `count` for `Single`
    pub fn produce(&self, generator: &Generator, target: &FileTarget, count: usize) -> Result<Vec<GeneratedFile>> {
        match self {
            InnerFileProducer::Single(produce) => (0..count).map(|_| produce(generator, target)).collect(),
            InnerFileProducer::Many(produce) => produce(generator, target),
        }
    }

    /// Every producer in turn; a `Many` member contributes all its files
    pub fn list(producers: Vec<InnerFileProducer>) -> Self {
        InnerFileProducer::many(move |generator, target| {
            let mut files = Vec::new();
            for producer in &producers {
                files.extend(producer.produce(generator, target, 1)?);
            }
            Ok(files)
        })
    }

    /// One randomly chosen producer per call
    ///
    /// Choices must be `Single` producers.
    pub fn fuzzy_choice(choices: Vec<InnerFileProducer>) -> Result<Self> {
        let mut singles = Vec::with_capacity(choices.len());
        for choice in choices {
            match choice {
                InnerFileProducer::Single(produce) => singles.push(produce),
                InnerFileProducer::Many(_) => {
                    return Err(invalid_format(
                        "choices",
                        "a fuzzy choice only picks single-file producers",
                    ));
                }
            }
        }
        if singles.is_empty() {
            return Err(invalid_format("choices", "at least one producer is required"));
        }
        Ok(InnerFileProducer::single(move |generator, target| {
            let mut rng = rand::thread_rng();
            match singles.choose(&mut rng) {
                Some(produce) => produce(generator, target),
                None => Err(invalid_format("choices", "at least one producer is required")),
            }
        }))
    }

    pub fn txt(options: TextFileOptions) -> Self {
        InnerFileProducer::single(move |generator, target| generator.txt_file(&options, target))
    }

    pub fn pdf(kind: PdfKind, nb_pages: usize) -> Self {
        InnerFileProducer::single(move |generator, target| generator.pdf_file(kind, nb_pages, None, target))
    }

    pub fn text_pdf(pages: PageOptions) -> Self {
        InnerFileProducer::single(move |generator, target| generator.text_pdf_file(&pages, None, target))
    }

    pub fn graphic_pdf(options: GraphicPdfOptions) -> Self {
        InnerFileProducer::single(move |generator, target| generator.graphic_pdf_file(&options, None, target))
    }

    pub fn image(format: ImageFormat, options: ImageOptions) -> Self {
        InnerFileProducer::single(move |generator, target| generator.image_file(format, &options, target))
    }

    pub fn png(options: ImageOptions) -> Self {
        Self::image(ImageFormat::Png, options)
    }

    pub fn svg(options: ImageOptions) -> Self {
        Self::image(ImageFormat::Svg, options)
    }

    pub fn bmp(options: ImageOptions) -> Self {
        Self::image(ImageFormat::Bmp, options)
    }

    pub fn gif(options: ImageOptions) -> Self {
        Self::image(ImageFormat::Gif, options)
    }

    pub fn tif(options: ImageOptions) -> Self {
        Self::image(ImageFormat::Tif, options)
    }

    pub fn ppm(options: ImageOptions) -> Self {
        Self::image(ImageFormat::Ppm, options)
    }

    pub fn wav(options: WavOptions) -> Self {
        InnerFileProducer::single(move |generator, target| generator.wav_file(&options, target))
    }

    pub fn docx(pages: PageOptions) -> Self {
        InnerFileProducer::single(move |generator, target| generator.docx_file(&pages, None, target))
    }

    pub fn odt(pages: PageOptions) -> Self {
        InnerFileProducer::single(move |generator, target| generator.odt_file(&pages, None, target))
    }

    pub fn bin(length: usize) -> Self {
        InnerFileProducer::single(move |generator, target| generator.bin_file(length, target))
    }

    /// Nested ZIP archive
    pub fn zip(options: ArchiveOptions) -> Self {
        InnerFileProducer::single(move |generator, target| generator.zip_file(&options, None, target))
    }

    /// Nested TAR archive
    pub fn tar(options: ArchiveOptions, compression: TarCompression) -> Self {
        InnerFileProducer::single(move |generator, target| {
            generator.tar_file(&options, compression, None, target)
        })
    }

    /// Nested e-mail message
    pub fn eml(options: EmlOptions) -> Self {
        InnerFileProducer::single(move |generator, target| generator.eml_file(&options, None, target))
    }
}

/// Members of an archive
#[derive(Debug, Clone)]
pub struct ArchiveOptions {
    /// `None` lets the builder pick its default
    pub producer: Option<InnerFileProducer>,
    /// Calls of a `Single` producer
    pub count: usize,
    /// Directory prefix of every entry inside the archive
    pub directory: String,
    /// Where members are written before being embedded; the generator's
    /// storage when unset
    pub staging: Option<Arc<dyn Storage>>,
}

impl Default for ArchiveOptions {
    fn default() -> Self {
        Self {
            producer: None,
            count: 1,
            directory: String::new(),
            staging: None,
        }
    }
}

impl ArchiveOptions {
    pub fn with_producer(mut self, producer: InnerFileProducer) -> Self {
        self.producer = Some(producer);
        self
    }

    pub fn with_count(mut self, count: usize) -> Self {
        self.count = count;
        self
    }

    pub fn with_directory(mut self, directory: impl Into<String>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn with_staging(mut self, staging: Arc<dyn Storage>) -> Self {
        self.staging = Some(staging);
        self
    }
}

/// A produced file, read back and removed from staging
#[derive(Debug, Clone)]
pub(crate) struct InnerFile {
    /// Path inside the archive
    pub name: String,
    pub basename: String,
    pub data: Vec<u8>,
}

/// `directory/basename`, or `basename` when there is no directory
pub(crate) fn entry_name(directory: &str, basename: &str) -> String {
    let directory = directory.trim_matches('/');
    if directory.is_empty() {
        basename.to_string()
    } else {
        format!("{directory}/{basename}")
    }
}

/// Run `producer` and collect the staged files
///
/// Each file is read, deregistered and deleted before the next one is
/// produced, so a producer with a fixed basename can run several times.
/// On error, files staged so far stay registered for a later `clean_up`.
pub(crate) fn collect_inner_files(
    generator: &Generator,
    producer: &InnerFileProducer,
    options: &ArchiveOptions,
) -> Result<Vec<InnerFile>> {
    let staging = options
        .staging
        .clone()
        .unwrap_or_else(|| generator.storage().clone());
    let target = FileTarget::default().with_storage(staging);

    match producer {
        InnerFileProducer::Single(produce) => (0..options.count)
            .map(|_| {
                let file = produce(generator, &target)?;
                embed(generator, file, &options.directory)
            })
            .collect(),
        InnerFileProducer::Many(produce) => produce(generator, &target)?
            .into_iter()
            .map(|file| embed(generator, file, &options.directory))
            .collect(),
    }
}

fn embed(generator: &Generator, file: GeneratedFile, directory: &str) -> Result<InnerFile> {
    let data = file.read_bytes()?;
    let basename = file.basename();
    generator.discard(&file)?;
    debug!("embedded staged file {}", file);
    Ok(InnerFile {
        name: entry_name(directory, &basename),
        basename,
        data,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FileRegistry;
    use crate::storage::MemoryStorage;

    fn generator() -> (Generator, Arc<MemoryStorage>) {
        let storage = Arc::new(MemoryStorage::new());
        let generator = Generator::builder()
            .storage(storage.clone())
            .registry(Arc::new(FileRegistry::new()))
            .build();
        (generator, storage)
    }

    #[test]
    fn test_entry_name() {
        assert_eq!(entry_name("", "a.txt"), "a.txt");
        assert_eq!(entry_name("docs/", "a.txt"), "docs/a.txt");
        assert_eq!(entry_name("docs/nested", "a.txt"), "docs/nested/a.txt");
    }

    #[test]
    fn test_single_producer_runs_count_times() {
        let (generator, storage) = generator();
        let options = ArchiveOptions::default()
            .with_count(4)
            .with_directory("inner");
        let files = collect_inner_files(&generator, &InnerFileProducer::default(), &options).unwrap();

        assert_eq!(files.len(), 4);
        assert!(files.iter().all(|file| file.name.starts_with("inner/tmp")));
        assert!(files.iter().all(|file| !file.data.is_empty()));
        // Staging copies are gone
        assert!(storage.is_empty());
        assert!(generator.registry().is_empty());
    }

    #[test]
    fn test_list_producer_ignores_count() {
        let (generator, storage) = generator();
        let producer = InnerFileProducer::list(vec![
            InnerFileProducer::docx(PageOptions::default()).with_target(FileTarget::default().with_basename("doc")),
            InnerFileProducer::txt(TextFileOptions::default().with_text("isbn"))
                .with_target(FileTarget::default().with_basename("doc_isbn")),
        ]);
        let options = ArchiveOptions::default().with_count(10);
        let files = collect_inner_files(&generator, &producer, &options).unwrap();

        let names: Vec<_> = files.iter().map(|file| file.name.as_str()).collect();
        assert_eq!(names, ["doc.docx", "doc_isbn.txt"]);
        assert_eq!(files[1].data, b"isbn");
        assert!(storage.is_empty());
    }

    #[test]
    fn test_fuzzy_choice() {
        let (generator, _) = generator();
        let producer = InnerFileProducer::fuzzy_choice(vec![
            InnerFileProducer::png(ImageOptions::default()),
            InnerFileProducer::txt(TextFileOptions::default()),
        ])
        .unwrap();
        assert!(matches!(producer, InnerFileProducer::Single(_)));

        let options = ArchiveOptions::default().with_count(8);
        let files = collect_inner_files(&generator, &producer, &options).unwrap();
        assert_eq!(files.len(), 8);
        assert!(
            files
                .iter()
                .all(|file| file.basename.ends_with(".png") || file.basename.ends_with(".txt"))
        );

        let many = InnerFileProducer::list(vec![]);
        assert!(InnerFileProducer::fuzzy_choice(vec![many]).is_err());
        assert!(InnerFileProducer::fuzzy_choice(vec![]).is_err());
    }

    #[test]
    fn test_own_storage_wins_over_staging() {
        let (generator, staging) = generator();
        let own: Arc<dyn Storage> = Arc::new(MemoryStorage::new());
        let producer = InnerFileProducer::bin(4).with_target(
            FileTarget::default()
                .with_storage(own)
                .with_prefix("raw_"),
        );
        let files = collect_inner_files(&generator, &producer, &ArchiveOptions::default()).unwrap();

        assert_eq!(files[0].data.len(), 4);
        assert!(files[0].basename.starts_with("raw_"));
        assert!(staging.is_empty());
    }

    #[test]
    fn test_fixed_basename_repeated() {
        let (generator, storage) = generator();
        let producer = InnerFileProducer::txt(TextFileOptions::default().with_text("same"))
            .with_target(FileTarget::default().with_basename("same"));
        let options = ArchiveOptions::default().with_count(3);
        let files = collect_inner_files(&generator, &producer, &options).unwrap();

        assert_eq!(files.len(), 3);
        assert!(files.iter().all(|file| file.name == "same.txt" && file.data == b"same"));
        assert!(storage.is_empty());
        assert!(generator.registry().is_empty());
    }
}
