//! Static table of named providers
//!
//! Every generator entry point that makes sense from the command line is
//! declared here with its tags and parameter descriptors. Arguments arrive
//! as strings and are parsed by [`ProviderArgs`].

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::archive::{ArchiveOptions, EmlOptions, InnerFileProducer, TarCompression};
use crate::audio::WavOptions;
use crate::binary::DEFAULT_BIN_LENGTH;
use crate::content::PageOptions;
use crate::error::{Result, invalid_format};
use crate::file::GeneratedFile;
use crate::generator::{FileTarget, Generator, TextFileOptions};
use crate::image::{ImageFormat, ImageOptions, Rgb, Size};
use crate::pdf::{GraphicPdfOptions, PdfKind};

/// How a parameter value is written on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ParamKind {
    Int,
    Float,
    Text,
    /// `WIDTHxHEIGHT`
    Size,
    /// `R,G,B`
    Color,
    /// Comma separated values
    List,
}

impl fmt::Display for ParamKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ParamKind::Int => "INT",
            ParamKind::Float => "FLOAT",
            ParamKind::Text => "TEXT",
            ParamKind::Size => "WxH",
            ParamKind::Color => "R,G,B",
            ParamKind::List => "A,B,...",
        };
        f.write_str(name)
    }
}

#[derive(Debug, Clone, Copy, Serialize)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub default: Option<&'static str>,
    pub help: &'static str,
}

/// Result of running a provider
#[derive(Debug)]
pub enum ProviderOutput {
    Bytes(Vec<u8>),
    File(GeneratedFile),
}

pub type ProviderFn = fn(&Generator, &ProviderArgs) -> Result<ProviderOutput>;

#[derive(Clone, Copy, Serialize)]
pub struct ProviderSpec {
    pub name: &'static str,
    pub summary: &'static str,
    pub tags: &'static [&'static str],
    pub params: &'static [ParamSpec],
    #[serde(skip)]
    pub run: ProviderFn,
}

impl fmt::Debug for ProviderSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ProviderSpec")
            .field("name", &self.name)
            .field("tags", &self.tags)
            .finish()
    }
}

impl ProviderSpec {
    pub fn param(&self, name: &str) -> Option<&ParamSpec> {
        self.params.iter().find(|param| param.name == name)
    }
}

/// Textual provider arguments keyed by parameter name
#[derive(Debug, Clone, Default)]
pub struct ProviderArgs {
    values: HashMap<String, String>,
}

fn parse<T: FromStr>(name: &str, value: &str, expected: &str) -> Result<T> {
    value
        .trim()
        .parse()
        .map_err(|_| invalid_format(name, format!("expected {expected}, got `{value}`")))
}

impl ProviderArgs {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn text(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn usize(&self, name: &str) -> Result<Option<usize>> {
        self.text(name)
            .map(|value| parse(name, value, "a non-negative integer"))
            .transpose()
    }

    pub fn u32(&self, name: &str) -> Result<Option<u32>> {
        self.text(name)
            .map(|value| parse(name, value, "a non-negative integer"))
            .transpose()
    }

    pub fn f64(&self, name: &str) -> Result<Option<f64>> {
        self.text(name)
            .map(|value| parse(name, value, "a number"))
            .transpose()
    }

    /// `"10x20"`
    pub fn size(&self, name: &str) -> Result<Option<Size>> {
        let Some(value) = self.text(name) else {
            return Ok(None);
        };
        let (width, height) = value
            .split_once(['x', 'X'])
            .ok_or_else(|| invalid_format(name, format!("expected WIDTHxHEIGHT, got `{value}`")))?;
        Ok(Some((
            parse(name, width, "an integer width")?,
            parse(name, height, "an integer height")?,
        )))
    }

    /// `"1,2,3"`
    pub fn color(&self, name: &str) -> Result<Option<Rgb>> {
        let Some(value) = self.text(name) else {
            return Ok(None);
        };
        let parts: Vec<&str> = value.split(',').collect();
        match parts.as_slice() {
            [r, g, b] => Ok(Some((
                parse(name, r, "a color channel 0-255")?,
                parse(name, g, "a color channel 0-255")?,
                parse(name, b, "a color channel 0-255")?,
            ))),
            _ => Err(invalid_format(name, format!("expected R,G,B, got `{value}`"))),
        }
    }

    pub fn list(&self, name: &str) -> Option<Vec<String>> {
        self.text(name).map(|value| {
            value
                .split(',')
                .map(str::trim)
                .filter(|item| !item.is_empty())
                .map(str::to_string)
                .collect()
        })
    }

    /// Any value implementing `FromStr` with our error type
    pub fn parsed<T>(&self, name: &str) -> Result<Option<T>>
    where
        T: FromStr<Err = crate::error::FakefileError>,
    {
        self.text(name).map(str::parse).transpose()
    }

    fn target(&self) -> FileTarget {
        FileTarget {
            storage: None,
            basename: self.text("basename").map(str::to_string),
            prefix: self.text("prefix").map(str::to_string),
        }
    }

    fn image(&self) -> Result<ImageOptions> {
        let defaults = ImageOptions::default();
        Ok(ImageOptions {
            size: self.size("size")?.unwrap_or(defaults.size),
            color: self.color("color")?.unwrap_or(defaults.color),
        })
    }

    fn pages(&self) -> Result<PageOptions> {
        let mut pages = PageOptions::default();
        if let Some(nb_pages) = self.usize("nb_pages")? {
            pages.nb_pages = Some(nb_pages);
        }
        if let Some(texts) = self.texts() {
            pages.texts = Some(texts);
        }
        Ok(pages)
    }

    /// Pages are separated by `|` so that texts may contain commas
    fn texts(&self) -> Option<Vec<String>> {
        self.text("texts")
            .map(|value| value.split('|').map(str::to_string).collect())
    }

    fn graphic_pdf(&self) -> Result<GraphicPdfOptions> {
        let defaults = GraphicPdfOptions::default();
        Ok(GraphicPdfOptions {
            nb_pages: self.usize("nb_pages")?.unwrap_or(defaults.nb_pages),
            image_size: self.size("image_size")?.unwrap_or(defaults.image_size),
            image_color: self.color("image_color")?.unwrap_or(defaults.image_color),
        })
    }

    fn wav(&self) -> Result<WavOptions> {
        let defaults = WavOptions::default();
        Ok(WavOptions {
            frequency: self.u32("frequency")?.unwrap_or(defaults.frequency),
            duration: self.u32("duration")?.unwrap_or(defaults.duration),
            volume: self.f64("volume")?.unwrap_or(defaults.volume),
            sample_rate: self.u32("sample_rate")?.unwrap_or(defaults.sample_rate),
        })
    }

    fn archive(&self) -> Result<ArchiveOptions> {
        let mut options = ArchiveOptions::default();
        if let Some(count) = self.usize("count")? {
            options.count = count;
        }
        if let Some(directory) = self.text("directory") {
            options.directory = directory.to_string();
        }
        if let Some(names) = self.list("inner") {
            options.producer = Some(inner_producer(&names)?);
        }
        Ok(options)
    }

    fn txt(&self) -> Result<TextFileOptions> {
        let defaults = TextFileOptions::default();
        Ok(TextFileOptions {
            text: self.text("text").map(str::to_string),
            nb_chars: self.usize("nb_chars")?.unwrap_or(defaults.nb_chars),
        })
    }
}

/// Producer for inner files named on the command line
///
/// One name gives that producer, several a random choice among them.
pub fn inner_producer(names: &[String]) -> Result<InnerFileProducer> {
    let mut producers = names
        .iter()
        .map(|name| single_producer(name))
        .collect::<Result<Vec<_>>>()?;
    match producers.len() {
        0 => Err(invalid_format("inner", "at least one file type is required")),
        1 => Ok(producers.remove(0)),
        _ => InnerFileProducer::fuzzy_choice(producers),
    }
}

fn single_producer(name: &str) -> Result<InnerFileProducer> {
    let producer = match name {
        "txt" => InnerFileProducer::txt(TextFileOptions::default()),
        "pdf" => InnerFileProducer::pdf(PdfKind::Graphic, 1),
        "text_pdf" => InnerFileProducer::text_pdf(PageOptions::default()),
        "wav" => InnerFileProducer::wav(WavOptions::default()),
        "docx" => InnerFileProducer::docx(PageOptions::default()),
        "odt" => InnerFileProducer::odt(PageOptions::default()),
        "bin" => InnerFileProducer::bin(DEFAULT_BIN_LENGTH),
        "zip" => InnerFileProducer::zip(ArchiveOptions::default()),
        "tar" => InnerFileProducer::tar(ArchiveOptions::default(), TarCompression::None),
        "eml" => InnerFileProducer::eml(EmlOptions::default()),
        other => match other.parse::<ImageFormat>() {
            Ok(format) => InnerFileProducer::image(format, ImageOptions::default()),
            Err(_) => {
                return Err(invalid_format("inner", format!("unknown file type `{other}`")));
            }
        },
    };
    Ok(producer)
}

// ============================================================================
// Parameter descriptors
// ============================================================================

const fn param(name: &'static str, kind: ParamKind, default: Option<&'static str>, help: &'static str) -> ParamSpec {
    ParamSpec {
        name,
        kind,
        default,
        help,
    }
}

const BASENAME: ParamSpec = param("basename", ParamKind::Text, None, "Fixed file name without extension");
const PREFIX: ParamSpec = param("prefix", ParamKind::Text, Some("tmp"), "Prefix of the random file name");
const SIZE: ParamSpec = param("size", ParamKind::Size, Some("100x100"), "Image size in pixels");
const COLOR: ParamSpec = param("color", ParamKind::Color, Some("0,0,255"), "Fill color");
const FORMAT: ParamSpec = param("format", ParamKind::Text, Some("png"), "png, svg, bmp, gif, tif or ppm");
const NB_PAGES: ParamSpec = param("nb_pages", ParamKind::Int, Some("1"), "Number of pages");
const TEXTS: ParamSpec = param("texts", ParamKind::Text, None, "Page texts separated by `|`");
const PDF_TEXTS: ParamSpec = param("texts", ParamKind::Text, None, "Page texts separated by `|`, kind text only");
const KIND: ParamSpec = param("kind", ParamKind::Text, Some("graphic"), "graphic or text");
const IMAGE_SIZE: ParamSpec = param("image_size", ParamKind::Size, Some("100x100"), "Size of the page image, kind graphic only");
const IMAGE_COLOR: ParamSpec = param("image_color", ParamKind::Color, Some("255,0,0"), "Color of the page image, kind graphic only");
const FREQUENCY: ParamSpec = param("frequency", ParamKind::Int, Some("440"), "Tone frequency in Hz");
const DURATION: ParamSpec = param("duration", ParamKind::Int, Some("1"), "Duration in seconds");
const VOLUME: ParamSpec = param("volume", ParamKind::Float, Some("0.5"), "Volume between 0.0 and 1.0");
const SAMPLE_RATE: ParamSpec = param("sample_rate", ParamKind::Int, Some("44100"), "Samples per second");
const LENGTH: ParamSpec = param("length", ParamKind::Int, Some("16"), "Number of random bytes");
const COUNT: ParamSpec = param("count", ParamKind::Int, Some("1"), "Number of inner files");
const DIRECTORY: ParamSpec = param("directory", ParamKind::Text, None, "Directory of the inner files");
const INNER: ParamSpec = param("inner", ParamKind::List, Some("txt"), "Inner file types, picked at random");
const EML_INNER: ParamSpec = param("inner", ParamKind::List, None, "Attachment file types, picked at random");
const COMPRESSION: ParamSpec = param("compression", ParamKind::Text, None, "gz, bz2 or xz");
const CONTENT: ParamSpec = param("content", ParamKind::Text, None, "Body text");
const SUBJECT: ParamSpec = param("subject", ParamKind::Text, None, "Subject line");
const TEXT: ParamSpec = param("text", ParamKind::Text, None, "File content");
const NB_CHARS: ParamSpec = param("nb_chars", ParamKind::Int, Some("200"), "Length of generated text");
const EXTENSION: ParamSpec = param("extension", ParamKind::Text, None, "File extension");

const IMAGE_PARAMS: &[ParamSpec] = &[SIZE, COLOR];
const IMAGE_FILE_PARAMS: &[ParamSpec] = &[SIZE, COLOR, BASENAME, PREFIX];
const PDF_PARAMS: &[ParamSpec] = &[KIND, NB_PAGES, PDF_TEXTS, IMAGE_SIZE, IMAGE_COLOR];
const PDF_FILE_PARAMS: &[ParamSpec] = &[KIND, NB_PAGES, PDF_TEXTS, IMAGE_SIZE, IMAGE_COLOR, BASENAME, PREFIX];
const PAGE_PARAMS: &[ParamSpec] = &[NB_PAGES, TEXTS];
const PAGE_FILE_PARAMS: &[ParamSpec] = &[NB_PAGES, TEXTS, BASENAME, PREFIX];
const WAV_PARAMS: &[ParamSpec] = &[FREQUENCY, DURATION, VOLUME, SAMPLE_RATE];
const WAV_FILE_PARAMS: &[ParamSpec] = &[FREQUENCY, DURATION, VOLUME, SAMPLE_RATE, BASENAME, PREFIX];
const ARCHIVE_PARAMS: &[ParamSpec] = &[COUNT, DIRECTORY, INNER];
const ARCHIVE_FILE_PARAMS: &[ParamSpec] = &[COUNT, DIRECTORY, INNER, BASENAME, PREFIX];
const TAR_PARAMS: &[ParamSpec] = &[COUNT, DIRECTORY, INNER, COMPRESSION];
const TAR_FILE_PARAMS: &[ParamSpec] = &[COUNT, DIRECTORY, INNER, COMPRESSION, BASENAME, PREFIX];
const EML_PARAMS: &[ParamSpec] = &[COUNT, EML_INNER, CONTENT, SUBJECT];
const EML_FILE_PARAMS: &[ParamSpec] = &[COUNT, EML_INNER, CONTENT, SUBJECT, BASENAME, PREFIX];

// ============================================================================
// Runners
// ============================================================================

fn bytes(data: Vec<u8>) -> Result<ProviderOutput> {
    Ok(ProviderOutput::Bytes(data))
}

fn file(file: GeneratedFile) -> Result<ProviderOutput> {
    Ok(ProviderOutput::File(file))
}

/// Parameters of the other PDF kind are rejected rather than ignored
fn pdf_options(args: &ProviderArgs) -> Result<(PdfKind, PageOptions, GraphicPdfOptions)> {
    let kind = args.parsed::<PdfKind>("kind")?.unwrap_or_default();
    let foreign: &[&str] = match kind {
        PdfKind::Graphic => &["texts"],
        PdfKind::Text => &["image_size", "image_color"],
    };
    if let Some(name) = foreign.iter().find(|name| args.text(name).is_some()) {
        return Err(invalid_format(*name, format!("not used by {kind} PDFs")));
    }
    Ok((kind, args.pages()?, args.graphic_pdf()?))
}

fn run_pdf(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    match pdf_options(args)? {
        (PdfKind::Graphic, _, graphic) => bytes(generator.graphic_pdf(&graphic, None)?),
        (PdfKind::Text, pages, _) => bytes(generator.text_pdf(&pages, None)?),
    }
}

fn run_pdf_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    let target = args.target();
    match pdf_options(args)? {
        (PdfKind::Graphic, _, graphic) => file(generator.graphic_pdf_file(&graphic, None, &target)?),
        (PdfKind::Text, pages, _) => file(generator.text_pdf_file(&pages, None, &target)?),
    }
}

fn run_text_pdf(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    bytes(generator.text_pdf(&args.pages()?, None)?)
}

fn run_text_pdf_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    file(generator.text_pdf_file(&args.pages()?, None, &args.target())?)
}

fn run_image_as(format: ImageFormat, generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    bytes(generator.image(format, &args.image()?)?)
}

fn run_image_file_as(format: ImageFormat, generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    file(generator.image_file(format, &args.image()?, &args.target())?)
}

fn run_image(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    let format = args.parsed::<ImageFormat>("format")?.unwrap_or(ImageFormat::Png);
    run_image_as(format, generator, args)
}

fn run_png(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_as(ImageFormat::Png, generator, args)
}

fn run_svg(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_as(ImageFormat::Svg, generator, args)
}

fn run_bmp(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_as(ImageFormat::Bmp, generator, args)
}

fn run_gif(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_as(ImageFormat::Gif, generator, args)
}

fn run_tif(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_as(ImageFormat::Tif, generator, args)
}

fn run_ppm(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_as(ImageFormat::Ppm, generator, args)
}

fn run_png_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_file_as(ImageFormat::Png, generator, args)
}

fn run_svg_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_file_as(ImageFormat::Svg, generator, args)
}

fn run_bmp_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_file_as(ImageFormat::Bmp, generator, args)
}

fn run_gif_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_file_as(ImageFormat::Gif, generator, args)
}

fn run_tif_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_file_as(ImageFormat::Tif, generator, args)
}

fn run_ppm_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    run_image_file_as(ImageFormat::Ppm, generator, args)
}

fn run_wav(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    bytes(generator.wav(&args.wav()?)?)
}

fn run_wav_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    file(generator.wav_file(&args.wav()?, &args.target())?)
}

fn run_docx(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    bytes(generator.docx(&args.pages()?, None)?)
}

fn run_docx_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    file(generator.docx_file(&args.pages()?, None, &args.target())?)
}

fn run_odt(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    bytes(generator.odt(&args.pages()?, None)?)
}

fn run_odt_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    file(generator.odt_file(&args.pages()?, None, &args.target())?)
}

fn run_bin(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    bytes(generator.bin(args.usize("length")?.unwrap_or(DEFAULT_BIN_LENGTH)))
}

fn run_bin_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    let length = args.usize("length")?.unwrap_or(DEFAULT_BIN_LENGTH);
    file(generator.bin_file(length, &args.target())?)
}

fn run_zip(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    bytes(generator.zip(&args.archive()?, None)?)
}

fn run_zip_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    file(generator.zip_file(&args.archive()?, None, &args.target())?)
}

fn compression(args: &ProviderArgs) -> Result<TarCompression> {
    Ok(args.parsed::<TarCompression>("compression")?.unwrap_or_default())
}

fn run_tar(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    bytes(generator.tar(&args.archive()?, compression(args)?, None)?)
}

fn run_tar_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    file(generator.tar_file(&args.archive()?, compression(args)?, None, &args.target())?)
}

fn eml_options(args: &ProviderArgs) -> Result<EmlOptions> {
    Ok(EmlOptions {
        archive: args.archive()?,
        content: args.text("content").map(str::to_string),
        subject: args.text("subject").map(str::to_string),
    })
}

fn run_eml(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    bytes(generator.eml(&eml_options(args)?, None)?)
}

fn run_eml_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    file(generator.eml_file(&eml_options(args)?, None, &args.target())?)
}

fn run_txt_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    file(generator.txt_file(&args.txt()?, &args.target())?)
}

fn run_generic_file(generator: &Generator, args: &ProviderArgs) -> Result<ProviderOutput> {
    let extension = args.text("extension").unwrap_or_default();
    let content = args.text("content").unwrap_or_default();
    file(generator.generic_file(content, extension, &args.target())?)
}

const fn provider(
    name: &'static str,
    summary: &'static str,
    tags: &'static [&'static str],
    params: &'static [ParamSpec],
    run: ProviderFn,
) -> ProviderSpec {
    ProviderSpec {
        name,
        summary,
        tags,
        params,
        run,
    }
}

const DOCUMENT: &[&str] = &["Document"];
const DOCUMENT_FILE: &[&str] = &["Document", "File"];
const IMAGE: &[&str] = &["Image"];
const IMAGE_FILE: &[&str] = &["Image", "File"];

pub static PROVIDERS: &[ProviderSpec] = &[
    provider("pdf", "Create a PDF document", DOCUMENT, PDF_PARAMS, run_pdf),
    provider("text_pdf", "Create a PDF document with one line of text per page", DOCUMENT, PAGE_PARAMS, run_text_pdf),
    provider("png", "Create a PNG image", IMAGE, IMAGE_PARAMS, run_png),
    provider("svg", "Create an SVG image", IMAGE, IMAGE_PARAMS, run_svg),
    provider("bmp", "Create a BMP image", IMAGE, IMAGE_PARAMS, run_bmp),
    provider("gif", "Create a GIF image", IMAGE, IMAGE_PARAMS, run_gif),
    provider("tif", "Create a TIF image", IMAGE, IMAGE_PARAMS, run_tif),
    provider("ppm", "Create a PPM image", IMAGE, IMAGE_PARAMS, run_ppm),
    provider("image", "Create an image of the given format", IMAGE, &[FORMAT, SIZE, COLOR], run_image),
    provider("wav", "Create a WAV audio", &["Audio"], WAV_PARAMS, run_wav),
    provider("docx", "Create a DOCX document", DOCUMENT, PAGE_PARAMS, run_docx),
    provider("odt", "Create an ODT document", DOCUMENT, PAGE_PARAMS, run_odt),
    provider("bin", "Create random bytes", &["Binary"], &[LENGTH], run_bin),
    provider("zip", "Create a ZIP archive", &["Archive"], ARCHIVE_PARAMS, run_zip),
    provider("tar", "Create a TAR archive", &["Archive"], TAR_PARAMS, run_tar),
    provider("eml", "Create an EML message", &["Archive", "Email"], EML_PARAMS, run_eml),
    provider("pdf_file", "Create a PDF file", DOCUMENT_FILE, PDF_FILE_PARAMS, run_pdf_file),
    provider("text_pdf_file", "Create a text PDF file", DOCUMENT_FILE, PAGE_FILE_PARAMS, run_text_pdf_file),
    provider("png_file", "Create a PNG file", IMAGE_FILE, IMAGE_FILE_PARAMS, run_png_file),
    provider("svg_file", "Create an SVG file", IMAGE_FILE, IMAGE_FILE_PARAMS, run_svg_file),
    provider("bmp_file", "Create a BMP file", IMAGE_FILE, IMAGE_FILE_PARAMS, run_bmp_file),
    provider("gif_file", "Create a GIF file", IMAGE_FILE, IMAGE_FILE_PARAMS, run_gif_file),
    provider("tif_file", "Create a TIF file", IMAGE_FILE, IMAGE_FILE_PARAMS, run_tif_file),
    provider("ppm_file", "Create a PPM file", IMAGE_FILE, IMAGE_FILE_PARAMS, run_ppm_file),
    provider("wav_file", "Create a WAV file", &["Audio", "File"], WAV_FILE_PARAMS, run_wav_file),
    provider("docx_file", "Create a DOCX file", DOCUMENT_FILE, PAGE_FILE_PARAMS, run_docx_file),
    provider("odt_file", "Create an ODT file", DOCUMENT_FILE, PAGE_FILE_PARAMS, run_odt_file),
    provider("bin_file", "Create a BIN file", &["Binary", "File"], &[LENGTH, BASENAME, PREFIX], run_bin_file),
    provider("zip_file", "Create a ZIP archive file", &["Archive", "File"], ARCHIVE_FILE_PARAMS, run_zip_file),
    provider("tar_file", "Create a TAR archive file", &["Archive", "File"], TAR_FILE_PARAMS, run_tar_file),
    provider("eml_file", "Create an EML file", &["Archive", "Email", "File"], EML_FILE_PARAMS, run_eml_file),
    provider("txt_file", "Create a text file", &["Text", "File"], &[TEXT, NB_CHARS, BASENAME, PREFIX], run_txt_file),
    provider(
        "generic_file",
        "Create a file with the given content",
        &["File"],
        &[CONTENT, EXTENSION, BASENAME, PREFIX],
        run_generic_file,
    ),
];

/// Provider by name
pub fn find_provider(name: &str) -> Option<&'static ProviderSpec> {
    PROVIDERS.iter().find(|provider| provider.name == name)
}

/// Provider names grouped by tag, tags and names sorted
pub fn organize_providers() -> BTreeMap<&'static str, Vec<&'static str>> {
    let mut categories: BTreeMap<&'static str, Vec<&'static str>> = BTreeMap::new();
    for provider in PROVIDERS {
        for tag in provider.tags {
            categories.entry(*tag).or_default().push(provider.name);
        }
    }
    for names in categories.values_mut() {
        names.sort_unstable();
    }
    categories
}
