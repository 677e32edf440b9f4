//! Integration tests writing through a real directory

use std::fs;
use std::io::{Cursor, Read};
use std::path::Path;
use std::sync::Arc;

use fakefile::*;
use tempfile::tempdir;

fn generator(root: &Path) -> Generator {
    Generator::builder()
        .storage(Arc::new(FileSystemStorage::new(root, "fixtures")))
        .registry(Arc::new(FileRegistry::new()))
        .build()
}

fn files_in(dir: &Path) -> Vec<String> {
    let mut names: Vec<String> = fs::read_dir(dir)
        .unwrap()
        .map(|entry| entry.unwrap().file_name().to_string_lossy().into_owned())
        .collect();
    names.sort();
    names
}

#[test]
fn test_png_file_on_disk() {
    let temp_dir = tempdir().unwrap();
    let generator = generator(temp_dir.path());

    let options = ImageOptions::default().with_size(10, 10).with_color(1, 2, 3);
    let file = generator
        .png_file(&options, &FileTarget::default().with_basename("pixel"))
        .unwrap();

    assert_eq!(file, "fixtures/pixel.png");
    assert_eq!(file.absolute_path(), temp_dir.path().join("fixtures/pixel.png"));

    let bytes = fs::read(file.absolute_path()).unwrap();
    assert_eq!(&bytes[..8], b"\x89PNG\r\n\x1a\n");
    // IHDR width and height
    assert_eq!(&bytes[16..24], &[0, 0, 0, 10, 0, 0, 0, 10]);
    assert_eq!(bytes, generator.png(&options).unwrap());

    let mut pixels = Vec::new();
    flate2::read::ZlibDecoder::new(&idat(&bytes)[..])
        .read_to_end(&mut pixels)
        .unwrap();
    let row: Vec<u8> = std::iter::once(0).chain([1, 2, 3].repeat(10)).collect();
    assert_eq!(pixels, row.repeat(10));
}

/// Concatenated IDAT payloads of a PNG stream
fn idat(png: &[u8]) -> Vec<u8> {
    let mut data = Vec::new();
    let mut offset = 8;
    while offset + 8 <= png.len() {
        let len = u32::from_be_bytes(png[offset..offset + 4].try_into().unwrap()) as usize;
        let kind = &png[offset + 4..offset + 8];
        if kind == b"IDAT" {
            data.extend_from_slice(&png[offset + 8..offset + 8 + len]);
        }
        offset += 12 + len;
    }
    data
}

#[test]
fn test_relative_root() {
    let temp_dir = tempfile::Builder::new()
        .prefix("fakefile-it")
        .tempdir_in(".")
        .unwrap();
    let root = Path::new(".").join(temp_dir.path().file_name().unwrap());
    let generator = generator(&root);

    let file = generator
        .png_file(&ImageOptions::default(), &FileTarget::default().with_basename("p"))
        .unwrap();

    assert_eq!(file, "fixtures/p.png");
    assert!(file.absolute_path().is_absolute());
    assert!(temp_dir.path().join("fixtures/p.png").exists());
}

#[test]
fn test_eml_subject_line_break_is_rejected() {
    let temp_dir = tempdir().unwrap();
    let generator = generator(temp_dir.path());

    let options = EmlOptions::default().with_subject("hi\r\nBcc: victim@example.com");
    let err = generator
        .eml_file(&options, None, &FileTarget::default())
        .unwrap_err();

    assert!(err.is_invalid_format());
    assert!(files_in(&temp_dir.path().join("fixtures")).is_empty());
    assert!(generator.registry().is_empty());
}

#[test]
fn test_tar_of_a_fixed_basename() {
    let temp_dir = tempdir().unwrap();
    let generator = generator(temp_dir.path());

    let producer = InnerFileProducer::txt(TextFileOptions::default().with_text("same"))
        .with_target(FileTarget::default().with_basename("same"));
    let options = ArchiveOptions::default().with_producer(producer).with_count(2);
    let bytes = generator.tar(&options, TarCompression::None, None).unwrap();

    let mut archive = ::tar::Archive::new(Cursor::new(bytes));
    let mut names = Vec::new();
    for entry in archive.entries().unwrap() {
        let mut entry = entry.unwrap();
        let mut text = String::new();
        entry.read_to_string(&mut text).unwrap();
        assert_eq!(text, "same");
        names.push(entry.path().unwrap().to_string_lossy().into_owned());
    }
    assert_eq!(names, ["same.txt", "same.txt"]);
    assert!(files_in(&temp_dir.path().join("fixtures")).is_empty());
}


#[test]
fn test_zip_of_many_files_removes_staging_copies() {
    let temp_dir = tempdir().unwrap();
    let generator = generator(temp_dir.path());

    let producer = InnerFileProducer::many(|generator, target| {
        (0..3)
            .map(|i| {
                let target = target.clone().with_basename(format!("page_{i}"));
                generator.txt_file(&TextFileOptions::default().with_text(format!("page {i}")), &target)
            })
            .collect()
    });
    let options = ArchiveOptions::default()
        .with_producer(producer)
        .with_count(10)
        .with_directory("pages");

    let mut metadata = MetaData::new();
    let archive = generator
        .zip_file(&options, Some(&mut metadata), &FileTarget::default().with_basename("bundle"))
        .unwrap();

    assert_eq!(metadata.files, ["pages/page_0.txt", "pages/page_1.txt", "pages/page_2.txt"]);
    assert_eq!(files_in(&temp_dir.path().join("fixtures")), ["bundle.zip"]);
    assert_eq!(generator.registry().len(), 1);

    let mut zip = ::zip::ZipArchive::new(Cursor::new(archive.read_bytes().unwrap())).unwrap();
    let mut text = String::new();
    zip.by_name("pages/page_1.txt")
        .unwrap()
        .read_to_string(&mut text)
        .unwrap();
    assert_eq!(text, "page 1");
}

#[test]
fn test_nested_archives() {
    let temp_dir = tempdir().unwrap();
    let generator = generator(temp_dir.path());

    let inner = ArchiveOptions::default()
        .with_producer(InnerFileProducer::docx(PageOptions::default().with_nb_pages(2)))
        .with_count(2);
    let options = ArchiveOptions::default()
        .with_producer(InnerFileProducer::zip(inner))
        .with_count(2);

    let mut metadata = MetaData::new();
    let bytes = generator
        .tar(&options, TarCompression::Gz, Some(&mut metadata))
        .unwrap();

    assert_eq!(metadata.files.len(), 2);
    assert!(metadata.files.iter().all(|name| name.ends_with(".zip")));
    assert!(bytes.starts_with(&[0x1f, 0x8b]));
    // Only the bytes variant ran at the top level, and every staged file is gone
    assert!(files_in(&temp_dir.path().join("fixtures")).is_empty());
    assert!(generator.registry().is_empty());
}

#[test]
fn test_registry_clean_up_deletes_files() {
    let temp_dir = tempdir().unwrap();
    let generator = generator(temp_dir.path());

    let target = FileTarget::default();
    let files = vec![
        generator.text_pdf_file(&PageOptions::default(), None, &target).unwrap(),
        generator.wav_file(&WavOptions::default().with_sample_rate(8000), &target).unwrap(),
        generator.eml_file(&EmlOptions::default(), None, &target).unwrap(),
        generator.generic_file("a,b\n1,2\n", "csv", &target).unwrap(),
    ];
    assert_eq!(generator.registry().len(), files.len());
    assert!(files.iter().all(GeneratedFile::exists));

    generator.registry().clean_up();
    assert!(generator.registry().is_empty());
    assert!(files.iter().all(|file| !file.exists()));
    assert!(files_in(&temp_dir.path().join("fixtures")).is_empty());
}

#[test]
fn test_files_from_an_other_storage() {
    let temp_dir = tempdir().unwrap();
    let other_dir = tempdir().unwrap();
    let generator = generator(temp_dir.path());
    let other: Arc<dyn Storage> = Arc::new(FileSystemStorage::new(other_dir.path(), "elsewhere"));

    let file = generator
        .odt_file(
            &PageOptions::default(),
            None,
            &FileTarget::default().with_storage(other).with_basename("report"),
        )
        .unwrap();

    assert_eq!(file, "elsewhere/report.odt");
    assert!(other_dir.path().join("elsewhere/report.odt").exists());
    assert!(generator.registry().remove(&file));
    assert!(!file.exists());
}
