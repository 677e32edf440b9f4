use crate::document::{ZipEntry, build_zip};
use crate::error::Result;
use crate::generator::Generator;
use crate::metadata::MetaData;

use super::{ArchiveOptions, collect_inner_files};

/// Build a ZIP archive from the produced files
///
/// Without a producer the archive holds one text file per `count`.
pub fn zip(generator: &Generator, options: &ArchiveOptions, metadata: Option<&mut MetaData>) -> Result<Vec<u8>> {
    let producer = options.producer.clone().unwrap_or_default();
    let files = collect_inner_files(generator, &producer, options)?;
    if let Some(metadata) = metadata {
        for file in &files {
            metadata.add_file(&file.name);
        }
    }
    build_zip(
        files
            .iter()
            .map(|file| ZipEntry::deflated(&file.name, &file.data)),
    )
}
