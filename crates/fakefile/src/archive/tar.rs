use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::compress;
use crate::error::{EncodingError, FakefileError, Result, invalid_format};
use crate::generator::Generator;
use crate::metadata::MetaData;

use super::{ArchiveOptions, collect_inner_files};

/// Stream compression applied to the whole TAR archive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TarCompression {
    #[default]
    None,
    Gz,
    Bz2,
    Xz,
}

impl TarCompression {
    /// Extension of a file holding an archive with this compression
    pub fn extension(&self) -> &'static str {
        match self {
            TarCompression::None => "tar",
            TarCompression::Gz => "tar.gz",
            TarCompression::Bz2 => "tar.bz2",
            TarCompression::Xz => "tar.xz",
        }
    }

    fn apply(&self, data: Vec<u8>) -> Result<Vec<u8>> {
        match self {
            TarCompression::None => Ok(data),
            TarCompression::Gz => compress::gzip(&data),
            TarCompression::Bz2 => compress::bzip2(&data),
            TarCompression::Xz => compress::xz(&data),
        }
    }
}

impl fmt::Display for TarCompression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            TarCompression::None => "none",
            TarCompression::Gz => "gz",
            TarCompression::Bz2 => "bz2",
            TarCompression::Xz => "xz",
        };
        f.write_str(name)
    }
}

impl FromStr for TarCompression {
    type Err = FakefileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "" | "none" => Ok(TarCompression::None),
            "gz" | "gzip" => Ok(TarCompression::Gz),
            "bz2" | "bzip2" => Ok(TarCompression::Bz2),
            "xz" => Ok(TarCompression::Xz),
            other => Err(invalid_format(
                "compression",
                format!("`{other}` is not one of gz, bz2, xz"),
            )),
        }
    }
}

/// Build a (possibly compressed) TAR archive from the produced files
pub fn tar(
    generator: &Generator,
    options: &ArchiveOptions,
    compression: TarCompression,
    metadata: Option<&mut MetaData>,
) -> Result<Vec<u8>> {
    let producer = options.producer.clone().unwrap_or_default();
    let files = collect_inner_files(generator, &producer, options)?;
    if let Some(metadata) = metadata {
        for file in &files {
            metadata.add_file(&file.name);
        }
    }

    let mtime = OffsetDateTime::now_utc().unix_timestamp().max(0) as u64;
    let mut builder = ::tar::Builder::new(Vec::new());
    for file in &files {
        let mut header = ::tar::Header::new_gnu();
        header.set_size(file.data.len() as u64);
        header.set_mode(0o644);
        header.set_mtime(mtime);
        header.set_entry_type(::tar::EntryType::Regular);
        builder
            .append_data(&mut header, &file.name, file.data.as_slice())
            .map_err(|e| EncodingError::archive("tar", e))?;
    }
    let data = builder
        .into_inner()
        .map_err(|e| EncodingError::archive("tar", e))?;
    compression.apply(data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::InnerFileProducer;
    use crate::image::ImageOptions;
    use crate::registry::FileRegistry;
    use crate::storage::MemoryStorage;
    use std::io::Read;
    use std::sync::Arc;

    fn generator() -> Generator {
        Generator::builder()
            .storage(Arc::new(MemoryStorage::new()))
            .registry(Arc::new(FileRegistry::new()))
            .build()
    }

    fn decompress(compression: TarCompression, data: &[u8]) -> Vec<u8> {
        let mut out = Vec::new();
        match compression {
            TarCompression::None => out.extend_from_slice(data),
            TarCompression::Gz => {
                flate2::read::GzDecoder::new(data).read_to_end(&mut out).unwrap();
            }
            TarCompression::Bz2 => {
                bzip2::read::BzDecoder::new(data).read_to_end(&mut out).unwrap();
            }
            TarCompression::Xz => {
                xz2::read::XzDecoder::new(data).read_to_end(&mut out).unwrap();
            }
        }
        out
    }

    fn entries(data: &[u8]) -> Vec<(String, Vec<u8>)> {
        let mut archive = ::tar::Archive::new(data);
        archive
            .entries()
            .unwrap()
            .map(|entry| {
                let mut entry = entry.unwrap();
                let path = entry.path().unwrap().to_string_lossy().into_owned();
                let mut content = Vec::new();
                entry.read_to_end(&mut content).unwrap();
                (path, content)
            })
            .collect()
    }

    #[test]
    fn test_tar_every_compression() {
        let generator = generator();
        for compression in [
            TarCompression::None,
            TarCompression::Gz,
            TarCompression::Bz2,
            TarCompression::Xz,
        ] {
            let mut metadata = MetaData::new();
            let options = ArchiveOptions::default()
                .with_count(2)
                .with_directory("ttt")
                .with_producer(InnerFileProducer::png(ImageOptions::default().with_size(2, 2)));
            let bytes = tar(&generator, &options, compression, Some(&mut metadata)).unwrap();

            let entries = entries(&decompress(compression, &bytes));
            assert_eq!(entries.len(), 2, "{compression}");
            for (path, content) in &entries {
                assert!(path.starts_with("ttt/") && path.ends_with(".png"));
                assert!(content.starts_with(b"\x89PNG"));
            }
            let paths: Vec<_> = entries.into_iter().map(|(path, _)| path).collect();
            assert_eq!(metadata.files, paths);
        }
        assert!(generator.registry().is_empty());
    }

    #[test]
    fn test_compression_names() {
        assert_eq!("gz".parse::<TarCompression>().unwrap(), TarCompression::Gz);
        assert_eq!("BZ2".parse::<TarCompression>().unwrap(), TarCompression::Bz2);
        assert_eq!("xz".parse::<TarCompression>().unwrap(), TarCompression::Xz);
        assert!("zstd".parse::<TarCompression>().unwrap_err().is_invalid_format());
        assert_eq!(TarCompression::Gz.extension(), "tar.gz");
    }
}
