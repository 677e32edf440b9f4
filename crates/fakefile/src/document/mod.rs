//! Zip-based office documents (DOCX, ODT)

mod docx;
mod odt;

pub use docx::docx;
pub use odt::odt;

use std::io::{Cursor, Write};

use zip::CompressionMethod;
use zip::write::SimpleFileOptions;

use crate::error::Result;

/// One member of a zip container
pub(crate) struct ZipEntry<'a> {
    pub name: &'a str,
    pub data: &'a [u8],
    pub method: CompressionMethod,
}

impl<'a> ZipEntry<'a> {
    pub fn deflated(name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            data,
            method: CompressionMethod::Deflated,
        }
    }

    pub fn stored(name: &'a str, data: &'a [u8]) -> Self {
        Self {
            name,
            data,
            method: CompressionMethod::Stored,
        }
    }
}

/// Write the entries, in order, into an in-memory zip container
pub(crate) fn build_zip<'a>(entries: impl IntoIterator<Item = ZipEntry<'a>>) -> Result<Vec<u8>> {
    let mut writer = zip::ZipWriter::new(Cursor::new(Vec::new()));
    for entry in entries {
        let options = SimpleFileOptions::default().compression_method(entry.method);
        writer.start_file(entry.name, options)?;
        writer.write_all(entry.data)?;
    }
    Ok(writer.finish()?.into_inner())
}

/// Escape text for use in XML character data and attributes
pub(crate) fn escape_xml(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
