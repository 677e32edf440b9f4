//! Minimal PDF writers
//!
//! Two profiles share one [`ObjectWriter`]: a text profile with one line of
//! Helvetica per page and a graphic profile drawing one shared image per
//! page. The cross-reference table is built from the offsets recorded while
//! the objects are appended, so every entry points at its `N 0 obj` line.

mod graphic;
mod text;

pub use graphic::{GraphicPdfOptions, graphic_pdf};
pub use text::text_pdf;

use std::fmt;
use std::io::Write;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::{FakefileError, Result, invalid_format};

/// Which PDF profile the generic `pdf` entry point produces
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PdfKind {
    #[default]
    Graphic,
    Text,
}

impl fmt::Display for PdfKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PdfKind::Graphic => f.write_str("graphic"),
            PdfKind::Text => f.write_str("text"),
        }
    }
}

impl FromStr for PdfKind {
    type Err = FakefileError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "graphic" => Ok(PdfKind::Graphic),
            "text" => Ok(PdfKind::Text),
            other => Err(invalid_format("kind", format!("unknown PDF kind `{other}`"))),
        }
    }
}

/// Appends indirect objects and remembers where each one starts
pub(crate) struct ObjectWriter {
    output: Vec<u8>,
    xref_offsets: Vec<(u32, usize)>,
}

impl ObjectWriter {
    pub fn new(version: &str) -> Result<Self> {
        let mut output = Vec::new();
        writeln!(output, "%PDF-{version}")?;
        Ok(Self {
            output,
            xref_offsets: Vec::new(),
        })
    }

    fn begin(&mut self, id: u32) -> Result<()> {
        self.xref_offsets.push((id, self.output.len()));
        writeln!(self.output, "{id} 0 obj")?;
        Ok(())
    }

    /// Write `id 0 obj <body> endobj`
    pub fn object(&mut self, id: u32, body: &str) -> Result<()> {
        self.begin(id)?;
        writeln!(self.output, "{body}")?;
        writeln!(self.output, "endobj")?;
        Ok(())
    }

    /// Write a stream object; `/Length` is appended to `dict_entries`
    pub fn stream(&mut self, id: u32, dict_entries: &str, data: &[u8]) -> Result<()> {
        self.begin(id)?;
        writeln!(self.output, "<<{dict_entries}/Length {}>>", data.len())?;
        writeln!(self.output, "stream")?;
        self.output.extend_from_slice(data);
        writeln!(self.output)?;
        writeln!(self.output, "endstream")?;
        writeln!(self.output, "endobj")?;
        Ok(())
    }

    /// Number of objects written so far
    pub fn object_count(&self) -> usize {
        self.xref_offsets.len()
    }

    /// Append the xref table and trailer
    pub fn finish(mut self, root: u32) -> Result<Vec<u8>> {
        self.xref_offsets.sort_by_key(|(id, _)| *id);
        let size = self.xref_offsets.last().map_or(0, |(id, _)| *id) + 1;

        let xref_start = self.output.len();
        writeln!(self.output, "xref")?;
        writeln!(self.output, "0 {size}")?;
        writeln!(self.output, "0000000000 65535 f ")?;
        let mut entries = self.xref_offsets.iter().peekable();
        for id in 1..size {
            match entries.next_if(|(entry_id, _)| *entry_id == id) {
                Some((_, offset)) => writeln!(self.output, "{offset:010} 00000 n ")?,
                None => writeln!(self.output, "0000000000 65535 f ")?,
            }
        }

        writeln!(self.output, "trailer")?;
        writeln!(self.output, "<</Size {size}/Root {root} 0 R>>")?;
        writeln!(self.output, "startxref")?;
        writeln!(self.output, "{xref_start}")?;
        write!(self.output, "%%EOF")?;
        Ok(self.output)
    }
}

/// Escape a PDF literal string
pub(crate) fn escape_string(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '\\' | '(' | ')' => {
                escaped.push('\\');
                escaped.push(c);
            }
            _ => escaped.push(c),
        }
    }
    escaped
}
