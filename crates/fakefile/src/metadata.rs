//! Out-of-band summary of generated content
//!
//! Generators fill a [`MetaData`] with the text they put into a file and, for
//! archives, the paths of the embedded entries. It is never written into the
//! produced bytes.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MetaData {
    /// Text content of the generated file, pages joined by newlines
    pub content: Option<String>,

    /// Archive entry paths, in insertion order
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub files: Vec<String>,
}

impl MetaData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the content with a single text
    pub fn add_content(&mut self, content: impl Into<String>) {
        self.content = Some(content.into());
    }

    /// Replace the content with several texts joined by `\n`
    pub fn add_lines<S: AsRef<str>>(&mut self, lines: &[S]) {
        let joined = lines
            .iter()
            .map(|line| line.as_ref())
            .collect::<Vec<_>>()
            .join("\n");
        self.content = Some(joined);
    }

    /// Record an archive entry path
    pub fn add_file(&mut self, path: impl Into<String>) {
        self.files.push(path.into());
    }
}
