//! Source of filler text for text-bearing generators
//!
//! Generators only rely on the [`ContentProvider`] contract: it returns the
//! requested number of non-empty strings. [`LoremProvider`] is the default.

use rand::Rng;
use rand::seq::SliceRandom;
use serde::{Deserialize, Serialize};

use crate::error::{Result, missing_input};

/// Supplies text to generators that were not given explicit content
pub trait ContentProvider: std::fmt::Debug + Send + Sync {
    /// A single sentence
    fn sentence(&self) -> String;

    /// `count` sentences
    fn sentences(&self, count: usize) -> Vec<String> {
        (0..count).map(|_| self.sentence()).collect()
    }

    /// Running text of roughly `nb_chars` characters
    fn text(&self, nb_chars: usize) -> String;

    /// An e-mail address
    fn email(&self) -> String;
}

const WORDS: &[&str] = &[
    "beautiful", "is", "better", "than", "ugly", "explicit", "implicit", "simple", "complex",
    "complicated", "flat", "nested", "sparse", "dense", "readability", "counts", "special",
    "cases", "aren't", "enough", "to", "break", "the", "rules", "although", "practicality",
    "beats", "purity", "errors", "should", "never", "pass", "silently", "unless", "explicitly",
    "silenced", "in", "face", "of", "ambiguity", "refuse", "temptation", "guess", "there",
    "one", "obvious", "way", "do", "it", "now", "often", "right", "namespaces", "are", "honking",
    "great", "idea", "let's", "more", "those",
];

const NAMES: &[&str] = &[
    "alice", "bob", "carol", "dave", "erin", "frank", "grace", "heidi", "ivan", "judy",
    "mallory", "niaj", "olivia", "peggy", "rupert", "sybil", "trent", "victor", "walter",
];

const EMAIL_DOMAINS: &[&str] = &["example.com", "example.org", "example.net"];

/// Default provider drawing words from a fixed vocabulary
#[derive(Debug, Clone, Copy, Default)]
pub struct LoremProvider;

impl LoremProvider {
    pub fn new() -> Self {
        Self
    }

    fn words(&self, count: usize) -> Vec<&'static str> {
        let mut rng = rand::thread_rng();
        (0..count)
            .filter_map(|_| WORDS.choose(&mut rng).copied())
            .collect()
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

impl ContentProvider for LoremProvider {
    fn sentence(&self) -> String {
        format!("{}.", capitalize(&self.words(5).join(" ")))
    }

    fn text(&self, nb_chars: usize) -> String {
        let mut text = String::new();
        while text.len() < nb_chars.max(1) {
            if !text.is_empty() {
                text.push(' ');
            }
            text.push_str(&self.sentence());
        }
        if text.len() > nb_chars {
            // Vocabulary is ASCII, so any byte index is a char boundary
            text.truncate(nb_chars.max(1));
            text = text.trim_end().to_string();
        }
        text
    }

    fn email(&self) -> String {
        let mut rng = rand::thread_rng();
        let name = NAMES.choose(&mut rng).copied().unwrap_or("user");
        let domain = EMAIL_DOMAINS.choose(&mut rng).copied().unwrap_or("example.com");
        format!("{}{}@{}", name, rng.gen_range(0..1000), domain)
    }
}

/// Page selection shared by the text-bearing document encoders
///
/// Explicit `texts` win and fix the page count; otherwise `nb_pages`
/// sentences are drawn from the content provider.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PageOptions {
    pub nb_pages: Option<usize>,
    pub texts: Option<Vec<String>>,
}

impl Default for PageOptions {
    fn default() -> Self {
        Self {
            nb_pages: Some(1),
            texts: None,
        }
    }
}

impl PageOptions {
    /// Neither a page count nor texts
    pub fn empty() -> Self {
        Self {
            nb_pages: None,
            texts: None,
        }
    }

    pub fn with_nb_pages(mut self, nb_pages: usize) -> Self {
        self.nb_pages = Some(nb_pages);
        self
    }

    pub fn with_texts<S: Into<String>>(mut self, texts: impl IntoIterator<Item = S>) -> Self {
        self.texts = Some(texts.into_iter().map(Into::into).collect());
        self
    }

    /// One text per page
    pub fn resolve(&self, content: &dyn ContentProvider) -> Result<Vec<String>> {
        match (&self.texts, self.nb_pages) {
            (Some(texts), _) if !texts.is_empty() => Ok(texts.clone()),
            (_, Some(nb_pages)) if nb_pages > 0 => Ok(content.sentences(nb_pages)),
            _ => Err(missing_input("either `nb_pages` or `texts` must be given")),
        }
    }
}
