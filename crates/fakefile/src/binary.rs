//! Raw byte payloads

use rand::RngCore;

/// Default length of [`bin`]
pub const DEFAULT_BIN_LENGTH: usize = 16;

/// `length` random bytes
pub fn bin(length: usize) -> Vec<u8> {
    let mut data = vec![0u8; length];
    rand::thread_rng().fill_bytes(&mut data);
    data
}

/// Content of a file written verbatim by `generic_file`
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileContent {
    Text(String),
    Bytes(Vec<u8>),
}

impl FileContent {
    pub fn as_bytes(&self) -> &[u8] {
        match self {
            FileContent::Text(text) => text.as_bytes(),
            FileContent::Bytes(bytes) => bytes,
        }
    }

    /// The text itself, used as the content summary of the file
    pub fn as_text(&self) -> Option<&str> {
        match self {
            FileContent::Text(text) => Some(text),
            FileContent::Bytes(_) => None,
        }
    }
}

impl From<String> for FileContent {
    fn from(text: String) -> Self {
        FileContent::Text(text)
    }
}

impl From<&str> for FileContent {
    fn from(text: &str) -> Self {
        FileContent::Text(text.to_string())
    }
}

impl From<Vec<u8>> for FileContent {
    fn from(bytes: Vec<u8>) -> Self {
        FileContent::Bytes(bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bin_length() {
        assert_eq!(bin(DEFAULT_BIN_LENGTH).len(), 16);
        assert!(bin(0).is_empty());
        // 1 KiB of zeroes from a working RNG is practically impossible
        assert!(bin(1024).iter().any(|&byte| byte != 0));
    }

    #[test]
    fn test_file_content() {
        let text = FileContent::from("hello");
        assert_eq!(text.as_bytes(), b"hello");
        assert_eq!(text.as_text(), Some("hello"));
        assert_eq!(FileContent::from(vec![1, 2]).as_text(), None);
    }
}
