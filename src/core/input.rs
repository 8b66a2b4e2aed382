//! Input reading
//!
//! Every text tool reads its input from one of three places:
//! - an inline argument
//! - a file (`--file`)
//! - stdin, when neither of the above is given
//!
//! Non-UTF-8 bytes are replaced (lossy), and input larger than the configured cap is
//! truncated at a character boundary and flagged in the result metadata.

use anyhow::{Context, Result};
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

use crate::core::model::Meta;
use crate::core::util::{strip_trailing_newline, truncate_string};

/// Default input cap in bytes (16 MB)
pub const DEFAULT_MAX_INPUT_BYTES: usize = 16 * 1024 * 1024;

/// Where the input text comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    Inline(String),
    File(PathBuf),
    Stdin,
}

impl InputSource {
    /// Pick a source from the CLI arguments; stdin when nothing is given
    pub fn from_args(text: Option<String>, file: Option<PathBuf>) -> Self {
        match (text, file) {
            (Some(text), _) => InputSource::Inline(text),
            (None, Some(path)) => InputSource::File(path),
            (None, None) => InputSource::Stdin,
        }
    }
}

/// Input text ready for a transform
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Input {
    pub text: String,

    /// The input exactly as read: not decoded, not truncated
    pub bytes: Vec<u8>,

    /// Size of the input before truncation
    pub original_bytes: u64,

    pub truncated: bool,

    /// Whether invalid UTF-8 was replaced
    pub lossy: bool,
}

impl Input {
    /// Build an input from in-memory text, applying the size cap
    pub fn from_text(text: &str, max_bytes: usize) -> Self {
        let (capped, truncated) = truncate_string(text, max_bytes);
        if truncated {
            warn!(max_bytes, "input exceeds size cap; truncated");
        }
        Self {
            text: capped,
            bytes: text.as_bytes().to_vec(),
            original_bytes: text.len() as u64,
            truncated,
            lossy: false,
        }
    }

    fn from_bytes(bytes: Vec<u8>, max_bytes: usize) -> Self {
        let lossy = std::str::from_utf8(&bytes).is_err();
        if lossy {
            warn!("input is not valid UTF-8; invalid sequences were replaced");
        }
        let decoded = Self::from_text(&String::from_utf8_lossy(&bytes), max_bytes);
        Self {
            original_bytes: bytes.len() as u64,
            bytes,
            lossy,
            ..decoded
        }
    }

    /// Metadata describing the decoded text, merged into every result item
    pub fn meta(&self) -> Meta {
        Meta {
            input_bytes: Some(self.original_bytes),
            output_bytes: None,
            truncated: self.truncated,
            lossy: self.lossy,
        }
    }

    /// Metadata for tools that work on [`Input::bytes`] directly
    pub fn bytes_meta(&self) -> Meta {
        Meta {
            input_bytes: Some(self.original_bytes),
            ..Default::default()
        }
    }
}

/// Read input text from a source
pub fn read_input(source: &InputSource, max_bytes: usize) -> Result<Input> {
    let input = match source {
        InputSource::Inline(text) => Input::from_text(text, max_bytes),
        InputSource::File(path) => read_file(path, max_bytes)?,
        InputSource::Stdin => {
            let mut buffer = Vec::new();
            std::io::stdin()
                .read_to_end(&mut buffer)
                .context("Failed to read stdin")?;
            // `echo text | devkit ...` should not treat the shell's newline as input
            let trimmed_len = strip_trailing_newline(&buffer).len();
            buffer.truncate(trimmed_len);
            Input::from_bytes(buffer, max_bytes)
        }
    };

    debug!(
        bytes = input.original_bytes,
        truncated = input.truncated,
        lossy = input.lossy,
        "read input"
    );
    Ok(input)
}

fn read_file(path: &Path, max_bytes: usize) -> Result<Input> {
    let bytes =
        std::fs::read(path).with_context(|| format!("Failed to read input file: {:?}", path))?;
    Ok(Input::from_bytes(bytes, max_bytes))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_source_from_args() {
        assert_eq!(
            InputSource::from_args(Some("x".into()), None),
            InputSource::Inline("x".into())
        );
        assert_eq!(
            InputSource::from_args(None, Some(PathBuf::from("a.json"))),
            InputSource::File(PathBuf::from("a.json"))
        );
        assert_eq!(InputSource::from_args(None, None), InputSource::Stdin);
    }

    #[test]
    fn test_inline_input() {
        let input = read_input(&InputSource::Inline("hello".into()), 1024).unwrap();
        assert_eq!(input.text, "hello");
        assert_eq!(input.original_bytes, 5);
        assert!(!input.truncated);
        assert!(!input.lossy);
    }

    #[test]
    fn test_inline_input_empty() {
        let input = read_input(&InputSource::Inline(String::new()), 1024).unwrap();
        assert_eq!(input.text, "");
        assert_eq!(input.original_bytes, 0);
    }

    #[test]
    fn test_inline_input_truncated() {
        let input = read_input(&InputSource::Inline("hello world".into()), 5).unwrap();
        assert_eq!(input.text, "hello");
        assert_eq!(input.original_bytes, 11);
        assert!(input.truncated);

        let meta = input.meta();
        assert_eq!(meta.input_bytes, Some(11));
        assert!(meta.truncated);
    }

    #[test]
    fn test_file_input_keeps_content() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(b"{\"a\":1}\n").unwrap();

        let input = read_input(&InputSource::File(file.path().to_path_buf()), 1024).unwrap();
        assert_eq!(input.text, "{\"a\":1}\n");
        assert_eq!(input.original_bytes, 8);
    }

    #[test]
    fn test_file_input_lossy() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[b'a', 0xff, b'b']).unwrap();

        let input = read_input(&InputSource::File(file.path().to_path_buf()), 1024).unwrap();
        assert!(input.lossy);
        assert_eq!(input.text, "a\u{fffd}b");
        assert_eq!(input.bytes, vec![b'a', 0xff, b'b']);
        assert_eq!(input.original_bytes, 3);
        assert!(input.meta().lossy);
    }

    #[test]
    fn test_bytes_survive_truncation() {
        let mut file = NamedTempFile::new().unwrap();
        file.write_all(&[0xff, 0xfe, 0x00, 0x80, b'x', b'y']).unwrap();

        let input = read_input(&InputSource::File(file.path().to_path_buf()), 2).unwrap();
        assert!(input.truncated);
        assert_eq!(input.bytes, vec![0xff, 0xfe, 0x00, 0x80, b'x', b'y']);

        let meta = input.bytes_meta();
        assert_eq!(meta.input_bytes, Some(6));
        assert!(!meta.truncated);
        assert!(!meta.lossy);
    }

    #[test]
    fn test_missing_file_is_error() {
        let result = read_input(
            &InputSource::File(PathBuf::from("/definitely/not/here.txt")),
            1024,
        );
        let err = result.unwrap_err();
        assert!(format!("{:#}", err).contains("Failed to read input file"));
    }
}
