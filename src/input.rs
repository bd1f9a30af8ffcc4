//! Input acquisition.
//!
//! Text comes either from a file path or from a reader (standard input in the
//! binary). Both paths read raw bytes first so that invalid UTF-8 surfaces as
//! [`TokCountError::Decode`] rather than a generic I/O error.

use std::fmt;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::error::{Result, TokCountError};

/// Where the input text comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputSource {
    /// A file on disk.
    File(PathBuf),
    /// Standard input (or any reader supplied by the caller).
    Stdin,
}

impl InputSource {
    /// Build a source from an optional path argument.
    pub fn from_arg(path: Option<PathBuf>) -> Self {
        match path {
            Some(path) => InputSource::File(path),
            None => InputSource::Stdin,
        }
    }

    /// Read the full input as text.
    ///
    /// `stdin` is only consulted for [`InputSource::Stdin`].
    pub fn read_to_string<R: Read>(&self, stdin: R) -> Result<String> {
        match self {
            InputSource::File(path) => read_file(path),
            InputSource::Stdin => read_reader(stdin),
        }
    }

    /// Line announced in verbose mode right after the input has been read.
    pub fn announcement(&self) -> String {
        match self {
            InputSource::File(path) => format!("File: {}", path.display()),
            InputSource::Stdin => "Reading from stdin...".to_string(),
        }
    }
}

impl fmt::Display for InputSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputSource::File(path) => write!(f, "{}", path.display()),
            InputSource::Stdin => write!(f, "<stdin>"),
        }
    }
}

/// Read a file as UTF-8 text.
///
/// The existence check runs before opening so a missing path is reported as
/// [`TokCountError::FileNotFound`] with the literal path.
pub fn read_file(path: &Path) -> Result<String> {
    if !path.exists() {
        return Err(TokCountError::FileNotFound(path.to_path_buf()));
    }

    let bytes = std::fs::read(path)?;
    tracing::debug!(path = %path.display(), bytes = bytes.len(), "read input file");
    decode(bytes, "file")
}

/// Read everything from `reader` as UTF-8 text.
pub fn read_reader<R: Read>(mut reader: R) -> Result<String> {
    let mut bytes = Vec::new();
    reader.read_to_end(&mut bytes)?;
    tracing::debug!(bytes = bytes.len(), "read input from stdin");
    decode(bytes, "stdin")
}

fn decode(bytes: Vec<u8>, input: &str) -> Result<String> {
    let text = String::from_utf8(bytes).map_err(|_| TokCountError::Decode {
        input: input.to_string(),
    })?;
    Ok(normalize_newlines(text))
}

/// Translate `\r\n` and lone `\r` line endings to `\n`.
pub fn normalize_newlines(text: String) -> String {
    if !text.contains('\r') {
        return text;
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Whitespace as used for blank detection and word splitting.
///
/// Unicode `White_Space` plus the ASCII information separators
/// `\x1c..=\x1f`.
pub fn is_text_whitespace(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

/// True when the text is empty or contains only whitespace.
pub fn is_blank(text: &str) -> bool {
    text.chars().all(is_text_whitespace)
}
