//! tokcount error types.
//!
//! Every failure that ends a run is a [`TokCountError`]. An unknown *model*
//! name is deliberately absent: model lookup yields an `Option` and the
//! driver substitutes the fallback encoding.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that abort a token-counting run.
#[derive(Error, Debug)]
pub enum TokCountError {
    /// The input path does not exist.
    #[error("File '{}' not found.", .0.display())]
    FileNotFound(PathBuf),

    /// The input bytes are not valid UTF-8.
    #[error("Could not decode {input} as UTF-8.")]
    Decode {
        /// Human-readable name of the input ("file" or "stdin").
        input: String,
    },

    /// Any other failure while reading the input.
    #[error("Could not read input: {0}")]
    Io(#[from] std::io::Error),

    /// Writing the report failed.
    #[error("Could not write output: {0}")]
    Output(#[source] std::io::Error),

    /// An explicitly requested encoding name is not recognized.
    #[error("Unknown encoding '{0}'. Run with --list-encodings to see supported names.")]
    UnknownEncoding(String),

    /// Configuration file could not be read or parsed.
    #[error("Config error: {0}")]
    Config(String),

    /// The BPE table could not be constructed.
    #[error("Tokenizer error: {0}")]
    Tokenizer(String),
}

/// Result type alias for tokcount operations
pub type Result<T> = std::result::Result<T, TokCountError>;

impl TokCountError {
    /// Process exit status for this error.
    ///
    /// Usage errors never reach here; clap exits with its own status.
    pub fn exit_code(&self) -> u8 {
        1
    }

    /// Line written to stderr before exiting.
    ///
    /// Read failures keep the `Error reading input: <cause>` form; everything
    /// else is prefixed with `Error: `.
    pub fn stderr_line(&self) -> String {
        match self {
            TokCountError::Io(err) => format!("Error reading input: {err}"),
            other => format!("Error: {other}"),
        }
    }
}

impl From<toml::de::Error> for TokCountError {
    fn from(err: toml::de::Error) -> Self {
        TokCountError::Config(err.to_string())
    }
}
