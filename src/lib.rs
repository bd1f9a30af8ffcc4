//! # tokcount - token counting for language-model tokenizers
//!
//! Reads text from a file or standard input and reports how many tokens it
//! occupies under a named model's tokenizer. The BPE encoding itself is done
//! by `tiktoken-rs`; this crate handles input acquisition, the
//! unknown-model fallback policy, and formatted output.
//!
//! ## Pipeline
//!
//! ```text
//! args ─> Config (file, env, CLI) ─> Options
//!                                      │
//!        InputSource::read_to_string <─┘
//!                   │
//!          blank? ──┴── yes ─> "Warning: ..." / "Token count: 0"
//!                   │
//!                   no
//!                   v
//!   Resolution::for_model ── unknown ─> cl100k_base + warning
//!                   │
//!            TokenCounter::count ─> Report ─> plain | verbose | json
//! ```
//!
//! ## Quick Start
//!
//! ```no_run
//! use std::io;
//! use tokcount::{run, InputSource, Options};
//!
//! let options = Options::new(InputSource::Stdin, "gpt-4").verbose(true);
//! let report = run(&options, io::stdin().lock(), &mut io::stdout().lock())?;
//! assert_eq!(report.model, "gpt-4");
//! # Ok::<(), tokcount::TokCountError>(())
//! ```
//!
//! ## Modules
//!
//! - [`cli`]: Driver tying the steps together
//! - [`config`]: Layered configuration
//! - [`error`]: Error types and result aliases
//! - [`input`]: File and stdin acquisition
//! - [`report`]: Statistics and rendering
//! - [`tokenizer`]: Encoding lookup, fallback and counting

pub mod cli;
pub mod config;
pub mod error;
pub mod input;
pub mod report;
pub mod tokenizer;

// Re-exports for convenience
pub use cli::{list_encodings, run, OutputFormat, Options};
pub use config::Config;
pub use error::{Result, TokCountError};
pub use input::InputSource;
pub use report::Report;
pub use tokenizer::{Encoding, Resolution, TokenCounter};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
