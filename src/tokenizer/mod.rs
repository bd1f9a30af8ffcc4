//! Token counting utilities.
//!
//! This module resolves a model name to a tiktoken encoding table and counts
//! tokens with it. Unknown model names fall back to `cl100k_base`.
//!
//! # Supported Encodings
//!
//! - **o200k_base**: GPT-4o, o1, o3 models
//! - **cl100k_base**: GPT-3.5, GPT-4 (also the fallback)
//! - **p50k_base** / **p50k_edit**: Codex and edit models
//! - **r50k_base**: GPT-3 base models
//!
//! # Example
//!
//! ```no_run
//! use tokcount::tokenizer::{Resolution, TokenCounter};
//!
//! let resolution = Resolution::for_model("gpt-4");
//! let counter = TokenCounter::new(resolution.encoding)?;
//! println!("Token count: {}", counter.count("Hello, world!"));
//! # Ok::<(), tokcount::TokCountError>(())
//! ```

mod counter;
mod encoding;

pub use counter::{Resolution, TokenCounter};
pub use encoding::{Encoding, FALLBACK_ENCODING};
