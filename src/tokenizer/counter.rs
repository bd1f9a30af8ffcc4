//! Token counting implementation.
//!
//! Uses tiktoken-rs for accurate BPE token counting. The table is built once
//! per [`TokenCounter`] and reused for every call.

use tiktoken_rs::CoreBPE;

use super::encoding::{Encoding, FALLBACK_ENCODING};
use crate::error::Result;

/// Outcome of resolving a requested model name to an encoding table.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Resolution {
    /// Model name as requested by the user.
    pub model: String,
    /// Encoding that will actually be used.
    pub encoding: Encoding,
    /// True when the model was unknown and [`FALLBACK_ENCODING`] was substituted.
    pub fallback: bool,
}

impl Resolution {
    /// Resolve a model name, falling back to `cl100k_base` when unknown
    ///
    /// # Example
    /// ```
    /// use tokcount::tokenizer::{Encoding, Resolution};
    ///
    /// let known = Resolution::for_model("gpt-4o");
    /// assert_eq!(known.encoding, Encoding::O200kBase);
    /// assert!(!known.fallback);
    ///
    /// let unknown = Resolution::for_model("my-local-model");
    /// assert_eq!(unknown.encoding, Encoding::Cl100kBase);
    /// assert!(unknown.fallback);
    /// ```
    pub fn for_model(model: &str) -> Self {
        match Encoding::for_model(model) {
            Some(encoding) => {
                tracing::debug!(model, encoding = encoding.name(), "resolved model");
                Self {
                    model: model.to_string(),
                    encoding,
                    fallback: false,
                }
            },
            None => {
                tracing::warn!(
                    model,
                    fallback = FALLBACK_ENCODING.name(),
                    "model not supported, using fallback encoding"
                );
                Self {
                    model: model.to_string(),
                    encoding: FALLBACK_ENCODING,
                    fallback: true,
                }
            },
        }
    }

    /// Use an explicitly chosen encoding, skipping the model lookup.
    pub fn with_encoding(model: &str, encoding: Encoding) -> Self {
        tracing::debug!(model, encoding = encoding.name(), "using explicit encoding");
        Self {
            model: model.to_string(),
            encoding,
            fallback: false,
        }
    }

    /// Notice printed to stdout when the fallback was substituted.
    pub fn warning(&self) -> Option<String> {
        self.fallback.then(|| {
            format!(
                "Error: Model '{}' not supported. Using {} encoding.",
                self.model,
                self.encoding.name()
            )
        })
    }
}

/// Token counter bound to one encoding table
///
/// # Example
/// ```no_run
/// use tokcount::tokenizer::{Encoding, TokenCounter};
///
/// let counter = TokenCounter::new(Encoding::O200kBase)?;
///
/// let tokens = counter.count("Hello, world!");
/// # Ok::<(), tokcount::TokCountError>(())
/// ```
pub struct TokenCounter {
    encoding: Encoding,
    bpe: CoreBPE,
}

impl TokenCounter {
    /// Create a new token counter with the specified encoding
    pub fn new(encoding: Encoding) -> Result<Self> {
        let bpe = encoding.load()?;
        Ok(Self { encoding, bpe })
    }

    /// Count tokens in text
    ///
    /// Special-token text such as `<|endoftext|>` counts as a single token.
    pub fn count(&self, text: &str) -> usize {
        self.bpe.encode_with_special_tokens(text).len()
    }

    /// Get the encoding used by this counter
    pub fn encoding(&self) -> Encoding {
        self.encoding
    }
}

impl std::fmt::Debug for TokenCounter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TokenCounter")
            .field("encoding", &self.encoding)
            .finish_non_exhaustive()
    }
}
