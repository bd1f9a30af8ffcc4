//! Encoding tables and model-name lookup.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use tiktoken_rs::tokenizer::{get_tokenizer, Tokenizer};
use tiktoken_rs::CoreBPE;

use crate::error::{Result, TokCountError};

/// BPE encoding table
///
/// Different models use different tokenizers. The encoding determines which
/// vocabulary and merge rules are used to split text into tokens.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Encoding {
    /// OpenAI cl100k_base encoding (GPT-3.5, GPT-4, embeddings)
    #[default]
    Cl100kBase,
    /// OpenAI o200k_base encoding (GPT-4o, o1, o3)
    O200kBase,
    /// p50k_base encoding (Codex, text-davinci-002/003)
    P50kBase,
    /// p50k_edit encoding (edit models)
    P50kEdit,
    /// r50k_base encoding (GPT-3 base models, GPT-2)
    R50kBase,
}

/// Encoding substituted when a model name is not recognized.
pub const FALLBACK_ENCODING: Encoding = Encoding::Cl100kBase;

impl Encoding {
    /// Every supported encoding, in listing order.
    pub const ALL: [Encoding; 5] = [
        Encoding::O200kBase,
        Encoding::Cl100kBase,
        Encoding::P50kBase,
        Encoding::P50kEdit,
        Encoding::R50kBase,
    ];

    /// Look up the encoding associated with a model name
    ///
    /// Returns `None` when the tokenizer library does not know the model.
    /// Prefix rules apply, so dated snapshots resolve like their family.
    ///
    /// # Examples
    /// ```
    /// use tokcount::tokenizer::Encoding;
    ///
    /// assert_eq!(Encoding::for_model("gpt-4"), Some(Encoding::Cl100kBase));
    /// assert_eq!(Encoding::for_model("gpt-4o"), Some(Encoding::O200kBase));
    /// assert_eq!(Encoding::for_model("not-a-model"), None);
    /// ```
    pub fn for_model(model: &str) -> Option<Self> {
        let encoding = match get_tokenizer(model)? {
            Tokenizer::Cl100kBase => Encoding::Cl100kBase,
            Tokenizer::P50kBase => Encoding::P50kBase,
            Tokenizer::P50kEdit => Encoding::P50kEdit,
            Tokenizer::R50kBase | Tokenizer::Gpt2 => Encoding::R50kBase,
            // o200k_base and its harmony variant share one vocabulary
            _ => Encoding::O200kBase,
        };
        Some(encoding)
    }

    /// Get encoding name as string
    pub fn name(&self) -> &'static str {
        match self {
            Encoding::Cl100kBase => "cl100k_base",
            Encoding::O200kBase => "o200k_base",
            Encoding::P50kBase => "p50k_base",
            Encoding::P50kEdit => "p50k_edit",
            Encoding::R50kBase => "r50k_base",
        }
    }

    /// Build the BPE table for this encoding.
    pub fn load(&self) -> Result<CoreBPE> {
        let bpe = match self {
            Encoding::Cl100kBase => tiktoken_rs::cl100k_base(),
            Encoding::O200kBase => tiktoken_rs::o200k_base(),
            Encoding::P50kBase => tiktoken_rs::p50k_base(),
            Encoding::P50kEdit => tiktoken_rs::p50k_edit(),
            Encoding::R50kBase => tiktoken_rs::r50k_base(),
        };
        bpe.map_err(|e| TokCountError::Tokenizer(format!("failed to load {}: {e}", self.name())))
    }
}

impl fmt::Display for Encoding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Encoding {
    type Err = TokCountError;

    fn from_str(s: &str) -> Result<Self> {
        let wanted = s.trim().to_lowercase();
        Encoding::ALL
            .into_iter()
            .find(|encoding| encoding.name() == wanted)
            .ok_or_else(|| TokCountError::UnknownEncoding(s.to_string()))
    }
}
