//! Statistics and output rendering.

use std::io::Write;

use serde::Serialize;

use crate::input::is_text_whitespace;
use crate::tokenizer::Encoding;

/// Warning printed when the input is empty or whitespace-only.
pub const EMPTY_INPUT_WARNING: &str = "Warning: Input is empty or contains only whitespace.";

/// Result of one counting run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Report {
    /// Model name as requested (never the fallback's name).
    pub model: String,
    /// Encoding used to count.
    pub encoding: Encoding,
    /// Whether the fallback encoding was substituted.
    pub fallback: bool,
    /// Unicode scalar values in the input.
    pub characters: usize,
    /// Whitespace-separated words in the input.
    pub words: usize,
    /// Tokens produced by the encoder.
    pub tokens: usize,
}

impl Report {
    /// Gather the text statistics around an already computed token count.
    pub fn new(model: &str, encoding: Encoding, fallback: bool, text: &str, tokens: usize) -> Self {
        Self {
            model: model.to_string(),
            encoding,
            fallback,
            characters: text.chars().count(),
            words: approx_words(text),
            tokens,
        }
    }

    /// Report for input that was never tokenized.
    pub fn empty(model: &str, encoding: Encoding) -> Self {
        Self {
            model: model.to_string(),
            encoding,
            fallback: false,
            characters: 0,
            words: 0,
            tokens: 0,
        }
    }

    /// Bare token count on its own line.
    pub fn write_plain<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "{}", self.tokens)
    }

    /// Labeled lines with thousands grouping.
    pub fn write_verbose<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        writeln!(out, "Model: {}", self.model)?;
        writeln!(out, "Characters: {}", group_thousands(self.characters))?;
        writeln!(out, "Words (approx): {}", group_thousands(self.words))?;
        writeln!(out, "Token count: {}", group_thousands(self.tokens))
    }

    /// Single JSON object.
    pub fn write_json<W: Write>(&self, out: &mut W) -> std::io::Result<()> {
        serde_json::to_writer(&mut *out, self)?;
        writeln!(out)
    }
}

/// Two-line block printed instead of a count for blank input.
pub fn write_empty_notice<W: Write>(out: &mut W) -> std::io::Result<()> {
    writeln!(out, "{EMPTY_INPUT_WARNING}")?;
    writeln!(out, "Token count: 0")
}

/// Approximate word count: runs of non-whitespace.
pub fn approx_words(text: &str) -> usize {
    text.split(is_text_whitespace)
        .filter(|word| !word.is_empty())
        .count()
}

/// Format with comma thousands separators (`1234567` -> `1,234,567`).
pub fn group_thousands(n: usize) -> String {
    let digits = n.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
