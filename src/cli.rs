//! Command driver.
//!
//! [`run`] performs one invocation end to end against caller-supplied
//! standard input and output, so it can be exercised without a process.

use std::io::{Read, Write};

use crate::config::Config;
use crate::error::{Result, TokCountError};
use crate::input::{is_blank, InputSource};
use crate::report::{write_empty_notice, Report};
use crate::tokenizer::{Encoding, Resolution, TokenCounter, FALLBACK_ENCODING};

/// How the report is printed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Bare count, or labeled lines in verbose mode.
    #[default]
    Text,
    /// One JSON object.
    Json,
}

/// Fully resolved options for one run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Options {
    /// Where the text comes from.
    pub source: InputSource,
    /// Requested model name.
    pub model: String,
    /// Explicit encoding, bypassing model lookup.
    pub encoding: Option<Encoding>,
    /// Print extended statistics.
    pub verbose: bool,
    /// Output format.
    pub format: OutputFormat,
}

impl Options {
    /// Options for `source` with the given model and everything else default.
    pub fn new(source: InputSource, model: impl Into<String>) -> Self {
        Self {
            source,
            model: model.into(),
            encoding: None,
            verbose: false,
            format: OutputFormat::Text,
        }
    }

    /// Build options from a merged configuration.
    ///
    /// Fails with [`TokCountError::UnknownEncoding`] if the configured
    /// encoding name is not recognized.
    pub fn from_config(source: InputSource, config: Config, format: OutputFormat) -> Result<Self> {
        let encoding = config
            .encoding
            .as_deref()
            .map(str::parse::<Encoding>)
            .transpose()?;

        Ok(Self {
            source,
            model: config.model,
            encoding,
            verbose: config.verbose,
            format,
        })
    }

    /// Set verbose mode
    pub fn verbose(mut self, verbose: bool) -> Self {
        self.verbose = verbose;
        self
    }

    /// Set an explicit encoding
    pub fn encoding(mut self, encoding: Encoding) -> Self {
        self.encoding = Some(encoding);
        self
    }

    /// Set the output format
    pub fn format(mut self, format: OutputFormat) -> Self {
        self.format = format;
        self
    }

    fn resolve(&self) -> Resolution {
        match self.encoding {
            Some(encoding) => Resolution::with_encoding(&self.model, encoding),
            None => Resolution::for_model(&self.model),
        }
    }
}

/// Run one invocation: read, count, print.
///
/// Returns the report that was printed. Blank input short-circuits before any
/// encoding table is loaded and yields an all-zero report; in text mode it
/// prints only the two-line empty notice, even when verbose.
pub fn run<R: Read, W: Write>(options: &Options, stdin: R, out: &mut W) -> Result<Report> {
    let text = options.source.read_to_string(stdin)?;
    let text_mode = options.format == OutputFormat::Text;

    if is_blank(&text) {
        tracing::warn!(source = %options.source, "input is empty or whitespace-only");
        let encoding = options
            .encoding
            .or_else(|| Encoding::for_model(&options.model))
            .unwrap_or(FALLBACK_ENCODING);
        let report = Report::empty(&options.model, encoding);
        let written = match options.format {
            OutputFormat::Text => write_empty_notice(out),
            OutputFormat::Json => report.write_json(out),
        };
        written.map_err(TokCountError::Output)?;
        return Ok(report);
    }

    if options.verbose && text_mode {
        writeln!(out, "{}", options.source.announcement()).map_err(TokCountError::Output)?;
    }

    let resolution = options.resolve();
    if text_mode {
        if let Some(warning) = resolution.warning() {
            writeln!(out, "{warning}").map_err(TokCountError::Output)?;
        }
    }

    let counter = TokenCounter::new(resolution.encoding)?;
    let tokens = counter.count(&text);
    tracing::debug!(
        model = %resolution.model,
        encoding = resolution.encoding.name(),
        tokens,
        "counted tokens"
    );

    let report = Report::new(
        &resolution.model,
        resolution.encoding,
        resolution.fallback,
        &text,
        tokens,
    );

    let written = match (options.format, options.verbose) {
        (OutputFormat::Json, _) => report.write_json(out),
        (OutputFormat::Text, true) => report.write_verbose(out),
        (OutputFormat::Text, false) => report.write_plain(out),
    };
    written.map_err(TokCountError::Output)?;

    Ok(report)
}

/// Print every supported encoding name, one per line.
pub fn list_encodings<W: Write>(out: &mut W) -> Result<()> {
    for encoding in Encoding::ALL {
        writeln!(out, "{encoding}").map_err(TokCountError::Output)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{self, Cursor};

    fn run_stdin(options: &Options, input: &str) -> (Result<Report>, String) {
        let mut out = Vec::new();
        let result = run(options, Cursor::new(input.to_string()), &mut out);
        (result, String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_plain_count() {
        let options = Options::new(InputSource::Stdin, "gpt-4");
        let (result, out) = run_stdin(&options, "hello world");

        let report = result.unwrap();
        assert_eq!(report.tokens, 2);
        assert_eq!(out, "2\n");
    }

    #[test]
    fn test_verbose_stdin() {
        let options = Options::new(InputSource::Stdin, "gpt-4").verbose(true);
        let (_, out) = run_stdin(&options, "hello world");

        assert_eq!(
            out,
            "Reading from stdin...\nModel: gpt-4\nCharacters: 11\nWords (approx): 2\nToken count: 2\n"
        );
    }

    #[test]
    fn test_blank_input_never_resolves() {
        // An unknown model would print a warning if it were resolved.
        let options = Options::new(InputSource::Stdin, "no-such-model");
        let (result, out) = run_stdin(&options, " \n\t ");

        assert_eq!(result.unwrap().tokens, 0);
        assert_eq!(
            out,
            "Warning: Input is empty or contains only whitespace.\nToken count: 0\n"
        );
    }

    #[test]
    fn test_blank_input_ignores_verbose() {
        let options = Options::new(InputSource::Stdin, "gpt-4").verbose(true);
        let (_, out) = run_stdin(&options, "");

        assert_eq!(
            out,
            "Warning: Input is empty or contains only whitespace.\nToken count: 0\n"
        );
    }

    #[test]
    fn test_unknown_model_warns_and_counts() {
        let options = Options::new(InputSource::Stdin, "no-such-model");
        let (result, out) = run_stdin(&options, "hello world");

        let report = result.unwrap();
        assert!(report.fallback);
        assert_eq!(report.encoding, Encoding::Cl100kBase);
        assert_eq!(
            out,
            "Error: Model 'no-such-model' not supported. Using cl100k_base encoding.\n2\n"
        );
    }

    #[test]
    fn test_verbose_reports_requested_model_on_fallback() {
        let options = Options::new(InputSource::Stdin, "no-such-model").verbose(true);
        let (_, out) = run_stdin(&options, "hello world");
        assert!(out.contains("Model: no-such-model\n"));
        assert!(!out.contains("Model: cl100k_base"));
    }

    #[test]
    fn test_explicit_encoding_skips_lookup() {
        let options = Options::new(InputSource::Stdin, "no-such-model").encoding(Encoding::Cl100kBase);
        let (result, out) = run_stdin(&options, "hello world");

        assert!(!result.unwrap().fallback);
        assert_eq!(out, "2\n");
    }

    #[test]
    fn test_json_output() {
        let options = Options::new(InputSource::Stdin, "gpt-4")
            .verbose(true)
            .format(OutputFormat::Json);
        let (_, out) = run_stdin(&options, "hello world");

        assert_eq!(out.lines().count(), 1);
        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["model"], "gpt-4");
        assert_eq!(value["tokens"], 2);
        assert_eq!(value["characters"], 11);
        assert_eq!(value["words"], 2);
    }

    #[test]
    fn test_json_blank_input() {
        let options = Options::new(InputSource::Stdin, "gpt-4o").format(OutputFormat::Json);
        let (_, out) = run_stdin(&options, "");

        let value: serde_json::Value = serde_json::from_str(&out).unwrap();
        assert_eq!(value["tokens"], 0);
        assert_eq!(value["encoding"], "o200k_base");
    }

    #[test]
    fn test_from_config_rejects_unknown_encoding() {
        let config = Config {
            encoding: Some("bogus".to_string()),
            ..Config::default()
        };
        let err = Options::from_config(InputSource::Stdin, config, OutputFormat::Text).unwrap_err();
        assert!(matches!(err, TokCountError::UnknownEncoding(_)));
    }

    #[test]
    fn test_from_config_parses_encoding() {
        let config = Config {
            encoding: Some("o200k_base".to_string()),
            verbose: true,
            ..Config::default()
        };
        let options = Options::from_config(InputSource::Stdin, config, OutputFormat::Text).unwrap();
        assert_eq!(options.encoding, Some(Encoding::O200kBase));
        assert_eq!(options.model, "gpt-4");
        assert!(options.verbose);
    }

    #[test]
    fn test_list_encodings() {
        let mut out = Vec::new();
        list_encodings(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert_eq!(text.lines().count(), Encoding::ALL.len());
        assert!(text.lines().any(|l| l == "cl100k_base"));
    }

    #[test]
    fn test_output_failure() {
        struct Closed;

        impl Write for Closed {
            fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
                Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
            }

            fn flush(&mut self) -> io::Result<()> {
                Ok(())
            }
        }

        let options = Options::new(InputSource::Stdin, "gpt-4");
        let err = run(&options, Cursor::new("hello"), &mut Closed).unwrap_err();
        assert!(matches!(err, TokCountError::Output(_)));
    }
}
