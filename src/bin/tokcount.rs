//! tokcount CLI binary.
//!
//! Counts the tokens a text occupies under a language-model tokenizer.
//!
//! # Exit codes
//!
//! - `0` success, including empty input
//! - `1` missing file, undecodable input, read failure, bad config or encoding
//! - `2` malformed arguments (reported by clap)

use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use tokcount::{
    config::Config, list_encodings, run, InputSource, OutputFormat, Options, TokCountError,
    VERSION,
};

#[derive(Parser)]
#[command(name = "tokcount")]
#[command(version = VERSION)]
#[command(about = "Count tokens in a text file using OpenAI's tiktoken encodings", long_about = None)]
struct Cli {
    /// Path to the text file (if not provided, reads from stdin)
    file_path: Option<PathBuf>,

    /// Model to use for tokenization (default: gpt-4)
    #[arg(short, long)]
    model: Option<String>,

    /// Encoding to use directly, bypassing the model lookup (e.g. cl100k_base)
    #[arg(short, long)]
    encoding: Option<String>,

    /// Show additional details
    #[arg(short, long, overrides_with = "no_verbose")]
    verbose: bool,

    /// Turn off verbose output set in the config file
    #[arg(long, overrides_with = "verbose")]
    no_verbose: bool,

    /// Print the report as JSON
    #[arg(long)]
    json: bool,

    /// Config file path (default: <config dir>/tokcount/config.toml)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// List supported encodings and exit
    #[arg(long)]
    list_encodings: bool,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    if let Err(e) = init_logging() {
        eprintln!("Warning: logging disabled: {e}");
    }

    match execute(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            tracing::debug!(error = ?err, "run failed");
            eprintln!("{}", err.stderr_line());
            ExitCode::from(err.exit_code())
        },
    }
}

fn execute(cli: Cli) -> Result<(), TokCountError> {
    let stdout = io::stdout();
    let mut out = stdout.lock();

    if cli.list_encodings {
        return list_encodings(&mut out);
    }

    let config = Config::load(cli.config.as_deref())?
        .with_env()
        .with_cli(cli.model, cli.encoding, verbose_flag(cli.verbose, cli.no_verbose));

    let format = if cli.json {
        OutputFormat::Json
    } else {
        OutputFormat::Text
    };
    let options = Options::from_config(InputSource::from_arg(cli.file_path), config, format)?;

    run(&options, io::stdin().lock(), &mut out)?;
    Ok(())
}

fn verbose_flag(verbose: bool, no_verbose: bool) -> Option<bool> {
    if verbose {
        Some(true)
    } else if no_verbose {
        Some(false)
    } else {
        None
    }
}

/// Logs go to stderr so stdout carries only the report. Quiet unless `RUST_LOG` is set.
fn init_logging() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("error")),
        )
        .try_init()
        .map_err(|e| anyhow::anyhow!("{e}"))
}
