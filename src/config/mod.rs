//! Configuration management.
//!
//! Defaults are layered, later layers winning:
//! - built-in defaults
//! - TOML config file (`--config`, else `<config dir>/tokcount/config.toml`)
//! - environment variables (`TOKCOUNT_MODEL`, `TOKCOUNT_ENCODING`)
//! - CLI arguments (applied by the binary; `--no-verbose` overrides a
//!   configured `verbose = true`)

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::{Result, TokCountError};

/// Model used when nothing else is configured.
pub const DEFAULT_MODEL: &str = "gpt-4";

/// Environment variable overriding the model name.
pub const ENV_MODEL: &str = "TOKCOUNT_MODEL";

/// Environment variable overriding the encoding name.
pub const ENV_ENCODING: &str = "TOKCOUNT_ENCODING";

/// Main configuration struct
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Model name used for tokenizer lookup
    pub model: String,

    /// Explicit encoding name; bypasses the model lookup when set
    pub encoding: Option<String>,

    /// Print extended statistics
    pub verbose: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model: DEFAULT_MODEL.to_string(),
            encoding: None,
            verbose: false,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    pub fn from_file(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let content = std::fs::read_to_string(&path).map_err(|e| {
            TokCountError::Config(format!(
                "Failed to read config file {}: {e}",
                path.display()
            ))
        })?;

        toml::from_str(&content).map_err(|e| {
            TokCountError::Config(format!("Failed to parse {}: {e}", path.display()))
        })
    }

    /// Default config file location, if the platform has a config dir.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tokcount").join("config.toml"))
    }

    /// Load the file layer.
    ///
    /// An explicit path must exist. The default path is optional and
    /// silently skipped when absent.
    pub fn load(explicit: Option<&Path>) -> Result<Self> {
        if let Some(path) = explicit {
            tracing::debug!(path = %path.display(), "loading config file");
            return Self::from_file(path);
        }

        match Self::default_path() {
            Some(path) if path.is_file() => {
                tracing::debug!(path = %path.display(), "loading default config file");
                Self::from_file(path)
            },
            _ => Ok(Self::default()),
        }
    }

    /// Apply overrides from the process environment
    pub fn with_env(self) -> Self {
        self.with_vars(|key| std::env::var(key).ok())
    }

    /// Apply overrides from an arbitrary variable lookup.
    ///
    /// Empty values are ignored.
    pub fn with_vars<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(model) = lookup(ENV_MODEL).filter(|v| !v.trim().is_empty()) {
            self.model = model;
        }
        if let Some(encoding) = lookup(ENV_ENCODING).filter(|v| !v.trim().is_empty()) {
            self.encoding = Some(encoding);
        }
        self
    }

    /// Apply command-line values; anything given on the command line wins.
    ///
    /// `verbose` is `Some(false)` for `--no-verbose`, which turns off a
    /// `verbose = true` from the config file.
    pub fn with_cli(
        mut self,
        model: Option<String>,
        encoding: Option<String>,
        verbose: Option<bool>,
    ) -> Self {
        if let Some(model) = model {
            self.model = model;
        }
        if encoding.is_some() {
            self.encoding = encoding;
        }
        if let Some(verbose) = verbose {
            self.verbose = verbose;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.model, "gpt-4");
        assert!(config.encoding.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_config_from_toml() {
        let toml = r#"
            model = "gpt-4o"
            encoding = "o200k_base"
            verbose = true
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.encoding.as_deref(), Some("o200k_base"));
        assert!(config.verbose);
    }

    #[test]
    fn test_partial_toml_keeps_defaults() {
        let config: Config = toml::from_str(r#"verbose = true"#).unwrap();
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.verbose);
    }

    #[test]
    fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, r#"model = "gpt-3.5-turbo""#).unwrap();

        let config = Config::load(Some(file.path())).unwrap();
        assert_eq!(config.model, "gpt-3.5-turbo");
    }

    #[test]
    fn test_malformed_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "model = [").unwrap();

        let err = Config::from_file(file.path()).unwrap_err();
        assert!(matches!(err, TokCountError::Config(_)));
    }

    #[test]
    fn test_explicit_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = Config::load(Some(&dir.path().join("absent.toml"))).unwrap_err();
        assert!(matches!(err, TokCountError::Config(_)));
    }

    #[test]
    fn test_env_overrides_file() {
        let vars: HashMap<&str, &str> =
            HashMap::from([(ENV_MODEL, "gpt-4o"), (ENV_ENCODING, "p50k_base")]);

        let config = Config {
            model: "gpt-3.5-turbo".to_string(),
            encoding: None,
            verbose: true,
        }
        .with_vars(|key| vars.get(key).map(|v| v.to_string()));

        assert_eq!(config.model, "gpt-4o");
        assert_eq!(config.encoding.as_deref(), Some("p50k_base"));
        assert!(config.verbose);
    }

    #[test]
    fn test_cli_overrides_env() {
        let config = Config::default()
            .with_vars(|key| (key == ENV_MODEL).then(|| "gpt-4o".to_string()))
            .with_cli(Some("text-davinci-003".to_string()), None, None);

        assert_eq!(config.model, "text-davinci-003");
        assert!(config.encoding.is_none());
        assert!(!config.verbose);
    }

    #[test]
    fn test_cli_verbose_flags() {
        let file_layer = Config {
            verbose: true,
            ..Config::default()
        };
        assert!(file_layer.clone().with_cli(None, None, None).verbose);
        assert!(!file_layer.with_cli(None, None, Some(false)).verbose);
        assert!(Config::default().with_cli(None, None, Some(true)).verbose);
    }

    #[test]
    fn test_empty_env_ignored() {
        let config = Config::default().with_vars(|_| Some("  ".to_string()));
        assert_eq!(config.model, DEFAULT_MODEL);
        assert!(config.encoding.is_none());
    }
}
