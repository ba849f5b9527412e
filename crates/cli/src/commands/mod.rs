//! CLI subcommands.
//!
//! Each command reads its inputs from JSON files or flags, calls into
//! `shopfront-resolver`, and writes the result to stdout.

pub mod price;
pub mod search;
pub mod shipping;
pub mod token;
pub mod variant;

use std::path::{Path, PathBuf};

use serde::Serialize;
use serde::de::DeserializeOwned;
use shopfront_resolver::ConfigError;
use thiserror::Error;

/// Errors that can occur while running a command.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// An input file could not be read.
    #[error("Failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    /// An input file is not valid JSON for the expected type.
    #[error("Invalid JSON in {path}: {source}")]
    Parse {
        path: PathBuf,
        source: serde_json::Error,
    },

    /// Output could not be serialized.
    #[error("Failed to serialize output: {0}")]
    Serialize(#[from] serde_json::Error),

    /// The token was rejected.
    #[error("Token is invalid or expired")]
    InvalidToken,
}

/// Read and deserialize a JSON input file.
pub fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T, CliError> {
    let contents = std::fs::read_to_string(path).map_err(|source| CliError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| CliError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// Pretty-print a value as JSON on stdout.
#[allow(clippy::print_stdout)]
pub fn print_json<T: Serialize>(value: &T) -> Result<(), CliError> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use shopfront_core::Currency;

    use super::*;

    #[test]
    fn test_read_json_missing_file() {
        let result: Result<Currency, _> = read_json(Path::new("/nonexistent/currency.json"));
        assert!(matches!(result, Err(CliError::Read { .. })));
    }

    #[test]
    fn test_read_json_invalid() {
        let path = std::env::temp_dir().join(format!("sf-cli-invalid-{}.json", std::process::id()));
        std::fs::write(&path, "{not json").unwrap();

        let result: Result<Currency, _> = read_json(&path);
        let _ = std::fs::remove_file(&path);

        let err = result.unwrap_err();
        assert!(matches!(err, CliError::Parse { .. }));
        assert!(err.to_string().contains("sf-cli-invalid"));
    }

    #[test]
    fn test_read_json_valid() {
        let path = std::env::temp_dir().join(format!("sf-cli-currency-{}.json", std::process::id()));
        std::fs::write(&path, r#"{"symbolNative": "$"}"#).unwrap();

        let currency: Currency = read_json(&path).unwrap();
        let _ = std::fs::remove_file(&path);

        assert_eq!(currency.symbol_native.as_deref(), Some("$"));
    }
}
