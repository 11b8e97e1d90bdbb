use std::path::PathBuf;
use thiserror::Error;

use crate::models::Platform;

/// All errors produced by the adspend crates.
#[derive(Error, Debug)]
pub enum AdspendError {
    /// A raw source export required by the pipeline does not exist.
    #[error("Raw source for {platform} not found: {path} (run `adspend generate` to produce the raw exports)")]
    MissingSource { platform: Platform, path: PathBuf },

    /// The consolidated file the dashboard reads from does not exist.
    #[error("Consolidated data file not found: {path} (run `adspend etl` to build it)")]
    MissingConsolidated { path: PathBuf },

    /// A mapped column is absent from a raw source header.
    #[error("Column '{column}' missing from {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A cell could not be parsed as the type its column requires.
    #[error("Invalid value in {path} line {line}: {message}")]
    InvalidField {
        path: PathBuf,
        line: u64,
        message: String,
    },

    /// The consolidated file header does not match the canonical layout.
    #[error("Unexpected header in {path}: expected '{expected}', found '{found}'")]
    InvalidHeader {
        path: PathBuf,
        expected: String,
        found: String,
    },

    /// A file could not be opened or read from disk.
    #[error("Failed to read file {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A CSV document could not be read or written.
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    /// A JSON document could not be parsed.
    #[error("Failed to parse JSON: {0}")]
    JsonParse(#[from] serde_json::Error),

    /// An error originating from the terminal / TUI layer.
    #[error("Terminal error: {0}")]
    Terminal(String),

    /// A configuration value is missing or invalid.
    #[error("Configuration error: {0}")]
    Config(String),

    /// Pass-through for any raw I/O error that does not carry a path.
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// Catch-all for errors from third-party crates via `anyhow`.
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience alias used throughout the adspend crates.
pub type Result<T> = std::result::Result<T, AdspendError>;
