use std::path::PathBuf;

use thiserror::Error;

use crate::config::ConfigError;

/// Errors from the fallible edges of the pipeline: reading input, loading
/// config and producing PDF or JSON output. Parsing itself never fails.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Failed to read {}: {source}", path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("Failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error("Typst compilation failed: {0}")]
    Compile(String),

    #[error("PDF generation failed: {0}")]
    Pdf(String),

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
