//! Error types for sunboard-core.
//!
//! Only whole-file problems are errors: I/O failures and unparseable
//! catalogue files. Per-record data-quality issues (bad coordinates,
//! unknown timezones, malformed templates) are reported as
//! [`Diagnostic`](crate::catalogue::Diagnostic) values and degrade that
//! one exchange, never the whole catalogue.

use std::path::PathBuf;
use thiserror::Error;

/// Fatal catalogue-load errors.
#[derive(Error, Debug)]
pub enum CatalogueError {
    /// Catalogue file could not be read
    #[error("Failed to read catalogue at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// File-level JSON syntax error
    #[error("Invalid JSON catalogue: {0}")]
    Json(#[from] serde_json::Error),

    /// File-level TOML syntax error
    #[error("Invalid TOML catalogue: {0}")]
    Toml(#[from] toml::de::Error),

    /// Extension is neither .json nor .toml
    #[error("Unsupported catalogue format: {}", .0.display())]
    UnsupportedFormat(PathBuf),
}
