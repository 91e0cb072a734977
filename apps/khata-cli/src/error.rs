//! # CLI Error Type
//!
//! Unified error type for commands.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  read document ── io::Error ──────────┐                                 │
//! │  parse JSON ───── serde_json::Error ──┤                                 │
//! │  load config ──── ConfigError ────────┼──► CliError ──► anyhow (main)   │
//! │  validate/build ─ CoreError ──────────┤                                 │
//! │  render ───────── RenderError ────────┘                                 │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::path::PathBuf;

use khata_core::{CoreError, PaginationError, ValidationError};
use thiserror::Error;

/// Errors surfaced by `khata` commands.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded or deserialized.
    #[error("Configuration error: {0}")]
    Config(#[from] config::ConfigError),

    /// Configured page geometry cannot hold a single row.
    #[error("Invalid page configuration: {0}")]
    PageConfig(#[from] PaginationError),

    /// Reading or writing a file failed.
    #[error("{action} {path}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Document JSON is malformed.
    #[error("Invalid document JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// Document failed the input contract.
    #[error("Invalid document: {0}")]
    Validation(#[from] ValidationError),

    /// Business logic error from khata-core.
    #[error(transparent)]
    Core(#[from] CoreError),

    /// A renderer could not produce its output.
    #[error("Render failed on page {page}: {reason}")]
    Render { page: usize, reason: String },
}

impl CliError {
    pub fn io(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        CliError::Io {
            action,
            path: path.into(),
            source,
        }
    }
}

pub type CliResult<T> = Result<T, CliError>;
