//! Error handling for sharpts
//!
//! The analysis itself never fails: lexical and syntax problems are reported
//! as [`Diagnostic`](crate::utils::Diagnostic) values. This enum covers the
//! fallible edges around it (files, report serialization, options).

use thiserror::Error;

/// Result type alias
pub type Result<T> = std::result::Result<T, Error>;

/// Errors raised outside the analysis pipeline
#[derive(Error, Debug)]
pub enum Error {
    #[error("Cannot read {path}: {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Cannot write {path}: {source}")]
    Write {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to serialize report: {0}")]
    Report(#[from] serde_json::Error),

    #[error("Invalid option: {0}")]
    InvalidOption(String),
}
