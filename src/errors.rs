//! Error types for the ambient layers (configuration, host harness).
//!
//! Pagination arithmetic itself never fails; see [`crate::coerce`].

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaginatorError {
    #[error("Failed to read config file {path}: {source}")]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to parse config file {path}: {source}")]
    ConfigParse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("No configuration file found")]
    ConfigNotFound,

    #[error("Invalid action '{0}': expected next, previous, first, last, size=N, index=N or length=N")]
    InvalidAction(String),
}

pub type PaginatorResult<T> = Result<T, PaginatorError>;
