//! Error types for survey data ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while loading raw survey extracts.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Extract file not found.
    #[error("extract not found: {path}")]
    FileNotFound { path: PathBuf },

    /// Failed to read or parse the tab-separated file.
    #[error("failed to read {path}: {source}")]
    FileRead {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    /// Failed to create a directory of the output contract.
    #[error("failed to create directory {path}: {source}")]
    DirectoryCreate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Extract has no header row.
    #[error("extract is empty: {path}")]
    EmptyExtract { path: PathBuf },

    /// A selected column is missing from the extract.
    #[error("required column '{column}' not found in {path}")]
    MissingColumn { column: String, path: PathBuf },

    /// A numeric column holds a value that is neither numeric nor empty.
    #[error("invalid numeric value '{value}' in column '{column}' of {path}")]
    InvalidValue {
        column: String,
        value: String,
        path: PathBuf,
    },

    /// DataFrame assembly failed.
    #[error("failed to build table from {path}: {source}")]
    Frame {
        path: PathBuf,
        #[source]
        source: polars::error::PolarsError,
    },
}

pub type Result<T> = std::result::Result<T, IngestError>;
