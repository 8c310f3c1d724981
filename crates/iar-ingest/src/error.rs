//! Error types for spreadsheet ingestion.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading legacy spreadsheet rows.
#[derive(Debug, Error)]
pub enum IngestError {
    /// Input file could not be opened.
    #[error("failed to open {path}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Input could not be read.
    #[error("failed to read input: {0}")]
    Io(#[from] std::io::Error),

    /// The CSV parser rejected a record.
    #[error("failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    /// A row has fewer columns than the layout requires.
    #[error("malformed row {row}: found {found} columns, at least {required} required")]
    MalformedRow {
        /// Zero-based row index after skipped rows.
        row: usize,
        /// Columns present after skipped columns.
        found: usize,
        /// Columns required after skipped columns.
        required: usize,
    },
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestError>;
