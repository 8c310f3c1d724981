//! Error types for registry uploads.

use thiserror::Error;

/// Errors raised by the registry client or while preparing an upload run.
///
/// Only [`UploadError::EndpointFormat`] and [`UploadError::InvalidUrl`] stop a
/// run. Transport failures during a run are recorded on the upload report of
/// the asset being processed.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum UploadError {
    /// Endpoint does not end with a path separator.
    #[error("endpoint must end with '/': {0}")]
    EndpointFormat(String),

    /// Endpoint is not a valid URL.
    #[error("invalid endpoint URL: {0}")]
    InvalidUrl(String),

    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for UploadError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

/// Result type alias for upload operations.
pub type Result<T> = std::result::Result<T, UploadError>;
