//! Error types for institution lookup.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while searching the directory or loading lookup data.
///
/// None of these are recovered from during a migration run.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum LookupError {
    /// Network request failed.
    #[error("network error: {0}")]
    Network(String),

    /// Directory answered with a non-success status.
    #[error("directory API error {status}: {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body.
        message: String,
    },

    /// Directory base URL could not be used.
    #[error("invalid directory URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse a directory response.
    #[error("JSON parse error: {0}")]
    JsonParse(String),

    /// Failed to read a fixups or directory file.
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A fixups or directory file is not valid YAML for its schema.
    #[error("invalid YAML in {path}: {source}")]
    Yaml {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

impl From<reqwest::Error> for LookupError {
    fn from(err: reqwest::Error) -> Self {
        Self::Network(err.to_string())
    }
}

impl From<serde_json::Error> for LookupError {
    fn from(err: serde_json::Error) -> Self {
        Self::JsonParse(err.to_string())
    }
}

/// Result type alias for lookup operations.
pub type Result<T> = std::result::Result<T, LookupError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = LookupError::Api {
            status: 503,
            message: "unavailable".to_string(),
        };
        assert_eq!(err.to_string(), "directory API error 503: unavailable");
    }
}
