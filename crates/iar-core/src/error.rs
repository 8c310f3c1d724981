use iar_ingest::IngestError;
use iar_lookup::LookupError;
use thiserror::Error;

/// Failures that abort a migration run.
#[derive(Debug, Error)]
pub enum MigrateError {
    #[error(transparent)]
    Ingest(#[from] IngestError),
    #[error("department lookup failed: {0}")]
    Lookup(#[from] LookupError),
}

pub type Result<T> = std::result::Result<T, MigrateError>;
