//! Upload of migrated assets to a remote registry.
//!
//! A run reads asset documents, consults an [`IdMap`] built from a previous
//! run's upload reports and decides per asset whether to create a new
//! registry resource or update the one it was uploaded to before. Each asset
//! yields exactly one [`UploadReport`](iar_model::UploadReport); a failed
//! upload is recorded and the run moves on.

pub mod client;
pub mod endpoint;
pub mod error;
pub mod idmap;
pub mod pipeline;
pub mod reconciler;

pub use client::{HttpRegistryClient, RegistryClient, RegistryResponse, UploadOptions};
pub use endpoint::Endpoint;
pub use error::{Result, UploadError};
pub use idmap::IdMap;
pub use pipeline::{UploadRun, UploadStats, upload_documents};
pub use reconciler::{Reconciler, Reconciliation, UploadOutcome};
