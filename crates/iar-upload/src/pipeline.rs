//! Lazy upload over a stream of asset documents.

use iar_model::{AssetDocument, UploadReport};
use tracing::info;

use crate::client::RegistryClient;
use crate::reconciler::{Reconciler, UploadOutcome};

/// Outcome counts for an upload run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UploadStats {
    pub created: usize,
    pub updated: usize,
    pub recreated: usize,
    pub failed: usize,
}

impl UploadStats {
    fn count(&mut self, outcome: UploadOutcome) {
        match outcome {
            UploadOutcome::Created => self.created += 1,
            UploadOutcome::Updated => self.updated += 1,
            UploadOutcome::Recreated => self.recreated += 1,
            UploadOutcome::Failed => self.failed += 1,
        }
    }

    pub fn total(&self) -> usize {
        self.created + self.updated + self.recreated + self.failed
    }
}

/// Iterator yielding one upload report per input asset.
///
/// Upload failures are reports, not errors. Errors from the input stream
/// are passed through and end the run.
pub struct UploadRun<I, C> {
    documents: I,
    reconciler: Reconciler<C>,
    stats: UploadStats,
    done: bool,
}

/// Start a lazy upload of `documents`.
pub fn upload_documents<I, E, C>(documents: I, reconciler: Reconciler<C>) -> UploadRun<I::IntoIter, C>
where
    I: IntoIterator<Item = Result<AssetDocument, E>>,
    C: RegistryClient,
{
    UploadRun {
        documents: documents.into_iter(),
        reconciler,
        stats: UploadStats::default(),
        done: false,
    }
}

impl<I, C> UploadRun<I, C> {
    pub fn stats(&self) -> UploadStats {
        self.stats
    }

    pub fn reconciler(&self) -> &Reconciler<C> {
        &self.reconciler
    }
}

impl<I, E, C> Iterator for UploadRun<I, C>
where
    I: Iterator<Item = Result<AssetDocument, E>>,
    C: RegistryClient,
{
    type Item = Result<UploadReport, E>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        let document = match self.documents.next() {
            Some(Ok(document)) => document,
            Some(Err(err)) => {
                self.done = true;
                return Some(Err(err));
            }
            None => {
                self.done = true;
                info!(
                    created = self.stats.created,
                    updated = self.stats.updated,
                    recreated = self.stats.recreated,
                    failed = self.stats.failed,
                    "upload complete"
                );
                return None;
            }
        };
        let result = self.reconciler.reconcile(&document.asset);
        self.stats.count(result.outcome);
        Some(Ok(result.report))
    }
}
