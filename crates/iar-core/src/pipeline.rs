//! Lazy migration over a row stream.
//!
//! [`MigrationRun`] yields one asset document per input row, in input
//! order, followed by exactly one department report. The report is built
//! only after the row iterator is exhausted so that it reflects every
//! department string in the input.

use iar_ingest::{IngestError, RawRow};
use iar_lookup::InstitutionDirectory;
use iar_model::Document;
use tracing::info;

use crate::error::Result;
use crate::migrator::MigrationContext;

/// Counters collected while a run is drained.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MigrationStats {
    pub assets: usize,
    pub unresolved_assets: usize,
    pub departments: usize,
    pub unresolved_departments: usize,
}

enum Stage {
    Rows,
    Report,
    Done,
}

/// Iterator of migration documents.
///
/// Any error ends the run: the iterator yields it once and then returns
/// `None`.
pub struct MigrationRun<I, D> {
    rows: I,
    context: MigrationContext<D>,
    index: usize,
    stage: Stage,
    stats: MigrationStats,
}

/// Start a lazy migration of `rows`.
pub fn migrate_rows<I, D>(rows: I, context: MigrationContext<D>) -> MigrationRun<I::IntoIter, D>
where
    I: IntoIterator<Item = std::result::Result<RawRow, IngestError>>,
    D: InstitutionDirectory,
{
    MigrationRun {
        rows: rows.into_iter(),
        context,
        index: 0,
        stage: Stage::Rows,
        stats: MigrationStats::default(),
    }
}

impl<I, D> MigrationRun<I, D> {
    pub fn stats(&self) -> MigrationStats {
        self.stats
    }

    pub fn context(&self) -> &MigrationContext<D> {
        &self.context
    }
}

impl<I, D> MigrationRun<I, D>
where
    I: Iterator<Item = std::result::Result<RawRow, IngestError>>,
    D: InstitutionDirectory,
{
    fn next_row(&mut self) -> Option<Result<Document>> {
        let row = match self.rows.next()? {
            Ok(row) => row,
            Err(error) => return Some(Err(error.into())),
        };
        let index = self.index;
        self.index += 1;
        Some(self.context.migrate_row(index, &row).map(|doc| {
            self.stats.assets += 1;
            if doc.has_errors() {
                self.stats.unresolved_assets += 1;
            }
            Document::Asset(doc)
        }))
    }

    fn report(&mut self) -> Result<Document> {
        let report = self.context.department_report()?;
        self.stats.departments = report.original_dept_mapping.len();
        self.stats.unresolved_departments = report.unresolved().count();
        info!(
            assets = self.stats.assets,
            unresolved_assets = self.stats.unresolved_assets,
            departments = self.stats.departments,
            unresolved_departments = self.stats.unresolved_departments,
            searches = self.context.resolver().search_count(),
            "migration complete"
        );
        Ok(Document::Report(report))
    }
}

impl<I, D> Iterator for MigrationRun<I, D>
where
    I: Iterator<Item = std::result::Result<RawRow, IngestError>>,
    D: InstitutionDirectory,
{
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        let item = match self.stage {
            Stage::Rows => match self.next_row() {
                Some(item) => item,
                None => {
                    self.stage = Stage::Report;
                    return self.next();
                }
            },
            Stage::Report => {
                self.stage = Stage::Done;
                self.report()
            }
            Stage::Done => return None,
        };
        if item.is_err() {
            self.stage = Stage::Done;
        }
        Some(item)
    }
}
