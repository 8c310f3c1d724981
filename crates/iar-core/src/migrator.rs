//! Per-row asset migration.

use std::collections::BTreeSet;

use iar_ingest::ColumnLayout;
use iar_lookup::{InstitutionDirectory, InstitutionResolver};
use iar_model::{
    Asset, AssetDocument, AssetIssue, DepartmentMapping, DepartmentReport, ExtractedFields, any_yes,
};
use tracing::{debug, trace, warn};

use crate::error::Result;
use crate::identity::asset_id;
use crate::risk::classify_risks;

/// Placeholder used when row-level logging is disabled.
pub const REDACTED_VALUE: &str = "[REDACTED]";

/// Options for migrating rows.
#[derive(Debug, Clone)]
pub struct MigrateOptions {
    /// Leading columns to drop before applying the layout.
    pub skip_cols: usize,
    /// Column positions of the legacy export.
    pub layout: ColumnLayout,
    /// Whether cell values may appear in trace logs.
    pub log_data: bool,
}

impl Default for MigrateOptions {
    fn default() -> Self {
        Self {
            skip_cols: 1,
            layout: ColumnLayout::LEGACY,
            log_data: false,
        }
    }
}

/// State shared by every row of one migration run.
///
/// Owns the department resolver and the set of department strings seen so
/// far, which feeds the trailing [`DepartmentReport`].
pub struct MigrationContext<D> {
    resolver: InstitutionResolver<D>,
    departments: BTreeSet<String>,
    options: MigrateOptions,
}

impl<D: InstitutionDirectory> MigrationContext<D> {
    pub fn new(resolver: InstitutionResolver<D>, options: MigrateOptions) -> Self {
        Self {
            resolver,
            departments: BTreeSet::new(),
            options,
        }
    }

    /// Extract and migrate one raw row.
    pub fn migrate_row(&mut self, index: usize, row: &[String]) -> Result<AssetDocument> {
        let original = self
            .options
            .layout
            .extract(row, self.options.skip_cols, index)?;
        self.migrate_fields(index, original)
    }

    /// Build the canonical asset for already extracted fields.
    ///
    /// An unresolved department is recorded as an `E001` issue on the
    /// document; only directory failures are errors.
    pub fn migrate_fields(
        &mut self,
        index: usize,
        original: ExtractedFields,
    ) -> Result<AssetDocument> {
        trace!(
            row = index,
            name = self.redact(&original.name),
            department = self.redact(&original.faculty_dept_inst),
            "migrating row"
        );
        self.departments.insert(original.faculty_dept_inst.clone());

        let department = self.resolver.resolve(&original.faculty_dept_inst)?;
        let asset = Asset {
            id: asset_id(&original.name, index).to_string(),
            name: original.name.clone(),
            purpose: original.purpose.clone(),
            department,
            personal_data: any_yes(original.personal_data_indicators()),
            private: any_yes(original.animal_indicators()),
            risk_type: classify_risks(&original),
        };

        let mut errors = Vec::new();
        if asset.department.is_none() {
            warn!(row = index, asset_id = %asset.id, "asset department unresolved");
            errors.push(AssetIssue::unresolved_department());
        }
        debug!(row = index, asset_id = %asset.id, "migrated asset");
        Ok(AssetDocument::new(asset, original, errors))
    }

    /// Resolution outcome for every department string seen, sorted.
    ///
    /// Only meaningful once every row has been migrated.
    pub fn department_report(&mut self) -> Result<DepartmentReport> {
        let mut original_dept_mapping = Vec::with_capacity(self.departments.len());
        for original in &self.departments {
            let instid = self.resolver.resolve(original)?;
            original_dept_mapping.push(DepartmentMapping {
                original: original.clone(),
                instid,
            });
        }
        Ok(DepartmentReport {
            original_dept_mapping,
        })
    }

    pub fn departments_seen(&self) -> usize {
        self.departments.len()
    }

    pub fn resolver(&self) -> &InstitutionResolver<D> {
        &self.resolver
    }

    fn redact<'a>(&self, value: &'a str) -> &'a str {
        if self.options.log_data {
            value
        } else {
            REDACTED_VALUE
        }
    }
}
