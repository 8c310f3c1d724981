//! Positional column layout of the legacy register.

use std::ops::Range;

use iar_model::ExtractedFields;

use crate::error::{IngestError, Result};

/// Column offsets, counted after the skipped leading columns.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnLayout {
    pub faculty_dept_inst: usize,
    pub name: usize,
    pub purpose: usize,
    pub application: usize,
    pub owners: usize,
    pub availability_impact: usize,
    pub confidentiality_impact: usize,
    pub integrity_impact: usize,
    pub personal_data: Range<usize>,
    pub animal: usize,
    pub animal_s24: usize,
    pub recipients: usize,
    pub within_eea: usize,
    pub where_stored: usize,
    pub password_or_locked: usize,
    pub encryption_or_doubled_locked: usize,
    pub retention: usize,
    pub backup: usize,
    pub backup_off_site: usize,
    pub backup_off_site_regime: usize,
    pub backup_off_site_location: usize,
}

impl ColumnLayout {
    /// Layout of the legacy information asset register export.
    pub const LEGACY: Self = Self {
        faculty_dept_inst: 1,
        name: 8,
        purpose: 9,
        application: 10,
        owners: 11,
        availability_impact: 12,
        confidentiality_impact: 13,
        integrity_impact: 14,
        personal_data: 15..20,
        animal: 22,
        animal_s24: 23,
        recipients: 29,
        within_eea: 32,
        where_stored: 35,
        password_or_locked: 36,
        encryption_or_doubled_locked: 37,
        retention: 38,
        backup: 42,
        backup_off_site: 46,
        backup_off_site_regime: 48,
        backup_off_site_location: 49,
    };

    /// Minimum number of columns (after skipping) a row must have.
    pub fn required_width(&self) -> usize {
        let single = [
            self.faculty_dept_inst,
            self.name,
            self.purpose,
            self.application,
            self.owners,
            self.availability_impact,
            self.confidentiality_impact,
            self.integrity_impact,
            self.animal,
            self.animal_s24,
            self.recipients,
            self.within_eea,
            self.where_stored,
            self.password_or_locked,
            self.encryption_or_doubled_locked,
            self.retention,
            self.backup,
            self.backup_off_site,
            self.backup_off_site_regime,
            self.backup_off_site_location,
        ]
        .into_iter()
        .map(|offset| offset + 1)
        .max()
        .unwrap_or(0);
        single.max(self.personal_data.end)
    }

    /// Project a row onto named fields.
    ///
    /// `row_index` is only used for error reporting.
    pub fn extract(
        &self,
        row: &[String],
        skip_cols: usize,
        row_index: usize,
    ) -> Result<ExtractedFields> {
        let cells = row.get(skip_cols..).unwrap_or(&[]);
        let required = self.required_width();
        if cells.len() < required {
            return Err(IngestError::MalformedRow {
                row: row_index,
                found: cells.len(),
                required,
            });
        }
        let cell = |offset: usize| cells[offset].clone();
        Ok(ExtractedFields {
            faculty_dept_inst: cell(self.faculty_dept_inst),
            name: cell(self.name),
            purpose: cell(self.purpose),
            application: cell(self.application),
            owners: cell(self.owners),
            availability_impact: cell(self.availability_impact),
            confidentiality_impact: cell(self.confidentiality_impact),
            integrity_impact: cell(self.integrity_impact),
            personal_data: cells[self.personal_data.clone()].to_vec(),
            animal: cell(self.animal),
            animal_s24: cell(self.animal_s24),
            recipients: cell(self.recipients),
            within_eea: cell(self.within_eea),
            where_stored: cell(self.where_stored),
            password_or_locked: cell(self.password_or_locked),
            encryption_or_doubled_locked: cell(self.encryption_or_doubled_locked),
            retention: cell(self.retention),
            backup: cell(self.backup),
            backup_off_site: cell(self.backup_off_site),
            backup_off_site_regime: cell(self.backup_off_site_regime),
            backup_off_site_location: cell(self.backup_off_site_location),
        })
    }
}

impl Default for ColumnLayout {
    fn default() -> Self {
        Self::LEGACY
    }
}

/// Extract fields using the legacy layout.
pub fn extract_row(row: &[String], skip_cols: usize, row_index: usize) -> Result<ExtractedFields> {
    ColumnLayout::LEGACY.extract(row, skip_cols, row_index)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row_of(width: usize) -> Vec<String> {
        (0..width).map(|idx| format!("c{idx}")).collect()
    }

    #[test]
    fn legacy_layout_needs_fifty_columns() {
        assert_eq!(ColumnLayout::LEGACY.required_width(), 50);
    }

    #[test]
    fn skip_cols_shifts_offsets() {
        let fields = extract_row(&row_of(51), 1, 0).expect("extract");
        assert_eq!(fields.faculty_dept_inst, "c2");
        assert_eq!(fields.name, "c9");
        assert_eq!(fields.personal_data, vec!["c16", "c17", "c18", "c19", "c20"]);
        assert_eq!(fields.backup_off_site_location, "c50");
    }

    #[test]
    fn short_row_is_malformed() {
        let err = extract_row(&row_of(50), 1, 7).unwrap_err();
        match err {
            IngestError::MalformedRow {
                row,
                found,
                required,
            } => {
                assert_eq!(row, 7);
                assert_eq!(found, 49);
                assert_eq!(required, 50);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn skip_beyond_row_is_malformed() {
        assert!(extract_row(&row_of(3), 5, 0).is_err());
    }
}
