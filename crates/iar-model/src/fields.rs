use serde::{Deserialize, Serialize};

/// Named view of the legacy spreadsheet columns used by the migration.
///
/// Values are kept verbatim so the emitted `original` block can be audited
/// against the source sheet.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExtractedFields {
    pub faculty_dept_inst: String,
    pub name: String,
    pub purpose: String,
    pub application: String,
    pub owners: String,
    pub availability_impact: String,
    pub confidentiality_impact: String,
    pub integrity_impact: String,
    /// The five adjacent personal data indicator columns.
    pub personal_data: Vec<String>,
    pub animal: String,
    pub animal_s24: String,
    pub recipients: String,
    pub within_eea: String,
    pub where_stored: String,
    pub password_or_locked: String,
    pub encryption_or_doubled_locked: String,
    pub retention: String,
    pub backup: String,
    pub backup_off_site: String,
    pub backup_off_site_regime: String,
    pub backup_off_site_location: String,
}

impl ExtractedFields {
    /// The animal research indicator columns.
    pub fn animal_indicators(&self) -> [&str; 2] {
        [self.animal.as_str(), self.animal_s24.as_str()]
    }

    pub fn personal_data_indicators(&self) -> impl Iterator<Item = &str> {
        self.personal_data.iter().map(String::as_str)
    }
}
