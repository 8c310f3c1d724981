use std::path::PathBuf;

use iar_core::MigrationStats;
use iar_upload::UploadStats;

#[derive(Debug)]
pub struct MigrateResult {
    pub input: PathBuf,
    pub output: PathBuf,
    pub stats: MigrationStats,
    pub documents: usize,
}

impl MigrateResult {
    /// Whether any asset was emitted with an unresolved department.
    pub fn has_errors(&self) -> bool {
        self.stats.unresolved_assets > 0
    }
}

#[derive(Debug)]
pub struct UploadResult {
    pub endpoint: String,
    pub output: PathBuf,
    pub stats: UploadStats,
    /// Mappings loaded from previous reports.
    pub previous_mappings: usize,
}

impl UploadResult {
    pub fn has_errors(&self) -> bool {
        self.stats.failed > 0
    }
}
