pub mod error;
pub mod identity;
pub mod migrator;
pub mod pipeline;
pub mod risk;

pub use error::{MigrateError, Result};
pub use identity::{MIGRATION_NAMESPACE, asset_id};
pub use migrator::{MigrateOptions, MigrationContext, REDACTED_VALUE};
pub use pipeline::{MigrationRun, MigrationStats, migrate_rows};
pub use risk::{classify_risks, impact_columns};
