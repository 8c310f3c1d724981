//! Deterministic asset identifiers.

use uuid::Uuid;

/// Namespace for identifiers minted by the migration.
pub const MIGRATION_NAMESPACE: Uuid = Uuid::from_u128(0xd04a3354_2935_4247_b7c7_f9c505bb8634);

/// Version 5 identifier for an asset.
///
/// Named assets hash their name, so re-running a migration reproduces the
/// same identifiers. Unnamed assets hash their row index instead.
pub fn asset_id(name: &str, row_index: usize) -> Uuid {
    if name.is_empty() {
        Uuid::new_v5(&MIGRATION_NAMESPACE, row_index.to_string().as_bytes())
    } else {
        Uuid::new_v5(&MIGRATION_NAMESPACE, name.as_bytes())
    }
}
