use serde::{Deserialize, Serialize};

/// Code attached to assets whose department text could not be resolved.
pub const UNRESOLVED_DEPARTMENT: &str = "E001";

/// A non-fatal problem recorded against a migrated asset.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetIssue {
    /// Stable issue code (e.g., "E001").
    pub code: String,
    /// Human-readable message describing the issue.
    pub message: String,
}

impl AssetIssue {
    pub fn new(code: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: code.into(),
            message: message.into(),
        }
    }

    pub fn unresolved_department() -> Self {
        Self::new(UNRESOLVED_DEPARTMENT, "Department could not be resolved")
    }
}
