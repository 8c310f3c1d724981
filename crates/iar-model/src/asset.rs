//! Canonical asset record.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Risk category attached to an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskType {
    Operational,
    Reputational,
    Financial,
}

impl RiskType {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Operational => "operational",
            Self::Reputational => "reputational",
            Self::Financial => "financial",
        }
    }
}

impl fmt::Display for RiskType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// An information asset in the canonical register schema.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Asset {
    /// Migration-local identifier (version 5 UUID text).
    pub id: String,
    pub name: String,
    pub purpose: String,
    /// Directory identifier of the owning institution, `None` when unresolved.
    pub department: Option<String>,
    pub personal_data: bool,
    pub private: bool,
    pub risk_type: Vec<RiskType>,
}

impl Asset {
    /// Body sent to the registry: every field except the local `id`.
    pub fn payload(&self) -> AssetPayload<'_> {
        AssetPayload {
            name: &self.name,
            purpose: &self.purpose,
            department: self.department.as_deref(),
            personal_data: self.personal_data,
            private: self.private,
            risk_type: &self.risk_type,
        }
    }
}

/// Borrowed upload body for an [`Asset`]; the registry assigns its own id.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct AssetPayload<'a> {
    pub name: &'a str,
    pub purpose: &'a str,
    pub department: Option<&'a str>,
    pub personal_data: bool,
    pub private: bool,
    pub risk_type: &'a [RiskType],
}
