//! Manual institution overrides.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::{LookupError, Result};

/// Pins a free-text department name to a directory identifier.
///
/// An `instid` of `None` pins the name as unresolvable, which skips the
/// directory search for it entirely.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstitutionFixup {
    pub original: String,
    pub instid: Option<String>,
}

impl InstitutionFixup {
    pub fn new(original: impl Into<String>, instid: impl Into<String>) -> Self {
        Self {
            original: original.into(),
            instid: Some(instid.into()),
        }
    }
}

/// Contents of a fixups file.
///
/// A section is `None` when the file does not mention it, which is distinct
/// from an explicitly empty list.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Fixups {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub institutions: Option<Vec<InstitutionFixup>>,
}

impl Fixups {
    pub fn with_institutions(institutions: Vec<InstitutionFixup>) -> Self {
        Self {
            institutions: Some(institutions),
        }
    }

    pub fn institutions(&self) -> &[InstitutionFixup] {
        self.institutions.as_deref().unwrap_or_default()
    }

    /// Parse fixups from YAML text; an empty document yields no fixups.
    pub fn from_yaml(text: &str) -> std::result::Result<Self, serde_yaml::Error> {
        if text.trim().is_empty() {
            return Ok(Self::default());
        }
        let fixups: Option<Self> = serde_yaml::from_str(text)?;
        Ok(fixups.unwrap_or_default())
    }

    /// Load fixups from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| LookupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let fixups = Self::from_yaml(&text).map_err(|source| LookupError::Yaml {
            path: path.to_path_buf(),
            source,
        })?;
        info!(
            path = %path.display(),
            institutions = fixups.institutions().len(),
            "loaded fixups"
        );
        Ok(fixups)
    }

    /// Overlay `other` onto these fixups.
    ///
    /// Every section present in `other` replaces the current section
    /// wholesale, even when empty. Absent sections leave it untouched.
    pub fn merge(&mut self, other: Self) {
        if other.institutions.is_some() {
            self.institutions = other.institutions;
        }
    }

    /// Consume the fixups, keeping only the institution list.
    pub fn into_institutions(self) -> Vec<InstitutionFixup> {
        self.institutions.unwrap_or_default()
    }

    pub fn institution(&self, original: &str) -> Option<&InstitutionFixup> {
        self.institutions()
            .iter()
            .find(|fixup| fixup.original == original)
    }
}
