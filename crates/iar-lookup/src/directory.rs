use serde::{Deserialize, Serialize};

use crate::error::Result;

/// An institution record returned by a directory search.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Institution {
    /// Directory identifier (e.g., "ENG").
    pub instid: String,
    /// Canonical institution name.
    pub name: String,
}

impl Institution {
    pub fn new(instid: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            instid: instid.into(),
            name: name.into(),
        }
    }
}

/// A searchable institution directory.
pub trait InstitutionDirectory {
    /// Search for institutions by name.
    ///
    /// With `approximate` set the directory may return names that only
    /// resemble `query`.
    fn search(&self, query: &str, approximate: bool) -> Result<Vec<Institution>>;
}

impl<D: InstitutionDirectory + ?Sized> InstitutionDirectory for &D {
    fn search(&self, query: &str, approximate: bool) -> Result<Vec<Institution>> {
        (**self).search(query, approximate)
    }
}

impl<D: InstitutionDirectory + ?Sized> InstitutionDirectory for Box<D> {
    fn search(&self, query: &str, approximate: bool) -> Result<Vec<Institution>> {
        (**self).search(query, approximate)
    }
}
