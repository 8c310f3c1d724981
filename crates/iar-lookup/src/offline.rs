//! Offline institution directory backed by a YAML file.
//!
//! Approximate search accepts names that contain the query or score at
//! least [`APPROX_THRESHOLD`] Jaro-Winkler similarity, compared
//! case-insensitively.

use std::fs;
use std::path::Path;

use rapidfuzz::distance::jaro_winkler;
use serde::Deserialize;

use crate::directory::{Institution, InstitutionDirectory};
use crate::error::{LookupError, Result};

/// Minimum similarity for an approximate match.
pub const APPROX_THRESHOLD: f64 = 0.98;

#[derive(Debug, Deserialize)]
struct DirectoryFile {
    #[serde(default)]
    institutions: Vec<Institution>,
}

/// An in-memory institution list searched without network access.
#[derive(Debug, Clone, Default)]
pub struct StaticDirectory {
    institutions: Vec<Institution>,
}

impl StaticDirectory {
    pub fn new(institutions: Vec<Institution>) -> Self {
        Self { institutions }
    }

    /// Load `institutions: [{instid, name}]` from a YAML file.
    pub fn load(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| LookupError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let file: DirectoryFile =
            serde_yaml::from_str(&text).map_err(|source| LookupError::Yaml {
                path: path.to_path_buf(),
                source,
            })?;
        Ok(Self::new(file.institutions))
    }

    pub fn len(&self) -> usize {
        self.institutions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.institutions.is_empty()
    }
}

fn resembles(name: &str, query: &str) -> bool {
    let name = name.to_lowercase();
    let query = query.to_lowercase();
    if name == query || name.contains(&query) {
        return true;
    }
    jaro_winkler::similarity(name.chars(), query.chars()) >= APPROX_THRESHOLD
}

impl InstitutionDirectory for StaticDirectory {
    fn search(&self, query: &str, approximate: bool) -> Result<Vec<Institution>> {
        let matches = self
            .institutions
            .iter()
            .filter(|inst| {
                if approximate {
                    resembles(&inst.name, query)
                } else {
                    inst.name.eq_ignore_ascii_case(query)
                }
            })
            .cloned()
            .collect();
        Ok(matches)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn directory() -> StaticDirectory {
        StaticDirectory::new(vec![
            Institution::new("FOO", "Department of Foo"),
            Institution::new("FOOF", "Faculty of Foo Studies"),
            Institution::new("CHEM", "Yusuf Hamied Department of Chemistry"),
        ])
    }

    #[test]
    fn exact_search_ignores_case() {
        let found = directory().search("department of foo", false).unwrap();
        assert_eq!(found, vec![Institution::new("FOO", "Department of Foo")]);
    }

    #[test]
    fn approximate_search_matches_substrings() {
        let found = directory().search("Foo", true).unwrap();
        assert_eq!(found.len(), 2);
        let found = directory().search("Chemistry", true).unwrap();
        assert_eq!(found[0].instid, "CHEM");
    }

    #[test]
    fn approximate_search_tolerates_typos() {
        let found = directory().search("Department of Fooo", true).unwrap();
        assert!(found.iter().any(|inst| inst.instid == "FOO"));
    }

    #[test]
    fn unrelated_query_finds_nothing() {
        assert!(directory().search("Zoology", true).unwrap().is_empty());
    }
}
