//! Free-text department name resolution.

use std::collections::HashMap;

use tracing::{debug, warn};

use crate::directory::{Institution, InstitutionDirectory};
use crate::error::Result;
use crate::fixups::{Fixups, InstitutionFixup};

/// Prefixes tried, in order, when searching for a department name.
///
/// Spreadsheets often hold `Foo` for `Department of Foo`.
pub const CANDIDATE_PREFIXES: [&str; 3] = ["", "Department of ", "Faculty of "];

/// Resolves department text to directory identifiers for one run.
///
/// The cache lives on the resolver, so separate runs never share results.
pub struct InstitutionResolver<D> {
    directory: D,
    fixups: Vec<InstitutionFixup>,
    cache: HashMap<String, Option<String>>,
    searches: usize,
}

impl<D: InstitutionDirectory> InstitutionResolver<D> {
    pub fn new(directory: D, fixups: Fixups) -> Self {
        Self {
            directory,
            fixups: fixups.into_institutions(),
            cache: HashMap::new(),
            searches: 0,
        }
    }

    /// Resolve a department name to an institution identifier.
    ///
    /// Fixups are consulted on every call and override the cache. Search
    /// results, including failures to resolve, are cached per name.
    ///
    /// # Errors
    ///
    /// Directory failures are returned as-is and nothing is cached.
    pub fn resolve(&mut self, name: &str) -> Result<Option<String>> {
        if let Some(fixup) = self.fixups.iter().find(|fixup| fixup.original == name) {
            debug!(name, instid = ?fixup.instid, "department resolved by fixup");
            return Ok(fixup.instid.clone());
        }

        if let Some(cached) = self.cache.get(name) {
            return Ok(cached.clone());
        }

        let resolved = self.search(name)?;
        match &resolved {
            Some(instid) => debug!(name, instid, "department resolved by search"),
            None => warn!(name, "department could not be resolved"),
        }
        self.cache.insert(name.to_string(), resolved.clone());
        Ok(resolved)
    }

    fn search(&mut self, name: &str) -> Result<Option<String>> {
        for prefix in CANDIDATE_PREFIXES {
            let candidate = format!("{prefix}{name}");
            self.searches += 1;
            let matches = self.directory.search(&candidate, true)?;
            if let Some(inst) = pick_match(&candidate, &matches) {
                return Ok(Some(inst.instid.clone()));
            }
            debug!(
                candidate,
                matches = matches.len(),
                "no acceptable directory match"
            );
        }
        Ok(None)
    }

    /// Number of directory queries issued so far.
    pub fn search_count(&self) -> usize {
        self.searches
    }

    /// Number of names with a cached outcome.
    pub fn cached_len(&self) -> usize {
        self.cache.len()
    }

    pub fn directory(&self) -> &D {
        &self.directory
    }
}

/// A unique exact-name match wins; otherwise a sole approximate match.
fn pick_match<'a>(candidate: &str, matches: &'a [Institution]) -> Option<&'a Institution> {
    let mut exact = matches.iter().filter(|inst| inst.name == candidate);
    if let (Some(only), None) = (exact.next(), exact.next()) {
        return Some(only);
    }
    match matches {
        [only] => Some(only),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unique_exact_match_beats_other_results() {
        let matches = vec![
            Institution::new("FOOS", "Department of Foo Studies"),
            Institution::new("FOO", "Foo"),
        ];
        assert_eq!(pick_match("Foo", &matches).unwrap().instid, "FOO");
    }

    #[test]
    fn duplicate_exact_matches_are_ambiguous() {
        let matches = vec![Institution::new("A", "Foo"), Institution::new("B", "Foo")];
        assert!(pick_match("Foo", &matches).is_none());
    }

    #[test]
    fn sole_fuzzy_match_is_accepted() {
        let matches = vec![Institution::new("FOO", "Department of Foo")];
        assert_eq!(pick_match("Foo", &matches).unwrap().instid, "FOO");
        assert!(pick_match("Foo", &[]).is_none());
    }
}
