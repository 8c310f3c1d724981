//! Institution resolution for migrated assets.
//!
//! Spreadsheet department cells hold free text such as `Foo`,
//! `Dept of Foo` or `Faculty of Foo`. The [`InstitutionResolver`] turns that
//! text into a directory identifier using, in order:
//!
//! - manual [`Fixups`], which always win
//! - a per-run cache, including negative results
//! - a tiered approximate search against an [`InstitutionDirectory`]
//!
//! Two directories are provided: [`LookupClient`] talks to the HTTP
//! institution directory and [`StaticDirectory`] searches a local YAML file.

#![warn(clippy::all)]

pub mod client;
pub mod directory;
pub mod error;
pub mod fixups;
pub mod offline;
pub mod resolver;

pub use client::{DEFAULT_LOOKUP_URL, LookupClient};
pub use directory::{Institution, InstitutionDirectory};
pub use error::{LookupError, Result};
pub use fixups::{Fixups, InstitutionFixup};
pub use offline::StaticDirectory;
pub use resolver::{CANDIDATE_PREFIXES, InstitutionResolver};
