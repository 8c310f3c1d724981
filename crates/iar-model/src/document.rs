//! Tagged documents exchanged between pipeline stages.
//!
//! Every document carries a `type` field. Streams may mix document kinds and
//! readers skip kinds they do not understand, so output files can be
//! concatenated and replayed.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::asset::Asset;
use crate::fields::ExtractedFields;
use crate::issue::AssetIssue;

/// One document in a migration or upload stream.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum Document {
    Asset(AssetDocument),
    Report(DepartmentReport),
    Upload(UploadReport),
}

impl Document {
    /// The `type` tags understood by this crate.
    pub const KNOWN_TYPES: [&'static str; 3] = ["asset", "report", "upload"];

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Asset(_) => "asset",
            Self::Report(_) => "report",
            Self::Upload(_) => "upload",
        }
    }

    pub fn into_asset(self) -> Option<AssetDocument> {
        match self {
            Self::Asset(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn into_upload(self) -> Option<UploadReport> {
        match self {
            Self::Upload(report) => Some(report),
            _ => None,
        }
    }
}

/// A migrated asset together with the source columns it came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AssetDocument {
    pub asset: Asset,
    #[serde(default)]
    pub original: ExtractedFields,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub errors: Vec<AssetIssue>,
}

impl AssetDocument {
    pub fn new(asset: Asset, original: ExtractedFields, errors: Vec<AssetIssue>) -> Self {
        Self {
            asset,
            original,
            errors,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

/// Resolution outcome for one distinct department string.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentMapping {
    pub original: String,
    pub instid: Option<String>,
}

/// Trailing summary of every department string seen during a migration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DepartmentReport {
    pub original_dept_mapping: Vec<DepartmentMapping>,
}

impl DepartmentReport {
    pub fn unresolved(&self) -> impl Iterator<Item = &DepartmentMapping> {
        self.original_dept_mapping
            .iter()
            .filter(|mapping| mapping.instid.is_none())
    }
}

/// HTTP method used for the request that decided an upload outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum UploadMethod {
    Get,
    Post,
    Put,
}

impl UploadMethod {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
        }
    }
}

impl fmt::Display for UploadMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of uploading one asset.
///
/// Exactly one of `dest_id` and `error` is set. A report with a `dest_id`
/// seeds the source to destination mapping of a later run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadReport {
    pub source_id: String,
    pub method: UploadMethod,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// `None` when the request never produced a response.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status_code: Option<u16>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dest_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<Value>,
}

impl UploadReport {
    pub fn succeeded(
        source_id: impl Into<String>,
        method: UploadMethod,
        url: impl Into<String>,
        status_code: u16,
        dest_id: impl Into<String>,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            method,
            url: Some(url.into()),
            status_code: Some(status_code),
            dest_id: Some(dest_id.into()),
            error: None,
        }
    }

    pub fn created(
        source_id: impl Into<String>,
        url: impl Into<String>,
        status_code: u16,
        dest_id: impl Into<String>,
    ) -> Self {
        Self::succeeded(source_id, UploadMethod::Post, url, status_code, dest_id)
    }

    pub fn failed(
        source_id: impl Into<String>,
        method: UploadMethod,
        url: impl Into<String>,
        status_code: Option<u16>,
        error: Value,
    ) -> Self {
        Self {
            source_id: source_id.into(),
            method,
            url: Some(url.into()),
            status_code,
            dest_id: None,
            error: Some(error),
        }
    }

    pub fn is_success(&self) -> bool {
        self.dest_id.is_some() && self.error.is_none()
    }
}
