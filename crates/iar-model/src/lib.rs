pub mod asset;
pub mod document;
pub mod fields;
pub mod issue;
pub mod tristate;

pub use asset::{Asset, AssetPayload, RiskType};
pub use document::{
    AssetDocument, DepartmentMapping, DepartmentReport, Document, UploadMethod, UploadReport,
};
pub use fields::ExtractedFields;
pub use issue::{AssetIssue, UNRESOLVED_DEPARTMENT};
pub use tristate::{Tristate, any_yes};
