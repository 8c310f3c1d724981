//! Ingestion of legacy information asset register spreadsheets.
//!
//! The legacy sheet is exported as CSV with a block of banner rows at the
//! top and one asset per line. Column positions are a fixed contract with
//! the source system; nothing here inspects header text.

pub mod error;
pub mod layout;
pub mod reader;

pub use error::{IngestError, Result};
pub use layout::{ColumnLayout, extract_row};
pub use reader::{IngestOptions, RawRow, RowSource};
