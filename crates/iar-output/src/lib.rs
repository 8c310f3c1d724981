//! Document stream input and output.
//!
//! Pipeline stages exchange multi-document YAML streams. Each document is a
//! tagged [`Document`](iar_model::Document):
//!
//! - **asset**: a migrated asset with its source columns
//! - **report**: the trailing department resolution summary
//! - **upload**: the outcome of uploading one asset
//!
//! Writers flush after every document so an interrupted run leaves a
//! readable prefix. Readers skip documents whose `type` they do not know.

mod error;
mod io;
mod reader;
mod writer;

pub use error::{OutputError, Result};
pub use io::{open_input, open_output};
pub use reader::{DocumentReader, read_documents};
pub use writer::DocumentWriter;
