use std::io::{BufRead, BufReader, Read};

use iar_model::Document;
use serde_yaml::Value;
use tracing::debug;

use crate::error::Result;

/// Iterator over the known documents of a YAML stream.
///
/// The stream is split on `---` and `...` marker lines and each document is
/// parsed on its own, so memory use is bounded by the largest document.
/// Null documents and documents with a missing or unknown `type` are
/// skipped. A malformed known document is an error, after which the
/// reader is exhausted.
pub struct DocumentReader<R> {
    input: BufReader<R>,
    line: String,
    pending: String,
    index: usize,
    failed: bool,
}

impl<R: Read> DocumentReader<R> {
    pub fn new(reader: R) -> Self {
        Self {
            input: BufReader::new(reader),
            line: String::new(),
            pending: String::new(),
            index: 0,
            failed: false,
        }
    }

    /// Text of the next non-empty document, starting marker included.
    fn next_text(&mut self) -> Result<Option<String>> {
        let mut text = std::mem::take(&mut self.pending);
        loop {
            self.line.clear();
            if self.input.read_line(&mut self.line)? == 0 {
                break;
            }
            let trimmed = self.line.trim_end_matches(['\r', '\n']);
            if is_document_start(trimmed) {
                if has_content(&text) {
                    self.pending = self.line.clone();
                    return Ok(Some(text));
                }
                text.clone_from(&self.line);
            } else if trimmed == "..." {
                if has_content(&text) {
                    return Ok(Some(text));
                }
                text.clear();
            } else if trimmed.starts_with('%') && !has_content(&text) {
                debug!(directive = trimmed, "ignoring directive");
            } else {
                text.push_str(&self.line);
            }
        }
        Ok(has_content(&text).then_some(text))
    }

    fn next_document(&mut self) -> Result<Option<Document>> {
        while let Some(text) = self.next_text()? {
            let index = self.index;
            self.index += 1;
            let value: Value = serde_yaml::from_str(&text)?;
            if value.is_null() {
                continue;
            }
            let known = value
                .get("type")
                .and_then(Value::as_str)
                .is_some_and(|name| Document::KNOWN_TYPES.contains(&name));
            if !known {
                debug!(index, document_type = ?value.get("type"), "skipping document");
                continue;
            }
            return Ok(Some(serde_yaml::from_value(value)?));
        }
        Ok(None)
    }
}

fn is_document_start(line: &str) -> bool {
    line == "---" || line.starts_with("--- ") || line.starts_with("---\t")
}

/// Whether `text` holds anything besides markers, blank lines and comments.
fn has_content(text: &str) -> bool {
    text.lines().any(|line| {
        let line = line.trim();
        !(line.is_empty() || line.starts_with('#') || line == "---")
    })
}

impl<R: Read> Iterator for DocumentReader<R> {
    type Item = Result<Document>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_document() {
            Ok(document) => document.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

/// Read every known document from a stream.
pub fn read_documents<R: Read>(reader: R) -> DocumentReader<R> {
    DocumentReader::new(reader)
}
