use std::io::Write;

use iar_model::Document;

use crate::error::Result;

/// Writes documents as a multi-document YAML stream.
pub struct DocumentWriter<W: Write> {
    writer: W,
    written: usize,
}

impl<W: Write> DocumentWriter<W> {
    pub fn new(writer: W) -> Self {
        Self { writer, written: 0 }
    }

    /// Append one document and flush it.
    pub fn write(&mut self, document: &Document) -> Result<()> {
        let text = serde_yaml::to_string(document)?;
        self.writer.write_all(b"---\n")?;
        self.writer.write_all(text.as_bytes())?;
        self.writer.flush()?;
        self.written += 1;
        Ok(())
    }

    /// Number of documents written so far.
    pub fn written(&self) -> usize {
        self.written
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}
