//! Streaming CSV row source.
//!
//! Input is split into physical lines first and each record is parsed on
//! its own, so a blank line still counts as a row. Quoted fields may span
//! lines; continuation lines are appended until the quote closes.

use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;

use csv::{ReaderBuilder, StringRecord};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{IngestError, Result};

/// One spreadsheet line as text cells. Blank lines are empty rows.
pub type RawRow = Vec<String>;

/// Options controlling how the legacy export is read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IngestOptions {
    /// Banner rows at the top of the export to ignore, blank lines included.
    pub skip_rows: usize,
    /// Leading columns to drop before applying the column layout.
    pub skip_cols: usize,
    /// Field delimiter.
    pub delimiter: u8,
}

impl Default for IngestOptions {
    fn default() -> Self {
        Self {
            skip_rows: 6,
            skip_cols: 1,
            delimiter: b',',
        }
    }
}

/// Lazy iterator over the data rows of a legacy export.
///
/// Rows are parsed on demand; the skipped banner rows are consumed on the
/// first call to `next`.
pub struct RowSource<R: Read> {
    input: BufReader<R>,
    delimiter: u8,
    pending_skip: usize,
    buffer: String,
    line: u64,
    failed: bool,
}

impl RowSource<Box<dyn Read>> {
    /// Open a file, or standard input when `path` is `-`.
    pub fn open(path: &Path, options: &IngestOptions) -> Result<Self> {
        let reader: Box<dyn Read> = if path.as_os_str() == "-" {
            Box::new(io::stdin())
        } else {
            let file = File::open(path).map_err(|source| IngestError::Open {
                path: path.to_path_buf(),
                source,
            })?;
            Box::new(file)
        };
        Ok(Self::new(reader, options))
    }
}

impl<R: Read> RowSource<R> {
    pub fn new(reader: R, options: &IngestOptions) -> Self {
        Self {
            input: BufReader::new(reader),
            delimiter: options.delimiter,
            pending_skip: options.skip_rows,
            buffer: String::new(),
            line: 0,
            failed: false,
        }
    }

    /// Read the physical lines of the next record into `self.buffer`.
    ///
    /// Returns the first line number of the record, or `None` at end of input.
    fn read_record_text(&mut self) -> Result<Option<u64>> {
        self.buffer.clear();
        let start = self.line + 1;
        let mut quoted = false;
        loop {
            let offset = self.buffer.len();
            if self.input.read_line(&mut self.buffer)? == 0 {
                break;
            }
            self.line += 1;
            quoted = ends_inside_quotes(&self.buffer[offset..], self.delimiter, quoted);
            if !quoted {
                break;
            }
        }
        Ok((!self.buffer.is_empty()).then_some(start))
    }

    fn parse_record(&self) -> Result<RawRow> {
        let mut reader = ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .delimiter(self.delimiter)
            .from_reader(self.buffer.as_bytes());
        let mut record = StringRecord::new();
        if !reader.read_record(&mut record)? {
            return Ok(RawRow::new());
        }
        Ok(record.iter().map(str::to_string).collect())
    }

    fn next_row(&mut self) -> Result<Option<RawRow>> {
        while self.pending_skip > 0 {
            self.pending_skip -= 1;
            if self.read_record_text()?.is_none() {
                return Ok(None);
            }
        }
        let Some(line) = self.read_record_text()? else {
            return Ok(None);
        };
        let row = self.parse_record()?;
        debug!(line, columns = row.len(), "read row");
        Ok(Some(row))
    }
}

/// Whether `line` ends inside a quoted field, given the state at its start.
fn ends_inside_quotes(line: &str, delimiter: u8, mut quoted: bool) -> bool {
    let mut field_start = !quoted;
    let mut bytes = line.bytes().peekable();
    while let Some(byte) = bytes.next() {
        if quoted {
            if byte == b'"' {
                if bytes.peek() == Some(&b'"') {
                    bytes.next();
                } else {
                    quoted = false;
                }
            }
        } else if byte == b'"' && field_start {
            quoted = true;
        }
        field_start = !quoted && (byte == delimiter || byte == b'\n');
    }
    quoted
}

impl<R: Read> Iterator for RowSource<R> {
    type Item = Result<RawRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.failed {
            return None;
        }
        match self.next_row() {
            Ok(row) => row.map(Ok),
            Err(error) => {
                self.failed = true;
                Some(Err(error))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn quote_state_follows_field_boundaries() {
        assert!(!ends_inside_quotes("a,b\n", b',', false));
        assert!(ends_inside_quotes("a,\"b\n", b',', false));
        assert!(!ends_inside_quotes("c\",d\n", b',', true));
        assert!(!ends_inside_quotes("5\" floppy,x\n", b',', false));
        assert!(ends_inside_quotes("\"say \"\"hi\n", b',', false));
        assert!(!ends_inside_quotes("a;\"b;c\";d\n", b';', false));
    }
}
