//! Output format of the merged snapshot file.
//!
//! The layout is fixed so downstream readers can split the file back into
//! records: a header naming the source directory, then one record per file
//! made of a `FILE_PATH:` line and the raw contents between the start and end
//! markers.

use crate::AggregateError;
use std::io::Write;
use std::path::{Path, PathBuf};

/// Line under the header: 50 `=`.
pub const HEADER_SEPARATOR: &str = "==================================================";
/// Opens a record: 20 `-`, ` START `, 20 `-`.
pub const START_MARKER: &str = "-------------------- START --------------------";
/// Closes a record: 20 `-`, `  END  `, 20 `-`.
pub const END_MARKER: &str = "--------------------  END  --------------------";
/// Prefix of the line naming a record's relative path.
pub const FILE_PATH_PREFIX: &str = "FILE_PATH: ";

/// Formats the header written once at the top of the output.
pub fn format_header(source: &Path) -> String {
    format!("Project Source: {}\n{}\n\n", source.display(), HEADER_SEPARATOR)
}

/// Formats one record. `content` is copied verbatim.
pub fn format_record(relative: &Path, content: &str) -> String {
    let mut out = String::with_capacity(content.len() + 160);
    out.push_str(FILE_PATH_PREFIX);
    out.push_str(&relative.display().to_string());
    out.push('\n');
    out.push_str(START_MARKER);
    out.push('\n');
    out.push_str(content);
    out.push('\n');
    out.push_str(END_MARKER);
    out.push('\n');
    out.push_str("\n\n");
    out
}

/// Streams the header and records into `W`, counting records as it goes.
pub struct RecordWriter<W: Write> {
    inner: W,
    path: PathBuf,
    records: usize,
}

impl<W: Write> RecordWriter<W> {
    /// `path` names the destination in error messages.
    pub fn new(inner: W, path: impl Into<PathBuf>) -> Self {
        Self {
            inner,
            path: path.into(),
            records: 0,
        }
    }

    pub fn write_header(&mut self, source: &Path) -> Result<(), AggregateError> {
        let header = format_header(source);
        self.write_all(header.as_bytes())
    }

    pub fn write_record(&mut self, relative: &Path, content: &str) -> Result<(), AggregateError> {
        let record = format_record(relative, content);
        self.write_all(record.as_bytes())?;
        self.records += 1;
        Ok(())
    }

    /// Records written so far.
    pub fn records(&self) -> usize {
        self.records
    }

    /// Flushes and hands back the inner writer.
    pub fn finish(mut self) -> Result<W, AggregateError> {
        self.inner
            .flush()
            .map_err(|e| AggregateError::io(&self.path, e))?;
        Ok(self.inner)
    }

    fn write_all(&mut self, buf: &[u8]) -> Result<(), AggregateError> {
        self.inner
            .write_all(buf)
            .map_err(|e| AggregateError::io(&self.path, e))
    }
}
