use serde::Serialize;
use std::fmt;
use std::path::{Path, PathBuf};

/// Why a file was left out of the merged output.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "detail", rename_all = "snake_case")]
pub enum SkipReason {
    /// The file name is in the ignored-files set.
    IgnoredName,
    /// The extension is in the binary-extensions set.
    IgnoredExtension,
    /// The contents are not valid UTF-8.
    Undecodable,
    /// Reading failed (permissions, I/O); carries the error message.
    Unreadable(String),
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::IgnoredName => f.write_str("ignored file name"),
            SkipReason::IgnoredExtension => f.write_str("binary extension"),
            SkipReason::Undecodable => {
                f.write_str("cannot be decoded as UTF-8 (probably a binary file)")
            }
            SkipReason::Unreadable(msg) => write!(f, "read failed: {}", msg),
        }
    }
}

/// Result of looking at one file during the walk.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileOutcome {
    /// The file was read and written to the output.
    Included {
        /// Path relative to the source directory.
        relative: PathBuf,
        /// Size of the merged contents in bytes.
        bytes: usize,
    },
    Skipped {
        relative: PathBuf,
        reason: SkipReason,
    },
}

impl FileOutcome {
    pub fn relative(&self) -> &Path {
        match self {
            FileOutcome::Included { relative, .. } | FileOutcome::Skipped { relative, .. } => {
                relative
            }
        }
    }

    pub fn is_included(&self) -> bool {
        matches!(self, FileOutcome::Included { .. })
    }
}

/// Totals reported once the walk is done.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AggregateSummary {
    /// The source directory exactly as it was given.
    pub source: PathBuf,
    /// Absolute path of the written output file.
    pub output: PathBuf,
    /// Number of `FILE_PATH:` records written.
    pub file_count: usize,
    /// Files skipped for any reason, including ignored names and extensions.
    pub skipped_count: usize,
}
