//! # srcmerge
//!
//! `srcmerge` walks a project directory and merges the contents of its text files into a
//! single snapshot file, each file introduced by a `FILE_PATH:` line and fenced by fixed
//! start/end markers. Dependency and build folders (`node_modules`, `.git`, `dist`, ...),
//! lockfiles and files with binary extensions are left out, as is any file that is not
//! valid UTF-8.
//!
//! The ignore sets live in an explicit [`AggregateOptions`] value, so callers can replace
//! them without touching global state.
//!
//! # Features
//!
//! - `logging`: Enables diagnostics via the `tracing` crate (on by default).
//!
//! # Example
//!
//! ```no_run
//! use srcmerge::{AggregateBuilder, try_aggregate};
//!
//! let options = AggregateBuilder::new(".", "project_code_context.txt")
//!     .ignore_dir("target")
//!     .binary_extension("pdf")
//!     .build();
//!
//! let summary = try_aggregate(&options).expect("merge failed");
//! println!("{} files -> {}", summary.file_count, summary.output.display());
//! ```

mod engine;
mod error;
mod options;
pub mod output;
mod types;

pub use engine::{
    aggregate, aggregate_options, aggregate_with, classify, print_summary, read_text,
    report_outcome, try_aggregate,
};
pub use error::AggregateError;
pub use options::{
    AggregateBuilder, AggregateOptions, BINARY_EXTENSIONS, DEFAULT_OUTPUT_NAME, IGNORED_DIRS,
    IGNORED_FILES,
};
pub use types::{AggregateSummary, FileOutcome, SkipReason};
