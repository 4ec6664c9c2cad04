use crate::error::AggregateError;
use crate::options::AggregateOptions;
use crate::output::RecordWriter;
use crate::types::{AggregateSummary, FileOutcome, SkipReason};
use ignore::{DirEntry, WalkBuilder};
use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
#[cfg(feature = "logging")]
use tracing;
struct Walker {
    inner: ignore::Walk,
}
impl Walker {
    fn new(options: &AggregateOptions) -> Self {
        let mut builder = WalkBuilder::new(&options.source);
        builder
            .standard_filters(false)
            .follow_links(options.follow_links);
        let filter_options = options.clone();
        builder.filter_entry(move |entry| {
            if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                return true;
            }
            let pruned = entry
                .file_name()
                .to_str()
                .is_some_and(|name| filter_options.is_ignored_dir(name));
            if pruned {
                #[cfg(feature = "logging")]
                tracing::debug!("Pruning directory: {}", entry.path().display());
            }
            !pruned
        });
        Self {
            inner: builder.build(),
        }
    }
    /// Yields every non-directory entry, parents before children.
    fn into_files(self) -> impl Iterator<Item = Result<PathBuf, ignore::Error>> {
        self.inner.filter_map(|result| match result {
            Ok(entry) if is_directory(&entry) => None,
            Ok(entry) => Some(Ok(entry.into_path())),
            Err(e) => Some(Err(e)),
        })
    }
}
fn error_path(err: &ignore::Error) -> Option<&Path> {
    match err {
        ignore::Error::WithPath { path, .. } => Some(path.as_path()),
        ignore::Error::Loop { child, .. } => Some(child.as_path()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            error_path(err)
        }
        ignore::Error::Partial(errs) => errs.iter().find_map(error_path),
        _ => None,
    }
}
// Entries below the root that cannot be listed are skipped like unreadable
// files; a failure on the root itself, or one without a path, ends the run.
fn skip_walk_error(
    err: ignore::Error,
    options: &AggregateOptions,
) -> Result<FileOutcome, AggregateError> {
    let relative = error_path(&err)
        .filter(|path| *path != options.source)
        .map(|path| relative_path(path, &options.source));
    let Some(relative) = relative else {
        return Err(AggregateError::Walk(err));
    };
    #[cfg(feature = "logging")]
    tracing::warn!("Skipping {}: {}", relative.display(), err);
    Ok(FileOutcome::Skipped {
        relative,
        reason: SkipReason::Unreadable(err.to_string()),
    })
}
// Unfollowed symlinks to directories count as directories too.
fn is_directory(entry: &DirEntry) -> bool {
    match entry.file_type() {
        Some(ft) if ft.is_dir() => true,
        Some(ft) if ft.is_symlink() => entry.path().is_dir(),
        _ => false,
    }
}
fn check_source(source: &Path) -> Result<(), AggregateError> {
    let metadata = match fs::metadata(source) {
        Ok(m) => m,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            return Err(AggregateError::SourceNotFound(source.to_path_buf()));
        }
        Err(e) => return Err(AggregateError::io(source, e)),
    };
    if !metadata.is_dir() {
        return Err(AggregateError::NotADirectory(source.to_path_buf()));
    }
    Ok(())
}
fn relative_path(path: &Path, root: &Path) -> PathBuf {
    path.strip_prefix(root).unwrap_or(path).to_path_buf()
}
/// Decides from the name alone whether a file is left out.
///
/// Returns `None` when the file should be read.
pub fn classify(path: &Path, options: &AggregateOptions) -> Option<SkipReason> {
    let name = path.file_name().and_then(|n| n.to_str());
    if name.is_some_and(|n| options.is_ignored_file(n)) {
        return Some(SkipReason::IgnoredName);
    }
    let ext = path.extension().and_then(|e| e.to_str());
    if ext.is_some_and(|e| options.is_binary_extension(e)) {
        return Some(SkipReason::IgnoredExtension);
    }
    None
}
/// Reads the whole file, requiring valid UTF-8.
pub fn read_text(path: &Path) -> Result<String, SkipReason> {
    let bytes = fs::read(path).map_err(|e| SkipReason::Unreadable(e.to_string()))?;
    String::from_utf8(bytes).map_err(|_| SkipReason::Undecodable)
}
fn process_file<W: Write>(
    path: &Path,
    options: &AggregateOptions,
    writer: &mut RecordWriter<W>,
) -> Result<FileOutcome, AggregateError> {
    let relative = relative_path(path, &options.source);
    if let Some(reason) = classify(path, options) {
        #[cfg(feature = "logging")]
        tracing::debug!("Skipping {} ({})", relative.display(), reason);
        return Ok(FileOutcome::Skipped { relative, reason });
    }
    match read_text(path) {
        Ok(content) => {
            writer.write_record(&relative, &content)?;
            Ok(FileOutcome::Included {
                relative,
                bytes: content.len(),
            })
        }
        Err(reason) => {
            #[cfg(feature = "logging")]
            tracing::warn!("Skipping {}: {}", relative.display(), reason);
            Ok(FileOutcome::Skipped { relative, reason })
        }
    }
}
/// Runs the merge, handing each file's outcome to `on_outcome` as soon as it
/// is known.
///
/// Per-file problems never stop the run, nor does a subdirectory that cannot
/// be listed. A missing or unreadable source, or an output that cannot be
/// created or written, does; whatever was already written stays in the output
/// file.
pub fn aggregate_with<F>(
    options: &AggregateOptions,
    mut on_outcome: F,
) -> Result<AggregateSummary, AggregateError>
where
    F: FnMut(&FileOutcome),
{
    #[cfg(feature = "logging")]
    tracing::info!(
        "Merging {} into {}",
        options.source.display(),
        options.output.display()
    );
    check_source(&options.source)?;
    let file = File::create(&options.output).map_err(|e| AggregateError::io(&options.output, e))?;
    let mut writer = RecordWriter::new(BufWriter::new(file), &options.output);
    writer.write_header(&options.source)?;
    let mut skipped_count = 0;
    for entry in Walker::new(options).into_files() {
        let outcome = match entry {
            Ok(path) => process_file(&path, options, &mut writer)?,
            Err(e) => skip_walk_error(e, options)?,
        };
        if !outcome.is_included() {
            skipped_count += 1;
        }
        on_outcome(&outcome);
    }
    let file_count = writer.records();
    writer.finish()?;
    let output =
        std::path::absolute(&options.output).map_err(|e| AggregateError::io(&options.output, e))?;
    #[cfg(feature = "logging")]
    tracing::info!("Merged {} files, skipped {}", file_count, skipped_count);
    Ok(AggregateSummary {
        source: options.source.clone(),
        output,
        file_count,
        skipped_count,
    })
}
/// Runs the merge with progress lines printed to stdout.
pub fn try_aggregate(options: &AggregateOptions) -> Result<AggregateSummary, AggregateError> {
    aggregate_with(options, report_outcome)
}
/// Merges `source` into `output` using the built-in ignore sets, printing
/// progress and a summary.
///
/// Errors are printed rather than returned; the result is the number of files
/// merged, `0` when the run failed.
pub fn aggregate(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> usize {
    aggregate_options(&AggregateOptions::new(source, output))
}
/// Same as [`aggregate`] with caller-built options.
pub fn aggregate_options(options: &AggregateOptions) -> usize {
    match try_aggregate(options) {
        Ok(summary) => {
            print_summary(&summary);
            summary.file_count
        }
        Err(e) => {
            #[cfg(feature = "logging")]
            tracing::error!("Merge failed: {}", e);
            eprintln!("Error: {}", e);
            0
        }
    }
}
/// Console line for one file. Name and extension skips stay quiet.
pub fn report_outcome(outcome: &FileOutcome) {
    match outcome {
        FileOutcome::Included { relative, .. } => {
            println!("processed: {}", relative.display());
        }
        FileOutcome::Skipped {
            relative,
            reason: SkipReason::Undecodable,
        } => {
            println!("[skip] {}: {}", relative.display(), SkipReason::Undecodable);
        }
        FileOutcome::Skipped {
            relative,
            reason: SkipReason::Unreadable(msg),
        } => {
            println!("[error] failed to read {}: {}", relative.display(), msg);
        }
        FileOutcome::Skipped { .. } => {}
    }
}
pub fn print_summary(summary: &AggregateSummary) {
    println!();
    println!("Done: merged {} files.", summary.file_count);
    println!("Saved to: {}", summary.output.display());
}
