use serde::Serialize;
use std::collections::BTreeSet;
use std::path::PathBuf;

/// File name used when the caller does not pick one.
pub const DEFAULT_OUTPUT_NAME: &str = "project_code_context.txt";

/// Directory names that are never descended into.
pub const IGNORED_DIRS: &[&str] = &[
    "node_modules",
    ".git",
    ".idea",
    ".vscode",
    "dist",
    "build",
    "coverage",
    "__pycache__",
];

/// File names that are never merged. The output file's own name is added on top.
pub const IGNORED_FILES: &[&str] = &[
    "package-lock.json",
    "yarn.lock",
    "pnpm-lock.yaml",
    ".DS_Store",
    "movies.json",
];

/// Extensions (lowercase, without the dot) treated as binary and never read.
pub const BINARY_EXTENSIONS: &[&str] = &[
    "png", "jpg", "jpeg", "gif", "ico", "svg", "woff", "woff2", "ttf", "eot", "mp4", "mp3", "exe",
    "dll", "pyc",
];

/// Immutable settings for one aggregation run.
///
/// Build it with [`AggregateBuilder`] so the output file name always lands in
/// `ignored_files`.
#[derive(Debug, Clone, Serialize)]
pub struct AggregateOptions {
    pub source: PathBuf,
    pub output: PathBuf,
    pub ignored_dirs: BTreeSet<String>,
    pub ignored_files: BTreeSet<String>,
    pub binary_extensions: BTreeSet<String>,
    pub follow_links: bool,
}

impl AggregateOptions {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        AggregateBuilder::new(source, output).build()
    }

    pub fn is_ignored_dir(&self, name: &str) -> bool {
        self.ignored_dirs.contains(name)
    }

    pub fn is_ignored_file(&self, name: &str) -> bool {
        self.ignored_files.contains(name)
    }

    /// Case-insensitive; `ext` is given without the leading dot.
    pub fn is_binary_extension(&self, ext: &str) -> bool {
        self.binary_extensions.contains(&ext.to_lowercase())
    }
}

impl Default for AggregateOptions {
    fn default() -> Self {
        Self::new(".", DEFAULT_OUTPUT_NAME)
    }
}

fn to_set(items: &[&str]) -> BTreeSet<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn normalize_extension(ext: &str) -> String {
    ext.trim_start_matches('.').to_lowercase()
}

#[derive(Debug)]
pub struct AggregateBuilder {
    options: AggregateOptions,
}

impl AggregateBuilder {
    pub fn new(source: impl Into<PathBuf>, output: impl Into<PathBuf>) -> Self {
        Self {
            options: AggregateOptions {
                source: source.into(),
                output: output.into(),
                ignored_dirs: to_set(IGNORED_DIRS),
                ignored_files: to_set(IGNORED_FILES),
                binary_extensions: to_set(BINARY_EXTENSIONS),
                follow_links: false,
            },
        }
    }
    /// Replaces the set of pruned directory names.
    pub fn ignored_dirs<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.ignored_dirs = names.into_iter().map(Into::into).collect();
        self
    }
    pub fn ignored_files<I, S>(mut self, names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.ignored_files = names.into_iter().map(Into::into).collect();
        self
    }
    /// Accepts `png` as well as `.PNG`.
    pub fn binary_extensions<I, S>(mut self, exts: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.options.binary_extensions = exts
            .into_iter()
            .map(|e| normalize_extension(e.as_ref()))
            .collect();
        self
    }
    pub fn ignore_dir(mut self, name: impl Into<String>) -> Self {
        self.options.ignored_dirs.insert(name.into());
        self
    }
    pub fn ignore_file(mut self, name: impl Into<String>) -> Self {
        self.options.ignored_files.insert(name.into());
        self
    }
    pub fn binary_extension(mut self, ext: impl AsRef<str>) -> Self {
        self.options
            .binary_extensions
            .insert(normalize_extension(ext.as_ref()));
        self
    }
    pub fn follow_links(mut self, yes: bool) -> Self {
        self.options.follow_links = yes;
        self
    }
    pub fn build(mut self) -> AggregateOptions {
        if let Some(name) = self.options.output.file_name() {
            self.options
                .ignored_files
                .insert(name.to_string_lossy().into_owned());
        }
        self.options
    }
}
