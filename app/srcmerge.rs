//! Command-line interface for srcmerge.
//!
//! Merges the text files under a source directory into one snapshot file and
//! prints a line per merged file followed by a summary.

use clap::Parser;
use srcmerge::{
    AggregateBuilder, AggregateOptions, DEFAULT_OUTPUT_NAME, aggregate_options, aggregate_with,
};
use std::path::PathBuf;

/// srcmerge — merge a project's source files into one text snapshot
#[derive(Parser)]
#[command(name = "srcmerge", version, about, long_about = None)]
struct Cli {
    /// Source directory (default current dir)
    #[arg(default_value = ".")]
    source: PathBuf,

    /// Output file; its name is never merged itself
    #[arg(short, long, default_value = DEFAULT_OUTPUT_NAME)]
    output: PathBuf,

    /// Descend into symlinked directories
    #[arg(long)]
    follow_links: bool,

    /// Print the summary as JSON instead of progress lines
    #[arg(long)]
    json: bool,

    /// Print the effective ignore sets as JSON and exit
    #[arg(long)]
    show_config: bool,

    /// More log output on stderr (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

impl Cli {
    fn to_options(&self) -> AggregateOptions {
        AggregateBuilder::new(&self.source, &self.output)
            .follow_links(self.follow_links)
            .build()
    }
}

#[cfg(feature = "logging")]
fn init_logging(verbose: u8) {
    use tracing_subscriber::EnvFilter;

    let filter = match verbose {
        0 => EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        1 => EnvFilter::new("info"),
        2 => EnvFilter::new("debug"),
        _ => EnvFilter::new("trace"),
    };
    // A second init (never expected here) is not worth failing the run over.
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

fn main() {
    let cli = Cli::parse();

    #[cfg(feature = "logging")]
    init_logging(cli.verbose);

    let options = cli.to_options();

    if cli.show_config {
        print_json(&options);
        return;
    }

    if cli.json {
        run_json(&options);
    } else {
        aggregate_options(&options);
    }
}

// Fatal errors are reported on stderr; the process still exits normally.
fn run_json(options: &AggregateOptions) {
    match aggregate_with(options, |_| {}) {
        Ok(summary) => print_json(&summary),
        Err(e) => eprintln!("Error: {}", e),
    }
}

fn print_json<T: serde::Serialize>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("JSON serialization error: {}", e),
    }
}
