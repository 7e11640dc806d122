//! CLI Tooling
//!
//! Command-line interface for a packing run: resolve roots, scan them, bucket
//! the files and drain them into disc-sized sets.

use crate::config::{ConfigLoader, PackConfig};
use crate::driver::{pack, PackPlan, PackSummary};
use crate::error::ApiError;
use crate::report::{format_summary_json, format_summary_text};
use crate::scan::{resolve_roots, scan_roots};
use crate::sorter::BucketSorter;
use crate::types::Item;
use clap::Parser;
use std::io::IsTerminal;
use std::path::{Path, PathBuf};
use tracing::info;

/// Discfit CLI - approximate a best fit of files onto single-layer DVDs
#[derive(Parser, Debug, Clone)]
#[command(name = "discfit", version)]
#[command(about = "Bucket-sort files into disc-sized sets")]
pub struct Cli {
    /// Root path to search for files (repeatable; defaults to the current directory)
    #[arg(long = "path", value_name = "PATH")]
    pub paths: Vec<PathBuf>,

    /// Enable recursive searching
    #[arg(long = "r")]
    pub recursive: bool,

    /// Number of sets to generate (0 means no limit)
    #[arg(long)]
    pub sets: Option<usize>,

    /// Capacity of each set in bytes (default: 4.3 GiB)
    #[arg(long)]
    pub target_size: Option<u64>,

    /// Bucket width in bytes (default: 100 MiB)
    #[arg(long)]
    pub granularity: Option<u64>,

    /// Accept a file that fills a set exactly to the target size
    #[arg(long)]
    pub allow_exact_fit: bool,

    /// Follow symbolic links while scanning
    #[arg(long)]
    pub follow_symlinks: bool,

    /// Pause between files during a fit, in milliseconds
    #[arg(long)]
    pub pace_ms: Option<u64>,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Output format (text or json)
    #[arg(long, default_value = "text", value_parser = ["text", "json"])]
    pub format: String,

    /// Print the effective configuration as TOML and exit
    #[arg(long)]
    pub print_config: bool,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr, both)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

/// Output format of the final summary
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Text,
    Json,
}

/// Resolved state for one CLI invocation.
pub struct CliContext {
    config: PackConfig,
    paths: Vec<PathBuf>,
    max_sets: Option<usize>,
    format: OutputFormat,
    print_config: bool,
    color: bool,
    log_file: Option<PathBuf>,
}

impl CliContext {
    /// Load configuration and merge CLI flags on top of it.
    pub fn new(cli: &Cli) -> Result<Self, ApiError> {
        let mut config = match &cli.config {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&std::env::current_dir()?)?,
        };
        apply_overrides(&mut config, cli);
        config.validate()?;

        let format = if cli.format == "json" {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        Ok(Self {
            config,
            paths: cli.paths.clone(),
            max_sets: cli.sets,
            format,
            print_config: cli.print_config,
            color: std::io::stdout().is_terminal(),
            log_file: cli.log_file.clone(),
        })
    }

    pub fn config(&self) -> &PackConfig {
        &self.config
    }

    /// Log file given with `--log-file`, if any.
    pub fn log_file(&self) -> Option<&Path> {
        self.log_file.as_deref()
    }

    /// Run the invocation and return the text to print.
    pub fn execute(&self) -> Result<String, ApiError> {
        if self.print_config {
            return self.config.to_toml();
        }

        info!("discfit v{}", env!("CARGO_PKG_VERSION"));

        let roots = resolve_roots(&self.paths)?;
        let outcome = scan_roots(&roots, &self.config.scan);
        let skipped = outcome.skipped;
        let mut summary = self.pack_items(outcome.items)?;
        summary.scan_skipped = skipped;

        info!(
            sets = summary.sets.len(),
            placed = summary.placed_items(),
            pending = summary.pending.len(),
            rejected = summary.rejected.len(),
            "Packing finished"
        );

        match self.format {
            OutputFormat::Json => format_summary_json(&summary),
            OutputFormat::Text => Ok(format_summary_text(&summary, self.color)),
        }
    }

    /// Bucket `items` and drain them into sets per the loaded configuration.
    pub fn pack_items(&self, items: Vec<Item>) -> Result<PackSummary, ApiError> {
        let mut sorter = BucketSorter::new(&self.config.sorter)?;
        for item in items {
            sorter.add(item.id, item.size);
        }
        let plan = PackPlan {
            target_size: self.config.target_size,
            max_sets: self.max_sets,
        };
        Ok(pack(&mut sorter, &plan)?)
    }
}

/// Apply CLI flags over the loaded configuration.
fn apply_overrides(config: &mut PackConfig, cli: &Cli) {
    if let Some(target_size) = cli.target_size {
        config.target_size = target_size;
    }
    if let Some(granularity) = cli.granularity {
        config.sorter.granularity = granularity;
    }
    if let Some(pace_ms) = cli.pace_ms {
        config.sorter.pace_ms = pace_ms;
    }
    if cli.allow_exact_fit {
        config.sorter.allow_exact_fit = true;
    }
    if cli.recursive {
        config.scan.recursive = true;
    }
    if cli.follow_symlinks {
        config.scan.follow_symlinks = true;
    }
    if let Some(ref level) = cli.log_level {
        config.logging.level = level.clone();
    }
    if let Some(ref format) = cli.log_format {
        config.logging.format = format.clone();
    }
    if let Some(ref output) = cli.log_output {
        config.logging.output = output.clone();
    }
    if cli.log_file.is_some() {
        config.logging.file = cli.log_file.clone();
    }
}
