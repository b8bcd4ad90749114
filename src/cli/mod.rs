//! Command-line interface module

use clap::Parser;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing_subscriber::EnvFilter;

use crate::error::{CatalogError, CatalogResult};
use crate::extraction::{RunConfig, DEFAULT_MAX_ITEMS};

/// Main CLI arguments
#[derive(Parser, Debug, Clone)]
#[command(name = "partsfeed")]
#[command(about = "Flatten per-vehicle spare-part JSON feeds into one XML shop catalog")]
#[command(version)]
#[command(long_about = None)]
pub struct Args {
    /// Directory containing the per-vehicle JSON feeds
    #[arg(default_value = "spare_parts_feed")]
    pub source: PathBuf,

    /// Output XML file path
    #[arg(short, long, default_value = "output.xml")]
    pub output: PathBuf,

    /// Test mode: stop accepting new products once --max-items is reached
    #[arg(long)]
    pub test: bool,

    /// Product cap used in test mode
    #[arg(long, default_value_t = DEFAULT_MAX_ITEMS)]
    pub max_items: usize,

    /// Also read feeds from sub-directories
    #[arg(long)]
    pub recursive: bool,

    /// Spaces per indentation level in the XML output (0-8, default: 2)
    #[arg(long)]
    pub indent: Option<u8>,

    /// Output run statistics
    #[arg(long)]
    pub stats: bool,

    /// Show a progress bar while reading feeds
    #[arg(long)]
    pub progress: bool,

    /// Enable verbose logging
    #[arg(long)]
    pub verbose: bool,

    /// Suppress non-error output
    #[arg(long)]
    pub quiet: bool,
}

/// CLI configuration
#[derive(Debug, Clone)]
pub struct CliConfig {
    pub args: Args,
    pub run_config: RunConfig,
}

impl CliConfig {
    /// Create CLI configuration from arguments
    pub fn from_args(args: Args) -> CatalogResult<Self> {
        let run_config = Self::create_run_config(&args)?;

        Ok(Self { args, run_config })
    }

    fn create_run_config(args: &Args) -> CatalogResult<RunConfig> {
        if args.verbose && args.quiet {
            return Err(CatalogError::configuration(
                "--verbose and --quiet cannot be used together",
            ));
        }

        let config = RunConfig {
            source_dir: args.source.clone(),
            output_path: args.output.clone(),
            test_mode: args.test,
            max_items: args.max_items,
            recursive: args.recursive,
            indent: args.indent.unwrap_or(2),
            show_progress: args.progress && !args.quiet,
        };

        config.validate()?;
        Ok(config)
    }

    /// Check if quiet mode is enabled
    pub fn is_quiet(&self) -> bool {
        self.args.quiet
    }

    /// Check if stats output is requested
    pub fn want_stats(&self) -> bool {
        self.args.stats
    }

    /// Log filter used when `RUST_LOG` is not set
    pub fn default_log_level(&self) -> &'static str {
        if self.args.verbose {
            "debug"
        } else if self.args.quiet {
            "error"
        } else {
            "info"
        }
    }
}

/// Install the tracing subscriber. `RUST_LOG` overrides the CLI-derived level.
pub fn init_logging(default_level: &str) {
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(default_level)
    };

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}

/// CLI utilities and helpers
pub struct CliUtils;

impl CliUtils {
    /// Milliseconds under a second, tenths of a second under a minute,
    /// whole minutes and seconds beyond that
    pub fn format_duration(duration: Duration) -> String {
        match duration.as_secs() {
            0 => format!("{}ms", duration.as_millis()),
            1..=59 => format!("{:.1}s", duration.as_secs_f64()),
            secs => format!("{}m {}s", secs / 60, secs % 60),
        }
    }

    /// Create a progress bar for file processing
    pub fn create_progress_bar(total: u64) -> indicatif::ProgressBar {
        let style = indicatif::ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{wide_bar:.cyan/blue}] {pos}/{len} {msg}")
            .unwrap_or_else(|_| indicatif::ProgressStyle::default_bar())
            .progress_chars("#>-");
        let pb = indicatif::ProgressBar::new(total);
        pb.set_style(style);
        pb
    }

    /// Report the written catalog on stdout unless quiet
    pub fn show_success(output_path: &Path, quiet: bool) {
        if quiet {
            return;
        }
        println!("✓ Catalog written to: {}", output_path.display());
    }

    pub fn show_error(message: impl std::fmt::Display) {
        eprintln!("✗ {message}");
    }
}

/// Handle CLI errors with user-friendly messages
pub fn handle_error(error: &CatalogError) {
    CliUtils::show_error(error.user_message());

    match error {
        CatalogError::SourceDirectory { .. } => {
            eprintln!("\nTip: Pass the feed directory as the first argument");
        }
        CatalogError::Write { .. } => {
            eprintln!("\nTip: Use --output to choose a writable location");
        }
        CatalogError::Configuration { .. } => {
            eprintln!("\nTip: --max-items must be at least 1 when --test is set");
        }
        _ => {}
    }

    eprintln!("\nTry 'partsfeed --help' for usage information.");
}
