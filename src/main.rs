use clap::Parser;
use std::process::ExitCode;
use std::time::Duration;

use anyhow::Result;

use partsfeed::cli::{handle_error, init_logging, Args, CliConfig, CliUtils};
use partsfeed::extraction::{self, RunStatistics};

/// Exit status for rejected command-line options
const USAGE_ERROR: u8 = 2;

fn main() -> Result<ExitCode> {
    let args = Args::parse();

    let config = match CliConfig::from_args(args) {
        Ok(config) => config,
        Err(e) => {
            handle_error(&e);
            return Ok(ExitCode::from(USAGE_ERROR));
        }
    };

    init_logging(config.default_log_level());

    match extraction::run(&config.run_config) {
        Ok(report) => {
            CliUtils::show_success(&report.output_path, config.is_quiet());
            if config.want_stats() {
                output_statistics(&report.statistics, config.is_quiet())?;
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e) => {
            tracing::error!("Catalog run aborted: {}", e);
            handle_error(&e);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn output_statistics(statistics: &RunStatistics, quiet: bool) -> Result<()> {
    tracing::debug!("Run statistics: {}", statistics.to_json()?);

    if quiet {
        return Ok(());
    }

    println!("\nRun Statistics:");
    println!("Files found: {}", statistics.files_found);
    println!(
        "Files processed: {} ({} skipped)",
        statistics.files_processed, statistics.files_skipped
    );
    println!(
        "Part entries: {} accepted, {} skipped",
        statistics.parts_accepted, statistics.parts_skipped
    );
    println!("Products: {}", statistics.distinct_products);
    println!("Category lines: {}", statistics.category_lines);
    if statistics.stopped_at_cap {
        println!("Stopped early: test-mode cap reached");
    }
    println!(
        "Processing time: {}",
        CliUtils::format_duration(Duration::from_millis(statistics.processing_time_ms))
    );

    Ok(())
}
