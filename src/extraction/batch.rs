use crate::catalog::CatalogBuilder;
use crate::cli::CliUtils;
use crate::error::{CatalogError, CatalogResult};
use crate::extraction::config::{ItemLimit, RunConfig};
use crate::extraction::engine::TreeExtractor;
use crate::extraction::record::PartIndex;
use crate::extraction::stats::RunStatistics;
use crate::feed::{directory::find_json_files, load_feed};
use indicatif::ProgressBar;
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// Parts gathered from a sequence of feed files
#[derive(Debug, Clone)]
pub struct Collected {
    pub index: PartIndex,
    pub statistics: RunStatistics,
}

/// Outcome of a completed run
#[derive(Debug, Clone)]
pub struct RunReport {
    pub output_path: PathBuf,
    pub index: PartIndex,
    pub statistics: RunStatistics,
}

/// Walk `files` in order into one index. Files that cannot be read or do not
/// look like vehicle feeds are logged and skipped. Under a capped limit no
/// further files are opened once the cap is reached.
pub fn collect_feeds(files: &[PathBuf], limit: ItemLimit, progress: &ProgressBar) -> Collected {
    let mut extractor = TreeExtractor::new(limit);
    let mut index = PartIndex::new();
    let mut statistics = RunStatistics::new(files.len());

    for path in files {
        progress.set_message(display_name(path));

        match load_feed(path) {
            Ok(feed) => {
                let before = index.len();
                index = extractor.extract_feed(&feed, index);
                statistics.files_processed += 1;
                debug!(
                    "Processed {}: {} new products ({} total)",
                    path.display(),
                    index.len() - before,
                    index.len()
                );
            }
            Err(e) if e.is_shape_mismatch() => {
                info!("{}", e);
                statistics.files_skipped += 1;
            }
            Err(e) => {
                warn!("{}", e);
                statistics.files_skipped += 1;
            }
        }
        progress.inc(1);

        if limit.is_reached(index.len()) {
            debug!("Item cap reached after {}, stopping", path.display());
            statistics.stopped_at_cap = true;
            break;
        }
    }

    statistics.record_tally(&extractor.tally());
    Collected { index, statistics }
}

/// Run the whole pipeline: list feeds, extract, render and write the catalog
pub fn run(config: &RunConfig) -> CatalogResult<RunReport> {
    config.validate()?;
    let start_time = Instant::now();

    let files = find_json_files(&config.source_dir, config.recursive)
        .map_err(|e| CatalogError::source_directory(config.source_dir.clone(), e))?;

    if files.is_empty() {
        info!("No JSON files found in {}", config.source_dir.display());
    } else {
        debug!("Found {} JSON files in {}", files.len(), config.source_dir.display());
    }

    let progress = if config.show_progress {
        CliUtils::create_progress_bar(files.len() as u64)
    } else {
        ProgressBar::hidden()
    };
    let Collected {
        index,
        mut statistics,
    } = collect_feeds(&files, config.item_limit(), &progress);
    progress.finish_and_clear();

    CatalogBuilder::new(config.indent).write_to(&index, &config.output_path)?;

    statistics.finish(index.len(), index.category_count(), start_time.elapsed());
    info!("XML file created successfully: {}", config.output_path.display());
    debug!("{}", statistics.summary());

    Ok(RunReport {
        output_path: config.output_path.clone(),
        index,
        statistics,
    })
}

fn display_name(path: &Path) -> String {
    path.file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_else(|| path.display().to_string())
}
