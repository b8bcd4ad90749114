//! Category-tree extraction and aggregation
//!
//! This module contains the tree walk, the part accumulator, run
//! configuration and statistics, and the driver that sequences feed files.

pub mod batch;
pub mod config;
pub mod engine;
pub mod path;
pub mod record;
pub mod stats;

pub use batch::{collect_feeds, run, Collected, RunReport};
pub use config::{ItemLimit, RunConfig, DEFAULT_MAX_ITEMS};
pub use engine::{extract, ExtractionTally, TreeExtractor};
pub use path::{CategoryPath, PATH_SEPARATOR};
pub use record::{PartIndex, PartOccurrence, PartRecord, Recorded};
pub use stats::RunStatistics;
