//! Run configuration for catalog generation

use crate::error::{CatalogError, CatalogResult};
use std::path::PathBuf;

/// Default cap on distinct products when running in test mode
pub const DEFAULT_MAX_ITEMS: usize = 10;

/// Cap on the number of distinct products accepted during a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemLimit {
    /// Accept every product
    Unbounded,
    /// Stop accepting new products once this many are held
    Capped(usize),
}

impl ItemLimit {
    pub fn from_test_mode(test_mode: bool, max_items: usize) -> Self {
        if test_mode {
            ItemLimit::Capped(max_items)
        } else {
            ItemLimit::Unbounded
        }
    }

    /// True once `held` distinct products reach the cap
    pub fn is_reached(&self, held: usize) -> bool {
        match self {
            ItemLimit::Unbounded => false,
            ItemLimit::Capped(max) => held >= *max,
        }
    }
}

/// Parameters for one catalog run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Directory holding the per-vehicle `.json` feeds
    pub source_dir: PathBuf,
    /// Where the XML catalog is written
    pub output_path: PathBuf,
    /// Bounded run that keeps at most `max_items` products
    pub test_mode: bool,
    /// Only consulted when `test_mode` is set
    pub max_items: usize,
    /// Walk sub-directories of `source_dir` too
    pub recursive: bool,
    /// Spaces per indentation level in the XML output (0-8)
    pub indent: u8,
    /// Draw a progress bar over input files
    pub show_progress: bool,
}

impl Default for RunConfig {
    fn default() -> Self {
        Self {
            source_dir: PathBuf::from("spare_parts_feed"),
            output_path: PathBuf::from("output.xml"),
            test_mode: false,
            max_items: DEFAULT_MAX_ITEMS,
            recursive: false,
            indent: 2,
            show_progress: false,
        }
    }
}

impl RunConfig {
    pub fn new(source_dir: impl Into<PathBuf>, output_path: impl Into<PathBuf>) -> Self {
        Self {
            source_dir: source_dir.into(),
            output_path: output_path.into(),
            ..Default::default()
        }
    }

    /// Enable test mode with the given cap
    pub fn with_test_mode(mut self, max_items: usize) -> Self {
        self.test_mode = true;
        self.max_items = max_items;
        self
    }

    pub fn with_recursive(mut self, recursive: bool) -> Self {
        self.recursive = recursive;
        self
    }

    pub fn with_indent(mut self, indent: u8) -> Self {
        self.indent = indent;
        self
    }

    pub fn item_limit(&self) -> ItemLimit {
        ItemLimit::from_test_mode(self.test_mode, self.max_items)
    }

    /// Validate configuration consistency
    pub fn validate(&self) -> CatalogResult<()> {
        if self.test_mode && self.max_items == 0 {
            return Err(CatalogError::configuration(
                "Max items must be at least 1 in test mode",
            ));
        }

        if self.indent > 8 {
            return Err(CatalogError::configuration("Indent size must be 0-8 spaces"));
        }

        Ok(())
    }
}
