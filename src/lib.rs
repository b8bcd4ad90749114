//! Spare-parts catalog builder
//!
//! Reads a directory of per-vehicle JSON feeds, each holding a nested tree of
//! spare-part categories, and flattens them into one XML shop catalog with a
//! single item per product number.

pub mod catalog;
pub mod cli;
pub mod error;
pub mod extraction;
pub mod feed;

// Re-export commonly used types
pub use catalog::{rewrite_category_path, CatalogBuilder, CatalogItem};
pub use error::{CatalogError, CatalogResult, FeedError, FeedResult};
pub use extraction::{run, ItemLimit, PartIndex, PartRecord, RunConfig, RunReport, TreeExtractor};
pub use feed::{CategoryNode, VehicleFeed};

/// Walk already-parsed feeds in order and render the resulting catalog
pub fn build_catalog(feeds: &[VehicleFeed], limit: ItemLimit) -> CatalogResult<String> {
    let mut extractor = TreeExtractor::new(limit);
    let index = feeds
        .iter()
        .fold(PartIndex::new(), |index, feed| extractor.extract_feed(feed, index));
    CatalogBuilder::default().build(&index)
}
