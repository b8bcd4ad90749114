//! Category-tree walk
//!
//! The walk is depth-first: a node's own parts are recorded before any of its
//! children are visited, and children are visited in input order. Pending
//! nodes live on an explicit stack, so tree depth is bounded by memory rather
//! than by the call stack. The accumulator is moved into each call and handed
//! back, so the same [`PartIndex`] threads through every file of a run.

use crate::extraction::config::ItemLimit;
use crate::extraction::path::CategoryPath;
use crate::extraction::record::{PartIndex, PartOccurrence, Recorded};
use crate::feed::{CategoryNode, SparePart, VehicleFeed};
use tracing::trace;

/// Counts of what happened to part entries during extraction
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExtractionTally {
    /// Entries that created a new record
    pub inserted: usize,
    /// Entries that added a category path to an existing record
    pub appended: usize,
    /// Entries dropped for a missing name, product number or path segment
    pub skipped: usize,
}

impl ExtractionTally {
    pub fn accepted(&self) -> usize {
        self.inserted + self.appended
    }
}

/// Walks category trees into a [`PartIndex`]
#[derive(Debug, Clone)]
pub struct TreeExtractor {
    limit: ItemLimit,
    tally: ExtractionTally,
}

impl TreeExtractor {
    pub fn new(limit: ItemLimit) -> Self {
        Self {
            limit,
            tally: ExtractionTally::default(),
        }
    }

    pub fn tally(&self) -> ExtractionTally {
        self.tally
    }

    /// Walk every top-level category of one vehicle feed
    pub fn extract_feed(&mut self, feed: &VehicleFeed, index: PartIndex) -> PartIndex {
        let root = CategoryPath::root(feed.vehicle.name.as_deref());
        feed.categories.iter().fold(index, |index, category| {
            let path = root.child(category.name.as_deref());
            self.extract(category, &path, index)
        })
    }

    /// Record the parts of `node` and its descendants.
    ///
    /// `path` already ends with `node`'s own name. Under a capped limit the
    /// walk stops as soon as the index holds enough products; the check runs
    /// before every node and every part.
    pub fn extract(
        &mut self,
        node: &CategoryNode,
        path: &CategoryPath,
        mut index: PartIndex,
    ) -> PartIndex {
        let mut pending = vec![(node, path.clone())];

        while let Some((node, path)) = pending.pop() {
            if self.limit.is_reached(index.len()) {
                return index;
            }
            trace!(depth = path.depth(), parts = node.spare_parts.len(), "Visiting category");

            let category_path = path.render();
            for part in &node.spare_parts {
                if self.limit.is_reached(index.len()) {
                    return index;
                }
                self.record_part(part, category_path.as_deref(), &mut index);
            }

            // Reversed so the first child is popped next
            pending.extend(
                node.categories
                    .iter()
                    .rev()
                    .map(|child| (child, path.child(child.name.as_deref()))),
            );
        }

        index
    }

    fn record_part(&mut self, part: &SparePart, category_path: Option<&str>, index: &mut PartIndex) {
        let product = part.product.as_ref();
        let name = product.and_then(|p| p.name.as_deref());
        let product_no = product.and_then(|p| p.product_no.as_deref());

        let (Some(product), Some(name), Some(product_no), Some(category_path)) =
            (product, name, product_no, category_path)
        else {
            trace!("Skipping part entry with missing name, product number or category");
            self.tally.skipped += 1;
            return;
        };

        let occurrence = PartOccurrence {
            product_no,
            name,
            vat_percent: product.vat_percent(),
            unit_price_incl_vat: product.unit_price_incl_vat(),
        };

        match index.record(occurrence, category_path.to_string()) {
            Recorded::Inserted => self.tally.inserted += 1,
            Recorded::Appended => self.tally.appended += 1,
        }
    }
}

/// Walk one subtree into `index` with the given limit
pub fn extract(node: &CategoryNode, path: &CategoryPath, index: PartIndex, limit: ItemLimit) -> PartIndex {
    TreeExtractor::new(limit).extract(node, path, index)
}
