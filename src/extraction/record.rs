//! Aggregated part records and the run-wide accumulator

use std::collections::HashMap;

/// One product number and every category path it was found under.
///
/// `name`, `vat_percent` and `unit_price_incl_vat` come from the first
/// occurrence and never change afterwards; only `categories` grows. VAT and
/// price are kept as the text the feed carried, `"0"` when it had none.
#[derive(Debug, Clone, PartialEq)]
pub struct PartRecord {
    pub product_no: String,
    pub name: String,
    pub vat_percent: String,
    pub unit_price_incl_vat: String,
    pub categories: Vec<String>,
}

/// The scalar fields of one part occurrence
#[derive(Debug, Clone, Copy)]
pub struct PartOccurrence<'a> {
    pub product_no: &'a str,
    pub name: &'a str,
    pub vat_percent: &'a str,
    pub unit_price_incl_vat: &'a str,
}

/// What [`PartIndex::record`] did with an occurrence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Recorded {
    /// First time this product number was seen
    Inserted,
    /// Category path appended to an existing record
    Appended,
}

/// Part records keyed by product number, iterated in first-seen order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PartIndex {
    records: Vec<PartRecord>,
    positions: HashMap<String, usize>,
}

impl PartIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct product numbers
    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn get(&self, product_no: &str) -> Option<&PartRecord> {
        self.positions.get(product_no).map(|&i| &self.records[i])
    }

    pub fn contains(&self, product_no: &str) -> bool {
        self.positions.contains_key(product_no)
    }

    /// Records in first-seen order
    pub fn iter(&self) -> impl Iterator<Item = &PartRecord> {
        self.records.iter()
    }

    /// Total number of category paths across all records
    pub fn category_count(&self) -> usize {
        self.records.iter().map(|r| r.categories.len()).sum()
    }

    /// Record one occurrence of a part found under `category_path`.
    ///
    /// A known product number only gets the path appended; the occurrence's
    /// name, VAT and price are ignored even if they differ.
    pub fn record(&mut self, part: PartOccurrence<'_>, category_path: String) -> Recorded {
        if let Some(&i) = self.positions.get(part.product_no) {
            self.records[i].categories.push(category_path);
            return Recorded::Appended;
        }

        self.positions
            .insert(part.product_no.to_string(), self.records.len());
        self.records.push(PartRecord {
            product_no: part.product_no.to_string(),
            name: part.name.to_string(),
            vat_percent: part.vat_percent.to_string(),
            unit_price_incl_vat: part.unit_price_incl_vat.to_string(),
            categories: vec![category_path],
        });
        Recorded::Inserted
    }

    /// Fold `later` into this index. Records already held keep their scalar
    /// fields and gain `later`'s categories; new records are appended in
    /// `later`'s order.
    pub fn merge(mut self, later: PartIndex) -> Self {
        for record in later.records {
            match self.positions.get(&record.product_no) {
                Some(&i) => self.records[i].categories.extend(record.categories),
                None => {
                    self.positions
                        .insert(record.product_no.clone(), self.records.len());
                    self.records.push(record);
                }
            }
        }
        self
    }
}

impl<'a> IntoIterator for &'a PartIndex {
    type Item = &'a PartRecord;
    type IntoIter = std::slice::Iter<'a, PartRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.records.iter()
    }
}
