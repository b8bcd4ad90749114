//! Vehicle feed model and JSON loading
//!
//! A feed file looks like
//!
//! ```json
//! {
//!   "vehicle": { "name": "Truck" },
//!   "categories": [
//!     {
//!       "name": "Engine",
//!       "spare_parts": [{ "product": { "name": "Filter", "product_no": "F1" } }],
//!       "categories": [{ "name": "Oil" }]
//!     }
//!   ]
//! }
//! ```
//!
//! Decoding is lenient: absent or `null` lists become empty, scalar part
//! fields accept either strings or numbers, and a part entry that is not an
//! object decodes as an empty [`SparePart`]. Anything unusable is kept as
//! `None` so the extractor can skip that one entry instead of rejecting the
//! whole file. Category trees may nest arbitrarily deep.

pub mod directory;
pub mod filter;

use crate::error::{FeedError, FeedResult};
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use std::path::Path;

/// One parsed input file
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct VehicleFeed {
    pub vehicle: Vehicle,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<CategoryNode>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Vehicle {
    #[serde(default)]
    pub name: Option<String>,
}

/// A node of the category tree. Parts and children may both be present.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct CategoryNode {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub spare_parts: Vec<SparePart>,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub categories: Vec<CategoryNode>,
}

/// A single occurrence of a part inside a category
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SparePart {
    pub product: Option<Product>,
}

impl<'de> Deserialize<'de> for SparePart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let product = match Value::deserialize(deserializer)? {
            Value::Object(mut entry) => match entry.remove("product") {
                Some(product @ Value::Object(_)) => Product::deserialize(product).ok(),
                _ => None,
            },
            _ => None,
        };
        Ok(Self { product })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Product {
    #[serde(default, deserialize_with = "lenient_text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub product_no: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub vat_percent: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub unit_price_incl_vat: Option<String>,
}

impl Product {
    /// VAT percent as written in the feed, `"0"` when absent
    pub fn vat_percent(&self) -> &str {
        self.vat_percent.as_deref().unwrap_or("0")
    }

    /// Unit price including VAT as written in the feed, `"0"` when absent
    pub fn unit_price_incl_vat(&self) -> &str {
        self.unit_price_incl_vat.as_deref().unwrap_or("0")
    }
}

impl CategoryNode {
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: Some(name.into()),
            ..Default::default()
        }
    }

    /// Builder-style helper, mostly for tests and benches
    pub fn with_part(mut self, part: SparePart) -> Self {
        self.spare_parts.push(part);
        self
    }

    pub fn with_child(mut self, child: CategoryNode) -> Self {
        self.categories.push(child);
        self
    }
}

impl SparePart {
    pub fn new(name: &str, product_no: &str, vat_percent: impl ToString, price: impl ToString) -> Self {
        Self {
            product: Some(Product {
                name: Some(name.to_string()),
                product_no: Some(product_no.to_string()),
                vat_percent: Some(vat_percent.to_string()),
                unit_price_incl_vat: Some(price.to_string()),
            }),
        }
    }
}

/// Check the minimal shape of a feed: an object holding `vehicle` and `categories`
pub fn check_shape(value: &Value) -> Result<(), &'static str> {
    let object = value.as_object().ok_or("top level is not an object")?;
    if !object.contains_key("vehicle") {
        return Err("missing 'vehicle'");
    }
    if !object.contains_key("categories") {
        return Err("missing 'categories'");
    }
    Ok(())
}

/// Parse feed content read from `path`
pub fn parse_feed(content: &str, path: &Path) -> FeedResult<VehicleFeed> {
    let value = parse_value(content).map_err(|e| FeedError::json_parse(path.to_path_buf(), &e))?;

    check_shape(&value).map_err(|reason| FeedError::unexpected_shape(path.to_path_buf(), reason))?;

    VehicleFeed::deserialize(serde_stacker::Deserializer::new(value))
        .map_err(|e| FeedError::malformed_tree(path.to_path_buf(), &e))
}

/// Read and parse a feed file
pub fn load_feed(path: &Path) -> FeedResult<VehicleFeed> {
    let content =
        std::fs::read_to_string(path).map_err(|e| FeedError::io(path.to_path_buf(), &e))?;
    parse_feed(&content, path)
}

/// JSON text to a [`Value`] with no nesting limit. The stack grows on demand
/// while descending.
fn parse_value(content: &str) -> serde_json::Result<Value> {
    let mut json = serde_json::Deserializer::from_str(content);
    json.disable_recursion_limit();
    let value = Value::deserialize(serde_stacker::Deserializer::new(&mut json))?;
    json.end()?;
    Ok(value)
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Ok(Option::<Vec<T>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Scalar product fields come as strings or numbers depending on the feed.
/// Both are kept as text; anything else counts as absent.
fn lenient_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Value::deserialize(deserializer)? {
        Value::String(s) => Some(s),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    })
}
