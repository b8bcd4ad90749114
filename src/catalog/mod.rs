//! XML shop catalog rendering
//!
//! The document layout is
//!
//! ```xml
//! <SHOP>
//!   <SHOPITEM>
//!     <NAME>Filter</NAME>
//!     <CODE>F1</CODE>
//!     <CATEGORIES>
//!       <CATEGORY>Truck &gt; Engine</CATEGORY>
//!     </CATEGORIES>
//!     <PRICE_VAT>15.5</PRICE_VAT>
//!     <VAT>20</VAT>
//!   </SHOPITEM>
//! </SHOP>
//! ```

pub mod category;

pub use category::rewrite_category_path;

use crate::error::{CatalogError, CatalogResult};
use crate::extraction::{PartIndex, PartRecord};
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;
use std::path::Path;

pub const ROOT_TAG: &str = "SHOP";
pub const ITEM_TAG: &str = "SHOPITEM";
pub const NAME_TAG: &str = "NAME";
pub const CODE_TAG: &str = "CODE";
pub const CATEGORIES_TAG: &str = "CATEGORIES";
pub const CATEGORY_TAG: &str = "CATEGORY";
pub const PRICE_VAT_TAG: &str = "PRICE_VAT";
pub const VAT_TAG: &str = "VAT";

/// One catalog item with raw, unescaped text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatalogItem {
    pub name: String,
    pub code: String,
    pub categories: Vec<String>,
    pub price_vat: String,
    pub vat: String,
}

impl CatalogItem {
    pub fn from_record(record: &PartRecord) -> Self {
        Self {
            name: record.name.clone(),
            code: record.product_no.clone(),
            categories: record
                .categories
                .iter()
                .map(|path| rewrite_category_path(path))
                .collect(),
            price_vat: record.unit_price_incl_vat.clone(),
            vat: record.vat_percent.clone(),
        }
    }
}

/// Renders a [`PartIndex`] into the XML catalog
#[derive(Debug, Clone)]
pub struct CatalogBuilder {
    indent: u8,
}

impl Default for CatalogBuilder {
    fn default() -> Self {
        Self { indent: 2 }
    }
}

impl CatalogBuilder {
    pub fn new(indent: u8) -> Self {
        Self { indent }
    }

    /// Items in first-seen product order
    pub fn items(&self, index: &PartIndex) -> Vec<CatalogItem> {
        index.iter().map(CatalogItem::from_record).collect()
    }

    /// Render the whole catalog document
    pub fn build(&self, index: &PartIndex) -> CatalogResult<String> {
        let mut writer = Writer::new_with_indent(Vec::new(), b' ', self.indent as usize);

        write_event(&mut writer, Event::Decl(BytesDecl::new("1.0", Some("utf-8"), None)))?;
        write_event(&mut writer, Event::Start(BytesStart::new(ROOT_TAG)))?;
        for item in self.items(index) {
            write_item(&mut writer, &item)?;
        }
        write_event(&mut writer, Event::End(BytesEnd::new(ROOT_TAG)))?;

        let mut bytes = writer.into_inner();
        bytes.push(b'\n');
        String::from_utf8(bytes).map_err(CatalogError::serialization)
    }

    /// Render the catalog and write it to `path`, creating parent directories
    pub fn write_to(&self, index: &PartIndex, path: &Path) -> CatalogResult<()> {
        let document = self.build(index)?;

        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| CatalogError::write(path.to_path_buf(), &e))?;
        }
        std::fs::write(path, document).map_err(|e| CatalogError::write(path.to_path_buf(), &e))
    }
}

fn write_item(writer: &mut Writer<Vec<u8>>, item: &CatalogItem) -> CatalogResult<()> {
    write_event(writer, Event::Start(BytesStart::new(ITEM_TAG)))?;
    write_text_element(writer, NAME_TAG, &item.name)?;
    write_text_element(writer, CODE_TAG, &item.code)?;

    write_event(writer, Event::Start(BytesStart::new(CATEGORIES_TAG)))?;
    for category in &item.categories {
        write_text_element(writer, CATEGORY_TAG, category)?;
    }
    write_event(writer, Event::End(BytesEnd::new(CATEGORIES_TAG)))?;

    write_text_element(writer, PRICE_VAT_TAG, &item.price_vat)?;
    write_text_element(writer, VAT_TAG, &item.vat)?;
    write_event(writer, Event::End(BytesEnd::new(ITEM_TAG)))
}

fn write_text_element(writer: &mut Writer<Vec<u8>>, tag: &str, text: &str) -> CatalogResult<()> {
    write_event(writer, Event::Start(BytesStart::new(tag)))?;
    write_event(writer, Event::Text(BytesText::new(text)))?;
    write_event(writer, Event::End(BytesEnd::new(tag)))
}

fn write_event(writer: &mut Writer<Vec<u8>>, event: Event<'_>) -> CatalogResult<()> {
    writer
        .write_event(event)
        .map_err(CatalogError::serialization)
}
