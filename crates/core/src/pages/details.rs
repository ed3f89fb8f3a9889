//! Item detail pages: attribute table, description, keywords.

use crate::parse::{Document, Element};
use crate::records::{DetailValue, ItemDetails};

/// Selector for one row of the attribute table.
const ATTRIBUTE_ROWS: &str = ".cp-details-table tr";

/// Label cell inside an attribute row.
const ATTRIBUTE_LABEL: &str = ".cp-details-label";

/// Value cell inside an attribute row.
const ATTRIBUTE_VALUE: &str = ".cp-details-value";

/// Description block; wording and spacing carried verbatim.
const DESCRIPTION: &str = ".cp-bib-description";

/// Keyword entries, one per list item.
const KEYWORDS: &str = ".cp-bib-keywords li";

/// Parse an item's detail page.
///
/// The attribute table has no fixed key set: whatever labels the page
/// presents become keys, in presentation order. A value cell rendered as a
/// list (ISBN, typically) becomes [`DetailValue::List`]. Each of the three
/// sections degrades to its empty value independently; this parser never
/// fails.
pub fn item_details(doc: &Document) -> ItemDetails {
    let attributes = doc
        .select(ATTRIBUTE_ROWS)
        .unwrap_or_default()
        .iter()
        .filter_map(attribute_row)
        .collect();

    let description = doc
        .select_one(DESCRIPTION)
        .ok()
        .flatten()
        .map(|block| block.verbatim_text())
        .unwrap_or_default();

    let keywords = doc
        .select(KEYWORDS)
        .unwrap_or_default()
        .iter()
        .map(Element::normalized_text)
        .filter(|keyword| !keyword.is_empty())
        .collect();

    ItemDetails { attributes, description, keywords }
}

fn attribute_row(row: &Element<'_>) -> Option<(String, DetailValue)> {
    let label = row.select_one(ATTRIBUTE_LABEL).ok()??.normalized_text();
    if label.is_empty() {
        return None;
    }

    let cell = row.select_one(ATTRIBUTE_VALUE).ok()??;
    let entries = cell.select("li").ok()?;
    let value = if entries.is_empty() {
        DetailValue::Text(cell.normalized_text())
    } else {
        DetailValue::List(entries.iter().map(Element::normalized_text).collect())
    };

    Some((label, value))
}
