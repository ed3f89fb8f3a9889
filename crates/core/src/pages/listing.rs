//! Holds, checkouts and shelf listings.
//!
//! All three account pages repeat the same item-row markup; they differ only
//! in which cell carries the status text. Holds show a pickup-by line,
//! checkouts a due date, and shelves no status at all.

use crate::field;
use crate::fragment;
use crate::parse::Document;
use crate::records::CatalogItem;

/// Selector for one item row on an account listing page.
const ROWS: &str = ".cp-batch-actions-list-item";

/// Status cell on the holds page, e.g. `Pickup by:  Jun 18, 2018`.
const HOLD_STATUS: &str = ".cp-hold-status";

/// Status cell on the checkouts page, e.g. `Due Jun 28, 2018`.
const DUE_DATE: &str = ".cp-due-date";

/// Parse the items on hold, in page order.
pub fn holds(doc: &Document) -> Vec<CatalogItem> {
    listing(doc, Some(HOLD_STATUS))
}

/// Parse the checked-out items, in page order.
pub fn checkouts(doc: &Document) -> Vec<CatalogItem> {
    listing(doc, Some(DUE_DATE))
}

/// Parse a shelf page (For Later, In Progress or Completed), in page order.
///
/// Shelf rows carry no status cell; status stays empty.
pub fn shelf(doc: &Document) -> Vec<CatalogItem> {
    listing(doc, None)
}

fn listing(doc: &Document, status_selector: Option<&str>) -> Vec<CatalogItem> {
    let Ok(rows) = doc.select(ROWS) else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| {
            let status = status_selector.and_then(|selector| field::verbatim_field(row, selector));
            fragment::catalog_item(row, status)
        })
        .collect()
}
