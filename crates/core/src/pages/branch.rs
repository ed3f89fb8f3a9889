//! Branch directory and branch hours pages.

use crate::field;
use crate::parse::Document;
use crate::records::Branch;
use crate::{Result, StacksError};

/// Selector for one branch entry in the locations directory.
const DIRECTORY_LINKS: &str = "a.cp-branch-link";

/// Selector for one weekday row in a branch's hours table.
const HOURS_ROWS: &str = ".cp-hours-table tr";

/// Day cell inside an hours row.
const HOURS_DAY: &str = ".cp-hours-day";

/// Hours cell inside an hours row. A closed day keeps the cell's literal
/// marker text.
const HOURS_VALUE: &str = ".cp-hours-value";

/// Find a branch in the locations directory.
///
/// The query matches case-insensitively as a substring of the printed branch
/// name, so `west portal` finds `WEST PORTAL BRANCH`. The first matching
/// entry wins.
///
/// # Errors
///
/// Returns [`StacksError::NoBranchFound`] when no directory entry matches,
/// including when the directory table is missing entirely.
pub fn branch(doc: &Document, query: &str) -> Result<Branch> {
    let needle = query.to_lowercase();

    for link in doc.select(DIRECTORY_LINKS)? {
        let name = link.normalized_text();
        if !name.to_lowercase().contains(&needle) {
            continue;
        }
        if let Some(id) = link.attr("href").and_then(field::branch_id_from) {
            return Ok(Branch { name, id });
        }
    }

    Err(StacksError::NoBranchFound(query.to_string()))
}

/// Parse a branch page's weekly hours table.
///
/// Returns the weekday/hours pairs in page order, Sunday first, seven
/// entries for a well-formed page. Rows missing either cell are skipped.
pub fn branch_hours(doc: &Document) -> Vec<(String, String)> {
    let Ok(rows) = doc.select(HOURS_ROWS) else {
        return Vec::new();
    };

    rows.iter()
        .filter_map(|row| {
            let day = field::text_field(row, HOURS_DAY)?;
            let hours = field::text_field(row, HOURS_VALUE)?;
            Some((day, hours))
        })
        .collect()
}
