//! Record parsing: one markup fragment in, one domain record out.
//!
//! The functions here compose the field extractors to build records, and
//! encode the required-field policy per record type. A fragment missing a
//! required anchor field parses to `None`, which page parsers treat as
//! "not a record" and skip. Optional fields default to empty strings.

use crate::field;
use crate::parse::Element;
use crate::records::{CatalogItem, ListSummary, UserSummary};

/// Selector for an item's title text.
pub(crate) const TITLE: &str = ".title-content";

/// Selector for an item's subtitle.
pub(crate) const SUBTITLE: &str = ".cp-subtitle";

/// Selector for an item's author link.
pub(crate) const AUTHOR: &str = "a.author-link";

/// Build a [`CatalogItem`] from one row or card.
///
/// Title and numeric identifier are required; a fragment lacking either is
/// not a record. Author and subtitle default to empty strings. Status is
/// supplied by the caller because its locator differs per page type (hold
/// status, due date, availability) and some pages have none.
pub fn catalog_item(fragment: &Element<'_>, status: Option<String>) -> Option<CatalogItem> {
    let title = field::text_field(fragment, TITLE)?;
    let id = field::item_id(fragment)?;

    Some(CatalogItem {
        title,
        subtitle: field::text_field(fragment, SUBTITLE).unwrap_or_default(),
        author: field::text_field(fragment, AUTHOR).unwrap_or_default(),
        status: status.unwrap_or_default(),
        id,
    })
}

/// Build a [`ListSummary`] from one list card or list row.
///
/// The title link must carry a list identifier and the byline must carry an
/// owner link with a user identifier; anything less is not a list record.
pub fn list_summary(fragment: &Element<'_>) -> Option<ListSummary> {
    let title = field::text_field(fragment, TITLE)?;
    let id = field::list_id_from(&field::attr_field(fragment, "a.cp-title-link", "href")?)?;

    let owner = fragment.select_one("a.cp-user-link").ok()??;
    let user = UserSummary {
        name: owner.normalized_text(),
        id: field::user_id_from(owner.attr("href")?)?,
    };

    Some(ListSummary {
        kind: field::text_field(fragment, ".cp-list-type").unwrap_or_default(),
        title,
        user,
        created_on: field::text_field(fragment, ".cp-list-created").unwrap_or_default(),
        item_count: field::text_field(fragment, ".cp-list-item-count")
            .and_then(|text| field::leading_count(&text))
            .unwrap_or_default(),
        id,
    })
}

/// Build a [`UserSummary`] from one follower/following row.
///
/// Requires a profile link bearing an identifier; the display name is the
/// link text.
pub fn user_summary(fragment: &Element<'_>) -> Option<UserSummary> {
    let link = fragment.select_one("a.cp-user-link").ok()??;
    let name = link.normalized_text();
    if name.is_empty() {
        return None;
    }

    Some(UserSummary { name, id: field::user_id_from(link.attr("href")?)? })
}
