//! Single-field extraction from markup fragments.
//!
//! Every accessor here takes a fragment and a structural locator (a CSS
//! selector, sometimes an attribute name) and returns either the field value
//! or `None`. A merely-missing field is never an error; the record layer
//! decides which absences disqualify a fragment.

use std::sync::LazyLock;

use regex::Regex;

use crate::parse::Element;

/// Catalog record links look like `/item/show/3388519093`.
static ITEM_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/item/show/(\d+)").unwrap());

/// Profile links look like `/user_profile/88379890`, with optional trailing
/// segments for followers/following/lists pages.
static USER_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/user_profile/(\d+)").unwrap());

/// Shared-list links look like `/list/share/88379890_victordude/264419518_python`;
/// the list identifier is the final segment.
static LIST_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/list/(?:share|show)/.*/([^/?#]+)").unwrap());

/// Branch links look like `/locations/44563149`.
static BRANCH_ID: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"/locations/(\d+)").unwrap());

static LEADING_COUNT: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\s*(\d+)").unwrap());

static WS_RUN: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Collapse internal whitespace runs to single spaces and trim the ends.
pub fn collapse_ws(text: &str) -> String {
    WS_RUN.replace_all(text, " ").trim().to_string()
}

/// Extract a whitespace-normalized text field.
///
/// Returns `None` when the locator matches nothing or the matched element
/// holds only whitespace.
pub fn text_field(fragment: &Element<'_>, selector: &str) -> Option<String> {
    let el = fragment.select_one(selector).ok()??;
    let text = el.normalized_text();
    if text.is_empty() { None } else { Some(text) }
}

/// Extract a text field verbatim: trimmed at the ends, internal spacing kept.
///
/// Status strings use this policy; their wording varies by context and is
/// carried through unparsed.
pub fn verbatim_field(fragment: &Element<'_>, selector: &str) -> Option<String> {
    let el = fragment.select_one(selector).ok()??;
    let text = el.verbatim_text();
    if text.is_empty() { None } else { Some(text) }
}

/// Extract an attribute value from the first element the locator matches.
pub fn attr_field(fragment: &Element<'_>, selector: &str, attr: &str) -> Option<String> {
    let el = fragment.select_one(selector).ok()??;
    el.attr(attr).map(str::to_string)
}

/// Extract the numeric catalog identifier embedded in a fragment's links.
///
/// Scans the fragment's anchors for the first href matching the catalog
/// record URL pattern and parses the embedded numeric token. Absent when no
/// such link exists, which disqualifies the fragment as a catalog item.
pub fn item_id(fragment: &Element<'_>) -> Option<u64> {
    for anchor in fragment.select("a[href]").ok()? {
        if let Some(href) = anchor.attr("href")
            && let Some(id) = item_id_from(href)
        {
            return Some(id);
        }
    }
    None
}

/// Parse the numeric catalog identifier out of a single href.
pub fn item_id_from(href: &str) -> Option<u64> {
    ITEM_ID.captures(href)?.get(1)?.as_str().parse().ok()
}

/// Parse the user identifier out of a profile href.
pub fn user_id_from(href: &str) -> Option<String> {
    Some(USER_ID.captures(href)?.get(1)?.as_str().to_string())
}

/// Parse the list identifier out of a shared-list href.
pub fn list_id_from(href: &str) -> Option<String> {
    Some(LIST_ID.captures(href)?.get(1)?.as_str().to_string())
}

/// Parse the branch identifier out of a locations href.
pub fn branch_id_from(href: &str) -> Option<String> {
    Some(BRANCH_ID.captures(href)?.get(1)?.as_str().to_string())
}

/// Parse the leading integer of a count string like `17 items`.
pub fn leading_count(text: &str) -> Option<u32> {
    LEADING_COUNT.captures(text)?.get(1)?.as_str().parse().ok()
}
