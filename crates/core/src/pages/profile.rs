//! User profiles and their follower/following/list pages.

use crate::field;
use crate::fragment;
use crate::parse::Document;
use crate::records::{ListSummary, UserSummary};
use crate::{Result, StacksError};

/// Message block rendered when a profile name resolves to nobody.
const NOT_FOUND: &str = ".cp-profile-not-found";

/// Header block on an existing profile page.
const HEADER: &str = ".cp-profile-header";

/// Display name inside the header.
const DISPLAY_NAME: &str = ".cp-profile-display-name";

/// Selector for one row on a followers or following page.
const FOLLOW_ROWS: &str = ".cp-follow-row";

/// Selector for one row on a user's lists page.
const LIST_ROWS: &str = ".cp-user-list-row";

/// Parse a profile page into its user.
///
/// # Errors
///
/// Returns [`StacksError::NoUserFound`] when the page carries the not-found
/// message, or when the profile header is missing entirely. A user who
/// exists but follows nobody and owns nothing still has a header; only the
/// lookup failure renderings land here.
pub fn profile(doc: &Document, name: &str) -> Result<UserSummary> {
    if doc.select_one(NOT_FOUND)?.is_some() {
        return Err(StacksError::NoUserFound(name.to_string()));
    }

    let header = doc
        .select_one(HEADER)?
        .ok_or_else(|| StacksError::NoUserFound(name.to_string()))?;

    let display_name = field::text_field(&header, DISPLAY_NAME)
        .ok_or_else(|| StacksError::NoUserFound(name.to_string()))?;
    let id = header
        .select("a[href]")?
        .iter()
        .find_map(|anchor| field::user_id_from(anchor.attr("href")?))
        .ok_or_else(|| StacksError::NoUserFound(name.to_string()))?;

    Ok(UserSummary { name: display_name, id })
}

/// Parse a followers or following page, in page order.
pub fn follow_list(doc: &Document) -> Vec<UserSummary> {
    let Ok(rows) = doc.select(FOLLOW_ROWS) else {
        return Vec::new();
    };

    rows.iter().filter_map(fragment::user_summary).collect()
}

/// Parse a user's lists page, in page order.
pub fn user_lists(doc: &Document) -> Vec<ListSummary> {
    let Ok(rows) = doc.select(LIST_ROWS) else {
        return Vec::new();
    };

    rows.iter().filter_map(fragment::list_summary).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const PROFILE_PAGE: &str = r#"
        <html><body>
        <div class="cp-profile-header">
            <h1 class="cp-profile-display-name">Sublurbanite</h1>
            <a class="cp-profile-shelves-link" href="https://sfpl.bibliocommons.com/user_profile/123456789/shelves">Shelves</a>
        </div>
        </body></html>
    "#;

    const NOT_FOUND_PAGE: &str = r#"
        <html><body>
        <div class="cp-profile-not-found">
            <p>We couldn't find a user with that name.</p>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_profile_header() {
        let user = profile(&Document::parse(PROFILE_PAGE), "Sublurbanite").unwrap();

        assert_eq!(user.name, "Sublurbanite");
        assert_eq!(user.id, "123456789");
    }

    #[test]
    fn test_not_found_message_is_typed_error() {
        let result = profile(&Document::parse(NOT_FOUND_PAGE), "eopghpeghip");

        assert!(matches!(result, Err(StacksError::NoUserFound(name)) if name == "eopghpeghip"));
    }

    #[test]
    fn test_missing_header_is_typed_error() {
        let result = profile(&Document::parse("<html><body></body></html>"), "ghost");

        assert!(matches!(result, Err(StacksError::NoUserFound(_))));
    }

    #[test]
    fn test_follow_list_order() {
        let html = r#"
            <div class="cp-follow-row"><a class="cp-user-link" href="/user_profile/1">Loriel_2</a></div>
            <div class="cp-follow-row"><a class="cp-user-link" href="/user_profile/2">jac523</a></div>
            <div class="cp-follow-row"><span>row without a profile link</span></div>
            <div class="cp-follow-row"><a class="cp-user-link" href="/user_profile/3">Stephenson1</a></div>
        "#;
        let users = follow_list(&Document::parse(html));

        let names: Vec<_> = users.iter().map(|u| u.name.as_str()).collect();
        assert_eq!(names, ["Loriel_2", "jac523", "Stephenson1"]);
    }

    #[test]
    fn test_empty_follow_page() {
        assert!(follow_list(&Document::parse("<html><body></body></html>")).is_empty());
    }

    #[test]
    fn test_user_lists() {
        let html = r#"
            <div class="cp-user-list-row">
                <span class="cp-list-type">Topic Guide</span>
                <a class="cp-title-link" href="/list/share/9_sub/77_sewing-fun">
                    <span class="title-content">Sewing Fun</span>
                </a>
                <a class="cp-user-link" href="/user_profile/9">Sublurbanite</a>
                <span class="cp-list-item-count">12 items</span>
            </div>
        "#;
        let lists = user_lists(&Document::parse(html));

        assert_eq!(lists.len(), 1);
        assert_eq!(lists[0].title, "Sewing Fun");
        assert_eq!(lists[0].id, "77_sewing-fun");
        assert_eq!(lists[0].user.name, "Sublurbanite");
    }
}
