//! Search results and curated-list member pages.

use crate::field;
use crate::fragment;
use crate::parse::Document;
use crate::records::{CatalogItem, SearchResult};

/// Selector for one result card on a search page.
const CARDS: &str = ".cp-search-result-item";

/// A card containing this block is a curated-list result; everything else
/// is a book.
const LIST_MARKER: &str = ".cp-list-info";

/// Availability cell on a book card, e.g. `Available` or `All copies in use`.
const AVAILABILITY: &str = ".cp-availability-status";

/// Selector for one member row on a curated list's page.
const LIST_ROWS: &str = ".cp-list-item-row";

/// Parse one page of search results, in page order.
///
/// Each card is classified by kind before dispatch: cards carrying a
/// list-info block parse as [`SearchResult::List`], the rest as
/// [`SearchResult::Book`] with the availability cell as status. Cards that
/// fail their record parser are skipped.
pub fn search(doc: &Document) -> Vec<SearchResult> {
    let Ok(cards) = doc.select(CARDS) else {
        return Vec::new();
    };

    cards
        .iter()
        .filter_map(|card| {
            if card.select_one(LIST_MARKER).ok().flatten().is_some() {
                fragment::list_summary(card).map(SearchResult::List)
            } else {
                let status = field::verbatim_field(card, AVAILABILITY);
                fragment::catalog_item(card, status).map(SearchResult::Book)
            }
        })
        .collect()
}

/// Parse a curated list's member page into its books, in list order.
pub fn list_books(doc: &Document) -> Vec<CatalogItem> {
    let Ok(rows) = doc.select(LIST_ROWS) else {
        return Vec::new();
    };

    rows.iter().filter_map(|row| fragment::catalog_item(row, None)).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const MIXED_PAGE: &str = r#"
        <html><body>
        <div class="cp-search-result-item">
            <h2 class="cp-title">
                <a class="cp-title-link" href="https://sfpl.bibliocommons.com/item/show/593532093">
                    <span class="title-content">Harry Potter and the Sorcerer's Stone</span>
                </a>
            </h2>
            <div class="cp-author"><a class="author-link" href="/search?q=rowling">Rowling, J. K.</a></div>
            <div class="cp-availability-status">Available</div>
        </div>
        <div class="cp-search-result-item">
            <div class="cp-list-info">
                <span class="cp-list-type">Topic Guide</span>
                <h2 class="cp-title">
                    <a class="cp-title-link" href="https://sfpl.bibliocommons.com/list/share/88379890_victordude/264419518_python">
                        <span class="title-content">python</span>
                    </a>
                </h2>
                <div class="cp-list-byline">
                    <a class="cp-user-link" href="https://sfpl.bibliocommons.com/user_profile/88379890">victordude</a>
                    <span class="cp-list-created">Apr 10, 2014</span>
                </div>
                <span class="cp-list-item-count">17 items</span>
            </div>
        </div>
        </body></html>
    "#;

    #[test]
    fn test_cards_are_classified_by_kind() {
        let results = search(&Document::parse(MIXED_PAGE));

        assert_eq!(results.len(), 2);

        let book = results[0].as_book().expect("first card is a book");
        assert_eq!(book.title, "Harry Potter and the Sorcerer's Stone");
        assert_eq!(book.author, "Rowling, J. K.");
        assert_eq!(book.status, "Available");

        let list = results[1].as_list().expect("second card is a list");
        assert_eq!(list.kind, "Topic Guide");
        assert_eq!(list.title, "python");
        assert_eq!(list.item_count, 17);
    }

    #[test]
    fn test_no_results_page_is_empty_sequence() {
        let html = r#"<html><body><div class="cp-search-no-results">No results.</div></body></html>"#;
        assert!(search(&Document::parse(html)).is_empty());
    }

    #[test]
    fn test_malformed_card_is_skipped() {
        let html = r#"
            <div class="cp-search-result-item"><span class="title-content">No link here</span></div>
            <div class="cp-search-result-item">
                <a class="cp-title-link" href="/item/show/42"><span class="title-content">Kept</span></a>
            </div>
        "#;
        let results = search(&Document::parse(html));

        assert_eq!(results.len(), 1);
        assert_eq!(results[0].as_book().unwrap().title, "Kept");
    }

    #[test]
    fn test_list_books_preserves_order() {
        let html = r#"
            <div class="cp-list-item-row">
                <a class="cp-title-link" href="/item/show/1"><span class="title-content">First</span></a>
            </div>
            <div class="cp-list-item-row">
                <a class="cp-title-link" href="/item/show/2"><span class="title-content">Second</span></a>
            </div>
        "#;
        let books = list_books(&Document::parse(html));

        let titles: Vec<_> = books.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, ["First", "Second"]);
    }
}
