//! Search queries and result pagination.
//!
//! A [`Search`] pairs a query string with a [`SearchKind`] and pulls result
//! pages through a [`Fetch`] capability, concatenating records in page
//! order, record order. Pagination stops early when a page yields no
//! records, which is how the catalog renders the end of a result set.
//!
//! # Example
//!
//! ```rust,no_run
//! use stacks_core::{Search, SearchKind, Session};
//!
//! # async fn example() -> stacks_core::Result<()> {
//! let session = Session::with_defaults()?;
//! let search = Search::new("J.K. Rowling", SearchKind::Author);
//! let results = search.results(&session, 2).await?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::str::FromStr;

use serde::Serialize;

use crate::fetch::{Fetch, Page};
use crate::parse::Document;
use crate::records::SearchResult;
use crate::{Result, StacksError};

/// The catalog's supported search types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SearchKind {
    Keyword,
    Title,
    Author,
    Subject,
    Tag,
    List,
}

impl SearchKind {
    /// Value of the `t` query parameter for this kind.
    pub(crate) fn param(self) -> &'static str {
        match self {
            SearchKind::Keyword => "keyword",
            SearchKind::Title => "title",
            SearchKind::Author => "author",
            SearchKind::Subject => "subject",
            SearchKind::Tag => "tag",
            SearchKind::List => "userlist",
        }
    }

    fn name(self) -> &'static str {
        match self {
            SearchKind::Keyword => "keyword",
            SearchKind::Title => "title",
            SearchKind::Author => "author",
            SearchKind::Subject => "subject",
            SearchKind::Tag => "tag",
            SearchKind::List => "list",
        }
    }
}

impl fmt::Display for SearchKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for SearchKind {
    type Err = StacksError;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "keyword" => Ok(SearchKind::Keyword),
            "title" => Ok(SearchKind::Title),
            "author" => Ok(SearchKind::Author),
            "subject" => Ok(SearchKind::Subject),
            "tag" => Ok(SearchKind::Tag),
            "list" => Ok(SearchKind::List),
            _ => Err(StacksError::InvalidSearchKind(s.to_string())),
        }
    }
}

/// A catalog search: query string plus search kind.
#[derive(Debug, Clone)]
pub struct Search {
    query: String,
    kind: SearchKind,
}

impl Search {
    /// Creates a search with an explicit kind.
    pub fn new(query: impl Into<String>, kind: SearchKind) -> Self {
        Self { query: query.into(), kind }
    }

    /// Creates a keyword search, the catalog's default.
    pub fn keyword(query: impl Into<String>) -> Self {
        Self::new(query, SearchKind::Keyword)
    }

    /// The query string.
    pub fn query(&self) -> &str {
        &self.query
    }

    /// The search kind.
    pub fn kind(&self) -> SearchKind {
        self.kind
    }

    /// Fetches up to `max_pages` result pages and concatenates their records.
    ///
    /// Records appear in page order, then in-page order. A page yielding
    /// zero records ends the run early even when `max_pages` has not been
    /// reached. Nothing is deduplicated: a record the source repeats across
    /// pages is kept twice.
    pub async fn results(&self, fetcher: &impl Fetch, max_pages: u32) -> Result<Vec<SearchResult>> {
        let mut results = Vec::new();

        for number in 1..=max_pages {
            let html = fetcher
                .get(Page::Search { query: &self.query, kind: self.kind, page: number })
                .await?;
            let batch = crate::pages::search(&Document::parse(&html));
            if batch.is_empty() {
                break;
            }
            results.extend(batch);
        }

        Ok(results)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_from_str() {
        assert_eq!("author".parse::<SearchKind>().unwrap(), SearchKind::Author);
        assert_eq!("List".parse::<SearchKind>().unwrap(), SearchKind::List);
    }

    #[test]
    fn test_unknown_kind_is_typed_error() {
        let result = "isbn".parse::<SearchKind>();
        assert!(matches!(result, Err(StacksError::InvalidSearchKind(kind)) if kind == "isbn"));
    }

    #[test]
    fn test_kind_display() {
        assert_eq!(SearchKind::List.to_string(), "list");
        assert_eq!(SearchKind::Keyword.to_string(), "keyword");
    }

    #[test]
    fn test_list_kind_maps_to_userlist_param() {
        assert_eq!(SearchKind::List.param(), "userlist");
        assert_eq!(SearchKind::Author.param(), "author");
    }

    #[cfg(feature = "fetch")]
    mod pagination {
        use std::collections::HashMap;
        use std::future::Future;
        use std::sync::Mutex;

        use super::*;

        /// Serves canned search pages and records which page numbers were
        /// requested.
        struct FakeCatalog {
            pages: HashMap<u32, String>,
            requested: Mutex<Vec<u32>>,
        }

        impl FakeCatalog {
            fn new(pages: impl IntoIterator<Item = (u32, String)>) -> Self {
                Self { pages: pages.into_iter().collect(), requested: Mutex::new(Vec::new()) }
            }
        }

        impl Fetch for FakeCatalog {
            async fn get(&self, page: Page<'_>) -> Result<String> {
                let Page::Search { page: number, .. } = page else {
                    panic!("pagination only requests search pages, got {:?}", page);
                };
                self.requested.lock().unwrap().push(number);
                Ok(self.pages.get(&number).cloned().unwrap_or_default())
            }
        }

        fn result_page(titles: &[&str]) -> String {
            let cards: String = titles
                .iter()
                .enumerate()
                .map(|(i, title)| {
                    format!(
                        r#"<div class="cp-search-result-item">
                            <a class="cp-title-link" href="/item/show/{}">
                                <span class="title-content">{}</span>
                            </a>
                        </div>"#,
                        i + 1,
                        title
                    )
                })
                .collect();
            format!("<html><body>{}</body></html>", cards)
        }

        fn block_on<F: Future>(future: F) -> F::Output {
            tokio::runtime::Runtime::new().unwrap().block_on(future)
        }

        #[test]
        fn test_results_concatenate_in_page_order() {
            let catalog = FakeCatalog::new([
                (1, result_page(&["First", "Second"])),
                (2, result_page(&["Third"])),
            ]);
            let search = Search::new("python", SearchKind::Keyword);

            let results = block_on(search.results(&catalog, 2)).unwrap();
            let titles: Vec<_> = results
                .iter()
                .map(|r| r.as_book().unwrap().title.as_str())
                .collect();

            assert_eq!(titles, ["First", "Second", "Third"]);
        }

        #[test]
        fn test_empty_page_stops_pagination_early() {
            let catalog = FakeCatalog::new([
                (1, result_page(&["Only"])),
                (2, result_page(&[])),
                (3, result_page(&["Never requested"])),
            ]);
            let search = Search::new("python", SearchKind::Keyword);

            let results = block_on(search.results(&catalog, 5)).unwrap();

            assert_eq!(results.len(), 1);
            assert_eq!(*catalog.requested.lock().unwrap(), vec![1, 2]);
        }

        #[test]
        fn test_zero_pages_requests_nothing() {
            let catalog = FakeCatalog::new([]);
            let search = Search::new("python", SearchKind::Keyword);

            let results = block_on(search.results(&catalog, 0)).unwrap();

            assert!(results.is_empty());
            assert!(catalog.requested.lock().unwrap().is_empty());
        }
    }
}
