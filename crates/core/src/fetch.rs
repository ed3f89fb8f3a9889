//! Page fetching: the logical-page capability and the HTTP session.
//!
//! The core's contract toward transport is pull-based: coordinators and lazy
//! record capabilities ask a [`Fetch`] implementation for the HTML of a
//! logical [`Page`] and parse whatever comes back. [`Session`] is the
//! production implementation, a cookie-backed reqwest client that also
//! carries the account conveniences (login, holds, checkouts, shelves).
//! Tests substitute a fixture-backed map.

use crate::Result;
use crate::search::SearchKind;

/// The three account shelves.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Shelf {
    ForLater,
    InProgress,
    Completed,
}

impl Shelf {
    /// Path segment of the shelf's collection URL.
    pub(crate) fn path_segment(self) -> &'static str {
        match self {
            Shelf::ForLater => "for_later",
            Shelf::InProgress => "in_progress",
            Shelf::Completed => "completed",
        }
    }
}

/// A logical catalog page, the unit of the fetch capability.
///
/// Identifiers are borrowed from the record asking for the page; nothing
/// here owns transport state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Page<'a> {
    /// One page of search results.
    Search { query: &'a str, kind: SearchKind, page: u32 },
    /// An item's detail page.
    ItemDetails { id: u64 },
    /// A curated list's member page.
    ListBooks { id: &'a str },
    /// A user's profile page, addressed by profile name.
    Profile { name: &'a str },
    /// The followers page of a user, addressed by identifier.
    Followers { id: &'a str },
    /// The following page of a user.
    Following { id: &'a str },
    /// The lists page of a user.
    UserLists { id: &'a str },
    /// The branch locations directory.
    BranchDirectory,
    /// A branch's own page, with its hours table.
    BranchHours { id: &'a str },
    /// The signed-in account's holds.
    Holds,
    /// The signed-in account's checkouts.
    Checkouts,
    /// One of the signed-in account's shelves.
    Shelf(Shelf),
}

/// The page-fetch capability: give me the HTML for this logical page.
///
/// The core never calls this during an initial parse; only pagination and
/// the lazy detail/member capabilities pull pages through it.
#[allow(async_fn_in_trait)]
pub trait Fetch {
    async fn get(&self, page: Page<'_>) -> Result<String>;
}

#[cfg(feature = "fetch")]
pub use self::session::{FetchConfig, Session};

#[cfg(feature = "fetch")]
mod session {
    use std::time::Duration;

    use reqwest::Client;
    use url::Url;

    use super::{Fetch, Page, Shelf};
    use crate::endpoints::Endpoints;
    use crate::parse::Document;
    use crate::records::{Branch, CatalogItem, UserSummary};
    use crate::search::{Search, SearchKind};
    use crate::{Result, StacksError, pages};

    /// Login error message block on a failed sign-in.
    const LOGIN_ERROR: &str = ".cp-login-error";

    /// HTTP client configuration for fetching catalog pages.
    #[derive(Debug, Clone)]
    pub struct FetchConfig {
        /// Request timeout in seconds.
        pub timeout: u64,
        /// Custom User-Agent string.
        pub user_agent: String,
    }

    impl Default for FetchConfig {
        fn default() -> Self {
            Self {
                timeout: 30,
                user_agent: "Mozilla/5.0 (compatible; Stacks/1.0; +https://github.com/stormlightlabs/stacks)"
                    .to_string(),
            }
        }
    }

    /// A catalog HTTP session.
    ///
    /// Wraps a reqwest client with a cookie store so that a successful
    /// [`Session::login`] carries over to the account pages. All public
    /// catalog pages work without logging in.
    pub struct Session {
        client: Client,
        endpoints: Endpoints,
        config: FetchConfig,
    }

    impl Session {
        /// Creates a session against a specific catalog host.
        pub fn new(endpoints: Endpoints, config: FetchConfig) -> Result<Self> {
            let client = Client::builder()
                .timeout(Duration::from_secs(config.timeout))
                .cookie_store(true)
                .build()
                .map_err(StacksError::Http)?;

            Ok(Self { client, endpoints, config })
        }

        /// Creates a session against the default catalog host.
        pub fn with_defaults() -> Result<Self> {
            Self::new(Endpoints::default(), FetchConfig::default())
        }

        /// The endpoints this session talks to.
        pub fn endpoints(&self) -> &Endpoints {
            &self.endpoints
        }

        /// Signs in with a library card barcode and PIN.
        ///
        /// # Errors
        ///
        /// Returns [`StacksError::Login`] with the page's own message when
        /// the catalog rejects the credentials.
        pub async fn login(&self, barcode: &str, pin: &str) -> Result<()> {
            let url = self.endpoints.login()?;
            let response = self
                .client
                .post(url)
                .form(&[("name", barcode), ("user_pin", pin)])
                .send()
                .await
                .map_err(|e| self.map_send_error(e))?;

            let body = response.text().await?;
            let doc = Document::parse(&body);
            if let Some(block) = doc.select_one(LOGIN_ERROR)? {
                return Err(StacksError::Login(block.normalized_text()));
            }

            Ok(())
        }

        /// Fetches and parses the signed-in account's holds.
        pub async fn holds(&self) -> Result<Vec<CatalogItem>> {
            let html = self.get(Page::Holds).await?;
            Ok(pages::holds(&Document::parse(&html)))
        }

        /// Fetches and parses the signed-in account's checkouts.
        pub async fn checkouts(&self) -> Result<Vec<CatalogItem>> {
            let html = self.get(Page::Checkouts).await?;
            Ok(pages::checkouts(&Document::parse(&html)))
        }

        /// Fetches and parses one of the signed-in account's shelves.
        pub async fn shelf(&self, shelf: Shelf) -> Result<Vec<CatalogItem>> {
            let html = self.get(Page::Shelf(shelf)).await?;
            Ok(pages::shelf(&Document::parse(&html)))
        }

        /// Runs a search through this session.
        pub async fn search(
            &self,
            query: &str,
            kind: SearchKind,
            max_pages: u32,
        ) -> Result<Vec<crate::records::SearchResult>> {
            Search::new(query, kind).results(self, max_pages).await
        }

        /// Looks up a user by profile name.
        pub async fn user(&self, name: &str) -> Result<UserSummary> {
            UserSummary::lookup(self, name).await
        }

        /// Looks up a branch by name.
        pub async fn branch(&self, query: &str) -> Result<Branch> {
            Branch::lookup(self, query).await
        }

        async fn get_url(&self, url: Url) -> Result<String> {
            let response = self
                .client
                .get(url)
                .header("User-Agent", &self.config.user_agent)
                .header(
                    "Accept",
                    "text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8",
                )
                .header("Accept-Language", "en-US,en;q=0.9")
                .send()
                .await
                .map_err(|e| self.map_send_error(e))?;

            Ok(response.text().await?)
        }

        fn map_send_error(&self, e: reqwest::Error) -> StacksError {
            if e.is_timeout() {
                StacksError::Timeout { timeout: self.config.timeout }
            } else {
                StacksError::Http(e)
            }
        }
    }

    impl Fetch for Session {
        async fn get(&self, page: Page<'_>) -> Result<String> {
            let url = self.endpoints.url_for(page)?;
            self.get_url(url).await
        }
    }

}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shelf_path_segments() {
        assert_eq!(Shelf::ForLater.path_segment(), "for_later");
        assert_eq!(Shelf::InProgress.path_segment(), "in_progress");
        assert_eq!(Shelf::Completed.path_segment(), "completed");
    }

    #[test]
    fn test_page_is_copy() {
        let page = Page::Profile { name: "Sublurbanite" };
        let copy = page;
        assert_eq!(page, copy);
    }
}
