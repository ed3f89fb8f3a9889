//! Domain records produced by the page parsers.
//!
//! Every record is immutable once constructed and is built entirely from one
//! parse pass. Extended information (item details, list members, a user's
//! followers) lives behind explicit lazy capabilities: the record stores only
//! its identifier, and the fetch-and-parse happens in a separate call taking
//! an injected [`Fetch`] implementation.

use serde::Serialize;

use crate::fetch::{Fetch, Page};
use crate::pages;
use crate::Result;
use crate::parse::Document;

/// One catalog item: a hold, a checkout, a shelf entry, or a book search hit.
///
/// The status field is free text preserved verbatim from the source page
/// (a due date, a pickup-by date, or an availability note, depending on the
/// page it was parsed from). Subtitle, author and status default to empty
/// strings when the page omits them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogItem {
    /// Title of the item.
    pub title: String,

    /// Subtitle, empty when the page shows none.
    pub subtitle: String,

    /// Author as printed, usually `Last, First`.
    pub author: String,

    /// Page-dependent status text, kept verbatim.
    pub status: String,

    /// Numeric identifier embedded in the item's catalog link.
    pub id: u64,
}

impl CatalogItem {
    /// Fetches and parses this item's detail page.
    ///
    /// The returned [`ItemDetails`] is not cached; callers wanting to reuse
    /// it hold on to the value themselves.
    pub async fn details(&self, fetcher: &impl Fetch) -> Result<ItemDetails> {
        let html = fetcher.get(Page::ItemDetails { id: self.id }).await?;
        Ok(pages::item_details(&Document::parse(&html)))
    }
}

/// A value in an item's attribute table.
///
/// Most attributes are plain text; a few (ISBN in particular) render as a
/// list on the page and stay a list here.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum DetailValue {
    Text(String),
    List(Vec<String>),
}

/// Extended information from an item's detail page.
///
/// The attribute labels are not fixed in advance: whatever key/value pairs
/// the page exposes appear here, in presentation order.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct ItemDetails {
    /// Attribute table in presentation order (Publisher, Edition, ISBN, ...).
    pub attributes: Vec<(String, DetailValue)>,

    /// Free-text description, empty when the page has none.
    pub description: String,

    /// Subject/keyword strings in presentation order.
    pub keywords: Vec<String>,
}

impl ItemDetails {
    /// Looks up an attribute by its label.
    pub fn attribute(&self, label: &str) -> Option<&DetailValue> {
        self.attributes
            .iter()
            .find(|(key, _)| key == label)
            .map(|(_, value)| value)
    }
}

/// A curated list from a list search or a user's profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ListSummary {
    /// The list's type tag as printed, e.g. `Topic Guide`.
    pub kind: String,

    /// Title of the list.
    pub title: String,

    /// The user who owns the list.
    pub user: UserSummary,

    /// Creation date as printed, e.g. `Apr 10, 2014`.
    pub created_on: String,

    /// Number of items the page reports for the list.
    pub item_count: u32,

    /// List identifier, e.g. `264419518_python`.
    pub id: String,
}

impl ListSummary {
    /// Fetches the list's member page and parses its books in list order.
    pub async fn books(&self, fetcher: &impl Fetch) -> Result<Vec<CatalogItem>> {
        let html = fetcher.get(Page::ListBooks { id: &self.id }).await?;
        Ok(pages::list_books(&Document::parse(&html)))
    }
}

/// A user reference: display name plus profile identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserSummary {
    /// Display name as printed.
    pub name: String,

    /// Profile identifier, e.g. `88379890`.
    pub id: String,
}

impl UserSummary {
    /// Looks up a user by profile name.
    ///
    /// # Errors
    ///
    /// Returns [`StacksError::NoUserFound`] when the profile page says the
    /// user does not exist.
    pub async fn lookup(fetcher: &impl Fetch, name: &str) -> Result<UserSummary> {
        let html = fetcher.get(Page::Profile { name }).await?;
        pages::profile(&Document::parse(&html), name)
    }

    /// Fetches the users following this user, in page order.
    pub async fn followers(&self, fetcher: &impl Fetch) -> Result<Vec<UserSummary>> {
        let html = fetcher.get(Page::Followers { id: &self.id }).await?;
        Ok(pages::follow_list(&Document::parse(&html)))
    }

    /// Fetches the users this user follows, in page order.
    pub async fn following(&self, fetcher: &impl Fetch) -> Result<Vec<UserSummary>> {
        let html = fetcher.get(Page::Following { id: &self.id }).await?;
        Ok(pages::follow_list(&Document::parse(&html)))
    }

    /// Fetches the lists this user owns, in page order.
    pub async fn lists(&self, fetcher: &impl Fetch) -> Result<Vec<ListSummary>> {
        let html = fetcher.get(Page::UserLists { id: &self.id }).await?;
        Ok(pages::user_lists(&Document::parse(&html)))
    }
}

/// A library branch from the locations directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Branch {
    /// Branch name as printed in the directory, e.g. `WEST PORTAL BRANCH`.
    pub name: String,

    /// Branch identifier from the directory link.
    pub id: String,
}

impl Branch {
    /// Looks up a branch by name in the locations directory.
    ///
    /// The query matches case-insensitively against directory entries, so
    /// `west portal` finds `WEST PORTAL BRANCH`.
    ///
    /// # Errors
    ///
    /// Returns [`StacksError::NoBranchFound`] when no entry matches.
    pub async fn lookup(fetcher: &impl Fetch, query: &str) -> Result<Branch> {
        let html = fetcher.get(Page::BranchDirectory).await?;
        pages::branch(&Document::parse(&html), query)
    }

    /// Fetches the branch's weekly hours.
    ///
    /// Returns the seven weekday/hours pairs in page order, Sunday first.
    /// A day the branch is closed carries the page's literal closed marker.
    pub async fn hours(&self, fetcher: &impl Fetch) -> Result<Vec<(String, String)>> {
        let html = fetcher.get(Page::BranchHours { id: &self.id }).await?;
        Ok(pages::branch_hours(&Document::parse(&html)))
    }
}

/// One search hit, discriminated by what the card represents.
///
/// The serde tag is `type` so it cannot collide with a list's own `kind`
/// field (the printed type tag, e.g. `Topic Guide`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchResult {
    /// A book card.
    Book(CatalogItem),
    /// A curated-list card.
    List(ListSummary),
}

impl SearchResult {
    /// The book behind this result, if it is one.
    pub fn as_book(&self) -> Option<&CatalogItem> {
        match self {
            SearchResult::Book(item) => Some(item),
            SearchResult::List(_) => None,
        }
    }

    /// The list behind this result, if it is one.
    pub fn as_list(&self) -> Option<&ListSummary> {
        match self {
            SearchResult::Book(_) => None,
            SearchResult::List(list) => Some(list),
        }
    }
}
