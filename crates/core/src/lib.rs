pub mod endpoints;
pub mod error;
pub mod fetch;
pub mod field;
pub mod fragment;
pub mod pages;
pub mod parse;
pub mod records;
pub mod search;

pub use endpoints::{DEFAULT_BASE, Endpoints};
pub use error::{Result, StacksError};
pub use fetch::{Fetch, Page, Shelf};
#[cfg(feature = "fetch")]
pub use fetch::{FetchConfig, Session};
pub use parse::{Document, Element};
pub use records::{Branch, CatalogItem, DetailValue, ItemDetails, ListSummary, SearchResult, UserSummary};
pub use search::{Search, SearchKind};
