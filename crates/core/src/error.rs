//! Error types for Stacks operations.
//!
//! This module defines the main error type [`StacksError`] which represents
//! all possible errors that can occur while fetching catalog pages and
//! turning them into domain records.
//!
//! # Example
//!
//! ```rust
//! use stacks_core::{StacksError, Result};
//!
//! fn require_markup(html: &str) -> Result<()> {
//!     if html.is_empty() {
//!         return Err(StacksError::HtmlParse("empty document".to_string()));
//!     }
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for catalog parsing operations.
///
/// The two lookup variants, [`StacksError::NoUserFound`] and
/// [`StacksError::NoBranchFound`], are typed absence signals: they mean the
/// page itself says the entity does not exist. A page that merely has zero
/// records parses to an empty sequence, never to one of these.
///
/// # Example
///
/// ```rust,no_run
/// use stacks_core::{Document, StacksError, pages};
///
/// let doc = Document::parse("<html>...</html>");
/// match pages::profile(&doc, "Sublurbanite") {
///     Ok(user) => println!("found {}", user.name),
///     Err(StacksError::NoUserFound(name)) => println!("no user named {}", name),
///     Err(e) => println!("error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum StacksError {
    /// HTTP request errors from reqwest.
    ///
    /// This variant wraps network errors, DNS failures, connection issues,
    /// and other HTTP-related problems.
    #[cfg(feature = "fetch")]
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// Request timeout.
    ///
    /// Returned when an HTTP request exceeds the configured timeout duration.
    #[error("Request timed out after {timeout} seconds")]
    Timeout { timeout: u64 },

    /// Invalid URL provided.
    ///
    /// Returned when a catalog URL cannot be built or is malformed.
    #[error("Invalid URL: {0}")]
    InvalidUrl(String),

    /// HTML parsing errors.
    ///
    /// Returned when a CSS selector is invalid or markup cannot be handled.
    #[error("Failed to parse HTML: {0}")]
    HtmlParse(String),

    /// Login rejected by the catalog.
    ///
    /// Carries the sign-in page's own error message.
    #[error("Login failed: {0}")]
    Login(String),

    /// The profile page says the named user does not exist.
    ///
    /// Distinct from a user who exists but follows nobody and owns no lists;
    /// those parse to empty sequences.
    #[error("No user found with name {0:?}")]
    NoUserFound(String),

    /// The branch directory has no entry matching the query.
    #[error("No branch found matching {0:?}")]
    NoBranchFound(String),

    /// An unrecognized search kind string.
    ///
    /// Returned by [`SearchKind::from_str`](crate::SearchKind) for anything
    /// outside the catalog's supported search types.
    #[error("Invalid search kind: {0:?} (expected keyword, title, author, subject, tag or list)")]
    InvalidSearchKind(String),
}

/// Result type alias for StacksError.
///
/// This is a convenience alias for `std::result::Result<T, StacksError>`.
pub type Result<T> = std::result::Result<T, StacksError>;
