//! HTML parsing and DOM navigation.
//!
//! This module provides the [`Document`] and [`Element`] types for parsing
//! catalog pages and locating markup fragments with CSS selectors.
//!
//! # Example
//!
//! ```rust
//! use stacks_core::parse::Document;
//!
//! let html = r#"
//!     <html>
//!         <body>
//!             <div class="cp-batch-actions-list-item">
//!                 <span class="title-content">Bitcoin</span>
//!             </div>
//!         </body>
//!     </html>
//! "#;
//!
//! let doc = Document::parse(html);
//! let rows = doc.select(".cp-batch-actions-list-item").unwrap();
//! assert_eq!(rows.len(), 1);
//! ```

use scraper::{Html, Selector};

use crate::{Result, StacksError};

/// Represents a parsed catalog page.
///
/// A Document wraps an HTML page and provides methods for querying elements
/// using CSS selectors. Parsing never fails: html5ever recovers from broken
/// markup the same way a browser does, and entity decoding happens during
/// tree construction.
///
/// # Example
///
/// ```rust
/// use stacks_core::parse::Document;
///
/// let doc = Document::parse("<html><head><title>Holds</title></head></html>");
/// assert_eq!(doc.title(), Some("Holds".to_string()));
/// ```
pub struct Document {
    html: Html,
}

impl Document {
    /// Parses HTML from a string.
    pub fn parse(html: &str) -> Self {
        Self { html: Html::parse_document(html) }
    }

    /// Selects elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`StacksError::HtmlParse`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| StacksError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.html.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first element matching a CSS selector, if any.
    pub fn select_one(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        Ok(self.select(selector)?.into_iter().next())
    }

    /// Gets the title of the document.
    ///
    /// Returns the content of the `<title>` element if present.
    pub fn title(&self) -> Option<String> {
        let selector = Selector::parse("title").ok()?;
        self.html
            .select(&selector)
            .next()
            .map(|el| el.text().collect::<String>())
    }
}

/// A wrapper around scraper's ElementRef, scoped to one markup fragment.
///
/// Element is what page parsers hand to the record layer: one row, card, or
/// list item. Its text accessors implement the two normalization policies
/// the record layer relies on, see [`Element::normalized_text`] and
/// [`Element::verbatim_text`].
#[derive(Clone, Debug)]
pub struct Element<'a> {
    element: scraper::ElementRef<'a>,
}

impl<'a> Element<'a> {
    /// Gets the raw text content of this element.
    ///
    /// Returns the concatenation of all text nodes within this element,
    /// including inter-tag whitespace.
    pub fn text(&self) -> String {
        self.element.text().collect()
    }

    /// Gets text with internal whitespace runs collapsed to single spaces
    /// and the ends trimmed.
    ///
    /// This is the policy for titles, authors, labels and other fields where
    /// source indentation is noise.
    pub fn normalized_text(&self) -> String {
        crate::field::collapse_ws(&self.text())
    }

    /// Gets text trimmed at the ends with internal spacing preserved.
    ///
    /// This is the policy for status strings and descriptions, whose wording
    /// and spacing come straight off the page.
    pub fn verbatim_text(&self) -> String {
        self.text().trim().to_string()
    }

    /// Gets the value of an attribute.
    ///
    /// Returns `None` if the attribute is not present.
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.element.value().attr(name)
    }

    /// Gets the tag name of this element.
    pub fn tag_name(&self) -> String {
        self.element.value().name().to_lowercase()
    }

    /// Selects descendant elements using a CSS selector, in document order.
    ///
    /// # Errors
    ///
    /// Returns [`StacksError::HtmlParse`] if the selector is invalid.
    pub fn select(&'_ self, selector: &str) -> Result<Vec<Element<'_>>> {
        let sel =
            Selector::parse(selector).map_err(|e| StacksError::HtmlParse(format!("Invalid selector: {}", e)))?;

        Ok(self.element.select(&sel).map(|el| Element { element: el }).collect())
    }

    /// Selects the first matching descendant, if any.
    pub fn select_one(&'_ self, selector: &str) -> Result<Option<Element<'_>>> {
        Ok(self.select(selector)?.into_iter().next())
    }
}
