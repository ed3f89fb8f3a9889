//! Catalog URL builders.
//!
//! Maps each logical [`Page`] to a concrete URL under a configurable base.
//! The default base is the public San Francisco Public Library catalog; any
//! BiblioCommons-hosted catalog with the same markup dialect works by
//! swapping the base.

use url::Url;

use crate::fetch::Page;
use crate::{Result, StacksError};

/// Base URL of the default catalog host.
pub const DEFAULT_BASE: &str = "https://sfpl.bibliocommons.com/";

/// URL builder for one catalog host.
#[derive(Debug, Clone)]
pub struct Endpoints {
    base: Url,
}

impl Default for Endpoints {
    fn default() -> Self {
        Self { base: Url::parse(DEFAULT_BASE).unwrap() }
    }
}

impl Endpoints {
    /// Creates endpoints for a custom catalog host.
    ///
    /// # Errors
    ///
    /// Returns [`StacksError::InvalidUrl`] when the base cannot be parsed or
    /// cannot serve as a base (e.g. a relative or opaque URL).
    pub fn new(base: &str) -> Result<Self> {
        let base = Url::parse(base).map_err(|e| StacksError::InvalidUrl(e.to_string()))?;
        if base.cannot_be_a_base() {
            return Err(StacksError::InvalidUrl(format!("{} cannot serve as a base URL", base)));
        }
        Ok(Self { base })
    }

    /// The base URL.
    pub fn base(&self) -> &Url {
        &self.base
    }

    /// Builds the URL for a logical page.
    pub fn url_for(&self, page: Page<'_>) -> Result<Url> {
        match page {
            Page::Search { query, kind, page } => {
                let mut url = self.join("search")?;
                url.query_pairs_mut()
                    .append_pair("q", query)
                    .append_pair("t", kind.param())
                    .append_pair("page", &page.to_string());
                Ok(url)
            }
            Page::ItemDetails { id } => self.join(&format!("item/show/{}", id)),
            Page::ListBooks { id } => self.join(&format!("list/show/{}", id)),
            Page::Profile { name } => self.join(&format!("user_profile/{}", name)),
            Page::Followers { id } => self.join(&format!("user_profile/{}/followers", id)),
            Page::Following { id } => self.join(&format!("user_profile/{}/following", id)),
            Page::UserLists { id } => self.join(&format!("user_profile/{}/lists", id)),
            Page::BranchDirectory => self.join("locations"),
            Page::BranchHours { id } => self.join(&format!("locations/{}", id)),
            Page::Holds => self.join("holds"),
            Page::Checkouts => self.join("checkedout"),
            Page::Shelf(shelf) => self.join(&format!("collection/show/my/library/{}", shelf.path_segment())),
        }
    }

    /// Builds the login form URL.
    pub fn login(&self) -> Result<Url> {
        self.join("user/login")
    }

    fn join(&self, path: &str) -> Result<Url> {
        self.base
            .join(path)
            .map_err(|e| StacksError::InvalidUrl(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::SearchKind;
    use crate::fetch::Shelf;

    #[test]
    fn test_default_base() {
        let endpoints = Endpoints::default();
        assert_eq!(endpoints.base().as_str(), DEFAULT_BASE);
    }

    #[test]
    fn test_invalid_base_rejected() {
        assert!(matches!(Endpoints::new("not a url"), Err(StacksError::InvalidUrl(_))));
        assert!(matches!(
            Endpoints::new("mailto:nobody@example.com"),
            Err(StacksError::InvalidUrl(_))
        ));
    }

    #[test]
    fn test_search_url_carries_query_kind_and_page() {
        let url = Endpoints::default()
            .url_for(Page::Search { query: "J.K. Rowling", kind: SearchKind::Author, page: 2 })
            .unwrap();

        assert_eq!(url.path(), "/search");
        let pairs: Vec<_> = url.query_pairs().collect();
        assert!(pairs.contains(&("q".into(), "J.K. Rowling".into())));
        assert!(pairs.contains(&("t".into(), "author".into())));
        assert!(pairs.contains(&("page".into(), "2".into())));
    }

    #[test]
    fn test_list_search_uses_userlist_param() {
        let url = Endpoints::default()
            .url_for(Page::Search { query: "Python", kind: SearchKind::List, page: 1 })
            .unwrap();

        assert!(url.query().unwrap().contains("t=userlist"));
    }

    #[test]
    fn test_item_and_list_urls() {
        let endpoints = Endpoints::default();

        assert_eq!(
            endpoints.url_for(Page::ItemDetails { id: 3388519093 }).unwrap().path(),
            "/item/show/3388519093"
        );
        assert_eq!(
            endpoints.url_for(Page::ListBooks { id: "264419518_python" }).unwrap().path(),
            "/list/show/264419518_python"
        );
    }

    #[test]
    fn test_profile_urls() {
        let endpoints = Endpoints::default();

        assert_eq!(
            endpoints.url_for(Page::Profile { name: "Sublurbanite" }).unwrap().path(),
            "/user_profile/Sublurbanite"
        );
        assert_eq!(
            endpoints.url_for(Page::Followers { id: "88379890" }).unwrap().path(),
            "/user_profile/88379890/followers"
        );
    }

    #[test]
    fn test_shelf_urls() {
        let url = Endpoints::default().url_for(Page::Shelf(Shelf::ForLater)).unwrap();
        assert_eq!(url.path(), "/collection/show/my/library/for_later");
    }

    #[test]
    fn test_custom_base() {
        let endpoints = Endpoints::new("https://seattle.bibliocommons.com/").unwrap();
        let url = endpoints.url_for(Page::Holds).unwrap();

        assert_eq!(url.as_str(), "https://seattle.bibliocommons.com/holds");
    }
}
