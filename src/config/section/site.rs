//! `[site]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [site]
//! title = "My Site"
//! url = "https://example.com"
//! front_page = 2      # page id served at `/`
//! posts_page = 3      # page id that lists posts
//! ```
//!
//! `front_page` and `posts_page` are reserved: they cannot be assigned as
//! custom archives.

use serde::{Deserialize, Serialize};

use crate::content::PageId;

/// Site metadata and reserved page designations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteSectionConfig {
    /// Site title, used by the default templates.
    pub title: String,

    /// Public base URL (optional, validated when present).
    pub url: Option<String>,

    /// Page id shown at the site root.
    pub front_page: Option<PageId>,

    /// Page id that displays the generic posts listing.
    pub posts_page: Option<PageId>,
}

impl SiteSectionConfig {
    /// Page ids that may never be assigned as a custom archive.
    pub fn reserved_pages(&self) -> impl Iterator<Item = PageId> {
        self.front_page.into_iter().chain(self.posts_page)
    }
}
