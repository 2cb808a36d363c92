//! Request interception for mapped pages.
//!
//! A page that serves as an archive must not be reachable at its own URL;
//! requests for it are permanently redirected to the archive URL so each
//! piece of content has exactly one canonical address.

use crate::content::PageId;
use crate::core::UrlPath;

use super::mapping::ArchiveStore;

/// Outcome of checking a matched page against the archive mapping.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// The page serves an archive; respond with a permanent redirect.
    Redirect(UrlPath),
    /// The page is not mapped; normal handling continues.
    Continue,
}

/// Decide whether a request that matched `page_id` should be redirected.
pub fn resolve(store: &ArchiveStore, page_id: PageId) -> Resolution {
    match store.archive_url(page_id) {
        Some(url) => Resolution::Redirect(url),
        None => Resolution::Continue,
    }
}
