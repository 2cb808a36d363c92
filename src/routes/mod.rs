//! URL routing.
//!
//! The URL scheme is flat: `/` is the front page, `/{slug}/` is either a
//! content type's archive listing or a page, and `/{archive_slug}/{slug}/`
//! is a single item of that type. Archive slugs shadow page slugs.

use crate::archive::ArchiveStore;
use crate::content::{ContentType, Page, PageId, PageStore, TypeRegistry};
use crate::core::UrlPath;

/// What a URL resolved to.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    /// A single page.
    Page(PageId),
    /// A single item of a content type.
    Item { type_name: String, id: PageId },
    /// The archive listing of a content type.
    Archive(String),
    NotFound,
}

/// Resolves request URLs against the registered types and loaded content.
pub struct Router<'a> {
    registry: &'a TypeRegistry,
    pages: &'a PageStore,
    front_page: Option<PageId>,
}

impl<'a> Router<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        pages: &'a PageStore,
        front_page: Option<PageId>,
    ) -> Self {
        Self {
            registry,
            pages,
            front_page,
        }
    }

    pub fn resolve(&self, url: &UrlPath) -> Route {
        let segments = url.segments();
        match segments.as_slice() {
            [] => self.resolve_front(),
            [slug] => self.resolve_single(slug),
            [archive_slug, item_slug] => self.resolve_item(archive_slug, item_slug),
            _ => Route::NotFound,
        }
    }

    /// The URL of a content type's archive listing.
    pub fn archive_url(content_type: &ContentType) -> UrlPath {
        UrlPath::from_page(&content_type.archive_slug)
    }

    fn resolve_front(&self) -> Route {
        match self.front_page {
            Some(id) if self.pages.get(id).is_some_and(|p| p.is_published()) => Route::Page(id),
            Some(_) => Route::NotFound,
            // No designated front page: serve the post listing
            None => Route::Archive("post".to_string()),
        }
    }

    fn resolve_single(&self, slug: &str) -> Route {
        if let Some(t) = self.registry.by_archive_slug(slug) {
            return Route::Archive(t.name.clone());
        }
        match self.pages.by_slug("page", slug) {
            Some(page) => Route::Page(page.id),
            None => Route::NotFound,
        }
    }

    fn resolve_item(&self, archive_slug: &str, item_slug: &str) -> Route {
        let Some(t) = self.registry.by_archive_slug(archive_slug) else {
            return Route::NotFound;
        };
        match self.pages.by_slug(&t.name, item_slug) {
            Some(item) => Route::Item {
                type_name: t.name.clone(),
                id: item.id,
            },
            None => Route::NotFound,
        }
    }
}

/// Canonical URL of a page or item, or `None` when it has no public URL.
///
/// A page serving an archive links to the archive URL instead of its own
/// address, since requests for the page itself redirect there anyway.
pub fn permalink(store: &ArchiveStore, page: &Page) -> Option<UrlPath> {
    if page.type_name == "page" {
        if let Some(url) = store.archive_url(page.id) {
            return Some(url);
        }
        return Some(UrlPath::from_page(&page.slug));
    }
    let t = store.registry.get(&page.type_name)?;
    if t.has_archive {
        Some(UrlPath::from_page(&format!("{}/{}", t.archive_slug, page.slug)))
    } else {
        None
    }
}
