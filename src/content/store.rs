//! In-memory page storage, shared between the server and the watcher.

use std::collections::BTreeMap;

use parking_lot::RwLock;

use super::{Page, PageId, PageStatus};

/// Thread-safe storage for all loaded pages and content items, keyed by id.
#[derive(Debug, Default)]
pub struct PageStore {
    pages: RwLock<BTreeMap<PageId, Page>>,
}

impl PageStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the whole store with a fresh scan result.
    pub fn replace_all(&self, pages: Vec<Page>) {
        let mut map = self.pages.write();
        map.clear();
        for page in pages {
            map.insert(page.id, page);
        }
    }

    pub fn insert(&self, page: Page) {
        self.pages.write().insert(page.id, page);
    }

    pub fn remove(&self, id: PageId) -> Option<Page> {
        self.pages.write().remove(&id)
    }

    pub fn get(&self, id: PageId) -> Option<Page> {
        self.pages.read().get(&id).cloned()
    }

    /// Update a page's status in place. Returns the updated page.
    pub fn set_status(&self, id: PageId, status: PageStatus) -> Option<Page> {
        let mut map = self.pages.write();
        let page = map.get_mut(&id)?;
        page.status = status;
        Some(page.clone())
    }

    /// Look up a published entry of `type_name` by slug.
    pub fn by_slug(&self, type_name: &str, slug: &str) -> Option<Page> {
        self.pages
            .read()
            .values()
            .find(|p| p.type_name == type_name && p.slug == slug && p.is_published())
            .cloned()
    }

    /// All published entries of a type, newest first (then by title).
    pub fn published_of_type(&self, type_name: &str) -> Vec<Page> {
        let map = self.pages.read();
        let mut result: Vec<_> = map
            .values()
            .filter(|p| p.type_name == type_name && p.is_published())
            .cloned()
            .collect();
        result.sort_by(|a, b| match (&b.date, &a.date) {
            (Some(date_b), Some(date_a)) => date_b.cmp(date_a),
            (Some(_), None) => std::cmp::Ordering::Greater,
            (None, Some(_)) => std::cmp::Ordering::Less,
            (None, None) => a.title().cmp(b.title()),
        });
        result
    }

    /// All entries of a type regardless of status, ordered by id.
    pub fn all_of_type(&self, type_name: &str) -> Vec<Page> {
        self.pages
            .read()
            .values()
            .filter(|p| p.type_name == type_name)
            .cloned()
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.read().is_empty()
    }

    pub fn len(&self) -> usize {
        self.pages.read().len()
    }
}
