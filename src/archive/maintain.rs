//! Reactive mapping maintenance.
//!
//! Assignments are validated when made, then kept consistent reactively:
//! when a page leaves the published state or is deleted, any mapping entry
//! pointing at it is removed so no type keeps referring to a page that can
//! no longer serve its archive.

use anyhow::Result;

use crate::content::{Page, PageId, PageStatus, PageStore};
use crate::debug;

use super::mapping::ArchiveStore;

/// React to a page status change.
///
/// Only pages can serve archives, so status changes of other content types
/// are ignored. A page staying published keeps its assignments.
pub fn page_status_changed(store: &ArchiveStore, page: &Page, new_status: PageStatus) -> Result<()> {
    if page.type_name != "page" || new_status.is_published() {
        return Ok(());
    }
    remove_entries_for(store, page.id)
}

/// React to a page deletion. The entry keyed by any type mapped to the
/// deleted page's own id is removed.
pub fn page_deleted(store: &ArchiveStore, page_id: PageId) -> Result<()> {
    remove_entries_for(store, page_id)
}

/// Drop every mapping entry whose page no longer exists or is no longer
/// published. Used after a full content rescan.
pub fn prune(store: &ArchiveStore, pages: &PageStore) -> Result<()> {
    for (type_name, page_id) in store.mapping() {
        let alive = pages.get(page_id).is_some_and(|p| p.is_published());
        if !alive {
            debug!("archive"; "pruning `{}` (page {} gone or unpublished)", type_name, page_id);
            store.unassign(&type_name)?;
        }
    }
    Ok(())
}

fn remove_entries_for(store: &ArchiveStore, page_id: PageId) -> Result<()> {
    for (type_name, mapped) in store.mapping() {
        if mapped == page_id {
            debug!("archive"; "removing `{}` mapping (page {})", type_name, page_id);
            store.unassign(&type_name)?;
        }
    }
    Ok(())
}
