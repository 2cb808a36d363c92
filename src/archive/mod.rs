//! Custom archive pages.
//!
//! A content type's archive listing can be served by a designated page:
//! the mapping lives in the settings store, direct requests for the page
//! redirect to the archive URL, and the archive URL renders the page with
//! its own template instead of the generic listing.

pub mod filters;
pub mod maintain;
pub mod mapping;
pub mod resolve;
pub mod substitute;

pub use filters::Filters;
pub use mapping::{ARCHIVE_PAGE_PREFIX, ArchiveMap, ArchiveStore, settings_key};
pub use resolve::{Resolution, resolve};
pub use substitute::{ArchiveQuery, Substituted, substitute};
