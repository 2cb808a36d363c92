//! Template file resolution.
//!
//! Templates are plain HTML files in the configured templates directory.
//! Resolution walks a fallback chain and returns the first file that exists
//! on disk; `None` means the embedded default template should be used.

use std::path::{Path, PathBuf};

/// Standard page template file name.
pub const PAGE_TEMPLATE: &str = "page.html";
/// Generic archive template file name.
pub const ARCHIVE_TEMPLATE: &str = "archive.html";
/// Last-resort template file name.
pub const INDEX_TEMPLATE: &str = "index.html";

/// A directory of template files.
#[derive(Debug, Clone)]
pub struct TemplateDir {
    dir: PathBuf,
}

impl TemplateDir {
    pub fn new(dir: &Path) -> Self {
        Self {
            dir: dir.to_path_buf(),
        }
    }

    /// Resolve the template of a single page.
    ///
    /// An absent or `"default"` assignment selects the standard page
    /// template; an assigned file that does not exist falls through the
    /// chain like an unassigned one.
    pub fn resolve_page(&self, assigned: Option<&str>) -> Option<PathBuf> {
        let mut candidates = Vec::new();
        if let Some(name) = assigned
            && name != "default"
        {
            candidates.push(name.to_string());
        }
        candidates.push(PAGE_TEMPLATE.to_string());
        candidates.push(INDEX_TEMPLATE.to_string());
        self.first_existing(&candidates)
    }

    /// Resolve the archive listing template of a content type:
    /// `archive-{type}.html`, then `archive.html`, then `index.html`.
    pub fn resolve_archive(&self, type_name: &str) -> Option<PathBuf> {
        self.first_existing(&[
            format!("archive-{type_name}.html"),
            ARCHIVE_TEMPLATE.to_string(),
            INDEX_TEMPLATE.to_string(),
        ])
    }

    fn first_existing<S: AsRef<str>>(&self, candidates: &[S]) -> Option<PathBuf> {
        candidates
            .iter()
            .map(|name| self.dir.join(name.as_ref()))
            .find(|path| path.is_file())
    }
}
