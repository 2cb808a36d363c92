//! Content directory scanning.
//!
//! Layout: `content/<type>/<slug>.toml`, one file per page or item.

use std::path::Path;

use anyhow::Result;
use jwalk::WalkDir;
use rustc_hash::FxHashMap;

use crate::config::SiteConfig;
use crate::{debug, log};

use super::page::PageFile;
use super::{Page, TypeRegistry, slugify};

/// Scan the content directory into a list of pages.
///
/// Files of unknown types are skipped. Parse failures are logged and
/// skipped rather than aborting the scan. On duplicate ids the last file
/// wins (scan order).
pub fn scan_content(config: &SiteConfig, registry: &TypeRegistry) -> Result<Vec<Page>> {
    let content_dir = &config.content.dir;
    if !content_dir.is_dir() {
        return Ok(Vec::new());
    }

    let mut by_id: FxHashMap<u64, Page> = FxHashMap::default();

    for entry in WalkDir::new(content_dir).sort(true) {
        let entry = entry?;
        let path = entry.path();
        if !entry.file_type().is_file() || path.extension().is_none_or(|e| e != "toml") {
            continue;
        }

        let Some(type_name) = type_name_for(&path, content_dir) else {
            debug!("scan"; "skipping {} (not under a type directory)", path.display());
            continue;
        };

        if registry.get(&type_name).is_none() {
            debug!("scan"; "skipping {} (unknown type `{}`)", path.display(), type_name);
            continue;
        }

        match load_page(&path, &type_name) {
            Ok(page) => {
                if let Some(previous) = by_id.insert(page.id, page) {
                    log!("scan"; "duplicate id {} ({} replaced)", previous.id, previous.source.display());
                }
            }
            Err(e) => {
                log!("scan"; "failed to load {}: {}", path.display(), e);
            }
        }
    }

    Ok(by_id.into_values().collect())
}

/// First path component under the content dir names the content type.
fn type_name_for(path: &Path, content_dir: &Path) -> Option<String> {
    let relative = path.strip_prefix(content_dir).ok()?;
    let first = relative.components().next()?;
    // A file directly in the content dir has no type directory
    if relative.components().count() < 2 {
        return None;
    }
    Some(first.as_os_str().to_string_lossy().into_owned())
}

fn load_page(path: &Path, type_name: &str) -> Result<Page> {
    let content = std::fs::read_to_string(path)?;
    let file: PageFile = toml::from_str(&content)?;

    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();

    Ok(Page::from_file(
        file,
        type_name,
        slugify(&stem),
        path.to_path_buf(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use std::fs;

    fn write_file(root: &Path, rel: &str, content: &str) {
        let path = root.join(rel);
        fs::create_dir_all(path.parent().unwrap()).unwrap();
        fs::write(path, content).unwrap();
    }

    fn test_setup(dir: &Path) -> (SiteConfig, TypeRegistry) {
        let mut config = test_parse_config("[[types]]\nname = \"event\"\nhas_archive = true");
        config.content.dir = dir.to_path_buf();
        let registry = TypeRegistry::from_config(&config);
        (config, registry)
    }

    #[test]
    fn test_scan_loads_pages_and_items() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "page/about.toml", "id = 1\ntitle = \"About\"");
        write_file(
            tmp.path(),
            "event/fest.toml",
            "id = 2\ntitle = \"Fest\"\ndate = \"2026-06-01\"",
        );

        let (config, registry) = test_setup(tmp.path());
        let pages = scan_content(&config, &registry).unwrap();

        assert_eq!(pages.len(), 2);
        let about = pages.iter().find(|p| p.id == 1).unwrap();
        assert_eq!(about.type_name, "page");
        assert_eq!(about.slug, "about");
    }

    #[test]
    fn test_scan_skips_unknown_types_and_bad_files() {
        let tmp = tempfile::tempdir().unwrap();
        write_file(tmp.path(), "widget/x.toml", "id = 1");
        write_file(tmp.path(), "page/broken.toml", "id = \"not a number\"");
        write_file(tmp.path(), "stray.toml", "id = 3");
        write_file(tmp.path(), "page/notes.txt", "not toml");

        let (config, registry) = test_setup(tmp.path());
        let pages = scan_content(&config, &registry).unwrap();
        assert!(pages.is_empty());
    }

    #[test]
    fn test_scan_missing_dir_is_empty() {
        let tmp = tempfile::tempdir().unwrap();
        let (config, registry) = test_setup(&tmp.path().join("nope"));
        assert!(scan_content(&config, &registry).unwrap().is_empty());
    }
}
