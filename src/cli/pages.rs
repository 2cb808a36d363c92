//! `pages` commands: list entries, change status, delete.

use anyhow::{Context, Result, bail};
use owo_colors::OwoColorize;

use crate::archive::maintain;
use crate::content::{PageId, PageStatus};
use crate::log;
use crate::routes::permalink;

use super::common::Host;

/// List pages and content items, optionally restricted to one type.
pub fn list(host: &Host, type_filter: Option<&str>) -> Result<()> {
    if let Some(name) = type_filter
        && host.registry.get(name).is_none()
    {
        bail!("unknown content type `{name}`");
    }

    let store = host.archive();

    let header = format!(
        "{:<6} {:<8} {:<30} {:<20} {}",
        "ID", "STATUS", "TITLE", "URL", "SOURCE"
    );
    println!("{}", header.dimmed());
    for t in host.registry.iter() {
        if type_filter.is_some_and(|name| name != t.name) {
            continue;
        }
        for page in host.pages.all_of_type(&t.name) {
            let mut title = page.title().to_string();
            if let Some(badge) = store.archive_badge(page.id) {
                title = format!("{title} [{badge}]");
            }
            let url = permalink(&store, &page)
                .map(|u| u.to_string())
                .unwrap_or_else(|| "-".to_string());
            println!(
                "{:<6} {:<8} {:<30} {:<20} {}",
                page.id,
                page.status.as_str(),
                title,
                url,
                page.source.display().dimmed()
            );
        }
    }
    Ok(())
}

/// Change an entry's publication status, rewriting its source file.
///
/// Unpublishing a page that serves an archive also removes that
/// assignment.
pub fn set_status(host: &Host, id: PageId, status: PageStatus) -> Result<()> {
    let Some(page) = host.pages.get(id) else {
        bail!("no entry with id {id}");
    };

    rewrite_status(&page.source, status)
        .with_context(|| format!("failed to update {}", page.source.display()))?;
    host.pages.set_status(id, status);

    maintain::page_status_changed(&host.archive(), &page, status)?;
    log!("pages"; "\"{}\" (id {}) is now {}", page.title(), id, status);
    Ok(())
}

/// Delete an entry's source file and clean up any archive assignment
/// pointing at it.
pub fn delete(host: &Host, id: PageId) -> Result<()> {
    let Some(page) = host.pages.get(id) else {
        bail!("no entry with id {id}");
    };

    std::fs::remove_file(&page.source)
        .with_context(|| format!("failed to delete {}", page.source.display()))?;
    host.pages.remove(id);

    maintain::page_deleted(&host.archive(), id)?;
    log!("pages"; "deleted \"{}\" (id {})", page.title(), id);
    Ok(())
}

fn rewrite_status(source: &std::path::Path, status: PageStatus) -> Result<()> {
    let content = std::fs::read_to_string(source)?;
    let mut table: toml::Table = toml::from_str(&content)?;
    table.insert(
        "status".to_string(),
        toml::Value::String(status.as_str().to_string()),
    );
    std::fs::write(source, toml::to_string(&table)?)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::settings_key;
    use crate::config::test_parse_config;
    use crate::content::{PageStore, TypeRegistry, scan_content};
    use crate::settings::SettingsStore;
    use serde_json::json;
    use std::fs;

    fn fixture() -> (tempfile::TempDir, Host) {
        let tmp = tempfile::tempdir().unwrap();
        let content_dir = tmp.path().join("content");
        fs::create_dir_all(content_dir.join("page")).unwrap();
        fs::write(
            content_dir.join("page/about.toml"),
            "id = 10\ntitle = \"About\"",
        )
        .unwrap();

        let mut config = test_parse_config("[[types]]\nname = \"event\"\nhas_archive = true");
        config.content.dir = content_dir;

        let registry = TypeRegistry::from_config(&config);
        let pages = PageStore::new();
        pages.replace_all(scan_content(&config, &registry).unwrap());

        let host = Host {
            registry,
            pages,
            settings: SettingsStore::open(tmp.path()).unwrap(),
            filters: Default::default(),
        };
        (tmp, host)
    }

    #[test]
    fn test_set_status_rewrites_file_and_cleans_mapping() {
        let (_tmp, host) = fixture();
        host.settings.set(&settings_key("event"), json!(10)).unwrap();

        set_status(&host, 10, PageStatus::Draft).unwrap();

        let page = host.pages.get(10).unwrap();
        assert_eq!(page.status, PageStatus::Draft);
        let content = fs::read_to_string(&page.source).unwrap();
        assert!(content.contains("draft"));

        // unpublishing removed the archive assignment
        assert!(host.archive().mapping().is_empty());
    }

    #[test]
    fn test_delete_removes_file_and_mapping() {
        let (_tmp, host) = fixture();
        host.settings.set(&settings_key("event"), json!(10)).unwrap();
        let source = host.pages.get(10).unwrap().source.clone();

        delete(&host, 10).unwrap();

        assert!(!source.exists());
        assert!(host.pages.get(10).is_none());
        assert!(host.archive().mapping().is_empty());
    }

    #[test]
    fn test_unknown_id_fails() {
        let (_tmp, host) = fixture();
        assert!(set_status(&host, 99, PageStatus::Draft).is_err());
        assert!(delete(&host, 99).is_err());
    }
}
