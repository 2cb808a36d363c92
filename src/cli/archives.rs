//! `archives` commands: list, set and unset archive page assignments.

use anyhow::{Result, bail};
use owo_colors::OwoColorize;

use crate::config::SiteConfig;
use crate::content::PageId;
use crate::log;

use super::common::Host;

/// List archivable types and their assigned archive pages.
pub fn list(host: &Host) -> Result<()> {
    let store = host.archive();
    let mapping = store.mapping();

    let header = format!("{:<14} {:<12} {}", "TYPE", "ARCHIVE", "PAGE");
    println!("{}", header.dimmed());
    for t in store.archivable_types() {
        let name = format!("{:<14}", t.name);
        if !t.has_archive {
            println!("{name} {:<12} {}", "-", "(no archive support)".dimmed());
            continue;
        }
        let archive = format!("{:<12}", format!("/{}/", t.archive_slug));
        match mapping.get(&t.name) {
            Some(&id) => match host.pages.get(id) {
                Some(page) => println!(
                    "{} {archive} \"{}\" (id {id}, {})",
                    name.bold(),
                    page.title(),
                    page.source.display().dimmed()
                ),
                None => println!("{} {archive} ? (id {id})", name.bold()),
            },
            None => println!("{} {archive} {}", name.bold(), "unassigned".dimmed()),
        }
    }
    Ok(())
}

/// Assign `page_id` as the archive page of `type_name`.
///
/// The page must exist and be of type `page`, and must not be a reserved
/// page (front page or posts page). The page's publication status is not
/// checked here; an unpublished page simply never takes effect, and
/// unpublishing later removes the assignment.
pub fn set(config: &SiteConfig, host: &Host, type_name: &str, page_id: PageId) -> Result<()> {
    let store = host.archive();

    let Some(t) = store
        .archivable_types()
        .into_iter()
        .find(|t| t.name == type_name)
    else {
        bail!("`{type_name}` is not an archivable content type");
    };
    if !t.has_archive {
        bail!("type `{type_name}` has no archive listing (set has_archive = true)");
    }

    let Some(page) = host.pages.get(page_id) else {
        bail!("no entry with id {page_id}");
    };
    if page.type_name != "page" {
        bail!(
            "entry {page_id} is of type `{}`; only pages can serve archives",
            page.type_name
        );
    }
    if config.site.reserved_pages().any(|id| id == page_id) {
        bail!("page {page_id} is reserved (front page or posts page)");
    }

    store.assign(type_name, page_id)?;
    log!("archives"; "`{}` archive now served by \"{}\" (id {})", type_name, page.title(), page_id);
    Ok(())
}

/// Remove the archive page assignment of `type_name`.
pub fn unset(host: &Host, type_name: &str) -> Result<()> {
    if host.registry.get(type_name).is_none() {
        bail!("unknown content type `{type_name}`");
    }

    host.archive().unassign(type_name)?;
    log!("archives"; "`{}` archive assignment removed", type_name);
    Ok(())
}
