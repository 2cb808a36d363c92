//! `types` command: list registered content types.

use anyhow::Result;
use owo_colors::OwoColorize;

use crate::config::SiteConfig;
use crate::content::TypeRegistry;

pub fn list_types(config: &SiteConfig) -> Result<()> {
    let registry = TypeRegistry::from_config(config);

    let header = format!("{:<14} {:<18} {:<9} {}", "NAME", "LABEL", "KIND", "ARCHIVE");
    println!("{}", header.dimmed());
    for t in registry.iter() {
        let archive = if t.has_archive {
            format!("/{}/", t.archive_slug)
        } else {
            "-".to_string()
        };
        let kind = if t.builtin { "builtin" } else { "custom" };
        println!(
            "{} {:<18} {:<9} {}",
            format!("{:<14}", t.name).bold(),
            t.label,
            kind,
            archive
        );
    }
    Ok(())
}
