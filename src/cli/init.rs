//! Site initialization.
//!
//! Creates the directory structure, a starter `archives.toml`, and a sample
//! page so `serve` works out of the box.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};

use crate::config::CONFIG_FILE;
use crate::log;

const CONFIG_TEMPLATE: &str = r#"[site]
title = "My Site"
# url = "https://example.com"
# front_page = 1

[content]
dir = "content"
templates = "templates"

[serve]
interface = "127.0.0.1"
port = 8319
watch = true

# Custom content types. Example:
# [[types]]
# name = "event"
# label = "Events"
# singular = "Event"
# has_archive = true
# archive_slug = "events"
"#;

const SAMPLE_PAGE: &str = r#"id = 1
title = "About"
body = """
# About

This site was just initialized. Edit `content/page/about.toml` to change
this page, or add more files under `content/`.
"""
"#;

/// Create a new site at `name` (or the current directory when omitted).
pub fn new_site(name: Option<&Path>) -> Result<()> {
    let root = match name {
        Some(path) => path.to_path_buf(),
        None => std::env::current_dir()?,
    };

    let config_path = root.join(CONFIG_FILE);
    if config_path.exists() {
        bail!("{} already exists in {}", CONFIG_FILE, root.display());
    }

    for dir in ["content/page", "content/post", "templates"] {
        create_dir(&root.join(dir))?;
    }

    std::fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write {}", config_path.display()))?;
    std::fs::write(root.join("content/page/about.toml"), SAMPLE_PAGE)?;

    log!("init"; "site initialized at {}", root.display());
    Ok(())
}

fn create_dir(path: &PathBuf) -> Result<()> {
    std::fs::create_dir_all(path)
        .with_context(|| format!("failed to create {}", path.display()))
}
