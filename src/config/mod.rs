//! Site configuration management for `archives.toml`.
//!
//! # Sections
//!
//! | Section     | Purpose                                         |
//! |-------------|-------------------------------------------------|
//! | `[site]`    | Site metadata and reserved page designations    |
//! | `[content]` | Content and template directories                |
//! | `[serve]`   | Development server (port, interface, watch)     |
//! | `[[types]]` | Custom content type declarations                |

mod error;
mod handle;
pub mod section;
mod util;

pub use error::ConfigError;
pub use handle::{cfg, init_config, reload_config};
pub use section::{ContentConfig, ServeConfig, SiteSectionConfig, TypeConfig};
pub use util::find_config_file;

use util::normalize_path;

use crate::log;
use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

/// Default config file name.
pub const CONFIG_FILE: &str = "archives.toml";

/// Root configuration structure representing archives.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SiteConfig {
    /// Absolute path to the config file (internal use only)
    #[serde(skip)]
    pub config_path: PathBuf,

    /// Site root directory - parent of config file (internal use only)
    #[serde(skip)]
    pub root: PathBuf,

    /// Site metadata
    #[serde(default)]
    pub site: SiteSectionConfig,

    /// Content and template directories
    #[serde(default)]
    pub content: ContentConfig,

    /// Development server settings
    #[serde(default)]
    pub serve: ServeConfig,

    /// Custom content type declarations
    #[serde(default)]
    pub types: Vec<TypeConfig>,
}

impl SiteConfig {
    /// Locate and load configuration, searching upward from cwd.
    pub fn discover(config_name: &Path) -> Result<Self> {
        match find_config_file(config_name) {
            Some(path) => Self::load(&path),
            None => bail!(
                "Config file '{}' not found. Run 'custom-archives init' to create a new site.",
                config_name.display()
            ),
        }
    }

    /// Load configuration from a config file path.
    pub fn load(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).map_err(|err| ConfigError::Io(path.to_path_buf(), err))?;

        let (mut config, ignored) = Self::parse_with_ignored(&content)?;
        if !ignored.is_empty() {
            Self::print_unknown_fields_warning(&ignored, path);
        }

        config.config_path = normalize_path(path);
        config.finalize();
        config.validate()?;

        Ok(config)
    }

    /// Parse configuration from TOML string (no path normalization).
    pub fn from_str(content: &str) -> Result<Self> {
        let (mut config, _) = Self::parse_with_ignored(content)?;
        config.fill_type_defaults();
        Ok(config)
    }

    /// Parse TOML content, collecting any unknown fields.
    fn parse_with_ignored(content: &str) -> Result<(Self, Vec<String>)> {
        let mut ignored = Vec::new();
        let deserializer = toml::Deserializer::new(content);
        let config: Self =
            serde_ignored::deserialize(deserializer, |path: serde_ignored::Path| {
                ignored.push(path.to_string());
            })
            .context("Config file parsing error")?;
        Ok((config, ignored))
    }

    /// Print warning about unknown fields.
    fn print_unknown_fields_warning(fields: &[String], path: &Path) {
        let display_path = path
            .file_name()
            .map(|n| n.to_string_lossy())
            .unwrap_or_else(|| path.to_string_lossy());
        log!("warning"; "unknown fields in {}, ignoring:", display_path);
        for field in fields {
            eprintln!("- {field}");
        }
    }

    /// Finalize configuration after loading: resolve root, normalize paths,
    /// fill type defaults.
    fn finalize(&mut self) {
        let root = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .unwrap_or_default();

        self.content.dir = normalize_path(&root.join(&self.content.dir));
        self.content.templates = normalize_path(&root.join(&self.content.templates));
        self.root = root;

        self.fill_type_defaults();
    }

    fn fill_type_defaults(&mut self) {
        for t in &mut self.types {
            t.fill_defaults();
        }
    }

    /// Get the site root directory
    pub fn get_root(&self) -> &Path {
        &self.root
    }

    /// Join a path with the site root.
    pub fn root_join(&self, path: impl AsRef<Path>) -> PathBuf {
        self.root.join(path)
    }

    // ========================================================================
    // validation
    // ========================================================================

    /// Validate the configuration, collecting all errors at once.
    pub fn validate(&self) -> Result<()> {
        let mut errors = Vec::new();

        if let Some(url) = &self.site.url
            && url::Url::parse(url).is_err()
        {
            errors.push(format!("[site] url `{url}` is not a valid URL"));
        }

        self.validate_types(&mut errors);

        if errors.is_empty() {
            Ok(())
        } else {
            bail!(ConfigError::Validation(errors.join("\n")))
        }
    }

    fn validate_types(&self, errors: &mut Vec<String>) {
        let mut seen_names: Vec<&str> = Vec::new();
        let mut seen_slugs: Vec<&str> = Vec::new();

        for t in &self.types {
            if t.name.is_empty() {
                errors.push("[[types]] name must not be empty".to_string());
                continue;
            }
            if crate::content::TypeRegistry::is_builtin_name(&t.name) {
                errors.push(format!(
                    "[[types]] `{}` is a built-in type and cannot be redeclared",
                    t.name
                ));
            }
            if seen_names.contains(&t.name.as_str()) {
                errors.push(format!("[[types]] duplicate type name `{}`", t.name));
            }
            if t.has_archive && seen_slugs.contains(&t.archive_slug.as_str()) {
                errors.push(format!(
                    "[[types]] duplicate archive slug `{}`",
                    t.archive_slug
                ));
            }
            seen_names.push(&t.name);
            if t.has_archive {
                seen_slugs.push(&t.archive_slug);
            }
        }
    }
}

// ============================================================================
// Test Helpers (available to all modules via `use crate::config::test_parse_config`)
// ============================================================================

/// Parse config with a minimal `[site]` section plus `extra` TOML.
/// Panics on unknown fields (to catch config typos in tests).
#[cfg(test)]
pub fn test_parse_config(extra: &str) -> SiteConfig {
    let content = format!("[site]\ntitle = \"Test\"\n{extra}");
    let (mut parsed, ignored) = SiteConfig::parse_with_ignored(&content).unwrap();
    assert!(
        ignored.is_empty(),
        "test config has unknown fields: {:?}",
        ignored
    );
    parsed.fill_type_defaults();
    parsed
}

// ============================================================================
// tests
// ============================================================================
