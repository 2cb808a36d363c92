//! `[content]` section configuration.
//!
//! # Example
//!
//! ```toml
//! [content]
//! dir = "content"          # page and item sources, one TOML file per entry
//! templates = "templates"  # template files used at render time
//! ```
//!
//! Both paths are relative to the site root and normalized during loading.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Content and template directory settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ContentConfig {
    /// Content directory: `<dir>/<type>/<slug>.toml` per entry.
    pub dir: PathBuf,

    /// Template directory.
    pub templates: PathBuf,
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            dir: PathBuf::from("content"),
            templates: PathBuf::from("templates"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    #[test]
    fn test_content_config_defaults() {
        let config = test_parse_config("");
        assert_eq!(config.content.dir, PathBuf::from("content"));
        assert_eq!(config.content.templates, PathBuf::from("templates"));
    }

    #[test]
    fn test_content_config_override() {
        let config = test_parse_config("[content]\ndir = \"data\"\ntemplates = \"theme\"");
        assert_eq!(config.content.dir, PathBuf::from("data"));
        assert_eq!(config.content.templates, PathBuf::from("theme"));
    }
}
