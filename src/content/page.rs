//! Page and content item types.

use std::path::PathBuf;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Integer identifier of a page or content item. `0` is never a valid id.
pub type PageId = u64;

/// Publication status of a page or content item.
///
/// Only `Publish` entries are routable; everything else behaves as absent
/// for routing and archive purposes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageStatus {
    #[default]
    Publish,
    Draft,
    Pending,
    Private,
    Trash,
}

impl PageStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Publish => "publish",
            Self::Draft => "draft",
            Self::Pending => "pending",
            Self::Private => "private",
            Self::Trash => "trash",
        }
    }

    #[inline]
    pub fn is_published(&self) -> bool {
        matches!(self, Self::Publish)
    }
}

impl FromStr for PageStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "publish" => Ok(Self::Publish),
            "draft" => Ok(Self::Draft),
            "pending" => Ok(Self::Pending),
            "private" => Ok(Self::Private),
            "trash" => Ok(Self::Trash),
            other => Err(format!(
                "unknown status `{other}` (expected publish, draft, pending, private or trash)"
            )),
        }
    }
}

impl std::fmt::Display for PageStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Raw page file contents (`content/<type>/<slug>.toml`).
#[derive(Debug, Clone, Deserialize)]
pub struct PageFile {
    /// Stable integer id. Required; referenced by archive mappings.
    pub id: PageId,
    #[serde(default)]
    pub title: String,
    /// URL slug. Defaults to the slugified file stem.
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub status: PageStatus,
    /// Template file assignment. `None` or `"default"` selects the type's
    /// standard template.
    #[serde(default)]
    pub template: Option<String>,
    /// Publication date (`YYYY-MM-DD`), used for listing order.
    #[serde(default)]
    pub date: Option<String>,
    /// Markdown body.
    #[serde(default)]
    pub body: String,
}

/// A page or content item loaded from the content directory.
#[derive(Debug, Clone)]
pub struct Page {
    pub id: PageId,
    /// Content type name (`page`, `post`, or a custom type).
    pub type_name: String,
    pub slug: String,
    pub title: String,
    pub status: PageStatus,
    pub template: Option<String>,
    pub date: Option<String>,
    pub body: String,
    /// Source file path.
    pub source: PathBuf,
}

impl Page {
    pub fn from_file(file: PageFile, type_name: &str, slug: String, source: PathBuf) -> Self {
        Self {
            id: file.id,
            type_name: type_name.to_string(),
            slug: file.slug.unwrap_or(slug),
            title: file.title,
            status: file.status,
            template: file.template,
            date: file.date,
            body: file.body,
            source,
        }
    }

    #[inline]
    pub fn is_published(&self) -> bool {
        self.status.is_published()
    }

    /// Title, falling back to the slug if not set.
    pub fn title(&self) -> &str {
        if self.title.is_empty() {
            &self.slug
        } else {
            &self.title
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_roundtrip() {
        for s in ["publish", "draft", "pending", "private", "trash"] {
            let parsed: PageStatus = s.parse().unwrap();
            assert_eq!(parsed.as_str(), s);
        }
        assert!("published".parse::<PageStatus>().is_err());
    }

    #[test]
    fn test_status_default_is_publish() {
        let file: PageFile = toml::from_str("id = 7\ntitle = \"About\"").unwrap();
        assert_eq!(file.status, PageStatus::Publish);
    }

    #[test]
    fn test_page_from_file_slug_fallback() {
        let file: PageFile = toml::from_str("id = 7").unwrap();
        let page = Page::from_file(file, "page", "about".into(), "about.toml".into());
        assert_eq!(page.slug, "about");
        assert_eq!(page.title(), "about");
    }

    #[test]
    fn test_page_from_file_explicit_slug() {
        let file: PageFile = toml::from_str("id = 7\nslug = \"about-us\"").unwrap();
        let page = Page::from_file(file, "page", "about".into(), "about.toml".into());
        assert_eq!(page.slug, "about-us");
    }
}
