//! `[[types]]` custom content type declarations.
//!
//! # Example
//!
//! ```toml
//! [[types]]
//! name = "event"
//! label = "Events"
//! singular = "Event"
//! has_archive = true
//! archive_slug = "events"   # defaults to the type name
//! ```
//!
//! The built-in `page` and `post` types are always registered and cannot be
//! redeclared here.

use serde::{Deserialize, Serialize};

/// A custom content type declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TypeConfig {
    /// Type identifier (lowercase, used in content paths and settings keys).
    pub name: String,

    /// Plural display label. Defaults to the capitalized name.
    pub label: String,

    /// Singular display label. Defaults to the capitalized name.
    pub singular: String,

    /// Whether entries of this type are publicly routable.
    pub public: bool,

    /// Whether the type appears in admin listings.
    pub show_ui: bool,

    /// Whether the type has an archive listing at all.
    pub has_archive: bool,

    /// URL slug for the archive listing. Defaults to the type name.
    pub archive_slug: String,
}

impl Default for TypeConfig {
    fn default() -> Self {
        Self {
            name: String::new(),
            label: String::new(),
            singular: String::new(),
            public: true,
            show_ui: true,
            has_archive: false,
            archive_slug: String::new(),
        }
    }
}

impl TypeConfig {
    /// Fill derived defaults (labels from name, archive slug from name).
    pub fn fill_defaults(&mut self) {
        if self.label.is_empty() {
            self.label = capitalize(&self.name);
        }
        if self.singular.is_empty() {
            self.singular = capitalize(&self.name);
        }
        if self.archive_slug.is_empty() {
            self.archive_slug = crate::content::slugify(&self.name);
        }
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
