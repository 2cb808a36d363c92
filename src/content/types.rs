//! Content type registry.

use crate::config::SiteConfig;

/// A registered content type.
#[derive(Debug, Clone)]
pub struct ContentType {
    pub name: String,
    /// Plural display label (e.g. "Events").
    pub label: String,
    /// Singular display label (e.g. "Event").
    pub singular: String,
    pub public: bool,
    pub show_ui: bool,
    pub builtin: bool,
    pub has_archive: bool,
    /// URL slug of the archive listing (empty when `has_archive` is false).
    pub archive_slug: String,
}

impl ContentType {
    fn builtin(name: &str, label: &str, singular: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            singular: singular.to_string(),
            public: true,
            show_ui: true,
            builtin: true,
            has_archive: false,
            archive_slug: String::new(),
        }
    }
}

/// All registered content types: built-ins plus custom types from config.
///
/// Registration order is stable: built-ins first, then config order.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: Vec<ContentType>,
}

impl TypeRegistry {
    /// Built-in type names, always registered.
    pub const BUILTIN: [&'static str; 2] = ["page", "post"];

    pub fn is_builtin_name(name: &str) -> bool {
        Self::BUILTIN.contains(&name)
    }

    /// Build the registry from site configuration.
    pub fn from_config(config: &SiteConfig) -> Self {
        let mut types = vec![
            ContentType::builtin("page", "Pages", "Page"),
            ContentType::builtin("post", "Posts", "Post"),
        ];

        for t in &config.types {
            types.push(ContentType {
                name: t.name.clone(),
                label: t.label.clone(),
                singular: t.singular.clone(),
                public: t.public,
                show_ui: t.show_ui,
                builtin: false,
                has_archive: t.has_archive,
                archive_slug: t.archive_slug.clone(),
            });
        }

        Self { types }
    }

    pub fn get(&self, name: &str) -> Option<&ContentType> {
        self.types.iter().find(|t| t.name == name)
    }

    /// Find the type whose archive listing lives at `slug`.
    pub fn by_archive_slug(&self, slug: &str) -> Option<&ContentType> {
        self.types
            .iter()
            .find(|t| t.has_archive && t.archive_slug == slug)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ContentType> {
        self.types.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;

    fn registry(extra: &str) -> TypeRegistry {
        TypeRegistry::from_config(&test_parse_config(extra))
    }

    #[test]
    fn test_builtins_always_registered() {
        let reg = registry("");
        assert!(reg.get("page").is_some_and(|t| t.builtin));
        assert!(reg.get("post").is_some_and(|t| t.builtin));
        assert!(reg.get("event").is_none());
    }

    #[test]
    fn test_custom_type_registered() {
        let reg = registry("[[types]]\nname = \"event\"\nhas_archive = true");
        let event = reg.get("event").unwrap();
        assert!(!event.builtin);
        assert!(event.has_archive);
        assert_eq!(event.archive_slug, "event");
    }

    #[test]
    fn test_by_archive_slug() {
        let reg = registry(
            "[[types]]\nname = \"event\"\nhas_archive = true\narchive_slug = \"events\"\n\
             [[types]]\nname = \"team\"",
        );
        assert_eq!(reg.by_archive_slug("events").unwrap().name, "event");
        // `team` has no archive, its name is not an archive slug
        assert!(reg.by_archive_slug("team").is_none());
    }
}
