//! The archive mapping: which page serves as the archive of which type.
//!
//! The mapping is not cached. It is recomputed from the settings store on
//! every query, so a settings write is visible to the next request without
//! any invalidation step.

use std::collections::BTreeMap;

use serde_json::json;

use crate::content::{ContentType, PageId, TypeRegistry};
use crate::core::UrlPath;
use crate::settings::SettingsStore;

use super::filters::Filters;

/// Settings key prefix. The full key is `archive_page_{type_name}`.
pub const ARCHIVE_PAGE_PREFIX: &str = "archive_page_";

/// Settings key holding the archive page id of a content type.
pub fn settings_key(type_name: &str) -> String {
    format!("{ARCHIVE_PAGE_PREFIX}{type_name}")
}

/// Type name -> archive page id.
pub type ArchiveMap = BTreeMap<String, PageId>;

/// Read access to the archive mapping.
///
/// Borrows the host collaborators for the duration of a query; nothing is
/// cached between calls.
pub struct ArchiveStore<'a> {
    pub registry: &'a TypeRegistry,
    pub settings: &'a SettingsStore,
    pub filters: &'a Filters,
}

impl<'a> ArchiveStore<'a> {
    pub fn new(
        registry: &'a TypeRegistry,
        settings: &'a SettingsStore,
        filters: &'a Filters,
    ) -> Self {
        Self {
            registry,
            settings,
            filters,
        }
    }

    /// Content types eligible for an archive page: public, visible in
    /// listings, and not built in. The result passes through the
    /// `archivable_types` filter chain.
    pub fn archivable_types(&self) -> Vec<ContentType> {
        let types = self
            .registry
            .iter()
            .filter(|t| t.public && t.show_ui && !t.builtin)
            .cloned()
            .collect();
        self.filters.archivable_types.apply(types)
    }

    /// Compute the current mapping from stored settings.
    ///
    /// Types without archive support are skipped even when a stale settings
    /// key exists for them. Absent, zero and malformed values are skipped.
    pub fn mapping(&self) -> ArchiveMap {
        let mut map = ArchiveMap::new();
        for t in self.archivable_types() {
            if !t.has_archive {
                continue;
            }
            match self.settings.get_u64(&settings_key(&t.name)) {
                Some(id) if id != 0 => {
                    map.insert(t.name, id);
                }
                _ => {}
            }
        }
        self.filters.mapping.apply(map)
    }

    /// Reverse lookup: the content type whose archive is served by `page_id`.
    ///
    /// First match in mapping order wins if a page is assigned to several
    /// types.
    pub fn type_for_page(&self, page_id: PageId) -> Option<String> {
        self.mapping()
            .into_iter()
            .find(|(_, id)| *id == page_id)
            .map(|(name, _)| name)
    }

    /// The archive URL a mapped page redirects to, if the page is mapped.
    pub fn archive_url(&self, page_id: PageId) -> Option<UrlPath> {
        let type_name = self.type_for_page(page_id)?;
        let t = self.registry.get(&type_name)?;
        let url = UrlPath::from_page(&t.archive_slug);
        Some(self.filters.archive_url.apply(url))
    }

    /// Listing badge for a page serving an archive, e.g. `Events Archive`.
    pub fn archive_badge(&self, page_id: PageId) -> Option<String> {
        let type_name = self.type_for_page(page_id)?;
        let t = self.registry.get(&type_name)?;
        Some(format!("{} Archive", t.label))
    }

    /// Assign `page_id` as the archive page of `type_name` and persist.
    pub fn assign(&self, type_name: &str, page_id: PageId) -> anyhow::Result<()> {
        self.settings.set(&settings_key(type_name), json!(page_id))
    }

    /// Remove the assignment of `type_name` and persist.
    pub fn unassign(&self, type_name: &str) -> anyhow::Result<()> {
        self.settings.delete(&settings_key(type_name))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::test_parse_config;
    use serde_json::json;

    fn test_registry() -> TypeRegistry {
        TypeRegistry::from_config(&test_parse_config(
            "[[types]]\nname = \"event\"\nhas_archive = true\narchive_slug = \"events\"\n\
             [[types]]\nname = \"team\"\n\
             [[types]]\nname = \"secret\"\npublic = false\nhas_archive = true",
        ))
    }

    fn test_settings() -> (tempfile::TempDir, SettingsStore) {
        let tmp = tempfile::tempdir().unwrap();
        let settings = SettingsStore::open(tmp.path()).unwrap();
        (tmp, settings)
    }

    #[test]
    fn test_archivable_types_excludes_builtin_and_private() {
        let registry = test_registry();
        let (_tmp, settings) = test_settings();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        let names: Vec<_> = store
            .archivable_types()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["event", "team"]);
    }

    #[test]
    fn test_archivable_types_filter_applies() {
        let registry = test_registry();
        let (_tmp, settings) = test_settings();
        let mut filters = Filters::default();
        filters.archivable_types.add(|mut types| {
            types.retain(|t| t.name != "team");
            types
        });
        let store = ArchiveStore::new(&registry, &settings, &filters);

        let names: Vec<_> = store
            .archivable_types()
            .into_iter()
            .map(|t| t.name)
            .collect();
        assert_eq!(names, vec!["event"]);
    }

    #[test]
    fn test_mapping_skips_types_without_archive() {
        let registry = test_registry();
        let (_tmp, settings) = test_settings();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        settings.set(&settings_key("event"), json!(10)).unwrap();
        // stale key for a type without archive support
        settings.set(&settings_key("team"), json!(11)).unwrap();

        let map = store.mapping();
        assert_eq!(map.get("event"), Some(&10));
        assert!(!map.contains_key("team"));
    }

    #[test]
    fn test_mapping_skips_zero_and_malformed() {
        let registry = test_registry();
        let (_tmp, settings) = test_settings();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        settings.set(&settings_key("event"), json!(0)).unwrap();
        assert!(store.mapping().is_empty());

        settings.set(&settings_key("event"), json!("junk")).unwrap();
        assert!(store.mapping().is_empty());
    }

    #[test]
    fn test_mapping_reflects_settings_without_invalidation() {
        let registry = test_registry();
        let (_tmp, settings) = test_settings();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        assert!(store.mapping().is_empty());
        store.assign("event", 10).unwrap();
        assert_eq!(store.mapping().get("event"), Some(&10));
        store.unassign("event").unwrap();
        assert!(store.mapping().is_empty());
    }

    #[test]
    fn test_assign_is_idempotent() {
        let registry = test_registry();
        let (_tmp, settings) = test_settings();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        store.assign("event", 10).unwrap();
        let first = store.mapping();
        store.assign("event", 10).unwrap();
        assert_eq!(store.mapping(), first);
    }

    #[test]
    fn test_type_for_page_first_match() {
        let registry = TypeRegistry::from_config(&test_parse_config(
            "[[types]]\nname = \"event\"\nhas_archive = true\n\
             [[types]]\nname = \"venue\"\nhas_archive = true",
        ));
        let (_tmp, settings) = test_settings();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        store.assign("event", 10).unwrap();
        store.assign("venue", 10).unwrap();

        // BTreeMap order: "event" before "venue"
        assert_eq!(store.type_for_page(10).as_deref(), Some("event"));
        assert_eq!(store.type_for_page(99), None);
    }

    #[test]
    fn test_archive_url() {
        let registry = test_registry();
        let (_tmp, settings) = test_settings();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        store.assign("event", 10).unwrap();
        assert_eq!(store.archive_url(10).unwrap(), "/events/");
        assert!(store.archive_url(11).is_none());
    }

    #[test]
    fn test_archive_badge() {
        let registry = test_registry();
        let (_tmp, settings) = test_settings();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        store.assign("event", 10).unwrap();
        assert_eq!(store.archive_badge(10).as_deref(), Some("Event Archive"));
        assert_eq!(store.archive_badge(11), None);
    }

    #[test]
    fn test_archive_url_filter_applies() {
        let registry = test_registry();
        let (_tmp, settings) = test_settings();
        let mut filters = Filters::default();
        filters
            .archive_url
            .add(|url| UrlPath::from_page(&format!("/en{}", url.as_str())));
        let store = ArchiveStore::new(&registry, &settings, &filters);

        store.assign("event", 10).unwrap();
        assert_eq!(store.archive_url(10).unwrap(), "/en/events/");
    }
}
