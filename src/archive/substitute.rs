//! Archive template substitution.
//!
//! When a content type's archive URL has a mapped page, the listing request
//! is reshaped: the mapped page becomes the queried content, the generic
//! listing is preserved under an auxiliary key, and the page's own template
//! replaces the archive template.

use std::path::PathBuf;

use crate::content::{PageId, PageStore};
use crate::template::TemplateDir;

use super::mapping::ArchiveStore;

/// The working state of an archive listing request.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ArchiveQuery {
    /// Content type whose archive is being served.
    pub type_name: String,
    /// The queried entries. Starts as the generic listing; substitution
    /// replaces it with the single mapped page.
    pub posts: Vec<PageId>,
    /// The original listing, preserved when substitution happens so the
    /// page template can still render it.
    pub archive_posts: Option<Vec<PageId>>,
    /// The mapped page, when substitution happened.
    pub page_id: Option<PageId>,
}

impl ArchiveQuery {
    pub fn listing(type_name: &str, posts: Vec<PageId>) -> Self {
        Self {
            type_name: type_name.to_string(),
            posts,
            archive_posts: None,
            page_id: None,
        }
    }
}

/// Result of an applied substitution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Substituted {
    /// Template to render with. `None` selects the embedded default.
    pub template: Option<PathBuf>,
}

/// Substitute the mapped page into an archive query.
///
/// Returns `None` when no substitution applies and the generic archive
/// handling should proceed unchanged. A mapping whose page is missing or
/// unpublished behaves as no mapping.
pub fn substitute(
    store: &ArchiveStore,
    pages: &PageStore,
    templates: &TemplateDir,
    query: &mut ArchiveQuery,
) -> Option<Substituted> {
    let page_id = store.mapping().get(&query.type_name).copied()?;
    let page = pages.get(page_id).filter(|p| p.is_published())?;

    query.archive_posts = Some(std::mem::take(&mut query.posts));
    query.posts = vec![page.id];
    query.page_id = Some(page.id);

    Some(Substituted {
        template: templates.resolve_page(page.template.as_deref()),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::filters::Filters;
    use crate::config::test_parse_config;
    use crate::content::{Page, PageStatus, TypeRegistry};
    use crate::settings::SettingsStore;
    use std::fs;

    struct Fixture {
        _tmp: tempfile::TempDir,
        registry: TypeRegistry,
        settings: SettingsStore,
        filters: Filters,
        pages: PageStore,
        templates: TemplateDir,
    }

    fn fixture(template_files: &[&str]) -> Fixture {
        let tmp = tempfile::tempdir().unwrap();
        let template_dir = tmp.path().join("templates");
        fs::create_dir(&template_dir).unwrap();
        for f in template_files {
            fs::write(template_dir.join(f), "<html></html>").unwrap();
        }

        Fixture {
            registry: TypeRegistry::from_config(&test_parse_config(
                "[[types]]\nname = \"event\"\nhas_archive = true",
            )),
            settings: SettingsStore::open(tmp.path()).unwrap(),
            filters: Filters::default(),
            pages: PageStore::new(),
            templates: TemplateDir::new(&template_dir),
            _tmp: tmp,
        }
    }

    fn make_page(id: PageId, status: PageStatus, template: Option<&str>) -> Page {
        Page {
            id,
            type_name: "page".to_string(),
            slug: format!("p{id}"),
            title: String::new(),
            status,
            template: template.map(str::to_string),
            date: None,
            body: String::new(),
            source: format!("page/p{id}.toml").into(),
        }
    }

    #[test]
    fn test_substitution_reshapes_query() {
        let f = fixture(&["page.html"]);
        let store = ArchiveStore::new(&f.registry, &f.settings, &f.filters);
        f.pages.insert(make_page(10, PageStatus::Publish, None));
        store.assign("event", 10).unwrap();

        let mut query = ArchiveQuery::listing("event", vec![20, 21]);
        let sub = substitute(&store, &f.pages, &f.templates, &mut query).unwrap();

        assert!(sub.template.unwrap().ends_with("page.html"));
        assert_eq!(query.posts, vec![10]);
        assert_eq!(query.archive_posts, Some(vec![20, 21]));
        assert_eq!(query.page_id, Some(10));
    }

    #[test]
    fn test_no_mapping_leaves_query_untouched() {
        let f = fixture(&["page.html"]);
        let store = ArchiveStore::new(&f.registry, &f.settings, &f.filters);

        let mut query = ArchiveQuery::listing("event", vec![20, 21]);
        assert!(substitute(&store, &f.pages, &f.templates, &mut query).is_none());
        assert_eq!(query.posts, vec![20, 21]);
        assert!(query.archive_posts.is_none());
    }

    #[test]
    fn test_unpublished_mapped_page_behaves_as_unmapped() {
        let f = fixture(&["page.html"]);
        let store = ArchiveStore::new(&f.registry, &f.settings, &f.filters);
        f.pages.insert(make_page(10, PageStatus::Draft, None));
        store.assign("event", 10).unwrap();

        let mut query = ArchiveQuery::listing("event", vec![20]);
        assert!(substitute(&store, &f.pages, &f.templates, &mut query).is_none());
        assert_eq!(query.posts, vec![20]);
    }

    #[test]
    fn test_assigned_template_used() {
        let f = fixture(&["landing.html", "page.html"]);
        let store = ArchiveStore::new(&f.registry, &f.settings, &f.filters);
        f.pages
            .insert(make_page(10, PageStatus::Publish, Some("landing.html")));
        store.assign("event", 10).unwrap();

        let mut query = ArchiveQuery::listing("event", vec![]);
        let sub = substitute(&store, &f.pages, &f.templates, &mut query).unwrap();
        assert!(sub.template.unwrap().ends_with("landing.html"));
    }

    #[test]
    fn test_missing_template_falls_back_to_index() {
        let f = fixture(&["index.html"]);
        let store = ArchiveStore::new(&f.registry, &f.settings, &f.filters);
        f.pages
            .insert(make_page(10, PageStatus::Publish, Some("gone.html")));
        store.assign("event", 10).unwrap();

        let mut query = ArchiveQuery::listing("event", vec![]);
        let sub = substitute(&store, &f.pages, &f.templates, &mut query).unwrap();
        assert!(sub.template.unwrap().ends_with("index.html"));
    }
}
