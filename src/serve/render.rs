//! HTML rendering.
//!
//! Templates are plain HTML with `{{name}}` placeholders. Page bodies are
//! Markdown, converted with pulldown-cmark. When no template file exists on
//! disk, embedded defaults keep the server usable in a bare site.

use std::path::Path;

use anyhow::{Context, Result};

use crate::archive::ArchiveStore;
use crate::config::cfg;
use crate::content::{ContentType, Page};
use crate::routes::permalink;

/// Embedded fallback for single pages and items.
const DEFAULT_PAGE_HTML: &str = "\
<!doctype html>
<html>
<head><meta charset=\"utf-8\"><title>{{title}} - {{site_title}}</title></head>
<body>
<header><a href=\"/\">{{site_title}}</a></header>
<main>
<h1>{{title}}</h1>
{{content}}
{{archive_posts}}
</main>
</body>
</html>
";

/// Embedded fallback for archive listings.
const DEFAULT_ARCHIVE_HTML: &str = "\
<!doctype html>
<html>
<head><meta charset=\"utf-8\"><title>{{label}} - {{site_title}}</title></head>
<body>
<header><a href=\"/\">{{site_title}}</a></header>
<main>
<h1>{{label}}</h1>
{{posts}}
</main>
</body>
</html>
";

/// Render a single page or item.
///
/// `archive_posts` is filled when the page serves an archive: the preserved
/// listing is exposed to the template as `{{archive_posts}}`.
pub fn render_page(
    store: &ArchiveStore,
    page: &Page,
    template: Option<&Path>,
    archive_posts: Option<&[Page]>,
) -> Result<String> {
    let source = load_template(template, DEFAULT_PAGE_HTML)?;
    let listing = archive_posts
        .map(|posts| post_list_html(store, posts))
        .unwrap_or_default();

    Ok(fill(
        &source,
        &[
            ("site_title", escape(&cfg().site.title)),
            ("title", escape(page.title())),
            ("date", escape(page.date.as_deref().unwrap_or_default())),
            ("content", markdown_to_html(&page.body)),
            ("archive_posts", listing),
        ],
    ))
}

/// Render a generic archive listing.
pub fn render_archive(
    store: &ArchiveStore,
    content_type: &ContentType,
    posts: &[Page],
    template: Option<&Path>,
) -> Result<String> {
    let source = load_template(template, DEFAULT_ARCHIVE_HTML)?;

    Ok(fill(
        &source,
        &[
            ("site_title", escape(&cfg().site.title)),
            ("label", escape(&content_type.label)),
            ("posts", post_list_html(store, posts)),
        ],
    ))
}

fn load_template(path: Option<&Path>, fallback: &str) -> Result<String> {
    match path {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read template {}", path.display())),
        None => Ok(fallback.to_string()),
    }
}

fn fill(source: &str, vars: &[(&str, String)]) -> String {
    vars.iter().fold(source.to_string(), |html, (name, value)| {
        html.replace(&format!("{{{{{name}}}}}"), value)
    })
}

fn post_list_html(store: &ArchiveStore, posts: &[Page]) -> String {
    if posts.is_empty() {
        return "<p>Nothing here yet.</p>".to_string();
    }

    let mut html = String::from("<ul class=\"archive-list\">\n");
    for post in posts {
        let title = escape(post.title());
        match permalink(store, post) {
            Some(url) => {
                html.push_str(&format!(
                    "<li><a href=\"{}\">{}</a></li>\n",
                    url.to_encoded(),
                    title
                ));
            }
            None => html.push_str(&format!("<li>{title}</li>\n")),
        }
    }
    html.push_str("</ul>");
    html
}

pub fn markdown_to_html(markdown: &str) -> String {
    use pulldown_cmark::{Options, Parser, html};

    let parser = Parser::new_ext(markdown, Options::ENABLE_TABLES | Options::ENABLE_STRIKETHROUGH);
    let mut html_out = String::with_capacity(markdown.len() * 2);
    html::push_html(&mut html_out, parser);
    html_out
}

pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::archive::Filters;
    use crate::config::test_parse_config;
    use crate::content::{PageStatus, TypeRegistry};
    use crate::settings::SettingsStore;

    fn make_page(id: u64, type_name: &str, slug: &str, body: &str) -> Page {
        Page {
            id,
            type_name: type_name.to_string(),
            slug: slug.to_string(),
            title: slug.to_uppercase(),
            status: PageStatus::Publish,
            template: None,
            date: None,
            body: body.to_string(),
            source: format!("{type_name}/{slug}.toml").into(),
        }
    }

    #[test]
    fn test_render_page_embedded_default() {
        let registry = TypeRegistry::from_config(&test_parse_config(""));
        let tmp = tempfile::tempdir().unwrap();
        let settings = SettingsStore::open(tmp.path()).unwrap();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        let page = make_page(1, "page", "about", "# Hello\n\nWorld.");
        let html = render_page(&store, &page, None, None).unwrap();

        assert!(html.contains("<h1>ABOUT</h1>"));
        assert!(html.contains("<h1>Hello</h1>"));
        assert!(html.contains("<p>World.</p>"));
    }

    #[test]
    fn test_render_page_with_archive_posts() {
        let registry = TypeRegistry::from_config(&test_parse_config(
            "[[types]]\nname = \"event\"\nhas_archive = true\narchive_slug = \"events\"",
        ));
        let tmp = tempfile::tempdir().unwrap();
        let settings = SettingsStore::open(tmp.path()).unwrap();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        let page = make_page(1, "page", "all-events", "");
        let posts = vec![make_page(2, "event", "fest", "")];
        let html = render_page(&store, &page, None, Some(posts.as_slice())).unwrap();

        assert!(html.contains("href=\"/events/fest/\""));
    }

    #[test]
    fn test_render_archive_lists_posts() {
        let registry = TypeRegistry::from_config(&test_parse_config(
            "[[types]]\nname = \"event\"\nhas_archive = true\narchive_slug = \"events\"",
        ));
        let tmp = tempfile::tempdir().unwrap();
        let settings = SettingsStore::open(tmp.path()).unwrap();
        let filters = Filters::default();
        let store = ArchiveStore::new(&registry, &settings, &filters);

        let t = registry.get("event").unwrap();
        let posts = vec![make_page(2, "event", "fest", "")];
        let html = render_archive(&store, t, &posts, None).unwrap();

        assert!(html.contains("<h1>Event</h1>"));
        assert!(html.contains("href=\"/events/fest/\""));
    }

    #[test]
    fn test_escape() {
        assert_eq!(escape("a<b>&\"c\""), "a&lt;b&gt;&amp;&quot;c&quot;");
    }

    #[test]
    fn test_fill_replaces_placeholders() {
        let html = fill("<p>{{a}} {{b}}</p>", &[("a", "x".into()), ("b", "y".into())]);
        assert_eq!(html, "<p>x y</p>");
    }
}
