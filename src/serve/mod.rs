//! Development server.
//!
//! Serves the scanned content over HTTP: pages at `/{slug}/`, archive
//! listings at `/{archive_slug}/`, single items below the archive. Pages
//! mapped as archive pages redirect to their archive URL and take over the
//! archive rendering there.

mod render;
mod response;
mod watch;

use std::net::SocketAddr;
use std::sync::Arc;
use std::thread::JoinHandle;

use anyhow::Result;
use crossbeam::channel;
use tiny_http::{Request, Server};

use crate::archive::{
    ArchiveQuery, ArchiveStore, Filters, Resolution, maintain, resolve, substitute,
};
use crate::config::{SiteConfig, cfg};
use crate::content::{PageId, PageStore, TypeRegistry, scan_content};
use crate::core::{UrlPath, register_server};
use crate::log;
use crate::routes::{Route, Router};
use crate::settings::SettingsStore;
use crate::template::TemplateDir;

/// Maximum number of port binding attempts.
const MAX_PORT_RETRIES: u16 = 10;

/// Shared server state: loaded content, persisted settings, filter chains.
pub struct SiteState {
    pub pages: PageStore,
    pub settings: SettingsStore,
    pub filters: Filters,
}

impl SiteState {
    /// Scan content and open settings, then drop mapping entries that no
    /// longer point at a published page.
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let registry = TypeRegistry::from_config(config);
        let pages = PageStore::new();
        pages.replace_all(scan_content(config, &registry)?);
        log!("serve"; "loaded {} entries", pages.len());

        let state = Self {
            pages,
            settings: SettingsStore::open(&config.root)?,
            filters: Filters::default(),
        };

        let store = ArchiveStore::new(&registry, &state.settings, &state.filters);
        maintain::prune(&store, &state.pages)?;

        Ok(state)
    }
}

/// Run the development server (blocking until shutdown).
pub fn run() -> Result<()> {
    let config = cfg();
    let state = Arc::new(SiteState::load(&config)?);

    let (server, addr) = bind_with_retry(config.serve.interface, config.serve.port)?;
    let server = Arc::new(server);

    let (shutdown_tx, shutdown_rx) = channel::unbounded::<()>();
    register_server(Arc::clone(&server), shutdown_tx);
    log!("serve"; "http://{}", addr);

    let watcher = config
        .serve
        .watch
        .then(|| watch::spawn(Arc::clone(&state), shutdown_rx));

    run_request_loop(&server, &state);
    wait_for_shutdown(watcher);
    Ok(())
}

/// Bind to the specified interface and port, with automatic port retry.
fn bind_with_retry(interface: std::net::IpAddr, base_port: u16) -> Result<(Server, SocketAddr)> {
    for offset in 0..MAX_PORT_RETRIES {
        let port = base_port.saturating_add(offset);
        let addr = SocketAddr::new(interface, port);

        match Server::http(addr) {
            Ok(server) => {
                if offset > 0 {
                    log!("serve"; "port {} in use, using {} instead", base_port, port);
                }
                return Ok((server, addr));
            }
            Err(_) if offset + 1 < MAX_PORT_RETRIES => continue,
            Err(e) => {
                return Err(anyhow::anyhow!(
                    "Failed to bind after {} attempts (ports {}-{}): {}",
                    MAX_PORT_RETRIES,
                    base_port,
                    port,
                    e
                ));
            }
        }
    }
    unreachable!()
}

fn run_request_loop(server: &Server, state: &Arc<SiteState>) {
    // Thread pool keeps slow renders from blocking other requests
    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(4)
        .build()
        .expect("failed to create thread pool");

    for request in server.incoming_requests() {
        let state = Arc::clone(state);
        pool.spawn(move || {
            if let Err(e) = handle_request(request, &state) {
                log!("serve"; "request error: {e}");
            }
        });
    }
}

/// Handle a single HTTP request.
fn handle_request(request: Request, state: &SiteState) -> Result<()> {
    if crate::core::is_shutdown() {
        return response::respond_unavailable(request);
    }

    let config = cfg();
    let registry = TypeRegistry::from_config(&config);
    let templates = TemplateDir::new(&config.content.templates);
    let archive = ArchiveStore::new(&registry, &state.settings, &state.filters);
    let router = Router::new(&registry, &state.pages, config.site.front_page);

    let url = UrlPath::from_browser(request.url());
    match router.resolve(&url) {
        Route::Page(id) => match resolve(&archive, id) {
            Resolution::Redirect(target) => {
                response::respond_redirect(request, &target.to_encoded())
            }
            Resolution::Continue => respond_entry(request, state, &archive, &templates, id),
        },
        Route::Item { id, .. } => respond_entry(request, state, &archive, &templates, id),
        Route::Archive(type_name) => {
            respond_archive(request, state, &archive, &registry, &templates, &type_name)
        }
        Route::NotFound => response::respond_not_found(request),
    }
}

/// Render a single page or item at its own URL.
fn respond_entry(
    request: Request,
    state: &SiteState,
    archive: &ArchiveStore,
    templates: &TemplateDir,
    id: PageId,
) -> Result<()> {
    let Some(page) = state.pages.get(id).filter(|p| p.is_published()) else {
        return response::respond_not_found(request);
    };

    let template = templates.resolve_page(page.template.as_deref());
    match render::render_page(archive, &page, template.as_deref(), None) {
        Ok(html) => response::respond_html(request, 200, html),
        Err(e) => response::respond_error(request, &e),
    }
}

/// Render an archive listing, substituting the mapped page when one exists.
fn respond_archive(
    request: Request,
    state: &SiteState,
    archive: &ArchiveStore,
    registry: &TypeRegistry,
    templates: &TemplateDir,
    type_name: &str,
) -> Result<()> {
    let Some(content_type) = registry.get(type_name) else {
        return response::respond_not_found(request);
    };

    let posts = state.pages.published_of_type(type_name);
    let mut query = ArchiveQuery::listing(type_name, posts.iter().map(|p| p.id).collect());

    let result = match substitute(archive, &state.pages, templates, &mut query) {
        Some(sub) => {
            let Some(page) = query.page_id.and_then(|id| state.pages.get(id)) else {
                return response::respond_not_found(request);
            };
            render::render_page(archive, &page, sub.template.as_deref(), Some(posts.as_slice()))
        }
        None => {
            let template = templates.resolve_archive(type_name);
            render::render_archive(archive, content_type, &posts, template.as_deref())
        }
    };

    match result {
        Ok(html) => response::respond_html(request, 200, html),
        Err(e) => response::respond_error(request, &e),
    }
}

/// Wait for the watcher to shut down gracefully (max 2 seconds).
fn wait_for_shutdown(handle: Option<JoinHandle<()>>) {
    let Some(handle) = handle else { return };

    for _ in 0..40 {
        if handle.is_finished() {
            let _ = handle.join();
            return;
        }
        std::thread::sleep(std::time::Duration::from_millis(50));
    }
}
