//! File watcher: rescans content on change and prunes stale mappings.

use std::thread::JoinHandle;
use std::time::Duration;

use anyhow::Result;
use crossbeam::channel::{self, Receiver, RecvTimeoutError};
use notify::{EventKind, RecursiveMode, Watcher, event::ModifyKind};

use crate::archive::{ArchiveStore, maintain};
use crate::config::{cfg, reload_config};
use crate::content::{TypeRegistry, scan_content};
use crate::{debug, log};

use super::SiteState;

const DEBOUNCE_MS: u64 = 300;

pub(super) fn spawn(
    state: std::sync::Arc<SiteState>,
    shutdown_rx: Receiver<()>,
) -> JoinHandle<()> {
    std::thread::spawn(move || {
        if let Err(e) = watch_loop(&state, &shutdown_rx) {
            log!("watch"; "error: {e}");
        }
    })
}

fn watch_loop(state: &SiteState, shutdown_rx: &Receiver<()>) -> Result<()> {
    let (tx, rx) = channel::unbounded();
    let mut watcher = notify::recommended_watcher(move |event| {
        let _ = tx.send(event);
    })?;

    let config = cfg();
    if config.content.dir.is_dir() {
        watcher.watch(&config.content.dir, RecursiveMode::Recursive)?;
    }
    watcher.watch(&config.config_path, RecursiveMode::NonRecursive)?;
    log!("watch"; "watching {}", config.content.dir.display());

    loop {
        if shutdown_rx.try_recv().is_ok() {
            return Ok(());
        }

        let event = match rx.recv_timeout(Duration::from_millis(200)) {
            Ok(event) => event,
            Err(RecvTimeoutError::Timeout) => continue,
            Err(RecvTimeoutError::Disconnected) => return Ok(()),
        };

        let mut relevant = match event {
            Ok(event) => is_relevant(&event),
            Err(e) => {
                debug!("watch"; "notify error: {e}");
                false
            }
        };

        // Debounce: keep draining until the burst settles
        while let Ok(event) = rx.recv_timeout(Duration::from_millis(DEBOUNCE_MS)) {
            if let Ok(event) = event {
                relevant |= is_relevant(&event);
            }
        }

        if relevant {
            refresh(state)?;
        }
    }
}

fn is_relevant(event: &notify::Event) -> bool {
    // mtime/atime/chmod noise may trigger endless rescan loops
    if matches!(event.kind, EventKind::Modify(ModifyKind::Metadata(_))) {
        return false;
    }
    if !matches!(
        event.kind,
        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
    ) {
        return false;
    }
    event
        .paths
        .iter()
        .any(|p| p.extension().is_some_and(|e| e == "toml"))
}

/// Reload the config if it changed, rescan content, and drop mapping
/// entries whose page disappeared or was unpublished.
fn refresh(state: &SiteState) -> Result<()> {
    match reload_config() {
        Ok(true) => log!("watch"; "config reloaded"),
        Ok(false) => {}
        Err(e) => log!("watch"; "config reload failed: {e}"),
    }

    let config = cfg();
    let registry = TypeRegistry::from_config(&config);
    let pages = scan_content(&config, &registry)?;
    log!("watch"; "rescanned {} entries", pages.len());
    state.pages.replace_all(pages);

    let store = ArchiveStore::new(&registry, &state.settings, &state.filters);
    maintain::prune(&store, &state.pages)
}
