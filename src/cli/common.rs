//! Shared command setup.

use anyhow::Result;

use crate::archive::{ArchiveStore, Filters};
use crate::config::SiteConfig;
use crate::content::{PageStore, TypeRegistry, scan_content};
use crate::settings::SettingsStore;

/// Everything a command needs: registered types, scanned content, settings.
pub struct Host {
    pub registry: TypeRegistry,
    pub pages: PageStore,
    pub settings: SettingsStore,
    pub filters: Filters,
}

impl Host {
    pub fn load(config: &SiteConfig) -> Result<Self> {
        let registry = TypeRegistry::from_config(config);
        let pages = PageStore::new();
        pages.replace_all(scan_content(config, &registry)?);

        Ok(Self {
            registry,
            pages,
            settings: SettingsStore::open(&config.root)?,
            filters: Filters::default(),
        })
    }

    pub fn archive(&self) -> ArchiveStore<'_> {
        ArchiveStore::new(&self.registry, &self.settings, &self.filters)
    }
}
