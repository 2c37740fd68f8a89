//! Application state shared across handlers.

use std::sync::Arc;

use lk_printers_core::{Catalog, ShippingPolicy};

use crate::config::StorefrontConfig;
use crate::content::{ContentError, ContentStore};
use crate::data::{self, DataError, SiteData};

/// Error building application state at startup.
#[derive(Debug, thiserror::Error)]
pub enum StateError {
    #[error(transparent)]
    Data(#[from] DataError),
    #[error(transparent)]
    Content(#[from] ContentError),
}

/// Application state shared across all handlers.
///
/// Cheaply cloneable via `Arc`. Everything behind it is read-only after
/// startup.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    catalog: Catalog,
    site: SiteData,
    content: ContentStore,
}

impl AppState {
    /// Create state from already-loaded parts.
    #[must_use]
    pub fn new(
        config: StorefrontConfig,
        catalog: Catalog,
        site: SiteData,
        content: ContentStore,
    ) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                site,
                content,
            }),
        }
    }

    /// Load catalog, site data and pages from the directories named in
    /// `config`.
    ///
    /// # Errors
    ///
    /// Returns an error if the data files are missing or invalid, or the
    /// content directory cannot be read.
    pub fn load(config: StorefrontConfig) -> Result<Self, StateError> {
        let catalog = data::load_catalog(&config.data_dir)?;
        let site = data::load_site(&config.data_dir)?;
        let content = ContentStore::load(&config.content_dir)?;
        tracing::info!(pages = content.len(), "Loaded content");

        Ok(Self::new(config, catalog, site, content))
    }

    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn catalog(&self) -> &Catalog {
        &self.inner.catalog
    }

    #[must_use]
    pub fn site(&self) -> &SiteData {
        &self.inner.site
    }

    #[must_use]
    pub fn content(&self) -> &ContentStore {
        &self.inner.content
    }

    /// Shipping rules applied to every cart.
    #[must_use]
    pub fn shipping(&self) -> &ShippingPolicy {
        &self.inner.config.shipping
    }
}
