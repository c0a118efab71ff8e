//! Immutable content snapshot plus the shared, swappable handle to it.
//!
//! Request handlers clone an `Arc<Catalog>` out of [`SharedCatalog`] and
//! work on that snapshot; a reload builds a complete new catalog and only
//! then replaces the pointer, so readers never observe a partial state.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::info;

use crate::config::{ContentSource, ServerConfig};
use crate::content::loader::load_document;
use crate::content::{ContentDocument, ContentStore};
use crate::prompts::PromptCatalog;
use crate::Result;

/// Validated content store together with its compiled prompts.
#[derive(Debug, Clone)]
pub struct Catalog {
    store: ContentStore,
    prompts: PromptCatalog,
    source: ContentSource,
}

impl Catalog {
    /// Compile `document` into a catalog.
    ///
    /// # Errors
    ///
    /// Returns `AppError::DuplicatePrompt` when two prompts collapse to the
    /// same external name.
    pub fn build(
        document: ContentDocument,
        source: ContentSource,
        config: &ServerConfig,
    ) -> Result<Self> {
        let store = ContentStore::with_default_tip_category(document, &config.default_tip_category);
        let prompts = PromptCatalog::from_store(&store)?;
        Ok(Self {
            store,
            prompts,
            source,
        })
    }

    /// Load the document behind `source` and compile it.
    ///
    /// # Errors
    ///
    /// Propagates loader, schema and registration failures.
    pub fn load(source: &ContentSource, config: &ServerConfig) -> Result<Self> {
        let document = load_document(source)?;
        let catalog = Self::build(document, source.clone(), config)?;
        info!(
            %source,
            tip_categories = catalog.store.tip_categories().len(),
            prompts = catalog.prompts.len(),
            "content catalog ready"
        );
        Ok(catalog)
    }

    /// Tips and messages.
    #[must_use]
    pub fn store(&self) -> &ContentStore {
        &self.store
    }

    /// Registered prompts.
    #[must_use]
    pub fn prompts(&self) -> &PromptCatalog {
        &self.prompts
    }

    /// Where this catalog was loaded from.
    #[must_use]
    pub fn source(&self) -> &ContentSource {
        &self.source
    }
}

/// Cheaply clonable handle to the current [`Catalog`].
///
/// Uses `std::sync::RwLock` so the synchronous file-watcher callback can
/// swap catalogs without an async context.
#[derive(Debug, Clone)]
pub struct SharedCatalog {
    current: Arc<RwLock<Arc<Catalog>>>,
}

impl SharedCatalog {
    /// Wrap an initial catalog.
    #[must_use]
    pub fn new(catalog: Catalog) -> Self {
        Self {
            current: Arc::new(RwLock::new(Arc::new(catalog))),
        }
    }

    /// The catalog in effect right now.
    #[must_use]
    pub fn snapshot(&self) -> Arc<Catalog> {
        let guard = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&guard)
    }

    /// Replace the current catalog.
    pub fn replace(&self, catalog: Catalog) {
        let mut guard = self.current.write().unwrap_or_else(PoisonError::into_inner);
        *guard = Arc::new(catalog);
    }

    /// Rebuild from `source` and swap it in on success.
    ///
    /// On failure the previous catalog stays in effect.
    ///
    /// # Errors
    ///
    /// Returns the load or registration error that prevented the swap.
    pub fn reload(&self, source: &ContentSource, config: &ServerConfig) -> Result<()> {
        let catalog = Catalog::load(source, config)?;
        self.replace(catalog);
        Ok(())
    }
}
