//! Configuration management for a Clover database.

use crate::errors::{CloverError, CloverResult, ErrorKind};
use crate::store::memory::InMemoryStore;
use crate::store::DocumentStore;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, OnceLock};

/// Configuration of a Clover database.
///
/// Holds the [DocumentStore] backing the database. A store may be loaded
/// at most once and only before the database is opened; when none is
/// loaded, [CloverConfig::auto_configure] installs an [InMemoryStore].
///
/// Cloning is cheap and every clone shares the same settings.
#[derive(Clone)]
pub struct CloverConfig {
    inner: Arc<CloverConfigInner>,
}

impl Default for CloverConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl CloverConfig {
    pub fn new() -> Self {
        CloverConfig {
            inner: Arc::new(CloverConfigInner::new()),
        }
    }

    /// Sets the store backing the database.
    pub fn load_store(&self, store: DocumentStore) -> CloverResult<()> {
        self.inner.load_store(store)
    }

    /// Returns the configured store.
    pub fn document_store(&self) -> CloverResult<DocumentStore> {
        self.inner.document_store()
    }

    /// Installs the in-memory store if no store was loaded.
    pub fn auto_configure(&self) -> CloverResult<()> {
        self.inner.auto_configure()
    }

    pub fn is_configured(&self) -> bool {
        self.inner.configured.load(Ordering::Relaxed)
    }

    /// Opens the store and freezes the configuration.
    pub(crate) fn initialize(&self) -> CloverResult<()> {
        self.inner.initialize()
    }
}

struct CloverConfigInner {
    configured: AtomicBool,
    store: OnceLock<DocumentStore>,
}

impl CloverConfigInner {
    fn new() -> Self {
        CloverConfigInner {
            configured: AtomicBool::from(false),
            store: OnceLock::new(),
        }
    }

    fn load_store(&self, store: DocumentStore) -> CloverResult<()> {
        if self.configured.load(Ordering::Relaxed) {
            log::error!("Store cannot be changed after initialization");
            return Err(CloverError::new(
                "Store cannot be changed after initialization",
                ErrorKind::InvalidOperation,
            ));
        }

        if self.store.set(store).is_err() {
            log::error!("A store is already loaded");
            return Err(CloverError::new(
                "A store is already loaded; only one store is supported",
                ErrorKind::InvalidOperation,
            ));
        }
        Ok(())
    }

    fn document_store(&self) -> CloverResult<DocumentStore> {
        match self.store.get() {
            Some(store) => Ok(store.clone()),
            None => {
                log::error!("No store is configured");
                Err(CloverError::new(
                    "No store is configured; load a store or auto configure",
                    ErrorKind::StoreNotInitialized,
                ))
            }
        }
    }

    fn auto_configure(&self) -> CloverResult<()> {
        if self.store.get().is_none() {
            log::debug!("No store loaded, using the in-memory store");
            // a concurrent load wins; either way a store is set afterwards
            let _ = self.store.set(DocumentStore::new(InMemoryStore::new()));
        }
        Ok(())
    }

    fn initialize(&self) -> CloverResult<()> {
        let store = self.document_store()?;
        store.open()?;
        self.configured.store(true, Ordering::Relaxed);
        log::info!("Clover initialized with store {}", store.store_version()?);
        Ok(())
    }
}
