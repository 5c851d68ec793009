use crate::clover::Clover;
use crate::clover_config::CloverConfig;
use crate::errors::{CloverError, CloverResult};
use crate::store::DocumentStore;

/// Builder for opening a [Clover] database.
///
/// Configuration errors are recorded as they happen and the first one is
/// returned from [CloverBuilder::open].
///
/// # Examples
///
/// ```rust
/// use clover::Clover;
/// use clover::store::DocumentStore;
/// use clover::store::memory::InMemoryStore;
///
/// let db = Clover::builder()
///     .load_store(DocumentStore::new(InMemoryStore::new()))
///     .open()
///     .unwrap();
/// assert!(!db.is_closed().unwrap());
/// ```
#[derive(Default)]
pub struct CloverBuilder {
    error: Option<CloverError>,
    clover_config: CloverConfig,
}

impl CloverBuilder {
    pub fn new() -> Self {
        CloverBuilder {
            error: None,
            clover_config: CloverConfig::new(),
        }
    }

    /// Uses `store` instead of the default in-memory store.
    pub fn load_store(mut self, store: DocumentStore) -> Self {
        if self.error.is_none() {
            if let Err(e) = self.clover_config.load_store(store) {
                self.error = Some(e);
            }
        }
        self
    }

    /// Opens the database.
    pub fn open(self) -> CloverResult<Clover> {
        if let Some(error) = self.error {
            return Err(error);
        }
        self.clover_config.auto_configure()?;
        self.clover_config.initialize()?;
        Clover::new(self.clover_config)
    }
}
