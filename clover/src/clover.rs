use crate::clover_builder::CloverBuilder;
use crate::clover_config::CloverConfig;
use crate::collection::{Document, DocumentId, Query};
use crate::common::{LockRegistry, FIELD_SEPARATOR};
use crate::errors::{CloverError, CloverResult, ErrorKind};
use crate::store::DocumentStore;
use std::sync::Arc;

/// An embedded document database.
///
/// `Clover` owns a set of named collections kept by a [DocumentStore].
/// Documents are inserted through the database and read, deleted or
/// updated through [Query] objects obtained from [Clover::query].
///
/// Cloning is cheap; every clone refers to the same database. The store is
/// closed by [Clover::close], or when the last clone is dropped.
///
/// # Examples
///
/// ```rust
/// use clover::Clover;
/// use clover::criteria::row;
/// use clover::doc;
///
/// # fn main() -> clover::errors::CloverResult<()> {
/// let db = Clover::builder().open()?;
/// db.create_collection("todos")?;
/// let id = db.insert_one("todos", doc!{ hello: "clover" })?;
///
/// let found = db.query("todos").filter(row("hello").eq("clover")).find_all()?;
/// assert_eq!(found.len(), 1);
/// assert_eq!(found[0].id(), Some(id));
///
/// db.close()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone)]
pub struct Clover {
    inner: Arc<CloverInner>,
}

impl Clover {
    /// Creates a new `CloverBuilder` for configuring and opening a database.
    pub fn builder() -> CloverBuilder {
        CloverBuilder::new()
    }

    pub(crate) fn new(clover_config: CloverConfig) -> CloverResult<Self> {
        let store = clover_config.document_store()?;
        Ok(Clover {
            inner: Arc::new(CloverInner {
                clover_config,
                store,
                lock_registry: LockRegistry::new(),
            }),
        })
    }

    /// Creates an empty collection.
    ///
    /// # Errors
    ///
    /// - `InvalidCollectionName` if `name` is empty or contains `.`
    /// - `CollectionAlreadyExists` if the collection exists
    pub fn create_collection(&self, name: &str) -> CloverResult<()> {
        self.inner.create_collection(name)
    }

    /// Drops a collection and all of its documents.
    pub fn drop_collection(&self, name: &str) -> CloverResult<()> {
        self.inner.drop_collection(name)
    }

    pub fn has_collection(&self, name: &str) -> CloverResult<bool> {
        self.inner.check_opened()?;
        self.inner.store.has_collection(name)
    }

    /// Names of all collections, sorted.
    pub fn list_collection_names(&self) -> CloverResult<Vec<String>> {
        self.inner.check_opened()?;
        self.inner.store.collection_names()
    }

    /// Inserts `documents` as one batch and returns their ids in order.
    ///
    /// Documents without `_id` get a generated one; a string `_id` is kept.
    /// If any document has an invalid or duplicate id nothing is inserted.
    /// The caller's documents are copied, so changing them afterwards does
    /// not affect the stored ones.
    pub fn insert(&self, name: &str, documents: Vec<Document>) -> CloverResult<Vec<DocumentId>> {
        self.inner.insert(name, documents)
    }

    pub fn insert_one(&self, name: &str, document: Document) -> CloverResult<DocumentId> {
        let ids = self.inner.insert(name, vec![document])?;
        match ids.into_iter().next() {
            Some(id) => Ok(id),
            None => {
                log::error!("Store returned no id for the inserted document in {}", name);
                Err(CloverError::new(
                    &format!("Store returned no id for the inserted document in {}", name),
                    ErrorKind::InternalError,
                ))
            }
        }
    }

    /// Starts a query over every document of the collection `name`.
    ///
    /// Never fails; a missing collection is reported when the query runs.
    pub fn query(&self, name: &str) -> Query {
        Query::new(name, self.inner.store.clone(), self.inner.lock_registry.clone())
    }

    pub fn find_by_id(&self, name: &str, id: &DocumentId) -> CloverResult<Option<Document>> {
        self.inner.check_opened()?;
        let snapshot = self.inner.store.snapshot(name)?;
        Ok(snapshot.get(id).cloned())
    }

    /// Deletes one document, returning whether it existed.
    pub fn delete_by_id(&self, name: &str, id: &DocumentId) -> CloverResult<bool> {
        self.inner.check_opened()?;
        let lock = self.inner.lock_registry.get_lock(name);
        let _guard = lock.write();
        let removed = self.inner.store.delete_documents(name, std::slice::from_ref(id))?;
        Ok(removed > 0)
    }

    /// Closes the database. Closing twice is a no-op.
    pub fn close(&self) -> CloverResult<()> {
        self.inner.close()
    }

    pub fn is_closed(&self) -> CloverResult<bool> {
        self.inner.store.is_closed()
    }

    pub fn config(&self) -> CloverConfig {
        self.inner.clover_config.clone()
    }

    pub fn store(&self) -> DocumentStore {
        self.inner.store.clone()
    }
}

struct CloverInner {
    clover_config: CloverConfig,
    store: DocumentStore,
    lock_registry: LockRegistry,
}

impl CloverInner {
    fn check_opened(&self) -> CloverResult<()> {
        if self.store.is_closed()? {
            log::error!("Clover is already closed");
            return Err(CloverError::new(
                "Clover is already closed",
                ErrorKind::StoreAlreadyClosed,
            ));
        }
        Ok(())
    }

    fn validate_collection_name(&self, name: &str) -> CloverResult<()> {
        if name.is_empty() {
            log::error!("Collection name can't be empty");
            return Err(CloverError::new(
                "Collection name can't be empty",
                ErrorKind::InvalidCollectionName,
            ));
        }

        if name.contains(FIELD_SEPARATOR) {
            log::error!("Collection name {} contains {}", name, FIELD_SEPARATOR);
            return Err(CloverError::new(
                &format!("Collection name {} can't contain {}", name, FIELD_SEPARATOR),
                ErrorKind::InvalidCollectionName,
            ));
        }
        Ok(())
    }

    fn create_collection(&self, name: &str) -> CloverResult<()> {
        self.validate_collection_name(name)?;
        self.check_opened()?;
        let lock = self.lock_registry.get_lock(name);
        let _guard = lock.write();
        self.store.create_collection(name)
    }

    fn drop_collection(&self, name: &str) -> CloverResult<()> {
        self.check_opened()?;
        {
            let lock = self.lock_registry.get_lock(name);
            let _guard = lock.write();
            self.store.drop_collection(name)?;
        }
        self.lock_registry.remove_lock(name);
        Ok(())
    }

    fn insert(&self, name: &str, documents: Vec<Document>) -> CloverResult<Vec<DocumentId>> {
        self.check_opened()?;
        let lock = self.lock_registry.get_lock(name);
        let _guard = lock.write();
        let count = documents.len();
        let ids = self.store.insert_documents(name, documents)?;
        log::debug!("Inserted {} documents into {}", count, name);
        Ok(ids)
    }

    fn close(&self) -> CloverResult<()> {
        if self.store.is_closed()? {
            return Ok(());
        }
        self.store.close()?;
        log::info!("Clover closed");
        Ok(())
    }
}

// Implementing Drop for Clover would close the store as soon as any clone
// goes away, so the inner value owns the cleanup.
impl Drop for CloverInner {
    fn drop(&mut self) {
        if let Ok(false) = self.store.is_closed() {
            log::warn!("Clover dropped without being closed, closing the store");
            let _ = self.store.close();
        }
    }
}
