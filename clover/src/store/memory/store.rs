use crate::collection::{Document, DocumentId};
use crate::common::{atomic, Atomic, LockedAccess, STORE_VERSION};
use crate::errors::{CloverError, CloverResult, ErrorKind};
use crate::store::{DocumentStoreProvider, Snapshot};
use dashmap::DashMap;
use im::OrdMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

/// Current state of one collection. Every write installs a new map and
/// bumps the version; snapshots keep the map they were given.
#[derive(Default)]
struct VersionedCollection {
    version: u64,
    documents: OrdMap<DocumentId, Document>,
}

/// In-memory implementation of [DocumentStoreProvider].
///
/// # Characteristics
/// - Each collection is an `im::OrdMap` keyed by [DocumentId], so taking a
///   snapshot is an O(1) clone that later writes never disturb.
/// - Writers build the next map from the current one and swap it in under
///   the collection's lock, which makes every batch all-or-nothing.
/// - Nothing is persisted; closing the store discards every collection.
///
/// # Usage
/// ```rust
/// use clover::doc;
/// use clover::store::{DocumentStore, DocumentStoreProvider};
/// use clover::store::memory::InMemoryStore;
///
/// let store = DocumentStore::new(InMemoryStore::new());
/// store.open().unwrap();
/// store.create_collection("todos").unwrap();
/// store.insert_documents("todos", vec![doc!{ title: "a" }]).unwrap();
/// assert_eq!(store.snapshot("todos").unwrap().len(), 1);
/// ```
#[derive(Clone)]
pub struct InMemoryStore {
    inner: Arc<InMemoryStoreInner>,
}

impl InMemoryStore {
    pub fn new() -> InMemoryStore {
        InMemoryStore {
            inner: Arc::new(InMemoryStoreInner::new()),
        }
    }
}

impl Default for InMemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentStoreProvider for InMemoryStore {
    fn open(&self) -> CloverResult<()> {
        self.inner.open()
    }

    fn close(&self) -> CloverResult<()> {
        self.inner.close()
    }

    fn is_closed(&self) -> CloverResult<bool> {
        Ok(self.inner.closed.load(Ordering::Relaxed))
    }

    fn has_collection(&self, name: &str) -> CloverResult<bool> {
        self.inner.check_opened()?;
        Ok(self.inner.collections.contains_key(name))
    }

    fn create_collection(&self, name: &str) -> CloverResult<()> {
        self.inner.create_collection(name)
    }

    fn drop_collection(&self, name: &str) -> CloverResult<()> {
        self.inner.drop_collection(name)
    }

    fn collection_names(&self) -> CloverResult<Vec<String>> {
        self.inner.check_opened()?;
        let mut names: Vec<String> = self
            .inner
            .collections
            .iter()
            .map(|entry| entry.key().clone())
            .collect();
        names.sort();
        Ok(names)
    }

    fn snapshot(&self, name: &str) -> CloverResult<Snapshot> {
        let collection = self.inner.collection(name)?;
        Ok(collection.read_with(|c| Snapshot::new(name, c.version, c.documents.clone())))
    }

    fn insert_documents(&self, name: &str, documents: Vec<Document>) -> CloverResult<Vec<DocumentId>> {
        self.inner.insert_documents(name, documents)
    }

    fn delete_documents(&self, name: &str, ids: &[DocumentId]) -> CloverResult<usize> {
        self.inner.delete_documents(name, ids)
    }

    fn replace_documents(&self, name: &str, documents: Vec<Document>) -> CloverResult<usize> {
        self.inner.replace_documents(name, documents)
    }

    fn store_version(&self) -> CloverResult<String> {
        Ok(STORE_VERSION.to_string())
    }
}

struct InMemoryStoreInner {
    closed: AtomicBool,
    collections: DashMap<String, Atomic<VersionedCollection>>,
}

impl InMemoryStoreInner {
    fn new() -> InMemoryStoreInner {
        InMemoryStoreInner {
            closed: AtomicBool::from(false),
            collections: DashMap::new(),
        }
    }

    fn open(&self) -> CloverResult<()> {
        self.closed.store(false, Ordering::Relaxed);
        log::info!("In-memory store opened");
        Ok(())
    }

    fn close(&self) -> CloverResult<()> {
        if self.closed.swap(true, Ordering::Relaxed) {
            return Ok(());
        }
        self.collections.clear();
        log::info!("In-memory store closed");
        Ok(())
    }

    fn check_opened(&self) -> CloverResult<()> {
        if self.closed.load(Ordering::Relaxed) {
            log::error!("In-memory store is already closed");
            return Err(CloverError::new(
                "In-memory store is already closed",
                ErrorKind::StoreAlreadyClosed,
            ));
        }
        Ok(())
    }

    fn collection(&self, name: &str) -> CloverResult<Atomic<VersionedCollection>> {
        self.check_opened()?;
        match self.collections.get(name) {
            Some(entry) => Ok(entry.value().clone()),
            None => {
                log::error!("Collection {} not found", name);
                Err(CloverError::new(
                    &format!("Collection {} not found", name),
                    ErrorKind::CollectionNotFound,
                ))
            }
        }
    }

    fn create_collection(&self, name: &str) -> CloverResult<()> {
        self.check_opened()?;
        match self.collections.entry(name.to_string()) {
            dashmap::mapref::entry::Entry::Occupied(_) => {
                log::error!("Collection {} already exists", name);
                Err(CloverError::new(
                    &format!("Collection {} already exists", name),
                    ErrorKind::CollectionAlreadyExists,
                ))
            }
            dashmap::mapref::entry::Entry::Vacant(entry) => {
                entry.insert(atomic(VersionedCollection::default()));
                log::info!("Collection {} created", name);
                Ok(())
            }
        }
    }

    fn drop_collection(&self, name: &str) -> CloverResult<()> {
        self.check_opened()?;
        match self.collections.remove(name) {
            Some(_) => {
                log::info!("Collection {} dropped", name);
                Ok(())
            }
            None => {
                log::error!("Collection {} not found", name);
                Err(CloverError::new(
                    &format!("Collection {} not found", name),
                    ErrorKind::CollectionNotFound,
                ))
            }
        }
    }

    fn insert_documents(&self, name: &str, documents: Vec<Document>) -> CloverResult<Vec<DocumentId>> {
        let collection = self.collection(name)?;
        collection.write_with(|current| {
            let mut next = current.documents.clone();
            let mut ids = Vec::with_capacity(documents.len());

            for mut document in documents {
                let id = document.ensure_id()?;
                if next.contains_key(&id) {
                    log::error!("Document id {} already exists in collection {}", id, name);
                    return Err(CloverError::new(
                        &format!("Document id {} already exists in collection {}", id, name),
                        ErrorKind::DuplicateId,
                    ));
                }
                next.insert(id.clone(), document);
                ids.push(id);
            }

            current.documents = next;
            current.version += 1;
            Ok(ids)
        })
    }

    fn delete_documents(&self, name: &str, ids: &[DocumentId]) -> CloverResult<usize> {
        let collection = self.collection(name)?;
        Ok(collection.write_with(|current| {
            let mut next = current.documents.clone();
            let removed = ids.iter().filter(|id| next.remove(*id).is_some()).count();
            if removed > 0 {
                current.documents = next;
                current.version += 1;
            }
            removed
        }))
    }

    fn replace_documents(&self, name: &str, documents: Vec<Document>) -> CloverResult<usize> {
        let collection = self.collection(name)?;
        collection.write_with(|current| {
            let mut next = current.documents.clone();
            let mut replaced = 0;

            for document in documents {
                let Some(id) = document.id() else {
                    log::error!("Can't replace a document without an id in collection {}", name);
                    return Err(CloverError::new(
                        &format!("Can't replace a document without an id in collection {}", name),
                        ErrorKind::InvalidId,
                    ));
                };
                if next.contains_key(&id) {
                    next.insert(id, document);
                    replaced += 1;
                }
            }

            if replaced > 0 {
                current.documents = next;
                current.version += 1;
            }
            Ok(replaced)
        })
    }
}
