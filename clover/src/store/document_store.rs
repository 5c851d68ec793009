use crate::collection::{Document, DocumentId};
use crate::errors::CloverResult;
use crate::store::Snapshot;
use std::ops::Deref;
use std::sync::Arc;

/// Boundary between the query engine and the storage backend.
///
/// # Purpose
/// A provider keeps named collections of documents and hands out
/// immutable [Snapshot]s of them. Every mutating call is applied as one
/// batch: it either succeeds completely or leaves the collection as it was.
///
/// # Contract
/// - `snapshot` returns a caller-owned view; later writes must not change it.
/// - `insert_documents` assigns an id to every document lacking `_id` and
///   rejects the whole batch on an invalid or duplicate id.
/// - `delete_documents` and `replace_documents` skip ids that are no
///   longer present and report how many documents they touched.
/// - Every call after `close` fails with `StoreAlreadyClosed`.
///
/// # Thread Safety
/// Implementers must be `Send + Sync`. Callers serialize writers per
/// collection, but readers may run concurrently with a writer.
pub trait DocumentStoreProvider: Send + Sync {
    /// Opens the store. Must be called before any other operation.
    fn open(&self) -> CloverResult<()>;

    /// Closes the store and releases its collections. Closing twice is a
    /// no-op.
    fn close(&self) -> CloverResult<()>;

    fn is_closed(&self) -> CloverResult<bool>;

    fn has_collection(&self, name: &str) -> CloverResult<bool>;

    /// Creates an empty collection. Fails if it already exists.
    fn create_collection(&self, name: &str) -> CloverResult<()>;

    /// Removes a collection and all its documents. Fails if it is missing.
    fn drop_collection(&self, name: &str) -> CloverResult<()>;

    /// Names of all collections, sorted.
    fn collection_names(&self) -> CloverResult<Vec<String>>;

    /// Captures the current documents of a collection.
    fn snapshot(&self, name: &str) -> CloverResult<Snapshot>;

    /// Inserts a batch of documents and returns their ids in input order.
    fn insert_documents(&self, name: &str, documents: Vec<Document>) -> CloverResult<Vec<DocumentId>>;

    /// Deletes a batch of documents by id.
    fn delete_documents(&self, name: &str, ids: &[DocumentId]) -> CloverResult<usize>;

    /// Replaces stored documents with the given ones, matched by `_id`.
    fn replace_documents(&self, name: &str, documents: Vec<Document>) -> CloverResult<usize>;

    /// Human readable backend name and version.
    fn store_version(&self) -> CloverResult<String>;
}

/// Shared handle to a [DocumentStoreProvider].
///
/// Cloning is cheap; every clone talks to the same backend.
#[derive(Clone)]
pub struct DocumentStore {
    inner: Arc<dyn DocumentStoreProvider>,
}

impl DocumentStore {
    pub fn new<T: DocumentStoreProvider + 'static>(inner: T) -> Self {
        DocumentStore { inner: Arc::new(inner) }
    }
}

impl Deref for DocumentStore {
    type Target = Arc<dyn DocumentStoreProvider>;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}
