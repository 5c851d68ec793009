use crate::collection::{Document, DocumentId};
use im::OrdMap;

/// A consistent, immutable view of one collection's documents.
///
/// A snapshot is taken at a single store version and never changes, no
/// matter what is written to the collection afterwards. Cloning is O(1);
/// documents are shared with the store until either side changes them.
///
/// Iteration visits documents in ascending [DocumentId] order.
#[derive(Clone, Debug)]
pub struct Snapshot {
    collection: String,
    version: u64,
    documents: OrdMap<DocumentId, Document>,
}

impl Snapshot {
    pub fn new(collection: &str, version: u64, documents: OrdMap<DocumentId, Document>) -> Self {
        Snapshot {
            collection: collection.to_string(),
            version,
            documents,
        }
    }

    pub fn collection_name(&self) -> &str {
        &self.collection
    }

    /// Store version of the collection this snapshot was taken at.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    pub fn get(&self, id: &DocumentId) -> Option<&Document> {
        self.documents.get(id)
    }

    pub fn contains(&self, id: &DocumentId) -> bool {
        self.documents.contains_key(id)
    }

    /// Iterates `(id, document)` pairs in id order.
    pub fn iter(&self) -> impl Iterator<Item = (&DocumentId, &Document)> {
        self.documents.iter()
    }

    pub fn documents(&self) -> impl Iterator<Item = &Document> {
        self.documents.values()
    }
}
