use crate::collection::DocumentId;

/// Outcome of a delete or update: the ids of the affected documents.
///
/// # Examples
///
/// ```rust
/// use clover::collection::{DocumentId, WriteResult};
///
/// let result = WriteResult::new(vec![DocumentId::new()]);
/// assert_eq!(result.affected_count(), 1);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WriteResult {
    document_ids: Vec<DocumentId>,
}

impl WriteResult {
    pub fn new(document_ids: Vec<DocumentId>) -> Self {
        Self { document_ids }
    }

    /// Ids of the affected documents, in collection order.
    pub fn affected_document_ids(&self) -> &[DocumentId] {
        &self.document_ids
    }

    pub fn affected_count(&self) -> usize {
        self.document_ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.document_ids.is_empty()
    }
}

impl IntoIterator for WriteResult {
    type Item = DocumentId;
    type IntoIter = std::vec::IntoIter<DocumentId>;

    fn into_iter(self) -> Self::IntoIter {
        self.document_ids.into_iter()
    }
}
