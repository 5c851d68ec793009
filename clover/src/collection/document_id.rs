use super::snowflake::SnowflakeIdGenerator;
use crate::errors::{CloverError, CloverResult, ErrorKind};
use once_cell::sync::Lazy;
use std::fmt::{Debug, Display};

pub(crate) static ID_GENERATOR: Lazy<SnowflakeIdGenerator> = Lazy::new(SnowflakeIdGenerator::new);

/// Width of a generated id. Fits every `u64` so generated ids sort as text
/// in the same order they were issued.
const GENERATED_ID_WIDTH: usize = 20;

/// Unique identifier of a document within a collection, stored under `_id`.
///
/// Ids are opaque strings. Generated ids are zero padded snowflake numbers,
/// so iterating a collection in id order visits generated ids in the order
/// they were issued. Callers may also supply their own non-empty string ids.
///
/// # Examples
///
/// ```rust
/// use clover::collection::DocumentId;
///
/// let first = DocumentId::new();
/// let second = DocumentId::new();
/// assert!(first < second);
///
/// let custom = DocumentId::create_id("todo-1").unwrap();
/// assert_eq!(custom.as_str(), "todo-1");
/// ```
#[derive(PartialEq, Eq, Ord, PartialOrd, Hash, Clone, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct DocumentId {
    id_value: String,
}

impl DocumentId {
    /// Generates a new unique id.
    pub fn new() -> Self {
        let id_value = format!("{:0width$}", ID_GENERATOR.get_id(), width = GENERATED_ID_WIDTH);
        DocumentId { id_value }
    }

    /// Wraps a caller supplied id. Empty ids are rejected.
    pub fn create_id(id_value: &str) -> CloverResult<DocumentId> {
        if id_value.is_empty() {
            log::error!("Document id can't be empty");
            return Err(CloverError::new(
                "Document id validation error: id can't be empty",
                ErrorKind::InvalidId,
            ));
        }
        Ok(DocumentId {
            id_value: id_value.to_string(),
        })
    }

    pub fn as_str(&self) -> &str {
        &self.id_value
    }
}

impl Default for DocumentId {
    fn default() -> Self {
        DocumentId::new()
    }
}

impl Debug for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "DocumentId({})", self.id_value)
    }
}

impl Display for DocumentId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.id_value)
    }
}
