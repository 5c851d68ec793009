use im::OrdMap;
use itertools::Itertools;
use smallvec::SmallVec;

use crate::collection::document_id::DocumentId;
use crate::common::{Value, DOC_ID, FIELD_SEPARATOR, RESERVED_FIELDS};
use crate::errors::{CloverError, CloverResult, ErrorKind};
use std::cmp::Ordering;
use std::fmt::{Debug, Display};

pub type FieldVec = SmallVec<[String; 8]>;

/// A schemaless record made of string keys and [Value]s.
///
/// Nested values are addressed with dotted paths: `doc.get("a.b.c")` walks
/// into the document stored under `a`, then the one under `b`, and returns
/// the value under `c`. Segments are split on `.` without any escaping, so
/// empty segments are ordinary keys (`".x"` addresses key `x` inside the
/// document stored under the empty key).
///
/// The map is an `im::OrdMap`, so cloning a document is O(1) and snapshots
/// of a collection can be handed out without copying their documents.
///
/// # Examples
///
/// ```rust
/// use clover::collection::Document;
/// use clover::common::Value;
///
/// let mut doc = Document::new();
/// doc.set("location.address.zip", 10001);
/// assert_eq!(doc.get("location.address.zip"), Some(&Value::from(10001)));
/// assert!(doc.has("location.address"));
/// assert!(!doc.has("location.city"));
/// ```
#[derive(Clone, Eq, PartialEq, Default, serde::Deserialize, serde::Serialize)]
#[serde(transparent)]
pub struct Document {
    data: OrdMap<String, Value>,
}

impl Document {
    /// Creates a new empty document.
    pub fn new() -> Self {
        Document {
            data: OrdMap::new(),
        }
    }

    /// Sets the value at `path`, creating intermediate documents as needed.
    ///
    /// An intermediate segment that currently holds a non-document value is
    /// replaced by a new document. Setting never fails.
    pub fn set<T: Into<Value>>(&mut self, path: &str, value: T) {
        let segments: Vec<&str> = path.split(FIELD_SEPARATOR).collect();
        self.deep_set(&segments, value.into());
    }

    /// Returns the value at `path`, or `None` when any segment is missing or
    /// an intermediate value is not a document.
    ///
    /// An explicit [Value::Null] is returned as `Some`.
    pub fn get(&self, path: &str) -> Option<&Value> {
        let mut segments = path.split(FIELD_SEPARATOR);
        // split always yields at least one segment
        let first = segments.next()?;
        let mut current = self.data.get(first)?;
        for segment in segments {
            match current {
                Value::Document(doc) => current = doc.data.get(segment)?,
                _ => return None,
            }
        }
        Some(current)
    }

    /// Whether a value, including an explicit null, exists at `path`.
    pub fn has(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Removes and returns the value at `path`.
    ///
    /// Parent documents are left in place even when they become empty.
    pub fn remove(&mut self, path: &str) -> Option<Value> {
        let segments: Vec<&str> = path.split(FIELD_SEPARATOR).collect();
        self.deep_remove(&segments)
    }

    /// Returns the document's id, if `_id` holds a non-empty string.
    pub fn id(&self) -> Option<DocumentId> {
        match self.data.get(DOC_ID) {
            Some(Value::String(id)) => DocumentId::create_id(id).ok(),
            _ => None,
        }
    }

    pub fn has_id(&self) -> bool {
        self.id().is_some()
    }

    /// Returns the document's id, generating and storing one if `_id` is
    /// absent.
    ///
    /// Fails with `InvalidId` when `_id` holds anything but a non-empty
    /// string.
    pub fn ensure_id(&mut self) -> CloverResult<DocumentId> {
        match self.data.get(DOC_ID) {
            None => {
                let id = DocumentId::new();
                self.data.insert(DOC_ID.to_string(), Value::String(id.to_string()));
                Ok(id)
            }
            Some(Value::String(id)) => DocumentId::create_id(id),
            Some(other) => {
                log::error!("Document id must be a string, found {}", other.kind_name());
                Err(CloverError::new(
                    &format!("Document id must be a string, found {}", other.kind_name()),
                    ErrorKind::InvalidId,
                ))
            }
        }
    }

    /// Returns the dotted paths of every leaf value, excluding `_id`.
    ///
    /// Empty nested documents are reported as leaves.
    pub fn fields(&self) -> FieldVec {
        self.get_fields_internal("", true)
    }

    /// Number of top level keys, `_id` included.
    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Iterates top level entries in key order.
    pub fn iter(&self) -> im::ordmap::Iter<'_, String, Value> {
        self.data.iter()
    }

    /// Deep merges `other` into this document.
    ///
    /// Keys present in both as documents are merged recursively. Every other
    /// key from `other` overwrites the value here.
    pub fn merge(&mut self, other: &Document) {
        for (key, value) in other.data.iter() {
            match (self.data.get(key), value) {
                (Some(Value::Document(existing)), Value::Document(incoming)) => {
                    let mut merged = existing.clone();
                    merged.merge(incoming);
                    self.data.insert(key.clone(), Value::Document(merged));
                }
                _ => {
                    self.data.insert(key.clone(), value.clone());
                }
            }
        }
    }

    pub(crate) fn sort_cmp(&self, other: &Document) -> Ordering {
        for ((k1, v1), (k2, v2)) in self.data.iter().zip(other.data.iter()) {
            let ordering = k1.cmp(k2).then_with(|| v1.sort_cmp(v2));
            if ordering != Ordering::Equal {
                return ordering;
            }
        }
        self.data.len().cmp(&other.data.len())
    }

    fn deep_set(&mut self, segments: &[&str], value: Value) {
        let Some((head, rest)) = segments.split_first() else {
            return;
        };

        if rest.is_empty() {
            self.data.insert(head.to_string(), value);
            return;
        }

        let mut child = match self.data.get(*head) {
            Some(Value::Document(doc)) => doc.clone(),
            _ => Document::new(),
        };
        child.deep_set(rest, value);
        self.data.insert(head.to_string(), Value::Document(child));
    }

    fn deep_remove(&mut self, segments: &[&str]) -> Option<Value> {
        let (head, rest) = segments.split_first()?;
        if rest.is_empty() {
            return self.data.remove(*head);
        }

        match self.data.get_mut(*head) {
            Some(Value::Document(child)) => child.deep_remove(rest),
            _ => None,
        }
    }

    fn get_fields_internal(&self, prefix: &str, top_level: bool) -> FieldVec {
        let mut fields = FieldVec::new();

        for (key, value) in self.data.iter() {
            if top_level && RESERVED_FIELDS.contains(&key.as_str()) {
                continue;
            }

            let field = if top_level {
                key.clone()
            } else {
                format!("{}{}{}", prefix, FIELD_SEPARATOR, key)
            };

            match value {
                Value::Document(doc) if !doc.is_empty() => {
                    fields.append(&mut doc.get_fields_internal(&field, false));
                }
                _ => fields.push(field),
            }
        }
        fields
    }
}

impl Debug for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self)
    }
}

impl Display for Document {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let entries = self
            .data
            .iter()
            .map(|(key, value)| format!("{:?}: {}", key, value))
            .join(", ");
        write!(f, "{{{}}}", entries)
    }
}

#[doc(hidden)]
pub fn normalize(value: &str) -> String {
    value.trim_matches('"').to_string()
}

/// Creates a [Document] with JSON-like syntax.
///
/// Keys may be bare identifiers or string literals; string literal keys
/// are treated as dotted paths.
///
/// # Examples
///
/// ```rust
/// use clover::doc;
///
/// let empty = doc!{};
/// assert!(empty.is_empty());
///
/// let base = 100;
/// let todo = doc!{
///     title: "write docs",
///     userId: (base / 50),
///     tags: ["docs", "chore"],
///     owner: {
///         name: "Ann",
///     },
///     "meta.source": "import",
/// };
/// assert_eq!(todo.get("owner.name").and_then(|v| v.as_str()), Some("Ann"));
/// assert_eq!(todo.get("userId").and_then(|v| v.as_f64()), Some(2.0));
/// assert!(todo.has("meta.source"));
/// ```
#[macro_export]
macro_rules! doc {
    ({}) => {
        $crate::collection::Document::new()
    };

    () => {
        $crate::collection::Document::new()
    };

    ({ $($key:tt : $value:tt),* $(,)? }) => {
        $crate::doc!($($key : $value),*)
    };

    ($($key:tt : $value:tt),* $(,)?) => {
        {
            #[allow(unused_imports)]
            use $crate::doc_value;

            let mut doc = $crate::collection::Document::new();
            $(
                doc.set(&$crate::collection::normalize(stringify!($key)), $crate::doc_value!($value));
            )*
            doc
        }
    };
}

/// Converts a `doc!` value token tree into a [Value](crate::common::Value).
#[macro_export]
macro_rules! doc_value {
    ({ $($key:tt : $value:tt),* $(,)? }) => {
        {
            $crate::common::Value::Document($crate::doc!{ $($key : $value),* })
        }
    };

    ([ $($value:tt),* $(,)? ]) => {
        $crate::common::Value::Array(vec![$($crate::doc_value!($value)),*])
    };

    ($value:expr) => {
        $crate::common::Value::from($value)
    };
}
