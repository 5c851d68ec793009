use backtrace::Backtrace;
use std::error::Error;
use std::fmt::{Debug, Display, Formatter};
use std::result::Result;

use crate::common::{atomic, Atomic};

/// Error kinds for Clover operations.
///
/// Document accessors and criteria builders never fail, so every kind here
/// belongs to collection lifecycle, query execution or the storage layer.
///
/// # Examples
///
/// ```rust
/// use clover::errors::{CloverError, ErrorKind, CloverResult};
///
/// fn example() -> CloverResult<()> {
///     Err(CloverError::new("Collection todos not found", ErrorKind::CollectionNotFound))
/// }
/// assert!(example().is_err());
/// ```
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum ErrorKind {
    // Collection lifecycle
    /// The named collection does not exist
    CollectionNotFound,
    /// A collection with the same name already exists
    CollectionAlreadyExists,
    /// The collection name is empty or contains the field separator
    InvalidCollectionName,

    // Identity
    /// The `_id` field holds something other than a document id
    InvalidId,
    /// The `_id` is already present in the target collection
    DuplicateId,

    /// The operation is not valid in the current context
    InvalidOperation,

    // Store state
    /// Store has not been initialized
    StoreNotInitialized,
    /// Store has already been closed
    StoreAlreadyClosed,
    /// Error reported by the storage backend
    BackendError,
    /// Generic IO error
    IOError,

    /// Internal error (usually indicates a bug)
    InternalError,
}

impl Display for ErrorKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ErrorKind::CollectionNotFound => write!(f, "Collection not found"),
            ErrorKind::CollectionAlreadyExists => write!(f, "Collection already exists"),
            ErrorKind::InvalidCollectionName => write!(f, "Invalid collection name"),
            ErrorKind::InvalidId => write!(f, "Invalid ID"),
            ErrorKind::DuplicateId => write!(f, "Duplicate ID"),
            ErrorKind::InvalidOperation => write!(f, "Invalid operation"),
            ErrorKind::StoreNotInitialized => write!(f, "Store not initialized"),
            ErrorKind::StoreAlreadyClosed => write!(f, "Store already closed"),
            ErrorKind::BackendError => write!(f, "Backend error"),
            ErrorKind::IOError => write!(f, "IO error"),
            ErrorKind::InternalError => write!(f, "Internal error"),
        }
    }
}

/// Custom Clover error type.
///
/// `CloverError` carries a message, a kind and an optional cause. The
/// backtrace is captured where the error is created and printed by the
/// `Debug` implementation when there is no cause to show instead.
///
/// # Examples
///
/// ```rust
/// use clover::errors::{CloverError, ErrorKind};
///
/// let cause = CloverError::new("disk unplugged", ErrorKind::IOError);
/// let err = CloverError::new_with_cause("Delete failed", ErrorKind::BackendError, cause);
/// assert_eq!(err.kind(), &ErrorKind::BackendError);
/// assert!(err.cause().is_some());
/// ```
#[derive(Clone)]
pub struct CloverError {
    message: String,
    error_kind: ErrorKind,
    cause: Option<Box<CloverError>>,
    backtrace: Atomic<Backtrace>,
}

impl CloverError {
    /// Creates a new `CloverError` with the specified message and error kind.
    pub fn new(message: &str, error_kind: ErrorKind) -> Self {
        CloverError {
            message: message.to_string(),
            error_kind,
            cause: None,
            backtrace: atomic(Backtrace::new()),
        }
    }

    /// Creates a new `CloverError` that wraps an underlying cause.
    pub fn new_with_cause(message: &str, error_kind: ErrorKind, cause: CloverError) -> Self {
        CloverError {
            message: message.to_string(),
            error_kind,
            cause: Some(Box::new(cause)),
            backtrace: atomic(Backtrace::new()),
        }
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn kind(&self) -> &ErrorKind {
        &self.error_kind
    }

    pub fn cause(&self) -> Option<&CloverError> {
        self.cause.as_deref()
    }
}

impl Display for CloverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)
    }
}

impl Debug for CloverError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match &self.cause {
            Some(cause) => write!(f, "{}\nCaused by: {:?}", self.message, cause),
            None => write!(f, "{}\n{:?}", self.message, self.backtrace.read()),
        }
    }
}

impl Error for CloverError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match &self.cause {
            Some(cause) => Some(cause.as_ref()),
            None => None,
        }
    }
}

/// A result type alias for Clover operations.
pub type CloverResult<T> = Result<T, CloverError>;

impl From<std::io::Error> for CloverError {
    fn from(err: std::io::Error) -> Self {
        CloverError::new(&format!("IO error: {}", err), ErrorKind::IOError)
    }
}

impl From<String> for CloverError {
    fn from(msg: String) -> Self {
        CloverError::new(&msg, ErrorKind::InternalError)
    }
}

impl From<&str> for CloverError {
    fn from(msg: &str) -> Self {
        CloverError::new(msg, ErrorKind::InternalError)
    }
}
