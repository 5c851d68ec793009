//! The storage boundary: the [DocumentStoreProvider] contract, the
//! [DocumentStore] handle, immutable [Snapshot]s and the in-memory backend.

mod document_store;
pub mod memory;
mod snapshot;

pub use document_store::*;
pub use snapshot::*;
