/// Reserved field holding the identifier a document receives on insertion.
pub const DOC_ID: &str = "_id";

/// Separator between the segments of a field path (`"a.b.c"`).
pub const FIELD_SEPARATOR: &str = ".";

/// Fields managed by the store and hidden from [crate::collection::Document::fields].
pub const RESERVED_FIELDS: [&str; 1] = [DOC_ID];

/// Version string reported by the bundled in-memory store.
pub const STORE_VERSION: &str = concat!("clover-memory/", env!("CARGO_PKG_VERSION"));
