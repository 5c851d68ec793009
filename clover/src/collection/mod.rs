//! Documents, their ids, and the query pipeline that reads and writes them.

mod document;
mod document_id;
mod find_options;
mod query;
mod snowflake;
mod write_result;

pub use document::*;
pub use document_id::*;
pub use find_options::*;
pub use query::*;
pub use write_result::*;
