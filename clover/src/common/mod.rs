//! Shared building blocks: the dynamic [Value] type, reserved field names,
//! sort order, the per-collection lock registry and small utilities.

mod constants;
mod lock;
mod sort_order;
pub mod util;
mod value;

pub use constants::*;
pub use lock::*;
pub use sort_order::*;
pub use util::*;
pub use value::*;
