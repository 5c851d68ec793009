//! Boolean criteria over documents.
//!
//! A [Criteria] is an immutable expression tree: leaves compare the value
//! at a dotted field path with an operand, inner nodes combine children
//! with `and`, `or` and `not`. Build leaves with [row].

#[allow(clippy::module_inception)]
mod criteria;
mod fluent;

pub use criteria::*;
pub use fluent::*;
