//! # Clover - Embedded Document Store
//!
//! Clover keeps named collections of schemaless documents and queries them
//! with composable boolean criteria.
//!
//! ## Key Features
//!
//! - **Documents**: nested values addressed by dotted paths (`"a.b.c"`),
//!   with every number stored as a 64-bit float
//! - **Criteria**: immutable predicate trees built from `eq`, `neq`, `gt`,
//!   `gt_eq`, `lt`, `lt_eq`, `is_in` and `exists`, combined with `and`,
//!   `or` and `not`
//! - **Snapshot queries**: every query execution reads one consistent,
//!   immutable view of its collection
//! - **Pluggable storage**: the [store::DocumentStoreProvider] trait, with an
//!   in-memory implementation included
//!
//! ## Quick Start
//!
//! ```rust
//! use clover::Clover;
//! use clover::criteria::row;
//! use clover::doc;
//!
//! # fn main() -> clover::errors::CloverResult<()> {
//! let db = Clover::builder().open()?;
//! db.create_collection("todos")?;
//!
//! db.insert("todos", vec![
//!     doc!{ title: "buy milk", completed: true, userId: 1 },
//!     doc!{ title: "walk dog", completed: false, userId: 3 },
//!     doc!{ title: "write docs", completed: true, userId: 4 },
//! ])?;
//!
//! let criteria = row("completed").eq(true).and(row("userId").gt(2));
//! let todos = db.query("todos").filter(criteria).find_all()?;
//! assert_eq!(todos.len(), 1);
//!
//! db.close()?;
//! # Ok(())
//! # }
//! ```
//!
//! ## Module Organization
//!
//! - [`collection`] - Documents, ids and queries
//! - [`common`] - The dynamic [`common::Value`] type and shared utilities
//! - [`criteria`] - Criteria expression trees
//! - [`errors`] - Error types and result definitions
//! - [`store`] - Storage backend abstraction and the in-memory store
//! - [`clover`], [`clover_builder`], [`clover_config`] - The database facade

pub mod clover;
pub mod clover_builder;
pub mod clover_config;
pub mod collection;
pub mod common;
pub mod criteria;
pub mod errors;
pub mod store;

pub use crate::clover::Clover;
pub use crate::clover_builder::CloverBuilder;
pub use crate::clover_config::CloverConfig;
