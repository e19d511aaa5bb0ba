//! Handle-indexed hash tables and a sparse undirected graph.
//!
//! [`storage::SlotTable`] stores key/value pairs in slots addressed by stable
//! [`types::KeyId`] handles. [`storage::UndirectedGraph`] keeps its nodes in
//! such a table. Both save to and load from caller-supplied byte streams.

#![warn(missing_docs)]

pub mod primitives;
pub mod storage;
pub mod types;

pub use storage::{GraphOptions, KeySet, Persist, SlotTable, TableOptions, UndirectedGraph};
pub use types::{KeyId, NodeId, Result, SlotGraphError};
