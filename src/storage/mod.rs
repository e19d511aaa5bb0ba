//! Handle-indexed tables and the graph built on them.
//!
//! [`SlotTable`] is the core associative store. [`KeySet`] and
//! [`UndirectedGraph`] are layered on it and share its handle discipline,
//! its [`TableOptions`] and its [`Persist`] binary format.

mod graph;
mod hash;
mod metrics;
mod options;
mod persist;
mod set;
mod table;

/// Undirected graph, its node and edge views, and the structural audit.
pub use graph::{
    AuditCounts, AuditFinding, AuditReport, AuditSeverity, EdgeIter, EdgeView, GraphFlag,
    GraphNode, NodeIter, NodeView, UndirectedGraph,
};

/// Per-key-type hashing.
pub use hash::KeyHash;

/// Metrics hooks.
pub use metrics::{default_metrics, CounterMetrics, NoopMetrics, TableMetrics};

/// Table and graph configuration options.
pub use options::{
    GraphOptions, TableOptions, DEFAULT_INITIAL_BUCKETS, DEFAULT_MAX_LOAD_FACTOR,
    DEFAULT_SAMPLE_OCCUPANCY, MAX_KEY_IDS,
};

pub use persist::Persist;
pub use set::KeySet;

/// Hash table with stable handles and its iterators.
pub use table::{Iter, IterMut, KeyCursor, KeyIds, Keys, SlotTable, Values};
