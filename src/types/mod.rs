#![forbid(unsafe_code)]
//! Identifier newtypes and the crate-wide error type.

use std::fmt;

/// Identifier of a graph node. Covers the full signed 64-bit range.
#[derive(Copy, Clone, Eq, PartialEq, Ord, PartialOrd, Hash, Debug)]
pub struct NodeId(pub i64);

/// Stable handle to a slot of a [`crate::storage::SlotTable`].
///
/// A handle stays valid while its slot is occupied. Slots carry a generation
/// that is bumped on deletion, so a handle issued before a delete never
/// resolves to whichever key later reuses the same slot index.
#[derive(Copy, Clone, Eq, PartialEq, Hash, Debug)]
pub struct KeyId {
    pub(crate) index: usize,
    pub(crate) generation: u32,
}

impl KeyId {
    pub(crate) const fn new(index: usize, generation: u32) -> Self {
        Self { index, generation }
    }

    /// Position of the slot, always below [`crate::storage::SlotTable::max_key_ids`]
    /// for handles issued by the owning table.
    pub fn index(&self) -> usize {
        self.index
    }
}

/// Errors reported by tables and graphs.
#[derive(thiserror::Error, Debug)]
pub enum SlotGraphError {
    /// Underlying reader or writer failed.
    #[error("IO: {0}")]
    Io(#[from] std::io::Error),
    /// A persisted image is malformed.
    #[error("corruption: {0}")]
    Corruption(&'static str),
    /// An in-memory graph failed its structural audit.
    #[error("structural corruption: {0}")]
    StructuralCorruption(String),
    /// Lookup by key found nothing.
    #[error("key not found")]
    KeyNotFound,
    /// The named node does not exist.
    #[error("node {0} not found")]
    NodeNotFound(NodeId),
    /// A node with this id is already present.
    #[error("node {0} already exists")]
    AlreadyExists(NodeId),
    /// The handle is out of range, vacant, or from an older generation.
    #[error("invalid key id {}", .0.index)]
    InvalidHandle(KeyId),
    /// No free slot and the key id limit is reached.
    #[error("key id space exhausted (limit {limit})")]
    CapacityExceeded {
        /// Configured key id limit.
        limit: u64,
    },
}

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, SlotGraphError>;

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl fmt::Display for KeyId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.index)
    }
}

impl From<i64> for NodeId {
    fn from(value: i64) -> Self {
        NodeId(value)
    }
}

impl From<NodeId> for i64 {
    fn from(value: NodeId) -> Self {
        value.0
    }
}
