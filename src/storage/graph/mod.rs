//! Undirected graph over a node table.
//!
//! Nodes live in a [`SlotTable`] keyed by [`NodeId`]; each node owns its
//! adjacency list. The graph keeps a running edge count so `edge_count` is
//! constant time, and [`UndirectedGraph::audit`] can cross-check it against
//! the adjacency lists.

mod audit;
mod edge_ops;
mod iter;
mod node;
mod node_ops;
mod persist;

use super::options::GraphOptions;
use super::table::SlotTable;
use crate::types::{NodeId, Result};

pub use audit::{AuditCounts, AuditFinding, AuditReport, AuditSeverity};
pub use iter::{EdgeIter, EdgeView, NodeIter, NodeView};
pub use node::GraphNode;

/// Structural properties a graph can be asked about.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[non_exhaustive]
pub enum GraphFlag {
    /// Edges have a direction.
    Directed,
    /// An edge may join a node to itself.
    SelfLoops,
}

/// Undirected graph with self loops and parallel edges.
#[derive(Clone, Debug)]
pub struct UndirectedGraph {
    nodes: SlotTable<NodeId, GraphNode>,
    edges: u64,
    /// Id handed out by the next `add_node_auto`.
    next_auto_id: i64,
    opts: GraphOptions,
}

impl Default for UndirectedGraph {
    fn default() -> Self {
        Self::with_options(GraphOptions::default())
    }
}

impl UndirectedGraph {
    /// Creates an empty graph with default options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty graph whose node table is built from `opts.table`.
    pub fn with_options(opts: GraphOptions) -> Self {
        Self {
            nodes: SlotTable::with_options(opts.table.clone()),
            edges: 0,
            next_auto_id: 0,
            opts,
        }
    }

    /// Builds the five-node sample graph with edges
    /// `0-1`, `0-2`, `0-3`, `0-4` and `1-2`.
    pub fn small_graph() -> Result<Self> {
        let mut graph = Self::new();
        for id in 0..5 {
            graph.add_node(NodeId(id))?;
        }
        for (src, dst) in [(0, 1), (0, 2), (0, 3), (0, 4), (1, 2)] {
            graph.add_edge(NodeId(src), NodeId(dst))?;
        }
        Ok(graph)
    }

    /// Options the graph was created with.
    pub fn options(&self) -> &GraphOptions {
        &self.opts
    }

    /// Number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Number of logical edges. A self loop counts once.
    pub fn edge_count(&self) -> u64 {
        self.edges
    }

    /// Returns true when the graph has no nodes.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Removes every node and edge.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.edges = 0;
        self.next_auto_id = 0;
    }

    /// Reports whether the graph has the property named by `flag`.
    pub fn has_flag(&self, flag: GraphFlag) -> bool {
        match flag {
            GraphFlag::Directed => false,
            GraphFlag::SelfLoops => true,
        }
    }

    /// Always false.
    pub fn is_directed(&self) -> bool {
        self.has_flag(GraphFlag::Directed)
    }

    /// Nodes in node-table order.
    pub fn nodes(&self) -> NodeIter<'_> {
        NodeIter::new(self.nodes.values())
    }

    /// Each logical edge exactly once; see [`EdgeIter`].
    pub fn edges(&self) -> EdgeIter<'_> {
        EdgeIter::new(self.nodes.values())
    }
}

/// Graphs are equal when they hold the same nodes with the same adjacency
/// lists, in the same neighbor order.
impl PartialEq for UndirectedGraph {
    fn eq(&self, other: &Self) -> bool {
        self.edges == other.edges && self.nodes == other.nodes
    }
}

impl Eq for UndirectedGraph {}
