use rand::Rng;
use tracing::trace;

use super::node::GraphNode;
use super::{NodeView, UndirectedGraph};
use crate::types::{NodeId, Result, SlotGraphError};

impl UndirectedGraph {
    /// Adds an isolated node.
    ///
    /// Fails with [`SlotGraphError::AlreadyExists`] if `id` is taken; the
    /// existing node and its edges are left as they were.
    pub fn add_node(&mut self, id: NodeId) -> Result<NodeId> {
        if self.nodes.contains_key(&id) {
            return Err(SlotGraphError::AlreadyExists(id));
        }
        self.nodes.insert(id, GraphNode::new(id))?;
        self.next_auto_id = self.next_auto_id.max(id.0.saturating_add(1));
        Ok(id)
    }

    /// Adds a node with an id one above the largest id added so far, or `0`
    /// for a fresh graph.
    pub fn add_node_auto(&mut self) -> Result<NodeId> {
        self.add_node(NodeId(self.next_auto_id))
    }

    /// Returns true if `id` is a node of the graph.
    pub fn is_node(&self, id: NodeId) -> bool {
        self.nodes.contains_key(&id)
    }

    /// Removes `id` together with every incident edge.
    ///
    /// Each neighbor loses one back-reference per adjacency entry, so
    /// parallel edges are removed one by one. Self loops live only in the
    /// removed node's own list.
    pub fn del_node(&mut self, id: NodeId) -> Result<()> {
        let key = self
            .nodes
            .key_id(&id)
            .ok_or(SlotGraphError::NodeNotFound(id))?;
        let (_, node) = self.nodes.remove_id(key)?;
        for &nbr in node.neighbors() {
            if nbr == id {
                continue;
            }
            if let Some(other) = self.nodes.get_mut(&nbr) {
                other.remove_nbr(id);
            }
        }
        self.edges = self.edges.saturating_sub(node.deg() as u64);
        trace!(node = id.0, degree = node.deg(), "graph.del_node");
        Ok(())
    }

    /// Number of adjacency entries of `id`.
    pub fn degree(&self, id: NodeId) -> Result<usize> {
        self.node(id).map(|node| node.deg())
    }

    /// View of the node `id`.
    pub fn node(&self, id: NodeId) -> Result<NodeView<'_>> {
        self.nodes.get(&id).ok_or(SlotGraphError::NodeNotFound(id))
    }

    /// Node ids in node-table order.
    pub fn node_ids(&self) -> impl Iterator<Item = NodeId> + '_ {
        self.nodes.keys().copied()
    }

    /// Draws a random node id, or `None` for an empty graph.
    ///
    /// Uses the node table sampler with
    /// [`GraphOptions::sample_occupancy`](crate::storage::GraphOptions) as
    /// the threshold.
    pub fn random_node_id<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<NodeId> {
        let key = self.nodes.random_key_id(rng, self.opts.sample_occupancy)?;
        self.nodes.key(key).ok().copied()
    }
}
