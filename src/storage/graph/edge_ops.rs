use super::UndirectedGraph;
use crate::types::{NodeId, Result, SlotGraphError};

impl UndirectedGraph {
    fn ensure_node(&self, id: NodeId) -> Result<()> {
        if self.nodes.contains_key(&id) {
            Ok(())
        } else {
            Err(SlotGraphError::NodeNotFound(id))
        }
    }

    /// Adds an edge between `src` and `dst`.
    ///
    /// Both endpoints must exist. An existing edge between the same pair is
    /// not merged; the new one is a parallel copy.
    pub fn add_edge(&mut self, src: NodeId, dst: NodeId) -> Result<()> {
        self.ensure_node(src)?;
        self.ensure_node(dst)?;
        if src == dst {
            if let Some(node) = self.nodes.get_mut(&src) {
                node.push_nbr(src);
            }
        } else {
            if let Some(node) = self.nodes.get_mut(&src) {
                node.push_nbr(dst);
            }
            if let Some(node) = self.nodes.get_mut(&dst) {
                node.push_nbr(src);
            }
        }
        self.edges += 1;
        Ok(())
    }

    /// Returns true if an edge joins `a` and `b`. False when `a` is not a
    /// node.
    pub fn is_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.nodes.get(&a).is_some_and(|node| node.is_nbr(b))
    }

    /// Removes one edge between `a` and `b`.
    ///
    /// Returns false, changing nothing, when the nodes exist but are not
    /// adjacent.
    pub fn del_edge(&mut self, a: NodeId, b: NodeId) -> Result<bool> {
        self.ensure_node(a)?;
        self.ensure_node(b)?;
        let removed = self
            .nodes
            .get_mut(&a)
            .is_some_and(|node| node.remove_nbr(b));
        if !removed {
            return Ok(false);
        }
        if a != b {
            if let Some(node) = self.nodes.get_mut(&b) {
                node.remove_nbr(a);
            }
        }
        self.edges = self.edges.saturating_sub(1);
        Ok(true)
    }
}
