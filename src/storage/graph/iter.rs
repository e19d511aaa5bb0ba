use std::iter::FusedIterator;

use super::node::GraphNode;
use crate::storage::table::Values;
use crate::types::NodeId;

/// Borrowed view of one node, as yielded by [`NodeIter`].
pub type NodeView<'a> = &'a GraphNode;

/// Iterator over the nodes of a graph in node-table order.
#[derive(Clone)]
pub struct NodeIter<'a> {
    inner: Values<'a, NodeId, GraphNode>,
}

impl<'a> NodeIter<'a> {
    pub(super) fn new(inner: Values<'a, NodeId, GraphNode>) -> Self {
        Self { inner }
    }

    /// Returns true once every node has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.inner.is_exhausted()
    }
}

impl<'a> Iterator for NodeIter<'a> {
    type Item = NodeView<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl ExactSizeIterator for NodeIter<'_> {}

/// One logical edge. `src <= dst` always holds.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub struct EdgeView {
    src: NodeId,
    dst: NodeId,
}

impl EdgeView {
    /// Endpoint with the smaller id.
    pub fn src(&self) -> NodeId {
        self.src
    }

    /// Endpoint with the larger id.
    pub fn dst(&self) -> NodeId {
        self.dst
    }

    /// Returns true when both endpoints are the same node.
    pub fn is_self_loop(&self) -> bool {
        self.src == self.dst
    }
}

/// Iterator over logical edges.
///
/// Each adjacency entry `u -> v` is reported only when `u <= v`, so a regular
/// edge is seen from its smaller endpoint and a self loop once. Parallel
/// edges are reported once per copy.
#[derive(Clone)]
pub struct EdgeIter<'a> {
    nodes: Values<'a, NodeId, GraphNode>,
    current: Option<&'a GraphNode>,
    pos: usize,
    peeked: Option<EdgeView>,
}

impl<'a> EdgeIter<'a> {
    pub(super) fn new(nodes: Values<'a, NodeId, GraphNode>) -> Self {
        let mut iter = Self {
            nodes,
            current: None,
            pos: 0,
            peeked: None,
        };
        iter.peeked = iter.advance();
        iter
    }

    /// Returns true once every edge has been yielded.
    pub fn is_exhausted(&self) -> bool {
        self.peeked.is_none()
    }

    fn advance(&mut self) -> Option<EdgeView> {
        loop {
            if let Some(node) = self.current {
                while let Some(nbr) = node.nbr_id(self.pos) {
                    self.pos += 1;
                    if node.id() <= nbr {
                        return Some(EdgeView {
                            src: node.id(),
                            dst: nbr,
                        });
                    }
                }
            }
            self.current = Some(self.nodes.next()?);
            self.pos = 0;
        }
    }
}

impl Iterator for EdgeIter<'_> {
    type Item = EdgeView;

    fn next(&mut self) -> Option<Self::Item> {
        let edge = self.peeked.take()?;
        self.peeked = self.advance();
        Some(edge)
    }
}

impl FusedIterator for EdgeIter<'_> {}
