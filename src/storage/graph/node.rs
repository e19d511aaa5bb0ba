use std::io::{Read, Write};

use smallvec::SmallVec;

use crate::primitives::bytes::{le, len_from_u64, prealloc_hint, Codec};
use crate::types::{NodeId, Result};

/// Neighbors kept inline before the list spills to the heap.
const INLINE_NBRS: usize = 4;

/// A node of an [`super::UndirectedGraph`] with its adjacency list.
///
/// Every incident edge contributes one entry per endpoint, so a self loop
/// appears once in its node's list and a regular edge appears once in each
/// endpoint's list. Parallel edges appear as repeated entries.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct GraphNode {
    id: NodeId,
    nbrs: SmallVec<[NodeId; INLINE_NBRS]>,
}

impl GraphNode {
    pub(super) fn new(id: NodeId) -> Self {
        Self {
            id,
            nbrs: SmallVec::new(),
        }
    }

    /// Id of this node.
    pub fn id(&self) -> NodeId {
        self.id
    }

    /// Number of adjacency entries.
    pub fn deg(&self) -> usize {
        self.nbrs.len()
    }

    /// Same as [`GraphNode::deg`]; edges carry no direction.
    pub fn in_deg(&self) -> usize {
        self.deg()
    }

    /// Same as [`GraphNode::deg`]; edges carry no direction.
    pub fn out_deg(&self) -> usize {
        self.deg()
    }

    /// The `k`-th neighbor in adjacency order.
    pub fn nbr_id(&self, k: usize) -> Option<NodeId> {
        self.nbrs.get(k).copied()
    }

    /// Same as [`GraphNode::nbr_id`].
    pub fn in_nbr_id(&self, k: usize) -> Option<NodeId> {
        self.nbr_id(k)
    }

    /// Same as [`GraphNode::nbr_id`].
    pub fn out_nbr_id(&self, k: usize) -> Option<NodeId> {
        self.nbr_id(k)
    }

    /// Adjacency entries in insertion order.
    pub fn neighbors(&self) -> &[NodeId] {
        &self.nbrs
    }

    /// Returns true if at least one edge joins this node and `other`.
    pub fn is_nbr(&self, other: NodeId) -> bool {
        self.nbrs.contains(&other)
    }

    /// Number of self-loop entries.
    pub fn self_loops(&self) -> usize {
        self.nbrs.iter().filter(|&&nbr| nbr == self.id).count()
    }

    pub(super) fn push_nbr(&mut self, nbr: NodeId) {
        self.nbrs.push(nbr);
    }

    /// Removes the first entry for `nbr`; later duplicates stay.
    pub(super) fn remove_nbr(&mut self, nbr: NodeId) -> bool {
        match self.nbrs.iter().position(|&candidate| candidate == nbr) {
            Some(pos) => {
                self.nbrs.remove(pos);
                true
            }
            None => false,
        }
    }
}

/// Encoded as the node id, the degree, then each neighbor id.
impl Codec for GraphNode {
    fn encode<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        self.id.encode(out)?;
        le::put_u64(out, self.nbrs.len() as u64)?;
        for nbr in &self.nbrs {
            nbr.encode(out)?;
        }
        Ok(())
    }

    fn decode<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        let id = NodeId::decode(input)?;
        let deg = len_from_u64(le::get_u64(input)?)?;
        let mut nbrs = SmallVec::with_capacity(prealloc_hint(deg));
        for _ in 0..deg {
            nbrs.push(NodeId::decode(input)?);
        }
        Ok(Self { id, nbrs })
    }
}
