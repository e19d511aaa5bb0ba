use std::io::{Read, Write};

use tracing::{debug, warn};

use super::node::GraphNode;
use super::UndirectedGraph;
use crate::primitives::bytes::{le, len_from_u64, Codec};
use crate::primitives::io::scoped_write;
use crate::storage::options::GraphOptions;
use crate::storage::persist::Persist;
use crate::types::{Result, SlotGraphError};

const UNDIRECTED: u8 = 0;

impl UndirectedGraph {
    /// Reads a graph image, building the result with `opts`.
    ///
    /// Nodes are restored with their adjacency lists verbatim. The stored
    /// edge count must match the one implied by the adjacency lists.
    pub fn load_with_options<R: Read + ?Sized>(input: &mut R, opts: GraphOptions) -> Result<Self> {
        if le::get_u8(input)? != UNDIRECTED {
            warn!("graph.load.directed_image");
            return Err(SlotGraphError::Corruption("directed graph image"));
        }
        let count = len_from_u64(le::get_u64(input)?)?;
        let mut graph = Self::with_options(opts);
        let mut entries = 0u64;
        let mut loops = 0u64;
        for _ in 0..count {
            let node = GraphNode::decode(input)?;
            let id = node.id();
            if graph.nodes.contains_key(&id) {
                warn!(node = id.0, "graph.load.duplicate_node");
                return Err(SlotGraphError::Corruption("duplicate node in graph image"));
            }
            entries += node.deg() as u64;
            loops += node.self_loops() as u64;
            graph.nodes.insert(id, node)?;
            graph.next_auto_id = graph.next_auto_id.max(id.0.saturating_add(1));
        }
        let stored = le::get_u64(input)?;
        let derived = (entries + loops) / 2;
        if (entries + loops) % 2 != 0 || stored != derived {
            warn!(stored, derived, "graph.load.edge_count_mismatch");
            return Err(SlotGraphError::Corruption("edge count does not match adjacency"));
        }
        graph.edges = stored;
        debug!(nodes = count, edges = stored, "graph.load");
        Ok(graph)
    }
}

impl Persist for UndirectedGraph {
    /// Writes the directed flag, the node count, every node with its
    /// adjacency list in node-table order, and finally the edge count.
    fn save<W: Write + ?Sized>(&self, out: &mut W) -> Result<()> {
        let ((), bytes) = scoped_write(out, |w| {
            le::put_u8(w, UNDIRECTED)?;
            le::put_u64(w, self.nodes.len() as u64)?;
            for node in self.nodes.values() {
                node.encode(w)?;
            }
            le::put_u64(w, self.edges)?;
            Ok(())
        })?;
        debug!(nodes = self.nodes.len(), edges = self.edges, bytes, "graph.save");
        Ok(())
    }

    fn load<R: Read + ?Sized>(input: &mut R) -> Result<Self> {
        Self::load_with_options(input, GraphOptions::default())
    }
}
