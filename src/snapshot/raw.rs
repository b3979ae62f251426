//! Raw networks as sources deliver them.
//!
//! Street networks are multigraphs: two carriageways between the same
//! junctions become parallel edges, and cul-de-sac loops become self-loops.
//! `RawGraph` keeps them as delivered; `simplify()` produces the simple
//! snapshot the counter needs plus the size figures for the report row.

use hashbrown::HashSet;
use serde::{Deserialize, Serialize};

use crate::model::{Edge, NetworkSizes, NodeId};
use super::AdjacencyGraph;

/// An undirected multigraph that may contain self-loops and parallel edges.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawGraph {
    pub nodes: Vec<NodeId>,
    pub edges: Vec<(NodeId, NodeId)>,
}

/// A simplified snapshot together with the figures of the raw network.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Simplified {
    pub graph: AdjacencyGraph,
    pub sizes: NetworkSizes,
}

impl RawGraph {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_edges<I, A, B>(edges: I) -> Self
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<NodeId>,
        B: Into<NodeId>,
    {
        Self {
            nodes: Vec::new(),
            edges: edges.into_iter().map(|(a, b)| (a.into(), b.into())).collect(),
        }
    }

    pub fn with_nodes(mut self, nodes: impl IntoIterator<Item = impl Into<NodeId>>) -> Self {
        self.nodes.extend(nodes.into_iter().map(Into::into));
        self
    }

    pub fn add_node(&mut self, id: NodeId) {
        self.nodes.push(id);
    }

    pub fn add_edge(&mut self, a: NodeId, b: NodeId) {
        self.edges.push((a, b));
    }

    /// Distinct nodes, including edge endpoints not listed in `nodes`.
    pub fn node_count(&self) -> usize {
        self.node_set().len()
    }

    /// Edges as delivered, parallels and loops included.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Self-loop edges, each parallel loop counted separately.
    pub fn self_loop_count(&self) -> usize {
        self.edges.iter().filter(|(a, b)| a == b).count()
    }

    /// Collapse parallel edges and drop self-loops.
    pub fn simplify(&self) -> Simplified {
        let mut graph = AdjacencyGraph::new();
        for id in self.node_set() {
            graph.add_node(id);
        }

        let mut seen: HashSet<Edge> = HashSet::with_capacity(self.edges.len());
        for &(a, b) in &self.edges {
            let edge = Edge::new(a, b);
            if !edge.is_loop() && seen.insert(edge) {
                graph.insert_edge(edge.lo, edge.hi);
            }
        }

        let sizes = NetworkSizes {
            node_count: self.node_count() as u64,
            edge_count: self.edge_count() as u64,
            essential_edge_count: seen.len() as u64,
            self_loop_count: self.self_loop_count() as u64,
        };
        tracing::debug!(
            nodes = sizes.node_count,
            edges = sizes.edge_count,
            essential = sizes.essential_edge_count,
            self_loops = sizes.self_loop_count,
            "simplified raw network"
        );
        Simplified { graph, sizes }
    }

    fn node_set(&self) -> HashSet<NodeId> {
        self.nodes
            .iter()
            .copied()
            .chain(self.edges.iter().flat_map(|&(a, b)| [a, b]))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::snapshot::GraphSnapshot;

    #[test]
    fn simplify_collapses_parallels_and_drops_loops() {
        let raw = RawGraph::from_edges([
            (1u64, 2u64),
            (2, 1),
            (2, 3),
            (3, 3),
            (3, 3),
            (3, 4),
        ])
        .with_nodes([9u64]);

        let simplified = raw.simplify();
        assert_eq!(
            simplified.sizes,
            NetworkSizes { node_count: 5, edge_count: 6, essential_edge_count: 3, self_loop_count: 2 }
        );
        assert_eq!(simplified.graph.edge_count(), 3);
        assert_eq!(simplified.graph.node_count(), 5);
        assert_eq!(simplified.graph.degree(NodeId(9)), 0);
        assert!(!simplified.graph.has_edge(NodeId(3), NodeId(3)));
    }

    #[test]
    fn loop_only_node_is_kept() {
        let raw = RawGraph::from_edges([(7u64, 7u64)]);
        let simplified = raw.simplify();
        assert_eq!(simplified.graph.node_count(), 1);
        assert_eq!(simplified.sizes.essential_edge_count, 0);
        assert_eq!(simplified.sizes.self_loop_count, 1);
    }
}
