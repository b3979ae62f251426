//! In-memory graph snapshot.
//!
//! This is the reference implementation of `GraphSnapshot`.
//! It keeps one hash set of neighbors per node.
//!
//! ## Guarantees
//!
//! - **Simple by construction**: `add_edge()` rejects self-loops and
//!   duplicate edges with `Error::PreconditionViolation`.
//! - **Symmetric**: every edge is stored at both endpoints.
//!
//! Build it once, then share it read-only; nothing mutates it during
//! counting.

use std::borrow::Cow;

use hashbrown::HashMap;

use crate::model::NodeId;
use crate::{Error, Result};
use super::{GraphSnapshot, NeighborSet};

// ============================================================================
// AdjacencyGraph
// ============================================================================

/// Simple undirected graph stored as adjacency sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdjacencyGraph {
    /// node → neighbor set
    adjacency: HashMap<NodeId, NeighborSet>,
    edge_count: usize,
}

impl AdjacencyGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from an edge list. Endpoints become nodes.
    pub fn from_edges<I, A, B>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = (A, B)>,
        A: Into<NodeId>,
        B: Into<NodeId>,
    {
        let mut graph = Self::new();
        for (a, b) in edges {
            graph.add_edge(a.into(), b.into())?;
        }
        Ok(graph)
    }

    /// Add an isolated node. No-op if it already exists.
    pub fn add_node(&mut self, id: NodeId) {
        self.adjacency.entry(id).or_default();
    }

    /// Add an undirected edge, creating missing endpoints.
    pub fn add_edge(&mut self, a: NodeId, b: NodeId) -> Result<()> {
        if a == b {
            return Err(Error::PreconditionViolation(format!("self-loop at node {a}")));
        }
        if self.adjacency.get(&a).is_some_and(|n| n.contains(&b)) {
            return Err(Error::PreconditionViolation(format!("parallel edge {a} -- {b}")));
        }
        self.insert_edge(a, b);
        Ok(())
    }

    /// Insert an edge already known to be new and loop-free.
    pub(crate) fn insert_edge(&mut self, a: NodeId, b: NodeId) {
        self.adjacency.entry(a).or_default().insert(b);
        self.adjacency.entry(b).or_default().insert(a);
        self.edge_count += 1;
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.adjacency.contains_key(&id)
    }

    // ========================================================================
    // Canonical families, nodes numbered from 0
    // ========================================================================

    /// Complete graph on `n` nodes.
    pub fn complete(n: u64) -> Self {
        let mut graph = Self::isolated(n);
        for a in 0..n {
            for b in (a + 1)..n {
                graph.insert_edge(NodeId(a), NodeId(b));
            }
        }
        graph
    }

    /// Path on `n` nodes: 0 - 1 - ... - (n-1).
    pub fn path(n: u64) -> Self {
        let mut graph = Self::isolated(n);
        for a in 1..n {
            graph.insert_edge(NodeId(a - 1), NodeId(a));
        }
        graph
    }

    /// Cycle on `n` nodes. Needs `n >= 3` to be simple; smaller `n` gives a path.
    pub fn cycle(n: u64) -> Self {
        let mut graph = Self::path(n);
        if n >= 3 {
            graph.insert_edge(NodeId(n - 1), NodeId(0));
        }
        graph
    }

    /// Star with center 0 and leaves 1..=leaves.
    pub fn star(leaves: u64) -> Self {
        let mut graph = Self::isolated(leaves + 1);
        for leaf in 1..=leaves {
            graph.insert_edge(NodeId(0), NodeId(leaf));
        }
        graph
    }

    /// `n` nodes, no edges.
    pub fn isolated(n: u64) -> Self {
        let mut graph = Self::new();
        for id in 0..n {
            graph.add_node(NodeId(id));
        }
        graph
    }
}

// ============================================================================
// GraphSnapshot impl
// ============================================================================

impl GraphSnapshot for AdjacencyGraph {
    type Subgraph = AdjacencyGraph;

    fn nodes(&self) -> Vec<NodeId> {
        let mut nodes: Vec<NodeId> = self.adjacency.keys().copied().collect();
        nodes.sort_unstable();
        nodes
    }

    fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    fn edge_count(&self) -> usize {
        self.edge_count
    }

    fn neighbors(&self, node: NodeId) -> Cow<'_, NeighborSet> {
        match self.adjacency.get(&node) {
            Some(set) => Cow::Borrowed(set),
            None => Cow::Owned(NeighborSet::new()),
        }
    }

    fn degree(&self, node: NodeId) -> usize {
        self.adjacency.get(&node).map_or(0, |n| n.len())
    }

    fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.adjacency.get(&a).is_some_and(|n| n.contains(&b))
    }

    fn induced_subgraph(&self, nodes: &[NodeId]) -> AdjacencyGraph {
        let mut sub = AdjacencyGraph::new();
        for &id in nodes.iter().filter(|id| self.contains(**id)) {
            sub.add_node(id);
        }
        let kept: Vec<NodeId> = sub.adjacency.keys().copied().collect();
        for a in kept {
            let Some(neighbors) = self.adjacency.get(&a) else { continue };
            for &b in neighbors {
                // Each kept edge is seen from both ends; insert it from the lower one.
                if a < b && sub.contains(b) {
                    sub.insert_edge(a, b);
                }
            }
        }
        sub
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_self_loops_and_parallel_edges() {
        let mut g = AdjacencyGraph::new();
        assert!(g.add_edge(NodeId(1), NodeId(2)).is_ok());
        assert!(matches!(g.add_edge(NodeId(2), NodeId(1)), Err(Error::PreconditionViolation(_))));
        assert!(matches!(g.add_edge(NodeId(3), NodeId(3)), Err(Error::PreconditionViolation(_))));
        assert_eq!(g.edge_count(), 1);
    }

    #[test]
    fn from_edges_collects_endpoints() {
        let g = AdjacencyGraph::from_edges([(1u64, 2u64), (2, 3), (3, 4)]).unwrap();
        assert_eq!(g.nodes(), vec![NodeId(1), NodeId(2), NodeId(3), NodeId(4)]);
        assert_eq!(g.edge_count(), 3);
        assert_eq!(g.degree(NodeId(2)), 2);
        assert_eq!(g.degree(NodeId(99)), 0);
        assert!(g.neighbors(NodeId(99)).is_empty());
    }

    #[test]
    fn families() {
        assert_eq!(AdjacencyGraph::complete(4).edge_count(), 6);
        assert_eq!(AdjacencyGraph::path(4).edge_count(), 3);
        assert_eq!(AdjacencyGraph::cycle(5).edge_count(), 5);
        assert_eq!(AdjacencyGraph::cycle(2).edge_count(), 1);
        assert_eq!(AdjacencyGraph::star(3).degree(NodeId(0)), 3);
        assert_eq!(AdjacencyGraph::isolated(7).edge_count(), 0);
        assert_eq!(AdjacencyGraph::isolated(7).node_count(), 7);
    }

    #[test]
    fn induced_subgraph_keeps_inner_edges() {
        let g = AdjacencyGraph::complete(5);
        let sub = g.induced_subgraph(&[NodeId(0), NodeId(2), NodeId(4), NodeId(42)]);
        assert_eq!(sub.node_count(), 3);
        assert_eq!(sub.edge_count(), 3);
        assert!(sub.has_edge(NodeId(2), NodeId(4)));
        assert!(!sub.contains(NodeId(42)));

        let path = AdjacencyGraph::path(5);
        let ends = path.induced_subgraph(&[NodeId(0), NodeId(4)]);
        assert_eq!(ends.edge_count(), 0);
        assert_eq!(ends.node_count(), 2);
    }
}
