//! # Graph Snapshot Trait
//!
//! This is THE contract between the motif counter and any graph
//! representation. The counter only ever asks for nodes, degrees, neighbor
//! sets and induced subgraphs.
//!
//! ## Implementations
//!
//! | Snapshot | Module | Description |
//! |----------|--------|-------------|
//! | `AdjacencyGraph` | `adjacency` | Hash-set adjacency lists, in memory |
//!
//! ## Precondition
//!
//! Every snapshot handed to the counter must be a *simple* undirected graph:
//! no self-loops, no parallel edges, symmetric adjacency. The counting
//! formulas are only valid under this precondition. Snapshots coming from
//! street networks go through [`RawGraph::simplify`] first.
//! [`validate_simple`] is a best-effort check for snapshots of unknown origin.

pub mod adjacency;
pub mod raw;

use std::borrow::Cow;

use crate::model::NodeId;
use crate::{Error, Result};

pub use adjacency::AdjacencyGraph;
pub use raw::{RawGraph, Simplified};

/// Neighbor set of a node.
pub type NeighborSet = hashbrown::HashSet<NodeId>;

// ============================================================================
// GraphSnapshot Trait
// ============================================================================

/// An immutable simple undirected graph.
///
/// `neighbors` returns a `Cow` so that in-memory snapshots can lend their
/// sets while service-backed ones build them on demand.
pub trait GraphSnapshot: Send + Sync {
    /// The snapshot type produced by [`GraphSnapshot::induced_subgraph`].
    type Subgraph: GraphSnapshot;

    /// All nodes, in ascending id order.
    fn nodes(&self) -> Vec<NodeId>;

    /// Number of edges.
    fn edge_count(&self) -> usize;

    /// Neighbors of `node`. Empty for unknown nodes.
    fn neighbors(&self, node: NodeId) -> Cow<'_, NeighborSet>;

    /// The subgraph on `nodes` and the edges between them.
    /// Ids not present in the graph are ignored.
    fn induced_subgraph(&self, nodes: &[NodeId]) -> Self::Subgraph;

    /// Number of nodes.
    fn node_count(&self) -> usize {
        self.nodes().len()
    }

    /// Number of neighbors of `node`.
    fn degree(&self, node: NodeId) -> usize {
        self.neighbors(node).len()
    }

    fn has_edge(&self, a: NodeId, b: NodeId) -> bool {
        self.neighbors(a).contains(&b)
    }
}

/// Best-effort check that `graph` is simple and undirected.
///
/// Looks for self-loops, asymmetric adjacency, and a degree sum that
/// disagrees with the reported edge count. Parallel edges cannot be seen
/// through neighbor sets; they only show up as a count mismatch.
pub fn validate_simple<G: GraphSnapshot + ?Sized>(graph: &G) -> Result<()> {
    let mut degree_sum = 0usize;
    for node in graph.nodes() {
        let neighbors = graph.neighbors(node);
        if neighbors.contains(&node) {
            return Err(Error::PreconditionViolation(format!("self-loop at node {node}")));
        }
        if let Some(other) = neighbors.iter().find(|&&other| !graph.has_edge(other, node)) {
            return Err(Error::PreconditionViolation(format!(
                "edge {node} -> {other} has no reverse"
            )));
        }
        degree_sum += neighbors.len();
    }
    if degree_sum != 2 * graph.edge_count() {
        return Err(Error::PreconditionViolation(format!(
            "degree sum {degree_sum} does not match {} edges",
            graph.edge_count()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A deliberately broken snapshot: one-way adjacency.
    struct OneWay;

    impl GraphSnapshot for OneWay {
        type Subgraph = AdjacencyGraph;

        fn nodes(&self) -> Vec<NodeId> {
            vec![NodeId(1), NodeId(2)]
        }

        fn edge_count(&self) -> usize {
            1
        }

        fn neighbors(&self, node: NodeId) -> Cow<'_, NeighborSet> {
            let mut set = NeighborSet::new();
            if node == NodeId(1) {
                set.insert(NodeId(2));
            }
            Cow::Owned(set)
        }

        fn induced_subgraph(&self, _nodes: &[NodeId]) -> AdjacencyGraph {
            AdjacencyGraph::new()
        }
    }

    /// Claims more edges than its neighbor sets show.
    struct Undercounted(AdjacencyGraph);

    impl GraphSnapshot for Undercounted {
        type Subgraph = AdjacencyGraph;

        fn nodes(&self) -> Vec<NodeId> {
            self.0.nodes()
        }

        fn edge_count(&self) -> usize {
            self.0.edge_count() + 1
        }

        fn neighbors(&self, node: NodeId) -> Cow<'_, NeighborSet> {
            self.0.neighbors(node)
        }

        fn induced_subgraph(&self, nodes: &[NodeId]) -> AdjacencyGraph {
            self.0.induced_subgraph(nodes)
        }
    }

    #[test]
    fn simple_graph_passes() {
        assert!(validate_simple(&AdjacencyGraph::complete(5)).is_ok());
        assert!(validate_simple(&AdjacencyGraph::new()).is_ok());
    }

    #[test]
    fn asymmetric_adjacency_is_rejected() {
        let err = validate_simple(&OneWay).unwrap_err();
        assert!(matches!(err, Error::PreconditionViolation(_)));
    }

    #[test]
    fn edge_count_mismatch_is_rejected() {
        let err = validate_simple(&Undercounted(AdjacencyGraph::path(4))).unwrap_err();
        assert!(err.to_string().contains("degree sum"));
    }

    #[test]
    fn default_methods() {
        let g = AdjacencyGraph::star(3);
        assert_eq!(g.node_count(), 4);
        assert_eq!(g.degree(NodeId(0)), 3);
        assert!(g.has_edge(NodeId(0), NodeId(2)));
        assert!(!g.has_edge(NodeId(1), NodeId(2)));
    }
}
