//! K4 counting through neighborhood triangles.
//!
//! For each node `v`, the number of closed 3-walks inside the subgraph
//! induced by `N(v)` is `trace(A_N(v)³)`, six times the triangles of that
//! neighborhood. Every K4 is one such triangle from each of its four
//! corners, so the grand total is 24 per K4.
//!
//! This is clique enumeration in disguise: cost grows with the square of the
//! neighborhood size times its density, per node. Street networks are
//! sparse and cheap; dense social graphs are not. A [`LimitGuard`] bounds the
//! step by neighborhood size and by wall time, and a tripped bound makes K4
//! unknown rather than blocking.

use smallvec::SmallVec;

use crate::model::{Motif, NodeId};
use crate::snapshot::GraphSnapshot;
use crate::Result;
use super::{common_count, exact_div, LimitGuard, StepCount};

/// Count K4 subgraphs, visiting `nodes` in order and checking `guard`
/// before each neighborhood.
pub fn count_k4<G: GraphSnapshot + ?Sized>(
    graph: &G,
    nodes: &[NodeId],
    guard: &LimitGuard<'_>,
) -> Result<StepCount> {
    let mut walks = 0u64;

    for &node in nodes {
        let neighbors = graph.neighbors(node);
        if let Some(exceeded) = guard.neighborhood(neighbors.len()).or_else(|| guard.time()) {
            return Ok(StepCount::Exceeded(exceeded));
        }
        // A neighborhood needs three nodes to hold a triangle.
        if neighbors.len() < 3 {
            continue;
        }

        let members: SmallVec<[NodeId; 16]> = neighbors.iter().copied().collect();
        walks += closed_three_walks(&graph.induced_subgraph(&members));
    }

    tracing::debug!(walks, elapsed_us = guard.elapsed().as_micros() as u64, "K4 walks counted");
    exact_div(walks, 24, Motif::K4).map(StepCount::Exact)
}

/// `trace(A³)` for the adjacency matrix `A` of `graph`: the number of
/// closed walks of length 3, i.e. six per triangle.
pub fn closed_three_walks<G: GraphSnapshot + ?Sized>(graph: &G) -> u64 {
    let mut walks = 0u64;
    for u in graph.nodes() {
        let nu = graph.neighbors(u);
        for &v in nu.iter() {
            walks += common_count(&nu, &graph.neighbors(v));
        }
    }
    walks
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::counting::CountLimits;
    use crate::model::LimitExceeded;
    use crate::snapshot::AdjacencyGraph;
    use std::time::Duration;

    #[test]
    fn closed_walks_are_six_per_triangle() {
        assert_eq!(closed_three_walks(&AdjacencyGraph::complete(3)), 6);
        assert_eq!(closed_three_walks(&AdjacencyGraph::complete(4)), 24);
        assert_eq!(closed_three_walks(&AdjacencyGraph::cycle(5)), 0);
        assert_eq!(closed_three_walks(&AdjacencyGraph::new()), 0);
    }

    #[test]
    fn complete_graphs() {
        for (n, expected) in [(3u64, 0u64), (4, 1), (5, 5), (7, 35)] {
            let g = AdjacencyGraph::complete(n);
            let limits = CountLimits::unbounded();
            let count = count_k4(&g, &g.nodes(), &LimitGuard::start(&limits)).unwrap();
            assert_eq!(count, StepCount::Exact(expected), "K{n}");
        }
    }

    #[test]
    fn bound_equal_to_degree_does_not_trip() {
        let g = AdjacencyGraph::cycle(10);
        let limits = CountLimits::unbounded().with_max_neighborhood(2);
        let guard = LimitGuard::start(&limits);
        assert_eq!(count_k4(&g, &g.nodes(), &guard).unwrap(), StepCount::Exact(0));

        let tight = CountLimits::unbounded().with_max_neighborhood(1);
        assert_eq!(
            count_k4(&g, &g.nodes(), &LimitGuard::start(&tight)).unwrap(),
            StepCount::Exceeded(LimitExceeded::Neighborhood { degree: 2, max: 1 })
        );
    }

    #[test]
    fn zero_time_budget_trips() {
        let g = AdjacencyGraph::complete(40);
        let limits = CountLimits::unbounded().with_time_budget(Duration::ZERO);
        // Elapsed time is positive by the second neighborhood at the latest.
        let count = count_k4(&g, &g.nodes(), &LimitGuard::start(&limits)).unwrap();
        assert_eq!(
            count,
            StepCount::Exceeded(LimitExceeded::TimeBudget { budget: Duration::ZERO })
        );
    }
}
