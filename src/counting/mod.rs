//! # Exact Motif Counter
//!
//! Closed-form counts of the eight motifs from degrees, neighbor sets and
//! per-node triangle counts. Most formulas follow Duval, Estrada and Knight.
//!
//! | Motif | Count |
//! |-------|-------|
//! | Path3 | Σ C(deg, 2) |
//! | Triangle | Σ triangles-through-node / 3 |
//! | Path4 | Σ_{edges ij} (deg_i − 1)(deg_j − 1) − 3·Triangle |
//! | K4 | Σ trace(A_N(v)³) / 24 (see [`clique`]) |
//! | Star4 | Σ C(deg, 3) |
//! | Cycle4 | Σ_v Σ_{u<w ∈ N(v)} \|N(u) ∩ N(w) \ {v}\| / 4 |
//! | Diamond | Σ_{ordered edges ij} w(w − 1) / 4, w = \|N(i) ∩ N(j)\| |
//! | Tadpole | Σ triangles-through-node · (deg − 2), for deg > 2 |
//!
//! ## Precondition
//!
//! The input must be a simple undirected graph. On anything else the
//! formulas are meaningless; see [`crate::snapshot::validate_simple`].
//! A division that does not come out even, or a correction that would go
//! negative, is reported as [`Error::InvariantViolation`] instead of being
//! truncated.
//!
//! ## Limits
//!
//! Path3, Triangle, Path4, Star4 and Tadpole need only degrees and per-node
//! triangles and are always exact. Cycle4, Diamond and K4 walk neighbor
//! pairs and run under [`CountLimits`].

pub mod clique;

use std::time::{Duration, Instant};

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::model::{LimitExceeded, Motif, MotifVector, NodeId, PartialMotifVector};
use crate::snapshot::{GraphSnapshot, NeighborSet};
use crate::{Error, Result};


// ============================================================================
// Limits and outcome
// ============================================================================

/// Default neighborhood bound for graphs of unknown density.
pub const DEFAULT_MAX_NEIGHBORHOOD: usize = 256;
/// Default time budget for the pair-based steps, in milliseconds.
pub const DEFAULT_TIME_BUDGET_MS: u64 = 60_000;

/// Bounds on the pair-based steps (Cycle4, Diamond, K4), whose cost grows
/// with the cube of a node's degree.
///
/// `Default` gives [`DEFAULT_MAX_NEIGHBORHOOD`] and [`DEFAULT_TIME_BUDGET_MS`];
/// [`CountLimits::unbounded`] lifts both. In JSON, missing keys take the
/// defaults and `null` lifts a bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CountLimits {
    /// Give up when any node has more neighbors than this.
    pub max_neighborhood: Option<usize>,
    /// Give up when the count has run longer than this.
    pub time_budget_ms: Option<u64>,
}

impl Default for CountLimits {
    fn default() -> Self {
        Self {
            max_neighborhood: Some(DEFAULT_MAX_NEIGHBORHOOD),
            time_budget_ms: Some(DEFAULT_TIME_BUDGET_MS),
        }
    }
}

impl CountLimits {
    pub fn unbounded() -> Self {
        Self { max_neighborhood: None, time_budget_ms: None }
    }

    pub fn with_max_neighborhood(mut self, max: usize) -> Self {
        self.max_neighborhood = Some(max);
        self
    }

    pub fn with_time_budget(mut self, budget: Duration) -> Self {
        self.time_budget_ms = Some(budget.as_millis().try_into().unwrap_or(u64::MAX));
        self
    }

    pub fn time_budget(&self) -> Option<Duration> {
        self.time_budget_ms.map(Duration::from_millis)
    }
}

/// [`CountLimits`] measured from a fixed start.
#[derive(Debug, Clone, Copy)]
pub struct LimitGuard<'a> {
    limits: &'a CountLimits,
    started: Instant,
}

impl<'a> LimitGuard<'a> {
    pub fn start(limits: &'a CountLimits) -> Self {
        Self { limits, started: Instant::now() }
    }

    /// `Some` when a node of this degree is over the neighborhood bound.
    pub fn neighborhood(&self, degree: usize) -> Option<LimitExceeded> {
        let max = self.limits.max_neighborhood?;
        (degree > max).then_some(LimitExceeded::Neighborhood { degree, max })
    }

    /// `Some` once the time budget is spent.
    pub fn time(&self) -> Option<LimitExceeded> {
        let budget = self.limits.time_budget()?;
        (self.started.elapsed() > budget).then_some(LimitExceeded::TimeBudget { budget })
    }

    pub fn elapsed(&self) -> Duration {
        self.started.elapsed()
    }
}

/// Result of one guarded step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepCount {
    Exact(u64),
    Exceeded(LimitExceeded),
}

impl StepCount {
    pub fn exact(&self) -> Option<u64> {
        match self {
            StepCount::Exact(n) => Some(*n),
            StepCount::Exceeded(_) => None,
        }
    }

    pub fn exceeded(&self) -> Option<LimitExceeded> {
        match self {
            StepCount::Exact(_) => None,
            StepCount::Exceeded(exceeded) => Some(*exceeded),
        }
    }

    /// Run `next` only if this step finished.
    fn and_then(self, next: impl FnOnce() -> Result<StepCount>) -> Result<StepCount> {
        match self {
            StepCount::Exact(_) => next(),
            exceeded => Ok(exceeded),
        }
    }
}

/// Result of a bounded count.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CountOutcome {
    /// Every entry is exact.
    Exact(MotifVector<u64>),
    /// A limit stopped the pair-based steps. The entries it reached
    /// (always K4, possibly Diamond and Cycle4) are unknown; every other
    /// entry is exact.
    Degraded {
        partial: PartialMotifVector,
        exceeded: LimitExceeded,
    },
}

impl CountOutcome {
    /// The full vector, or `Error::ResourceExceeded` if a limit was hit.
    pub fn into_exact(self) -> Result<MotifVector<u64>> {
        match self {
            CountOutcome::Exact(v) => Ok(v),
            CountOutcome::Degraded { exceeded, .. } => Err(Error::ResourceExceeded(exceeded)),
        }
    }

    /// All entries, with `None` for the ones that could not be computed.
    pub fn partial(&self) -> PartialMotifVector {
        match self {
            CountOutcome::Exact(v) => v.into_partial(),
            CountOutcome::Degraded { partial, .. } => *partial,
        }
    }

    pub fn exceeded(&self) -> Option<LimitExceeded> {
        match self {
            CountOutcome::Exact(_) => None,
            CountOutcome::Degraded { exceeded, .. } => Some(*exceeded),
        }
    }

    pub fn is_exact(&self) -> bool {
        matches!(self, CountOutcome::Exact(_))
    }
}

// ============================================================================
// Entry points
// ============================================================================

/// Count all eight motifs in a simple undirected graph, with no limits.
pub fn count_motifs<G: GraphSnapshot + ?Sized>(graph: &G) -> Result<MotifVector<u64>> {
    count_motifs_bounded(graph, &CountLimits::unbounded())?.into_exact()
}

/// Count all eight motifs, stopping the pair-based steps when `limits` are hit.
///
/// The neighborhood bound is checked against the largest degree before any
/// pair-based work starts; the time budget is checked as that work runs.
pub fn count_motifs_bounded<G: GraphSnapshot + ?Sized>(
    graph: &G,
    limits: &CountLimits,
) -> Result<CountOutcome> {
    let guard = LimitGuard::start(limits);
    let nodes = graph.nodes();
    let local = LocalCounts::collect(graph, &nodes)?;

    // Path4 reads Triangle, so Triangle goes first.
    let triangle = local.triangles()?;
    let path4 = count_path4(graph, &nodes, &local, triangle)?;
    let path3 = local.path3();
    let star4 = local.star4();
    let tadpole = local.tadpoles();
    tracing::debug!(path3, triangle, path4, star4, tadpole, "counted degree-based motifs");

    // Once a step is cut short the later ones are skipped.
    let cycle4 = match guard.neighborhood(local.max_degree()) {
        Some(exceeded) => StepCount::Exceeded(exceeded),
        None => count_cycle4(graph, &nodes, &guard)?,
    };
    let diamond = cycle4.and_then(|| count_diamonds(graph, &nodes, &guard))?;
    let k4 = diamond.and_then(|| clique::count_k4(graph, &nodes, &guard))?;
    tracing::debug!(
        ?cycle4,
        ?diamond,
        ?k4,
        elapsed_us = guard.elapsed().as_micros() as u64,
        "counted pair-based motifs"
    );

    let partial = MotifVector::new([
        Some(path3),
        Some(triangle),
        Some(path4),
        k4.exact(),
        Some(star4),
        cycle4.exact(),
        diamond.exact(),
        Some(tadpole),
    ]);
    Ok(match k4.exceeded() {
        None => CountOutcome::Exact(partial.map(|_, v| v.unwrap_or_default())),
        Some(exceeded) => {
            tracing::warn!(%exceeded, nodes = nodes.len(), "pair-based counts abandoned");
            CountOutcome::Degraded { partial, exceeded }
        }
    })
}

// ============================================================================
// Per-node figures
// ============================================================================

/// Degree and triangles-through-node for every node.
struct LocalCounts {
    /// (degree, triangles through the node), in node order
    per_node: Vec<(u64, u64)>,
    degree: HashMap<NodeId, u64>,
}

impl LocalCounts {
    fn collect<G: GraphSnapshot + ?Sized>(graph: &G, nodes: &[NodeId]) -> Result<Self> {
        let mut per_node = Vec::with_capacity(nodes.len());
        let mut degree = HashMap::with_capacity(nodes.len());
        for &node in nodes {
            let neighbors = graph.neighbors(node);
            // Each triangle at `node` is seen from both of its other corners.
            let mut corners = 0u64;
            for &u in neighbors.iter() {
                corners += common_count(&neighbors, &graph.neighbors(u));
            }
            let triangles = exact_div(corners, 2, Motif::Triangle)?;
            let d = neighbors.len() as u64;
            per_node.push((d, triangles));
            degree.insert(node, d);
        }
        Ok(Self { per_node, degree })
    }

    fn degree(&self, node: NodeId) -> u64 {
        self.degree.get(&node).copied().unwrap_or(0)
    }

    fn max_degree(&self) -> usize {
        self.per_node.iter().map(|&(d, _)| d).max().unwrap_or(0) as usize
    }

    fn path3(&self) -> u64 {
        self.per_node.iter().map(|&(d, _)| choose2(d)).sum()
    }

    fn triangles(&self) -> Result<u64> {
        let total = self.per_node.iter().map(|&(_, t)| t).sum();
        exact_div(total, 3, Motif::Triangle)
    }

    fn star4(&self) -> u64 {
        self.per_node.iter().map(|&(d, _)| choose3(d)).sum()
    }

    /// Counted once per tadpole, at the triangle corner that carries the tail.
    fn tadpoles(&self) -> u64 {
        self.per_node
            .iter()
            .filter(|&&(d, _)| d > 2)
            .map(|&(d, t)| t * (d - 2))
            .sum()
    }
}

// ============================================================================
// Edge- and pair-based motifs
// ============================================================================

/// Every edge extended by one more neighbor at each end, minus the
/// extensions that close back into a triangle (three per triangle).
fn count_path4<G: GraphSnapshot + ?Sized>(
    graph: &G,
    nodes: &[NodeId],
    local: &LocalCounts,
    triangle: u64,
) -> Result<u64> {
    let mut extensions = 0u64;
    for &i in nodes {
        let di = local.degree(i);
        for &j in graph.neighbors(i).iter() {
            // Both ends of an edge have degree at least one.
            let (Some(ei), Some(ej)) = (di.checked_sub(1), local.degree(j).checked_sub(1)) else {
                return Err(Error::InvariantViolation {
                    motif: Motif::Path4,
                    detail: format!("edge {i} -- {j} has an endpoint with no listed neighbors"),
                });
            };
            if j > i {
                extensions += ei * ej;
            }
        }
    }
    extensions.checked_sub(3 * triangle).ok_or_else(|| Error::InvariantViolation {
        motif: Motif::Path4,
        detail: format!("{extensions} edge extensions but {triangle} triangles"),
    })
}

/// Each 4-cycle is found from each of its four corners, through the pair of
/// that corner's cycle neighbors and the opposite corner.
fn count_cycle4<G: GraphSnapshot + ?Sized>(
    graph: &G,
    nodes: &[NodeId],
    guard: &LimitGuard<'_>,
) -> Result<StepCount> {
    let mut corners = 0u64;
    for &node in nodes {
        let neighbors: Vec<NodeId> = sorted(&graph.neighbors(node));
        for (k, &u) in neighbors.iter().enumerate() {
            if let Some(exceeded) = guard.time() {
                return Ok(StepCount::Exceeded(exceeded));
            }
            let nu = graph.neighbors(u);
            for &w in &neighbors[k + 1..] {
                let nw = graph.neighbors(w);
                let shared = common_count(&nu, &nw);
                // `node` itself is always a shared neighbor of u and w.
                corners += shared - u64::from(nu.contains(&node) && nw.contains(&node));
            }
        }
    }
    exact_div(corners, 4, Motif::Cycle4).map(StepCount::Exact)
}

/// Two triangles on a shared edge. `w(w - 1)` counts ordered pairs of
/// apexes over an ordered edge, so each diamond shows up four times.
fn count_diamonds<G: GraphSnapshot + ?Sized>(
    graph: &G,
    nodes: &[NodeId],
    guard: &LimitGuard<'_>,
) -> Result<StepCount> {
    let mut pairs = 0u64;
    for &i in nodes {
        if let Some(exceeded) = guard.time() {
            return Ok(StepCount::Exceeded(exceeded));
        }
        let ni = graph.neighbors(i);
        for &j in ni.iter() {
            let w = common_count(&ni, &graph.neighbors(j));
            pairs += w * w.saturating_sub(1);
        }
    }
    exact_div(pairs, 4, Motif::Diamond).map(StepCount::Exact)
}

// ============================================================================
// Helpers
// ============================================================================

/// |a ∩ b|, iterating the smaller set.
pub(crate) fn common_count(a: &NeighborSet, b: &NeighborSet) -> u64 {
    let (small, large) = if a.len() <= b.len() { (a, b) } else { (b, a) };
    small.iter().filter(|n| large.contains(*n)).count() as u64
}

/// `total / divisor`, or an invariant violation if it does not divide evenly.
pub(crate) fn exact_div(total: u64, divisor: u64, motif: Motif) -> Result<u64> {
    if total % divisor == 0 {
        Ok(total / divisor)
    } else {
        Err(Error::InvariantViolation {
            motif,
            detail: format!("{total} is not divisible by {divisor}"),
        })
    }
}

fn sorted(set: &NeighborSet) -> Vec<NodeId> {
    let mut v: Vec<NodeId> = set.iter().copied().collect();
    v.sort_unstable();
    v
}

fn choose2(k: u64) -> u64 {
    k * k.saturating_sub(1) / 2
}

fn choose3(k: u64) -> u64 {
    k * k.saturating_sub(1) * k.saturating_sub(2) / 6
}
