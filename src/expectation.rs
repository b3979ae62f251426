//! # Random-Graph Expectation Calculator
//!
//! Expected motif counts in an Erdős–Rényi graph `G(n, p)` whose edge
//! probability matches the observed density, `p = 2m / (n(n − 1))`.
//!
//! Each expectation is the number of ways to place the motif on `n`
//! labelled nodes times the probability that all of its edges exist:
//!
//! | Motif | E[count] |
//! |-------|----------|
//! | Path3 | n(n−1)(n−2)·p² / 2 |
//! | Triangle | n(n−1)(n−2)·p³ / 6 |
//! | Path4 | n(n−1)(n−2)(n−3)·p³ / 2 |
//! | K4 | n(n−1)(n−2)(n−3)·p⁶ / 24 |
//! | Star4 | n(n−1)(n−2)(n−3)·p³ / 6 |
//! | Cycle4 | n(n−1)(n−2)(n−3)·p⁴ / 8 |
//! | Diamond | n(n−1)(n−2)(n−3)·p⁵ / 4 |
//! | Tadpole | n(n−1)(n−2)(n−3)·p⁴ / 2 |
//!
//! The non-nested expectation additionally requires the edges that would
//! make the motif denser to be absent: a factor `(1 − p)^e` with `e` from
//! [`NONNESTED_EXPONENTS`].

use crate::model::{Motif, MotifVector, MOTIF_COUNT};
use crate::{Error, Result};

/// Missing edges per motif, in `Motif::ALL` order.
pub const NONNESTED_EXPONENTS: [i32; MOTIF_COUNT] = [1, 0, 3, 0, 3, 2, 1, 2];

/// Edge probability of the matching `G(n, p)`.
///
/// Fails with [`Error::DomainError`] for `n < 2` (no node pairs) and for
/// more edges than a simple graph on `n` nodes can hold.
pub fn edge_probability(n: u64, m: u64) -> Result<f64> {
    if n < 2 {
        return Err(Error::DomainError(format!(
            "edge probability needs at least 2 nodes, got {n}"
        )));
    }
    let pairs = n as f64 * (n - 1) as f64 / 2.0;
    let edges = m as f64;
    if edges > pairs {
        return Err(Error::DomainError(format!(
            "{m} edges do not fit in a simple graph on {n} nodes"
        )));
    }
    Ok(edges / pairs)
}

/// Expected raw counts in `G(n, p)` with `p` from [`edge_probability`].
pub fn expected_motifs(n: u64, m: u64) -> Result<MotifVector<f64>> {
    let p = edge_probability(n, m)?;
    Ok(expected_at(n, p))
}

/// Expected non-nested counts in `G(n, p)` with `p` from [`edge_probability`].
pub fn expected_nonnested(n: u64, m: u64) -> Result<MotifVector<f64>> {
    let p = edge_probability(n, m)?;
    Ok(expected_at(n, p).map(|motif, e| e * (1.0 - p).powi(NONNESTED_EXPONENTS[motif.index()])))
}

fn expected_at(n: u64, p: f64) -> MotifVector<f64> {
    let n = n as f64;
    // Ordered placements of 3 and 4 distinct nodes.
    let three = n * (n - 1.0) * (n - 2.0);
    let four = three * (n - 3.0);
    MotifVector::from_fn(|motif| match motif {
        Motif::Path3 => three * p.powi(2) / 2.0,
        Motif::Triangle => three * p.powi(3) / 6.0,
        Motif::Path4 => four * p.powi(3) / 2.0,
        Motif::K4 => four * p.powi(6) / 24.0,
        Motif::Star4 => four * p.powi(3) / 6.0,
        Motif::Cycle4 => four * p.powi(4) / 8.0,
        Motif::Diamond => four * p.powi(5) / 4.0,
        Motif::Tadpole => four * p.powi(4) / 2.0,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f64, b: f64) -> bool {
        (a - b).abs() <= 1e-9 * a.abs().max(b.abs()).max(1.0)
    }

    #[test]
    fn probability_is_density() {
        assert_eq!(edge_probability(4, 6).unwrap(), 1.0);
        assert_eq!(edge_probability(4, 0).unwrap(), 0.0);
        assert!(close(edge_probability(5, 4).unwrap(), 0.4));
    }

    #[test]
    fn tiny_graphs_are_out_of_domain() {
        for n in [0, 1] {
            assert!(matches!(expected_motifs(n, 0), Err(Error::DomainError(_))));
            assert!(matches!(expected_nonnested(n, 0), Err(Error::DomainError(_))));
        }
        assert!(matches!(edge_probability(3, 4), Err(Error::DomainError(_))));
    }

    #[test]
    fn complete_density_reproduces_complete_counts() {
        // p = 1: every placement exists, so expectations equal K_n counts.
        let e = expected_motifs(4, 6).unwrap();
        let k4 = [12.0, 4.0, 12.0, 1.0, 4.0, 3.0, 6.0, 12.0];
        for (motif, expected) in Motif::ALL.iter().zip(k4) {
            assert!(close(e[*motif], expected), "{motif}: {} vs {expected}", e[*motif]);
        }
    }

    #[test]
    fn complete_density_has_no_nested_room() {
        let e = expected_nonnested(4, 6).unwrap();
        for (motif, value) in e.iter() {
            match motif {
                Motif::Triangle | Motif::K4 => assert!(*value > 0.0),
                _ => assert_eq!(*value, 0.0, "{motif}"),
            }
        }
    }

    #[test]
    fn three_nodes_have_no_four_node_motifs() {
        let e = expected_motifs(3, 2).unwrap();
        assert!(e[Motif::Path3] > 0.0);
        for motif in Motif::ALL.iter().filter(|m| m.node_count() == 4) {
            assert_eq!(e[*motif], 0.0);
        }
    }

    #[test]
    fn known_value() {
        // n = 10, m = 9 → p = 0.2; E[Path3] = 720 · 0.04 / 2 = 14.4
        let e = expected_motifs(10, 9).unwrap();
        assert!(close(e[Motif::Path3], 14.4));
        let nn = expected_nonnested(10, 9).unwrap();
        assert!(close(nn[Motif::Path3], 14.4 * 0.8));
        assert!(close(nn[Motif::Triangle], e[Motif::Triangle]));
    }
}
