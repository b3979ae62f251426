//! The eight counted motifs and the fixed-length vector indexed by them.

use std::ops::Index;

use serde::{Deserialize, Serialize};

/// Number of motifs in a vector.
pub const MOTIF_COUNT: usize = 8;

/// One of the eight small subgraph patterns.
///
/// The declaration order is the vector order; `Motif as usize` is the index.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Motif {
    /// Path on 3 nodes.
    Path3,
    /// Complete graph on 3 nodes.
    Triangle,
    /// Path on 4 nodes.
    Path4,
    /// Complete graph on 4 nodes.
    K4,
    /// One center joined to three leaves.
    Star4,
    /// Cycle on 4 nodes.
    Cycle4,
    /// K4 minus one edge: two triangles sharing an edge.
    Diamond,
    /// Triangle with a pendant edge.
    Tadpole,
}

impl Motif {
    pub const ALL: [Motif; MOTIF_COUNT] = [
        Motif::Path3,
        Motif::Triangle,
        Motif::Path4,
        Motif::K4,
        Motif::Star4,
        Motif::Cycle4,
        Motif::Diamond,
        Motif::Tadpole,
    ];

    pub const fn index(self) -> usize {
        self as usize
    }

    /// Nodes in the pattern.
    pub const fn node_count(self) -> usize {
        match self {
            Motif::Path3 | Motif::Triangle => 3,
            _ => 4,
        }
    }

    /// Edges in the pattern.
    pub const fn edge_count(self) -> usize {
        match self {
            Motif::Path3 => 2,
            Motif::Triangle | Motif::Path4 | Motif::Star4 => 3,
            Motif::Cycle4 | Motif::Tadpole => 4,
            Motif::Diamond => 5,
            Motif::K4 => 6,
        }
    }

    /// Column label used in tabular reports.
    pub const fn column(self) -> &'static str {
        match self {
            Motif::Path3 => "3-paths",
            Motif::Triangle => "Triangles",
            Motif::Path4 => "4-paths",
            Motif::K4 => "4-complete",
            Motif::Star4 => "4-star",
            Motif::Cycle4 => "Squares",
            Motif::Diamond => "Diamonds",
            Motif::Tadpole => "Tadpoles",
        }
    }
}

impl std::fmt::Display for Motif {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        std::fmt::Debug::fmt(self, f)
    }
}

/// A value per motif, in `Motif::ALL` order.
///
/// Produced fresh per graph and never mutated afterwards; build one with
/// [`MotifVector::from_fn`] or [`MotifVector::new`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MotifVector<T>([T; MOTIF_COUNT]);

/// Counts where some entries could not be computed.
pub type PartialMotifVector = MotifVector<Option<u64>>;

impl<T> MotifVector<T> {
    pub const fn new(values: [T; MOTIF_COUNT]) -> Self {
        Self(values)
    }

    pub fn from_fn(mut f: impl FnMut(Motif) -> T) -> Self {
        Self(std::array::from_fn(|i| f(Motif::ALL[i])))
    }

    pub fn get(&self, motif: Motif) -> &T {
        &self.0[motif.index()]
    }

    pub fn iter(&self) -> impl Iterator<Item = (Motif, &T)> + '_ {
        Motif::ALL.into_iter().zip(self.0.iter())
    }

    pub fn map<U>(self, mut f: impl FnMut(Motif, T) -> U) -> MotifVector<U> {
        let mut motifs = Motif::ALL.into_iter();
        MotifVector(self.0.map(|v| {
            // Array::map visits in index order, so this stays aligned.
            let m = motifs.next().unwrap_or(Motif::Tadpole);
            f(m, v)
        }))
    }
}

impl<T> Index<Motif> for MotifVector<T> {
    type Output = T;

    fn index(&self, motif: Motif) -> &T {
        &self.0[motif.index()]
    }
}

impl MotifVector<u64> {
    pub fn to_f64(&self) -> MotifVector<f64> {
        self.map(|_, v| v as f64)
    }

    pub fn into_partial(self) -> PartialMotifVector {
        self.map(|_, v| Some(v))
    }
}

impl PartialMotifVector {
    /// All entries known, or `None`.
    pub fn complete(&self) -> Option<MotifVector<u64>> {
        if self.0.iter().all(Option::is_some) {
            Some(self.map(|_, v| v.unwrap_or_default()))
        } else {
            None
        }
    }

    /// Motifs whose value is unknown.
    pub fn unknown(&self) -> impl Iterator<Item = Motif> + '_ {
        self.iter().filter(|(_, v)| v.is_none()).map(|(m, _)| m)
    }
}
