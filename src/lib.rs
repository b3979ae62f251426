//! # motif-census — Small-Subgraph Census for Street Networks
//!
//! Exact counts of the eight 3- and 4-node motifs of a simple undirected
//! graph, their non-nested (induced) corrections, and the matching
//! Erdős–Rényi expectations.
//!
//! ## Design Principles
//!
//! 1. **Trait-first**: `GraphSnapshot` is the contract between the counter and any graph
//! 2. **Value vectors**: `MotifVector` is a fixed-size value indexed by `Motif`
//! 3. **Pure core**: counting, correction and expectation are functions, not services
//! 4. **Explicit failure**: unavailable graphs and tripped limits are types, not nulls
//!
//! ## Quick Start
//!
//! ```rust
//! use motif_census::{count_motifs, to_nonnested, expected_motifs, AdjacencyGraph, Motif};
//!
//! # fn example() -> motif_census::Result<()> {
//! // A triangle with a tail
//! let graph = AdjacencyGraph::from_edges([(1u64, 2u64), (2, 3), (1, 3), (3, 4)])?;
//!
//! let raw = count_motifs(&graph)?;
//! assert_eq!(raw[Motif::Tadpole], 1);
//!
//! let induced = to_nonnested(&raw)?;
//! assert_eq!(induced[Motif::Path3], raw[Motif::Path3] - 3);
//!
//! let random = expected_motifs(4, 4)?;
//! println!("observed {} triangles, expected {:.2}", raw[Motif::Triangle], random[Motif::Triangle]);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```
//!
//! ## Census
//!
//! | Piece | Module | Description |
//! |-------|--------|-------------|
//! | `GraphSource` | `source` | Supplies the street network of a place |
//! | `Census` | `census` | Fetch, simplify, count, one record per place |
//! | `PopulationTable` | `population` | Joins UN population figures by city name |
//! | `write_csv` | `export` | One CSV row per record |

// ============================================================================
// Modules
// ============================================================================

pub mod model;
pub mod snapshot;
pub mod counting;
pub mod nonnested;
pub mod expectation;
pub mod source;
pub mod census;
pub mod config;
pub mod population;
pub mod export;
mod table;

// ============================================================================
// Re-exports: Model (the value types)
// ============================================================================

pub use model::{
    Motif, MotifVector, PartialMotifVector, MOTIF_COUNT,
    NodeId, Edge, Place, NetworkSizes, CensusOutcome, CensusRecord,
    Unavailable, LimitExceeded,
};

// ============================================================================
// Re-exports: Snapshots
// ============================================================================

pub use snapshot::{GraphSnapshot, NeighborSet, AdjacencyGraph, RawGraph, Simplified, validate_simple};

// ============================================================================
// Re-exports: Core computations
// ============================================================================

pub use counting::{count_motifs, count_motifs_bounded, CountLimits, CountOutcome};
pub use nonnested::{to_nonnested, to_nonnested_partial};
pub use expectation::{edge_probability, expected_motifs, expected_nonnested};

// ============================================================================
// Re-exports: Census
// ============================================================================

pub use source::{GraphSource, Fetched, MemorySource};
pub use census::{Census, MotifProfile, parse_places};
pub use config::CensusConfig;
pub use population::{PopulationTable, AltNames, join_population};

// ============================================================================
// Error Types
// ============================================================================

#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The input graph is not simple (self-loop, parallel or one-way edge).
    #[error("Precondition violation: {0}")]
    PreconditionViolation(String),

    /// A count that must be an exact non-negative integer is not.
    #[error("Invariant violation in {motif} count: {detail}")]
    InvariantViolation { motif: Motif, detail: String },

    #[error("Domain error: {0}")]
    DomainError(String),

    /// Counting hit a configured bound and an exact vector was required.
    #[error("Resource limit exceeded: {0}")]
    ResourceExceeded(LimitExceeded),

    #[error("Graph source error: {0}")]
    Source(String),

    #[error("Parse error at line {line}: {message}")]
    Parse { line: usize, message: String },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
