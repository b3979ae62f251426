//! # Graph Source Trait
//!
//! The contract between the census pipeline and whatever supplies street
//! networks. A source either hands back the network for a place, or says
//! why there is none. Transport failures are errors; "this place has no
//! usable outline" is not.
//!
//! ## Implementations
//!
//! | Source | Module | Description |
//! |--------|--------|-------------|
//! | `MemorySource` | `memory` | Preloaded networks, for tests and embedding |
//!
//! A geodata-service client lives outside this crate and implements the
//! same trait.

pub mod memory;

use async_trait::async_trait;

use crate::model::Unavailable;
use crate::snapshot::RawGraph;
use crate::Result;

pub use memory::MemorySource;

/// Result of asking a source for a place.
#[derive(Debug, Clone, PartialEq)]
pub enum Fetched {
    Available(RawGraph),
    Unavailable(Unavailable),
}

impl Fetched {
    pub fn into_graph(self) -> Option<RawGraph> {
        match self {
            Fetched::Available(graph) => Some(graph),
            Fetched::Unavailable(_) => None,
        }
    }
}

// ============================================================================
// GraphSource Trait
// ============================================================================

/// Supplies the street network of a place.
#[async_trait]
pub trait GraphSource: Send + Sync + 'static {
    /// Fetch the network for a geocoder query such as `"Lisbon, Portugal"`.
    async fn fetch(&self, place: &str) -> Result<Fetched>;
}

/// Outline plausibility as applied by street-network fetchers: the outline
/// must be a polygon, with an area in square degrees inside
/// [`MIN_OUTLINE_AREA`, `MAX_OUTLINE_AREA`].
pub fn check_outline(geometry: &str, area: f64) -> std::result::Result<(), Unavailable> {
    if geometry != "Polygon" && geometry != "MultiPolygon" {
        return Err(Unavailable::NotAPolygon { geometry: geometry.to_string() });
    }
    if !(MIN_OUTLINE_AREA..=MAX_OUTLINE_AREA).contains(&area) {
        return Err(Unavailable::ImplausibleArea { area });
    }
    Ok(())
}

/// Smallest outline area accepted as a city, in square degrees.
pub const MIN_OUTLINE_AREA: f64 = 0.0001;
/// Largest outline area accepted as a city, in square degrees.
pub const MAX_OUTLINE_AREA: f64 = 1.0;
