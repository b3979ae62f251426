//! One report row per analyzed place.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{LimitExceeded, Motif, PartialMotifVector, Unavailable};

/// A place to analyze, as listed in the input table.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Place {
    pub city: String,
    pub country: String,
    pub continent: String,
}

impl Place {
    pub fn new(
        city: impl Into<String>,
        country: impl Into<String>,
        continent: impl Into<String>,
    ) -> Self {
        Self { city: city.into(), country: country.into(), continent: continent.into() }
    }

    /// Geocoder query, e.g. `"Rio de Janeiro, Brazil"` for `Rio_de_Janeiro`/`Brazil`.
    pub fn query(&self) -> String {
        format!("{}, {}", self.city.replace('_', " "), self.country.replace('_', " "))
    }
}

/// Order and size figures for the network as fetched and after simplification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct NetworkSizes {
    /// Nodes in the fetched network.
    pub node_count: u64,
    /// Edges in the fetched network, counting parallels and loops.
    pub edge_count: u64,
    /// Edges left after collapsing parallels and dropping loops.
    pub essential_edge_count: u64,
    pub self_loop_count: u64,
}

/// What happened when a place was analyzed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum CensusOutcome {
    Analyzed {
        sizes: NetworkSizes,
        motifs: PartialMotifVector,
        /// Set when a limit cut the pair-based steps short; their entries are unknown.
        degraded: Option<LimitExceeded>,
    },
    Unavailable(Unavailable),
}

/// A report row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CensusRecord {
    pub place: Place,
    /// The query string used to fetch the graph.
    pub identifier: String,
    pub outcome: CensusOutcome,
    /// Filled in by a population join, if any.
    pub population: Option<f64>,
    pub analyzed_at: DateTime<Utc>,
}

impl CensusRecord {
    pub fn sizes(&self) -> Option<NetworkSizes> {
        match &self.outcome {
            CensusOutcome::Analyzed { sizes, .. } => Some(*sizes),
            CensusOutcome::Unavailable(_) => None,
        }
    }

    pub fn motifs(&self) -> Option<&PartialMotifVector> {
        match &self.outcome {
            CensusOutcome::Analyzed { motifs, .. } => Some(motifs),
            CensusOutcome::Unavailable(_) => None,
        }
    }

    pub fn motif(&self, motif: Motif) -> Option<u64> {
        self.motifs().and_then(|v| v[motif])
    }

    pub fn node_count(&self) -> Option<u64> {
        self.sizes().map(|s| s.node_count)
    }

    pub fn edge_count(&self) -> Option<u64> {
        self.sizes().map(|s| s.edge_count)
    }

    pub fn essential_edge_count(&self) -> Option<u64> {
        self.sizes().map(|s| s.essential_edge_count)
    }

    pub fn self_loop_count(&self) -> Option<u64> {
        self.sizes().map(|s| s.self_loop_count)
    }

    pub fn is_available(&self) -> bool {
        matches!(self.outcome, CensusOutcome::Analyzed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::MotifVector;

    #[test]
    fn query_replaces_underscores() {
        let place = Place::new("Rio_de_Janeiro", "Brazil", "South_America");
        assert_eq!(place.query(), "Rio de Janeiro, Brazil");
        let place = Place::new("Kuala_Lumpur", "Malaysia", "Asia");
        assert_eq!(place.query(), "Kuala Lumpur, Malaysia");
    }

    #[test]
    fn unavailable_rows_have_no_counts() {
        let record = CensusRecord {
            place: Place::new("Atlantis", "Nowhere", "Ocean"),
            identifier: "Atlantis, Nowhere".into(),
            outcome: CensusOutcome::Unavailable(Unavailable::NoResult),
            population: None,
            analyzed_at: Utc::now(),
        };
        assert!(!record.is_available());
        assert_eq!(record.node_count(), None);
        assert_eq!(record.self_loop_count(), None);
        for m in Motif::ALL {
            assert_eq!(record.motif(m), None);
        }
    }

    #[test]
    fn analyzed_rows_expose_counts() {
        let record = CensusRecord {
            place: Place::new("A", "B", "C"),
            identifier: "A, B".into(),
            outcome: CensusOutcome::Analyzed {
                sizes: NetworkSizes { node_count: 4, edge_count: 4, essential_edge_count: 3, self_loop_count: 1 },
                motifs: MotifVector::new([2, 0, 1, 0, 0, 0, 0, 0]).into_partial(),
                degraded: None,
            },
            population: None,
            analyzed_at: Utc::now(),
        };
        assert_eq!(record.edge_count(), Some(4));
        assert_eq!(record.essential_edge_count(), Some(3));
        assert_eq!(record.motif(Motif::Path4), Some(1));
    }
}
