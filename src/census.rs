//! # Census Pipeline
//!
//! Runs the motif census over a list of places:
//!
//! ```text
//! Place → GraphSource::fetch → RawGraph::simplify → count_motifs_bounded → CensusRecord
//!                    ↘ Unavailable ────────────────────────────────────────↗
//! ```
//!
//! Each place is independent. A failure for one place (source error,
//! invariant violation) is returned for that place only; the others still
//! run.

use std::io::BufRead;
use std::time::Instant;

use chrono::Utc;

use crate::config::CensusConfig;
use crate::counting::{count_motifs_bounded, CountOutcome};
use crate::expectation::{expected_motifs, expected_nonnested};
use crate::model::{CensusOutcome, CensusRecord, MotifVector, Place};
use crate::nonnested::to_nonnested;
use crate::snapshot::{validate_simple, GraphSnapshot};
use crate::source::{Fetched, GraphSource};
use crate::table::{field, Records};
use crate::Result;

// ============================================================================
// Census handle
// ============================================================================

/// A graph source plus the configuration to count with.
pub struct Census<S: GraphSource> {
    source: S,
    config: CensusConfig,
}

impl<S: GraphSource> Census<S> {
    /// Census with default configuration (finite default count limits).
    pub fn new(source: S) -> Self {
        Self::with_config(source, CensusConfig::default())
    }

    pub fn with_config(source: S, config: CensusConfig) -> Self {
        Self { source, config }
    }

    pub fn config(&self) -> &CensusConfig {
        &self.config
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    /// Parse a place list using the configured delimiter.
    pub fn read_places(&self, reader: impl BufRead) -> Result<Vec<Place>> {
        parse_places(reader, self.config.delimiter)
    }

    /// Fetch, simplify and count one place.
    pub async fn analyze(&self, place: &Place) -> Result<CensusRecord> {
        let identifier = place.query();
        let started = Instant::now();

        let outcome = match self.source.fetch(&identifier).await? {
            Fetched::Unavailable(reason) => {
                tracing::warn!(place = %identifier, %reason, "no graph for place");
                CensusOutcome::Unavailable(reason)
            }
            Fetched::Available(raw) => {
                tracing::debug!(place = %identifier, elapsed_ms = started.elapsed().as_millis() as u64, "graph fetched");
                let simplified = raw.simplify();
                let counted = count_snapshot(&simplified.graph, &self.config)?;
                CensusOutcome::Analyzed {
                    sizes: simplified.sizes,
                    motifs: counted.partial(),
                    degraded: counted.exceeded(),
                }
            }
        };

        tracing::info!(
            place = %identifier,
            available = matches!(outcome, CensusOutcome::Analyzed { .. }),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "place analyzed"
        );
        Ok(CensusRecord {
            place: place.clone(),
            identifier,
            outcome,
            population: None,
            analyzed_at: Utc::now(),
        })
    }

    /// Analyze every place in order. One result per place.
    pub async fn run(&self, places: &[Place]) -> Vec<Result<CensusRecord>> {
        let mut results = Vec::with_capacity(places.len());
        for (i, place) in places.iter().enumerate() {
            let result = self.analyze(place).await;
            if let Err(err) = &result {
                tracing::warn!(row = i, city = %place.city, error = %err, "place failed");
            }
            results.push(result);
        }
        results
    }
}

/// Count a snapshot under `config`, validating it first if asked to.
pub fn count_snapshot<G: GraphSnapshot + ?Sized>(graph: &G, config: &CensusConfig) -> Result<CountOutcome> {
    if config.validate_snapshots {
        validate_simple(graph)?;
    }
    count_motifs_bounded(graph, &config.limits)
}

// ============================================================================
// Place list
// ============================================================================

/// Parse a place list: a header line, then rows whose second, third and
/// fourth fields are city, country and continent. The first field is a
/// row label and is ignored.
pub fn parse_places(reader: impl BufRead, delimiter: char) -> Result<Vec<Place>> {
    let records = Records::read(reader, delimiter)?;
    records
        .rows
        .iter()
        .map(|(line, row)| {
            Ok(Place::new(
                field(row, 1, *line)?,
                field(row, 2, *line)?,
                field(row, 3, *line)?,
            ))
        })
        .collect()
}

// ============================================================================
// Observed vs. random
// ============================================================================

/// Observed counts next to their Erdős–Rényi expectations.
#[derive(Debug, Clone, PartialEq)]
pub struct MotifProfile {
    pub observed: MotifVector<u64>,
    pub nonnested: MotifVector<u64>,
    pub expected: MotifVector<f64>,
    pub expected_nonnested: MotifVector<f64>,
}

impl MotifProfile {
    /// Profile of a simple graph with `n` nodes, `m` edges and raw counts `raw`.
    pub fn compute(n: u64, m: u64, raw: &MotifVector<u64>) -> Result<Self> {
        Ok(Self {
            observed: *raw,
            nonnested: to_nonnested(raw)?,
            expected: expected_motifs(n, m)?,
            expected_nonnested: expected_nonnested(n, m)?,
        })
    }

    /// Profile of an analyzed record, using the simplified edge count.
    /// `None` for unavailable places and for records with unknown entries.
    pub fn from_record(record: &CensusRecord) -> Result<Option<Self>> {
        let (Some(sizes), Some(raw)) = (record.sizes(), record.motifs().and_then(|m| m.complete())) else {
            return Ok(None);
        };
        Self::compute(sizes.node_count, sizes.essential_edge_count, &raw).map(Some)
    }

    /// Observed over expected raw counts; `None` where the expectation is zero.
    pub fn ratio(&self) -> MotifVector<Option<f64>> {
        ratio(&self.observed, &self.expected)
    }

    /// Observed over expected non-nested counts.
    pub fn nonnested_ratio(&self) -> MotifVector<Option<f64>> {
        ratio(&self.nonnested, &self.expected_nonnested)
    }
}

fn ratio(observed: &MotifVector<u64>, expected: &MotifVector<f64>) -> MotifVector<Option<f64>> {
    let observed = observed.to_f64();
    MotifVector::from_fn(|m| (expected[m] > 0.0).then(|| observed[m] / expected[m]))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Motif;
    use crate::snapshot::AdjacencyGraph;

    #[test]
    fn parses_place_list() {
        let text = "id;City;Country;Continent\n0;Rio_de_Janeiro;Brazil;South_America\n1;Lisbon;Portugal;Europe\n";
        let places = parse_places(text.as_bytes(), ';').unwrap();
        assert_eq!(places.len(), 2);
        assert_eq!(places[0], Place::new("Rio_de_Janeiro", "Brazil", "South_America"));
        assert_eq!(places[0].query(), "Rio de Janeiro, Brazil");
    }

    #[test]
    fn short_place_row_is_an_error() {
        let text = "id;City;Country;Continent\n0;Lisbon;Portugal\n";
        assert!(parse_places(text.as_bytes(), ';').is_err());
    }

    #[test]
    fn profile_of_complete_graph() {
        let raw = MotifVector::new([12, 4, 12, 1, 4, 3, 6, 12]);
        let profile = MotifProfile::compute(4, 6, &raw).unwrap();
        assert_eq!(profile.nonnested, MotifVector::new([0, 4, 0, 1, 0, 0, 0, 0]));
        let ratio = profile.ratio();
        for (motif, r) in ratio.iter() {
            let r = r.unwrap_or_else(|| panic!("{motif} has zero expectation"));
            assert!((r - 1.0).abs() < 1e-9, "{motif}: {r}");
        }
        // At p = 1 only complete motifs have non-nested room.
        assert_eq!(profile.nonnested_ratio()[Motif::Path3], None);
        assert!(profile.nonnested_ratio()[Motif::K4].is_some());
    }

    #[test]
    fn validation_is_opt_in() {
        let g = AdjacencyGraph::path(4);
        let config = CensusConfig::default().with_validation(true);
        let outcome = count_snapshot(&g, &config).unwrap();
        assert_eq!(outcome.into_exact().unwrap()[Motif::Path4], 1);
    }
}
