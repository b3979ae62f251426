//! Reasons a place or a motif entry has no value.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Why a graph source could not supply a graph for a place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "reason", rename_all = "snake_case")]
pub enum Unavailable {
    /// The geocoder returned nothing for the query.
    NoResult,
    /// The best result was not a polygon or multipolygon.
    NotAPolygon { geometry: String },
    /// The outline area (in square degrees) is too small or too large to be a city.
    ImplausibleArea { area: f64 },
}

impl std::fmt::Display for Unavailable {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Unavailable::NoResult => write!(f, "no result"),
            Unavailable::NotAPolygon { geometry } => write!(f, "outline is a {geometry}, not a polygon"),
            Unavailable::ImplausibleArea { area } => write!(f, "outline area {area} is implausible"),
        }
    }
}

/// Which bound stopped the pair-based counting steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "limit", rename_all = "snake_case")]
pub enum LimitExceeded {
    /// A node's neighborhood is larger than the configured maximum.
    Neighborhood { degree: usize, max: usize },
    /// The count ran past its time budget.
    TimeBudget { budget: Duration },
}

impl std::fmt::Display for LimitExceeded {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LimitExceeded::Neighborhood { degree, max } => {
                write!(f, "neighborhood of size {degree} exceeds limit {max}")
            }
            LimitExceeded::TimeBudget { budget } => {
                write!(f, "time budget of {} ms exhausted", budget.as_millis())
            }
        }
    }
}
