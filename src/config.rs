//! Census configuration.
//!
//! Everything that changes how a census runs is a field here and is passed
//! explicitly to [`crate::Census`]. Loads from JSON; missing keys take
//! their defaults. Street networks arrive with unknown density, so the
//! default limits are finite; `null` lifts a bound.
//!
//! ```json
//! {
//!   "limits": { "max_neighborhood": 256, "time_budget_ms": 60000 },
//!   "delimiter": ";",
//!   "validate_snapshots": true
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::counting::CountLimits;
use crate::Result;

/// Configuration for a census run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CensusConfig {
    /// Bounds on the pair-based counting steps.
    pub limits: CountLimits,
    /// Field separator of the place list and population tables.
    pub delimiter: char,
    /// Re-check simplicity of each snapshot before counting.
    pub validate_snapshots: bool,
}

impl Default for CensusConfig {
    fn default() -> Self {
        Self {
            limits: CountLimits::default(),
            delimiter: ';',
            validate_snapshots: false,
        }
    }
}

impl CensusConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::from_json_str(&text)
    }

    pub fn to_json_string(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn with_limits(mut self, limits: CountLimits) -> Self {
        self.limits = limits;
        self
    }

    pub fn with_validation(mut self, validate: bool) -> Self {
        self.validate_snapshots = validate;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Error;

    #[test]
    fn defaults() {
        let config = CensusConfig::default();
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.limits, CountLimits::default());
        assert_eq!(config.limits.max_neighborhood, Some(256));
        assert_eq!(config.limits.time_budget_ms, Some(60_000));
        assert!(!config.validate_snapshots);
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let config = CensusConfig::from_json_str(r#"{"limits": {"max_neighborhood": 128}}"#).unwrap();
        assert_eq!(config.limits.max_neighborhood, Some(128));
        assert_eq!(config.limits.time_budget_ms, Some(60_000));
        assert_eq!(config.delimiter, ';');

        let empty = CensusConfig::from_json_str("{}").unwrap();
        assert_eq!(empty, CensusConfig::default());
    }

    #[test]
    fn null_lifts_a_limit() {
        let config = CensusConfig::from_json_str(r#"{"limits": {"time_budget_ms": null}}"#).unwrap();
        assert_eq!(config.limits.time_budget(), None);
        assert_eq!(config.limits.max_neighborhood, Some(256));
    }

    #[test]
    fn round_trip() {
        let config = CensusConfig::default()
            .with_limits(CountLimits::unbounded().with_max_neighborhood(64))
            .with_validation(true);
        let json = config.to_json_string().unwrap();
        assert_eq!(CensusConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(CensusConfig::from_json_str("{limits:"), Err(Error::Json(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let err = CensusConfig::from_json_file("/nonexistent/motif-census.json").unwrap_err();
        assert!(matches!(err, Error::Io(_)));
    }
}
