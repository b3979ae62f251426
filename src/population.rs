//! Population join.
//!
//! Matches census rows to a UN city-population export by city name.
//! The export has one row per city, year, sex and city type; only
//! `Both Sexes` rows are kept.
//!
//! Lookup order for a city:
//! 1. Translate the name through [`AltNames`] when the UN spells it differently.
//! 2. Replace underscores with spaces; try the name as is, then upper-cased.
//! 3. Keep the most recent year.
//! 4. Prefer the `Urban agglomeration` row, else the first row of that year.

use std::io::BufRead;

use hashbrown::HashMap;

use crate::model::CensusRecord;
use crate::table::{field, Records};
use crate::{Error, Result};

const BOTH_SEXES: &str = "Both Sexes";
const URBAN_AGGLOMERATION: &str = "Urban agglomeration";

/// One `Both Sexes` figure.
#[derive(Debug, Clone, PartialEq)]
pub struct PopulationEntry {
    pub year: i32,
    pub city_type: String,
    pub value: f64,
}

/// Population figures grouped by city name as spelled in the export.
#[derive(Debug, Clone, Default)]
pub struct PopulationTable {
    by_city: HashMap<String, Vec<PopulationEntry>>,
}

impl PopulationTable {
    /// Parse an export with `City`, `Sex`, `Year`, `City type` and `Value` columns.
    pub fn parse(reader: impl BufRead, delimiter: char) -> Result<Self> {
        let records = Records::read(reader, delimiter)?;
        let city_col = records.column("City")?;
        let sex_col = records.column("Sex")?;
        let year_col = records.column("Year")?;
        let type_col = records.column("City type")?;
        let value_col = records.column("Value")?;

        let mut table = Self::default();
        for (line, row) in &records.rows {
            if field(row, sex_col, *line)? != BOTH_SEXES {
                continue;
            }
            let entry = PopulationEntry {
                year: parse_year(field(row, year_col, *line)?, *line)?,
                city_type: field(row, type_col, *line)?.to_string(),
                value: parse_number(field(row, value_col, *line)?, *line)?,
            };
            table.insert(field(row, city_col, *line)?, entry);
        }
        tracing::debug!(cities = table.by_city.len(), "population table loaded");
        Ok(table)
    }

    pub fn insert(&mut self, city: impl Into<String>, entry: PopulationEntry) {
        self.by_city.entry(city.into()).or_default().push(entry);
    }

    pub fn len(&self) -> usize {
        self.by_city.len()
    }

    pub fn is_empty(&self) -> bool {
        self.by_city.is_empty()
    }

    /// Population of `city`, or `None` if the export has no figure for it.
    pub fn lookup(&self, city: &str) -> Option<f64> {
        let name = city.replace('_', " ");
        let entries = self
            .by_city
            .get(&name)
            .or_else(|| self.by_city.get(&name.to_uppercase()))?;

        let latest = entries.iter().map(|e| e.year).max()?;
        let mut current = entries.iter().filter(|e| e.year == latest);
        let first = current.clone().next()?;
        Some(
            current
                .find(|e| e.city_type == URBAN_AGGLOMERATION)
                .unwrap_or(first)
                .value,
        )
    }
}

/// Census city names that the UN export spells differently.
#[derive(Debug, Clone, Default)]
pub struct AltNames {
    names: HashMap<String, String>,
}

impl AltNames {
    /// Parse a table with `currName` and `altName` columns.
    pub fn parse(reader: impl BufRead, delimiter: char) -> Result<Self> {
        let records = Records::read(reader, delimiter)?;
        let current = records.column("currName")?;
        let alternative = records.column("altName")?;
        let mut names = HashMap::with_capacity(records.rows.len());
        for (line, row) in &records.rows {
            names.insert(field(row, current, *line)?.to_string(), field(row, alternative, *line)?.to_string());
        }
        Ok(Self { names })
    }

    pub fn insert(&mut self, current: impl Into<String>, alternative: impl Into<String>) {
        self.names.insert(current.into(), alternative.into());
    }

    /// The UN spelling of `city`, or `city` itself.
    pub fn resolve<'a>(&'a self, city: &'a str) -> &'a str {
        self.names.get(city).map_or(city, String::as_str)
    }
}

/// Fill in `population` on every record. Returns how many were found.
pub fn join_population(records: &mut [CensusRecord], table: &PopulationTable, altnames: &AltNames) -> usize {
    let mut found = 0;
    for record in records.iter_mut() {
        let name = altnames.resolve(&record.place.city);
        record.population = table.lookup(name);
        match record.population {
            Some(population) => {
                found += 1;
                tracing::debug!(city = %record.place.city, population, "population found");
            }
            None => tracing::debug!(city = %record.place.city, "population not found"),
        }
    }
    found
}

fn parse_year(text: &str, line: usize) -> Result<i32> {
    // Some exports write years as floats ("2015.0").
    text.parse::<i32>()
        .or_else(|_| text.parse::<f64>().map(|y| y as i32))
        .map_err(|_| Error::Parse { line, message: format!("bad year '{text}'") })
}

fn parse_number(text: &str, line: usize) -> Result<f64> {
    text.parse::<f64>()
        .map_err(|_| Error::Parse { line, message: format!("bad population value '{text}'") })
}
