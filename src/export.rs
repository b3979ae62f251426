//! Census export: serialize report rows as CSV or JSON.
//!
//! ```text
//! Census::run() → Vec<CensusRecord> → write_csv() → cities.csv
//!                                   → write_json() → cities.json
//! ```
//!
//! Unavailable places still get a row; their count columns are empty.

use std::io::Write;

use crate::model::{CensusRecord, Motif};
use crate::table::quote_field;
use crate::Result;

/// Leading columns, before the motif counts.
pub const PLACE_COLUMNS: [&str; 7] =
    ["City", "Country", "Continent", "Nodes", "Edges", "Essential edges", "Self-loops"];

/// Trailing column, after the motif counts.
pub const POPULATION_COLUMN: &str = "Population";

/// All header columns, in output order.
pub fn header() -> Vec<&'static str> {
    PLACE_COLUMNS
        .into_iter()
        .chain(Motif::ALL.iter().map(|m| m.column()))
        .chain(std::iter::once(POPULATION_COLUMN))
        .collect()
}

/// Write a comma-separated table with one row per record.
pub fn write_csv(records: &[CensusRecord], writer: &mut dyn Write) -> Result<()> {
    writeln!(writer, "{}", header().join(","))?;
    for record in records {
        writeln!(writer, "{}", format_row(record).join(","))?;
    }
    Ok(())
}

/// Write records as a pretty-printed JSON array.
pub fn write_json(records: &[CensusRecord], writer: &mut dyn Write) -> Result<()> {
    serde_json::to_writer_pretty(&mut *writer, records)?;
    writeln!(writer)?;
    Ok(())
}

/// Format one record as CSV fields.
fn format_row(record: &CensusRecord) -> Vec<String> {
    let sizes = record.sizes();
    let mut fields = vec![
        quote_field(&record.place.city, ','),
        quote_field(&record.place.country, ','),
        quote_field(&record.place.continent, ','),
        optional(sizes.map(|s| s.node_count)),
        optional(sizes.map(|s| s.edge_count)),
        optional(sizes.map(|s| s.essential_edge_count)),
        optional(sizes.map(|s| s.self_loop_count)),
    ];
    fields.extend(Motif::ALL.iter().map(|m| optional(record.motif(*m))));
    fields.push(optional(record.population));
    fields
}

fn optional<T: ToString>(value: Option<T>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}
