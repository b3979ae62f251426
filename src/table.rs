//! Delimited text records.
//!
//! City lists and UN population exports are `;`-separated, with optional
//! double quotes around fields. Quotes inside a quoted field are doubled.

use std::io::BufRead;

use crate::{Error, Result};

/// Split one line into fields.
pub fn split_record(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        match c {
            '"' if quoted && chars.peek() == Some(&'"') => {
                field.push('"');
                chars.next();
            }
            '"' => quoted = !quoted,
            c if c == delimiter && !quoted => fields.push(std::mem::take(&mut field)),
            c => field.push(c),
        }
    }
    fields.push(field);
    fields
}

/// Quote a field for output if it contains the delimiter, a quote or a newline.
pub fn quote_field(field: &str, delimiter: char) -> String {
    if field.contains(delimiter) || field.contains('"') || field.contains('\n') {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

/// A header row plus data rows, with 1-based line numbers kept for errors.
pub struct Records {
    pub header: Vec<String>,
    pub rows: Vec<(usize, Vec<String>)>,
}

impl Records {
    /// Read all non-blank lines. The first one is the header.
    pub fn read(reader: impl BufRead, delimiter: char) -> Result<Self> {
        let mut lines = reader.lines().enumerate();
        let header = loop {
            match lines.next() {
                Some((_, line)) => {
                    let line = line?;
                    if !line.trim().is_empty() {
                        break split_record(line.trim_start_matches('\u{feff}').trim_end(), delimiter);
                    }
                }
                None => {
                    return Err(Error::Parse { line: 0, message: "missing header row".into() });
                }
            }
        };

        let mut rows = Vec::new();
        for (i, line) in lines {
            let line = line?;
            if line.trim().is_empty() {
                continue;
            }
            rows.push((i + 1, split_record(line.trim_end(), delimiter)));
        }
        Ok(Self { header, rows })
    }

    /// Index of the named header column.
    pub fn column(&self, name: &str) -> Result<usize> {
        self.header
            .iter()
            .position(|h| h.trim() == name)
            .ok_or_else(|| Error::Parse { line: 1, message: format!("missing column '{name}'") })
    }
}

/// Field `index` of a row, or a parse error naming the line.
pub fn field<'r>(row: &'r [String], index: usize, line: usize) -> Result<&'r str> {
    row.get(index)
        .map(|f| f.trim())
        .ok_or_else(|| Error::Parse { line, message: format!("expected at least {} fields", index + 1) })
}
