//! Naive CSV ingestion
//!
//! Lines are split on `\n` and cells on `,`. There is no quoting or escape
//! handling: a comma inside a cell starts a new cell.

use crate::lead::Lead;

const BOM: char = '\u{feff}';

/// Parse CSV text into leads
///
/// The first line is the header row. Blank lines are skipped. A row with
/// fewer cells than headers gets `""` for the missing ones; cells beyond the
/// last header are dropped.
pub fn parse_leads(text: &str) -> Vec<Lead> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut lines = text.split('\n');

    let headers: Vec<&str> = match lines.next() {
        Some(header_line) => header_line.split(',').map(str::trim).collect(),
        None => return Vec::new(),
    };

    lines
        .filter(|line| !line.trim().is_empty())
        .map(|line| parse_row(&headers, line))
        .collect()
}

fn parse_row(headers: &[&str], line: &str) -> Lead {
    let values: Vec<&str> = line.split(',').collect();
    let mut lead = Lead::default();

    for (index, header) in headers.iter().enumerate() {
        let value = values.get(index).map(|v| v.trim()).unwrap_or("");
        lead.set_column(header, value);
    }

    lead
}
