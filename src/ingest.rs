//! Tabular text ingestion: comma-delimited rows into a validated dataset.
//!
//! Structural problems (no header, missing required columns, nothing
//! parseable at all) are hard failures. Individual bad rows are skipped
//! silently so noisy hand-edited files still load.

use std::fmt;
use std::path::Path;

use crate::state::{Dataset, MetricSample};

pub const REQUIRED_COLUMNS: [&str; 4] = ["time", "revenue", "productivity", "satisfaction"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum IngestError {
    /// Fewer than a header row plus one data row.
    MalformedInput(&'static str),
    /// A required column name is absent from the header.
    MissingColumn(&'static str),
    /// Header was valid but every data row failed per-row validation.
    NoValidRows,
    /// The underlying file read failed; not a content problem.
    ReadFailure(String),
}

impl fmt::Display for IngestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IngestError::MalformedInput(_) => {
                f.write_str("CSV must have a header row and at least one data row.")
            }
            IngestError::MissingColumn(_) => {
                f.write_str("Header must include time,revenue,productivity,satisfaction.")
            }
            IngestError::NoValidRows => f.write_str("No valid data rows found in CSV."),
            IngestError::ReadFailure(e) => write!(f, "could not read file: {}", e),
        }
    }
}

impl std::error::Error for IngestError {}

/// Parse a raw text blob into an ordered dataset.
pub fn parse_table(text: &str) -> Result<Dataset, IngestError> {
    let lines: Vec<&str> = text
        .split(['\r', '\n'])
        .map(|l| l.trim())
        .filter(|l| !l.is_empty())
        .collect();
    if lines.len() < 2 {
        return Err(IngestError::MalformedInput("missing header or data"));
    }

    let header: Vec<String> = lines[0]
        .to_lowercase()
        .split(',')
        .map(|h| h.trim().to_string())
        .collect();
    let col = |name: &'static str| -> Result<usize, IngestError> {
        header
            .iter()
            .position(|h| h == name)
            .ok_or(IngestError::MissingColumn(name))
    };
    let time_idx = col("time")?;
    let rev_idx = col("revenue")?;
    let prod_idx = col("productivity")?;
    let sat_idx = col("satisfaction")?;
    let min_fields = time_idx.max(rev_idx).max(prod_idx).max(sat_idx) + 1;

    let mut samples = Vec::new();
    for line in &lines[1..] {
        let fields: Vec<&str> = line.split(',').map(|p| p.trim()).collect();
        if fields.len() < min_fields {
            continue;
        }
        let label = fields[time_idx];
        if label.is_empty() {
            continue;
        }
        let parsed = (
            fields[rev_idx].parse::<f64>(),
            fields[prod_idx].parse::<f64>(),
            fields[sat_idx].parse::<f64>(),
        );
        let (Ok(revenue), Ok(productivity), Ok(satisfaction)) = parsed else {
            continue;
        };
        samples.push(MetricSample {
            label: label.to_string(),
            revenue,
            productivity,
            satisfaction,
        });
    }

    if samples.is_empty() {
        return Err(IngestError::NoValidRows);
    }
    Ok(Dataset { samples })
}

/// Single-shot read-to-completion of a data file, then parse.
pub fn read_table_file(path: &Path) -> Result<Dataset, IngestError> {
    let text = std::fs::read_to_string(path).map_err(|e| IngestError::ReadFailure(e.to_string()))?;
    parse_table(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn crlf_and_blank_lines_are_tolerated() {
        let ds = parse_table("time,revenue,productivity,satisfaction\r\n\r\n09:00,1000,70,80\r\n").unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.samples[0].label, "09:00");
    }

    #[test]
    fn extra_columns_are_ignored() {
        let ds = parse_table(
            "time,revenue,productivity,satisfaction,notes\n09:00,1000,70,80,fine\n",
        )
        .unwrap();
        assert_eq!(ds.len(), 1);
        assert_eq!(ds.samples[0].revenue, 1000.0);
    }

    #[test]
    fn empty_time_field_skips_row() {
        let err = parse_table("time,revenue,productivity,satisfaction\n,1000,70,80\n").unwrap_err();
        assert_eq!(err, IngestError::NoValidRows);
    }
}
