use std::path::Path;

use anyhow::{Context, Result};
use csv::ReaderBuilder;
use tracing::debug;

use mimic_model::RawValue;

/// A loaded CSV file: normalized headers plus trimmed string rows.
#[derive(Debug, Clone)]
pub struct CsvTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

fn normalize_header(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('\u{feff}');
    let mut parts = trimmed.split_whitespace();
    let mut normalized = String::new();
    if let Some(first) = parts.next() {
        normalized.push_str(first);
        for part in parts {
            normalized.push(' ');
            normalized.push_str(part);
        }
    }
    normalized
}

fn normalize_cell(raw: &str) -> String {
    raw.trim().trim_matches('\u{feff}').to_string()
}

/// Lenient float parse: empty or non-numeric text is None.
pub fn parse_f64(value: &str) -> Option<f64> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    trimmed.parse::<f64>().ok()
}

/// Load a CSV file, tolerating ragged rows (short rows are padded).
pub fn load_csv(path: &Path) -> Result<CsvTable> {
    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_path(path)
        .with_context(|| format!("open {}", path.display()))?;
    let headers: Vec<String> = reader
        .headers()
        .with_context(|| format!("read headers from {}", path.display()))?
        .iter()
        .map(normalize_header)
        .collect();

    let mut rows = Vec::new();
    for (index, record) in reader.records().enumerate() {
        let record =
            record.with_context(|| format!("read row {} of {}", index + 1, path.display()))?;
        let mut row: Vec<String> = record.iter().map(normalize_cell).collect();
        row.resize(headers.len(), String::new());
        rows.push(row);
    }
    debug!(
        path = %path.display(),
        rows = rows.len(),
        columns = headers.len(),
        "csv loaded"
    );
    Ok(CsvTable { headers, rows })
}

impl CsvTable {
    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Case-insensitive header lookup.
    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.headers
            .iter()
            .position(|header| header.eq_ignore_ascii_case(name))
    }

    pub fn has_column(&self, name: &str) -> bool {
        self.column_index(name).is_some()
    }

    /// A column as raw values: blank cells become `Missing`.
    pub fn text_column(&self, name: &str) -> Option<Vec<RawValue>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| RawValue::from_cell(row.get(index).map_or("", String::as_str)))
                .collect(),
        )
    }

    /// A column parsed as floats: blank or non-numeric cells become None.
    pub fn numeric_column(&self, name: &str) -> Option<Vec<Option<f64>>> {
        let index = self.column_index(name)?;
        Some(
            self.rows
                .iter()
                .map(|row| row.get(index).and_then(|cell| parse_f64(cell)))
                .collect(),
        )
    }
}
