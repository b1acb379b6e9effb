use std::fs;
use std::path::Path;

use csv::ReaderBuilder;
use tracing::debug;

use crate::error::{Result, TrackerError};

/// Reads a CSV file into the row-major table of strings the pipeline
/// consumes. Tokenization only: rows keep whatever cells the file has, and
/// all semantic checks happen downstream. Physically empty lines are
/// collapsed by the reader; logically-blank rows survive and are re-checked
/// by the pipeline.
pub fn read_table(path: &Path) -> Result<Vec<Vec<String>>> {
    let is_csv = path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.eq_ignore_ascii_case("csv"))
        .unwrap_or(false);
    if !is_csv {
        return Err(TrackerError::NotCsv);
    }

    if fs::metadata(path)?.len() == 0 {
        return Err(TrackerError::EmptyFile);
    }

    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .from_path(path)?;

    let mut table = Vec::new();
    for record in reader.records() {
        let record = record?;
        table.push(record.iter().map(|cell| cell.to_string()).collect());
    }

    debug!("Tokenized {} rows from {}", table.len(), path.display());
    Ok(table)
}
