use once_cell::sync::Lazy;
use regex::Regex;
use serde::Serialize;
use thiserror::Error;

use crate::pipeline::header::HeaderResolution;

/// Literal DD-MM-YYYY shape: two digits, dash, two digits, dash, four digits.
static DATE_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^(\d{2})-(\d{2})-(\d{4})$").expect("date pattern is valid"));

/// Why a data row was rejected. `row` is the 1-based position of the row as
/// a human would count it in the original file, header line included.
#[derive(Error, Debug, Clone, PartialEq, Serialize)]
pub enum RowRejection {
    #[error("Invalid date value at row {row}: date is missing")]
    MissingDate { row: usize },

    #[error("Invalid date value at row {row}: \"{value}\" must be in DD-MM-YYYY format")]
    MalformedDate { row: usize, value: String },

    #[error("Invalid date value at row {row}: day must be between 1 and 31")]
    InvalidDay { row: usize },

    #[error("Invalid date value at row {row}: month must be between 1 and 12")]
    InvalidMonth { row: usize },

    #[error("Invalid date value at row {row}: year must be between 1900 and 2100")]
    InvalidYear { row: usize },

    #[error("Invalid person value at row {row}: person is missing")]
    MissingPerson { row: usize },

    #[error("Invalid miles run value at row {row}: miles run is missing")]
    MissingDistance { row: usize },

    #[error("Invalid miles run value at row {row}: \"{value}\" is not a number")]
    NotNumeric { row: usize, value: String },

    #[error("Invalid miles run value at row {row}: miles run must be positive")]
    Negative { row: usize },
}

impl RowRejection {
    /// The 1-based file row the rejection points at.
    pub fn row(&self) -> usize {
        match self {
            Self::MissingDate { row }
            | Self::MalformedDate { row, .. }
            | Self::InvalidDay { row }
            | Self::InvalidMonth { row }
            | Self::InvalidYear { row }
            | Self::MissingPerson { row }
            | Self::MissingDistance { row }
            | Self::NotNumeric { row, .. }
            | Self::Negative { row } => *row,
        }
    }
}

/// Numeric parsing shared by validation and normalization so both sides see
/// the exact same value. A parse that yields NaN does not count as numeric.
pub(crate) fn parse_distance(cell: &str) -> Option<f64> {
    cell.trim().parse::<f64>().ok().filter(|v| !v.is_nan())
}

/// 1-based file line of a data row, counting the header line.
fn file_row_number(index: usize) -> usize {
    index + 2
}

/// Checks one non-blank raw row against the structural and semantic rules,
/// short-circuiting at the first failure. `index` is the row's 0-based
/// position within the data-row sequence. Performs no normalization.
pub fn validate_row(
    row: &[String],
    resolution: &HeaderResolution,
    index: usize,
) -> Result<(), RowRejection> {
    let row_number = file_row_number(index);
    let cell = |idx: usize| row.get(idx).map(|c| c.trim()).unwrap_or("");

    // Date column
    let date_value = cell(resolution.date);
    if date_value.is_empty() {
        return Err(RowRejection::MissingDate { row: row_number });
    }
    let malformed = || RowRejection::MalformedDate {
        row: row_number,
        value: date_value.to_string(),
    };
    let captures = DATE_SHAPE.captures(date_value).ok_or_else(|| malformed())?;
    let day: u32 = captures[1].parse().map_err(|_| malformed())?;
    let month: u32 = captures[2].parse().map_err(|_| malformed())?;
    let year: u32 = captures[3].parse().map_err(|_| malformed())?;
    // Range checks only; impossible combinations like 31-02 pass on purpose
    if !(1..=31).contains(&day) {
        return Err(RowRejection::InvalidDay { row: row_number });
    }
    if !(1..=12).contains(&month) {
        return Err(RowRejection::InvalidMonth { row: row_number });
    }
    if !(1900..=2100).contains(&year) {
        return Err(RowRejection::InvalidYear { row: row_number });
    }

    // Person column
    if cell(resolution.person).is_empty() {
        return Err(RowRejection::MissingPerson { row: row_number });
    }

    // Distance column
    let distance_value = cell(resolution.distance);
    if distance_value.is_empty() {
        return Err(RowRejection::MissingDistance { row: row_number });
    }
    let distance = parse_distance(distance_value).ok_or_else(|| RowRejection::NotNumeric {
        row: row_number,
        value: distance_value.to_string(),
    })?;
    if distance < 0.0 {
        return Err(RowRejection::Negative { row: row_number });
    }

    Ok(())
}
