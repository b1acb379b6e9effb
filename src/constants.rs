/// Header field names the uploaded table must contain. Matching is
/// case-insensitive and trim-insensitive; column order is irrelevant.

// Required header cells (normalized form)
pub const DATE_HEADER: &str = "date";
pub const PERSON_HEADER: &str = "person";
pub const DISTANCE_HEADER: &str = "miles run";

pub const REQUIRED_HEADERS: [&str; 3] = [DATE_HEADER, PERSON_HEADER, DISTANCE_HEADER];

/// Soft cap on data rows per upload; beyond it the file is asked to be
/// shrunk rather than rejected as invalid.
pub const DEFAULT_ROW_LIMIT: usize = 10_000;
