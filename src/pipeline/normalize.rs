use crate::domain::RunRecord;
use crate::pipeline::header::HeaderResolution;
use crate::pipeline::validate::parse_distance;

/// Converts an accepted raw row into its canonical record. Total over rows
/// that passed validation; calling it on anything else violates that
/// precondition. The date is reordered from DD-MM-YYYY to YYYY-MM-DD by a
/// literal field swap, with no calendar arithmetic involved.
pub fn normalize_row(row: &[String], resolution: &HeaderResolution) -> RunRecord {
    let cell = |idx: usize| row.get(idx).map(|c| c.trim()).unwrap_or("");

    let raw_date = cell(resolution.date);
    let date = match raw_date.split('-').collect::<Vec<_>>().as_slice() {
        [day, month, year] => format!("{year}-{month}-{day}"),
        _ => raw_date.to_string(),
    };

    RunRecord {
        date,
        person: cell(resolution.person).to_string(),
        distance: parse_distance(cell(resolution.distance)).unwrap_or_default(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolution() -> HeaderResolution {
        HeaderResolution {
            date: 0,
            person: 1,
            distance: 2,
        }
    }

    fn row(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn reorders_date_fields_to_iso() {
        let record = normalize_row(&row(&["25-12-2024", "Alice", "5.5"]), &resolution());
        assert_eq!(record.date, "2024-12-25");
    }

    #[test]
    fn trims_the_person_cell() {
        let record = normalize_row(&row(&["25-12-2024", "  Alice  ", "5.5"]), &resolution());
        assert_eq!(record.person, "Alice");
    }

    #[test]
    fn parses_distance_like_the_validator() {
        let record = normalize_row(&row(&["25-12-2024", "Alice", " 4.8 "]), &resolution());
        assert_eq!(record.distance, 4.8);

        let record = normalize_row(&row(&["25-12-2024", "Alice", "3.2e1"]), &resolution());
        assert_eq!(record.distance, 32.0);
    }

    #[test]
    fn carries_impossible_but_accepted_dates_through() {
        // The validator is calendar-naive, so the normalizer must be too
        let record = normalize_row(&row(&["31-02-2024", "Alice", "1.0"]), &resolution());
        assert_eq!(record.date, "2024-02-31");
    }
}
