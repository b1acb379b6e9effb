use crate::constants::{DATE_HEADER, DISTANCE_HEADER, PERSON_HEADER, REQUIRED_HEADERS};

/// Column positions of the three required fields within the raw header row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeaderResolution {
    pub date: usize,
    pub person: usize,
    pub distance: usize,
}

/// Maps the raw header row to the required semantic fields, order- and
/// case-insensitively. Unrecognized columns are ignored; a repeated header
/// resolves to its first occurrence. On failure the error lists every
/// missing field name, not just the first.
pub fn resolve_headers(headers: &[String]) -> Result<HeaderResolution, Vec<String>> {
    let normalized: Vec<String> = headers.iter().map(|h| h.trim().to_lowercase()).collect();

    let missing: Vec<String> = REQUIRED_HEADERS
        .iter()
        .filter(|required| !normalized.iter().any(|h| h == *required))
        .map(|required| required.to_string())
        .collect();
    if !missing.is_empty() {
        return Err(missing);
    }

    let position = |required: &str| normalized.iter().position(|h| h == required);
    match (
        position(DATE_HEADER),
        position(PERSON_HEADER),
        position(DISTANCE_HEADER),
    ) {
        (Some(date), Some(person), Some(distance)) => Ok(HeaderResolution {
            date,
            person,
            distance,
        }),
        // Presence was checked above; unreachable in practice
        _ => Err(REQUIRED_HEADERS.iter().map(|h| h.to_string()).collect()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn headers(cells: &[&str]) -> Vec<String> {
        cells.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn resolves_headers_in_file_order() {
        let resolution = resolve_headers(&headers(&["date", "person", "miles run"])).unwrap();
        assert_eq!(
            resolution,
            HeaderResolution {
                date: 0,
                person: 1,
                distance: 2
            }
        );
    }

    #[test]
    fn resolves_headers_regardless_of_order_and_case() {
        let resolution =
            resolve_headers(&headers(&["Miles Run", "PERSON", "  Date "])).unwrap();
        assert_eq!(
            resolution,
            HeaderResolution {
                date: 2,
                person: 1,
                distance: 0
            }
        );
    }

    #[test]
    fn ignores_extra_columns() {
        let resolution = resolve_headers(&headers(&[
            "notes",
            "person",
            "weather",
            "miles run",
            "date",
        ]))
        .unwrap();
        assert_eq!(
            resolution,
            HeaderResolution {
                date: 4,
                person: 1,
                distance: 3
            }
        );
    }

    #[test]
    fn lists_every_missing_header() {
        let missing = resolve_headers(&headers(&["date"])).unwrap_err();
        assert_eq!(missing, vec!["person".to_string(), "miles run".to_string()]);
    }

    #[test]
    fn rejects_empty_header_row() {
        let missing = resolve_headers(&headers(&[])).unwrap_err();
        assert_eq!(missing.len(), 3);
    }

    #[test]
    fn repeated_header_resolves_to_first_occurrence() {
        let resolution =
            resolve_headers(&headers(&["date", "date", "person", "miles run"])).unwrap();
        assert_eq!(resolution.date, 0);
    }
}
