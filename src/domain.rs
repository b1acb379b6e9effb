use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A validated, canonicalized run entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunRecord {
    /// ISO-8601 calendar date, `YYYY-MM-DD`
    pub date: String,
    /// Who ran; trimmed and never empty
    pub person: String,
    /// Miles run; never negative
    pub distance: f64,
}

/// The normalized output of one successful upload. Replaced wholesale by the
/// next successful upload, never partially mutated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Dataset {
    /// Accepted records in file order, blank and invalid rows excluded
    pub records: Vec<RunRecord>,
    /// Each person's records in file order, keyed by the exact post-trim name
    pub grouped_by_person: HashMap<String, Vec<RunRecord>>,
}

impl Dataset {
    /// Builds the dataset and its grouped index in a single pass. Every
    /// record lands in exactly one bucket under its exact `person` key.
    pub fn from_records(records: Vec<RunRecord>) -> Self {
        let mut grouped_by_person: HashMap<String, Vec<RunRecord>> = HashMap::new();
        for record in &records {
            grouped_by_person
                .entry(record.person.clone())
                .or_default()
                .push(record.clone());
        }

        Self {
            records,
            grouped_by_person,
        }
    }

    /// Person names in first-appearance order.
    pub fn person_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = Vec::new();
        for record in &self.records {
            if !names.contains(&record.person.as_str()) {
                names.push(record.person.as_str());
            }
        }
        names
    }
}
