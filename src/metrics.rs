//! Derived statistics over a normalized record set. Every function here is
//! pure and assumes its input already passed validation.

use serde::Serialize;
use std::collections::HashSet;

use crate::domain::RunRecord;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonAverage {
    pub person: String,
    pub average: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonTotal {
    pub person: String,
    pub total: f64,
}

/// One point of a person's distance-over-time series.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendPoint {
    pub date: String,
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OverallMetrics {
    pub total_records: usize,
    pub distinct_people: usize,
    pub total_distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PersonMetrics {
    pub total_distance: f64,
    pub record_count: usize,
    pub average_distance: f64,
}

/// Two-decimal rounding, halves away from zero.
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Sums and counts per person, buckets kept in first-appearance order so
/// ties sort deterministically downstream.
fn fold_by_person(records: &[RunRecord]) -> Vec<(String, f64, usize)> {
    let mut totals: Vec<(String, f64, usize)> = Vec::new();
    for record in records {
        if let Some(position) = totals
            .iter()
            .position(|(person, _, _)| person == &record.person)
        {
            totals[position].1 += record.distance;
            totals[position].2 += 1;
        } else {
            totals.push((record.person.clone(), record.distance, 1));
        }
    }
    totals
}

/// Average miles per person, highest average first. Ties keep the order in
/// which the people first appear in the records.
pub fn average_per_person(records: &[RunRecord]) -> Vec<PersonAverage> {
    let mut averages: Vec<PersonAverage> = fold_by_person(records)
        .into_iter()
        .map(|(person, total, count)| PersonAverage {
            person,
            average: round2(total / count as f64),
        })
        .collect();
    averages.sort_by(|a, b| b.average.total_cmp(&a.average));
    averages
}

/// Total miles per person, highest total first, same tie-break rule as
/// [`average_per_person`].
pub fn total_per_person(records: &[RunRecord]) -> Vec<PersonTotal> {
    let mut totals: Vec<PersonTotal> = fold_by_person(records)
        .into_iter()
        .map(|(person, total, _)| PersonTotal {
            person,
            total: round2(total),
        })
        .collect();
    totals.sort_by(|a, b| b.total.total_cmp(&a.total));
    totals
}

/// Date-ordered series for one person's line chart. Lexicographic order is
/// chronological order for canonical YYYY-MM-DD dates.
pub fn person_trend(records: &[RunRecord], person: &str) -> Vec<TrendPoint> {
    let mut points: Vec<TrendPoint> = records
        .iter()
        .filter(|r| r.person == person)
        .map(|r| TrendPoint {
            date: r.date.clone(),
            distance: r.distance,
        })
        .collect();
    points.sort_by(|a, b| a.date.cmp(&b.date));
    points
}

/// Summary stats: runs, people, miles.
pub fn overall_metrics(records: &[RunRecord]) -> OverallMetrics {
    let distinct_people = records
        .iter()
        .map(|r| r.person.as_str())
        .collect::<HashSet<_>>()
        .len();
    let total_distance: f64 = records.iter().map(|r| r.distance).sum();

    OverallMetrics {
        total_records: records.len(),
        distinct_people,
        total_distance: round2(total_distance),
    }
}

/// Stats for a single person. The average is 0 when the person has no
/// records rather than a division error.
pub fn person_metrics(records: &[RunRecord], person: &str) -> PersonMetrics {
    let distances: Vec<f64> = records
        .iter()
        .filter(|r| r.person == person)
        .map(|r| r.distance)
        .collect();
    let record_count = distances.len();
    let total_distance: f64 = distances.iter().sum();
    let average_distance = if record_count > 0 {
        total_distance / record_count as f64
    } else {
        0.0
    };

    PersonMetrics {
        total_distance: round2(total_distance),
        record_count,
        average_distance: round2(average_distance),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(date: &str, person: &str, distance: f64) -> RunRecord {
        RunRecord {
            date: date.to_string(),
            person: person.to_string(),
            distance,
        }
    }

    fn sample_records() -> Vec<RunRecord> {
        vec![
            record("2024-12-25", "Alice", 5.5),
            record("2024-12-26", "Bob", 3.2),
            record("2024-12-26", "Alice", 4.8),
        ]
    }

    #[test]
    fn averages_sort_descending() {
        let averages = average_per_person(&sample_records());
        assert_eq!(averages.len(), 2);
        assert_eq!(averages[0].person, "Alice");
        assert_eq!(averages[0].average, 5.15);
        assert_eq!(averages[1].person, "Bob");
        assert_eq!(averages[1].average, 3.2);
    }

    #[test]
    fn totals_sort_descending() {
        let totals = total_per_person(&sample_records());
        assert_eq!(totals[0].person, "Alice");
        assert_eq!(totals[0].total, 10.3);
        assert_eq!(totals[1].person, "Bob");
        assert_eq!(totals[1].total, 3.2);
    }

    #[test]
    fn ties_keep_first_appearance_order() {
        let records = vec![
            record("2024-12-25", "Bob", 4.0),
            record("2024-12-25", "Alice", 4.0),
        ];

        let averages = average_per_person(&records);
        assert_eq!(averages[0].person, "Bob");
        assert_eq!(averages[1].person, "Alice");
    }

    #[test]
    fn trend_is_sorted_by_date() {
        let records = vec![
            record("2024-12-27", "Alice", 2.0),
            record("2024-12-25", "Alice", 1.0),
            record("2024-12-26", "Bob", 9.9),
            record("2024-12-26", "Alice", 3.0),
        ];

        let trend = person_trend(&records, "Alice");
        let dates: Vec<&str> = trend.iter().map(|p| p.date.as_str()).collect();
        assert_eq!(dates, vec!["2024-12-25", "2024-12-26", "2024-12-27"]);
        assert_eq!(trend[0].distance, 1.0);
    }

    #[test]
    fn overall_metrics_summarize_the_set() {
        let overall = overall_metrics(&sample_records());
        assert_eq!(overall.total_records, 3);
        assert_eq!(overall.distinct_people, 2);
        assert_eq!(overall.total_distance, 13.5);
    }

    #[test]
    fn overall_metrics_on_empty_set() {
        let overall = overall_metrics(&[]);
        assert_eq!(overall.total_records, 0);
        assert_eq!(overall.distinct_people, 0);
        assert_eq!(overall.total_distance, 0.0);
    }

    #[test]
    fn person_metrics_for_one_person() {
        let metrics = person_metrics(&sample_records(), "Alice");
        assert_eq!(metrics.record_count, 2);
        assert_eq!(metrics.total_distance, 10.3);
        assert_eq!(metrics.average_distance, 5.15);
    }

    #[test]
    fn person_metrics_guard_against_unknown_person() {
        let metrics = person_metrics(&sample_records(), "Carol");
        assert_eq!(metrics.record_count, 0);
        assert_eq!(metrics.total_distance, 0.0);
        assert_eq!(metrics.average_distance, 0.0);
    }

    #[test]
    fn rounding_sends_halves_away_from_zero() {
        // 0.125 is exactly representable; half-even would give 0.12
        let records = vec![record("2024-12-25", "Alice", 0.125)];
        let metrics = person_metrics(&records, "Alice");
        assert_eq!(metrics.average_distance, 0.13);
    }
}
