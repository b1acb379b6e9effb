use std::sync::{Arc, RwLock};

use chrono::{DateTime, Utc};
use tracing::{debug, info};
use uuid::Uuid;

use crate::domain::Dataset;

/// A complete dataset snapshot as handed to consumers, stamped when it was
/// published. The dataset behind the `Arc` is immutable.
#[derive(Debug, Clone)]
pub struct PublishedDataset {
    pub dataset: Arc<Dataset>,
    pub session_id: Uuid,
    pub published_at: DateTime<Utc>,
}

/// Holds the latest successfully ingested dataset. Single writer: every
/// successful upload replaces the previous dataset wholesale, and readers
/// only ever see a complete snapshot, never an intermediate state.
pub struct DatasetStore {
    current: RwLock<Option<PublishedDataset>>,
}

impl DatasetStore {
    pub fn new() -> Self {
        Self {
            current: RwLock::new(None),
        }
    }

    /// Swaps in a freshly ingested dataset, retiring the previous one.
    pub fn publish(&self, dataset: Dataset) -> PublishedDataset {
        let published = PublishedDataset {
            dataset: Arc::new(dataset),
            session_id: Uuid::new_v4(),
            published_at: Utc::now(),
        };

        let mut current = self.current.write().unwrap();
        if let Some(previous) = current.replace(published.clone()) {
            debug!("Retired dataset from session {}", previous.session_id);
        }
        info!(
            "Published dataset: {} records, session {}",
            published.dataset.records.len(),
            published.session_id
        );
        published
    }

    /// Read-only snapshot of the latest dataset, if any upload has succeeded.
    pub fn snapshot(&self) -> Option<PublishedDataset> {
        self.current.read().unwrap().clone()
    }

    /// Drops the current dataset, ending the upload session.
    pub fn clear(&self) {
        self.current.write().unwrap().take();
    }
}

impl Default for DatasetStore {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::RunRecord;

    fn dataset(person: &str) -> Dataset {
        Dataset::from_records(vec![RunRecord {
            date: "2024-12-25".to_string(),
            person: person.to_string(),
            distance: 5.5,
        }])
    }

    #[test]
    fn snapshot_is_empty_until_first_publish() {
        let store = DatasetStore::new();
        assert!(store.snapshot().is_none());
    }

    #[test]
    fn publish_then_snapshot_round_trips() {
        let store = DatasetStore::new();
        let published = store.publish(dataset("Alice"));

        let snapshot = store.snapshot().expect("snapshot after publish");
        assert_eq!(snapshot.session_id, published.session_id);
        assert_eq!(snapshot.dataset.records[0].person, "Alice");
    }

    #[test]
    fn republish_replaces_wholesale() {
        let store = DatasetStore::new();
        let first = store.publish(dataset("Alice"));
        let second = store.publish(dataset("Bob"));

        assert_ne!(first.session_id, second.session_id);
        let snapshot = store.snapshot().expect("snapshot after republish");
        assert_eq!(snapshot.session_id, second.session_id);
        assert_eq!(snapshot.dataset.records[0].person, "Bob");
    }

    #[test]
    fn snapshots_outlive_replacement() {
        let store = DatasetStore::new();
        store.publish(dataset("Alice"));
        let held = store.snapshot().expect("first snapshot");

        store.publish(dataset("Bob"));

        // The held snapshot still points at the dataset it was taken from
        assert_eq!(held.dataset.records[0].person, "Alice");
    }

    #[test]
    fn clear_ends_the_session() {
        let store = DatasetStore::new();
        store.publish(dataset("Alice"));
        store.clear();
        assert!(store.snapshot().is_none());
    }
}
