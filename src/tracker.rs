//! In-memory record set and its mutation contract.
//!
//! The record array is the single source of truth for every derived view.
//! Mutations replace the whole vector rather than editing entries in place,
//! so anything holding a previous snapshot never observes aliased changes,
//! and a failed store call leaves the set untouched.

use tracing::info;

use crate::models::{MatchRecord, MatchRecordDraft};
use crate::store::{RecordStore, StoreError};

/// The record store plus the loaded record set.
#[derive(Debug)]
pub struct Tracker {
    store: RecordStore,
    records: Vec<MatchRecord>,
}

impl Tracker {
    pub fn new(store: RecordStore) -> Self {
        Self {
            store,
            records: Vec::new(),
        }
    }

    /// The current record set, in store order.
    pub fn records(&self) -> &[MatchRecord] {
        &self.records
    }

    /// Reload the full set from the store.
    pub async fn refresh(&mut self) -> Result<(), StoreError> {
        let records = self.store.list().await?;
        info!("Loaded {} records", records.len());
        self.records = records;
        Ok(())
    }

    /// Create a record and append the store's version of it.
    pub async fn create(&mut self, draft: &MatchRecordDraft) -> Result<MatchRecord, StoreError> {
        let created = self.store.create(draft).await?;

        let mut next = Vec::with_capacity(self.records.len() + 1);
        next.extend(self.records.iter().cloned());
        next.push(created.clone());
        self.records = next;
        Ok(created)
    }

    /// Replace a record in place (by id) with the store's updated version.
    pub async fn update(
        &mut self,
        id: i64,
        draft: &MatchRecordDraft,
    ) -> Result<MatchRecord, StoreError> {
        let updated = self.store.update(id, draft).await?;

        self.records = self
            .records
            .iter()
            .map(|record| {
                if record.id == id {
                    updated.clone()
                } else {
                    record.clone()
                }
            })
            .collect();
        Ok(updated)
    }

    /// Delete a record by id.
    pub async fn delete(&mut self, id: i64) -> Result<(), StoreError> {
        self.store.delete(id).await?;

        self.records = self
            .records
            .iter()
            .filter(|record| record.id != id)
            .cloned()
            .collect();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::test_support::record;
    use crate::models::{MatchResult, Rule};
    use url::Url;

    fn tracker_with_records(records: Vec<MatchRecord>) -> Tracker {
        let store = RecordStore::new(Url::parse("http://127.0.0.1:1/").unwrap());
        let mut tracker = Tracker::new(store);
        tracker.records = records;
        tracker
    }

    #[test]
    fn test_failed_mutation_leaves_set_unchanged() {
        // Port 1 is unreachable: every store call fails.
        let records = vec![record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1500", MatchResult::Win)];
        let mut tracker = tracker_with_records(records.clone());

        let result = tokio_test::block_on(tracker.delete(1));
        assert!(result.is_err());
        assert_eq!(tracker.records(), records.as_slice());
    }

    #[test]
    fn test_failed_create_leaves_set_unchanged() {
        let mut tracker = tracker_with_records(Vec::new());
        let draft = MatchRecordDraft::default();

        let result = tokio_test::block_on(tracker.create(&draft));
        assert!(result.is_err());
        assert!(tracker.records().is_empty());
    }

    #[test]
    fn test_records_accessor_preserves_order() {
        let records = vec![
            record(2, Rule::SinglesFeverOn, "2026-01-11T10:00", "1520", MatchResult::Win),
            record(1, Rule::SinglesFeverOn, "2026-01-10T10:00", "1500", MatchResult::Loss),
        ];
        let tracker = tracker_with_records(records);
        let ids: Vec<i64> = tracker.records().iter().map(|r| r.id).collect();
        assert_eq!(ids, vec![2, 1]);
    }
}
