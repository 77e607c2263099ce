use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use super::BloodPressureSearchIndex;
use crate::models::BloodPressureRecord;
use crate::page::{Page, PageRequest};
use crate::store::{compare_records, StoreError};

/// One indexed record plus its derived document text
#[derive(Debug, Clone)]
struct IndexedEntry {
    id: Uuid,
    document: String,
    record: BloodPressureRecord,
}

/// In-memory free-text index. Matching is case-insensitive substring
/// search over a document derived from the record at index time; insertion
/// order stands in for relevance order.
#[derive(Debug, Clone, Default)]
pub struct InMemorySearchIndex {
    entries: Arc<Mutex<Vec<IndexedEntry>>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    fn document_for(record: &BloodPressureRecord) -> String {
        let mut parts = vec![
            record.systolic.to_string(),
            record.diastolic.to_string(),
            record.timestamp.to_rfc3339(),
        ];
        if let Some(login) = record.owner.as_ref().and_then(|owner| owner.login.as_deref())
        {
            parts.push(login.to_string());
        }
        parts.join(" ").to_lowercase()
    }
}

#[async_trait]
impl BloodPressureSearchIndex for InMemorySearchIndex {
    async fn index_record(&self, record: &BloodPressureRecord) -> Result<(), StoreError> {
        let id = record.id.ok_or(StoreError::MissingId)?;
        let entry = IndexedEntry {
            id,
            document: Self::document_for(record),
            record: record.clone(),
        };

        let mut entries = self.entries.lock()?;
        match entries.iter_mut().find(|existing| existing.id == id) {
            // Re-index keeps the original position so paging stays stable
            Some(existing) => *existing = entry,
            None => entries.push(entry),
        }
        Ok(())
    }

    async fn remove(&self, id: Uuid) -> Result<(), StoreError> {
        let mut entries = self.entries.lock()?;
        entries.retain(|entry| entry.id != id);
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        request: &PageRequest,
    ) -> Result<Page<BloodPressureRecord>, StoreError> {
        let needle = query.trim().to_lowercase();
        let entries = self.entries.lock()?;

        let mut matches: Vec<BloodPressureRecord> = entries
            .iter()
            .filter(|entry| entry.document.contains(&needle))
            .map(|entry| entry.record.clone())
            .collect();

        if let Some(sort) = request.sort {
            matches.sort_by(|a, b| compare_records(a, b, sort));
        }

        let total = matches.len();
        let items = matches
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();

        Ok(Page::new(items, total, request))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::User;
    use chrono::{TimeZone, Utc};

    fn record(systolic: u16, login: &str) -> BloodPressureRecord {
        BloodPressureRecord {
            id: Some(Uuid::new_v4()),
            systolic,
            diastolic: 80,
            timestamp: Utc.with_ymd_and_hms(2023, 5, 1, 8, 30, 0).unwrap(),
            owner: Some(User::new(Uuid::new_v4(), login)),
        }
    }

    #[tokio::test]
    async fn matches_readings_and_owner_login() {
        let index = InMemorySearchIndex::new();
        index.index_record(&record(120, "alice")).await.unwrap();
        index.index_record(&record(135, "bob")).await.unwrap();

        let request = PageRequest::new(0, 10);

        let by_reading = index.search("135", &request).await.unwrap();
        assert_eq!(by_reading.total_count, 1);
        assert_eq!(by_reading.items[0].systolic, 135);

        let by_login = index.search("ALICE", &request).await.unwrap();
        assert_eq!(by_login.total_count, 1);
        assert_eq!(by_login.items[0].systolic, 120);
    }

    #[tokio::test]
    async fn no_match_is_an_empty_page() {
        let index = InMemorySearchIndex::new();
        index.index_record(&record(120, "alice")).await.unwrap();

        let page = index.search("nonexistent", &PageRequest::new(0, 10)).await.unwrap();
        assert!(page.items.is_empty());
        assert_eq!(page.total_count, 0);
    }

    #[tokio::test]
    async fn reindex_replaces_the_indexed_copy() {
        let index = InMemorySearchIndex::new();
        let mut entry = record(120, "alice");
        index.index_record(&entry).await.unwrap();

        entry.systolic = 160;
        index.index_record(&entry).await.unwrap();

        let request = PageRequest::new(0, 10);
        assert_eq!(index.search("160", &request).await.unwrap().total_count, 1);
        assert_eq!(index.search("120", &request).await.unwrap().total_count, 0);
    }

    #[tokio::test]
    async fn remove_drops_the_record() {
        let index = InMemorySearchIndex::new();
        let entry = record(120, "alice");
        index.index_record(&entry).await.unwrap();

        index.remove(entry.id.unwrap()).await.unwrap();
        index.remove(entry.id.unwrap()).await.unwrap();

        let page = index.search("120", &PageRequest::new(0, 10)).await.unwrap();
        assert_eq!(page.total_count, 0);
    }
}
