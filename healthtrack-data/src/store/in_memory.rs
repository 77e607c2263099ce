use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use uuid::Uuid;

use super::errors::StoreError;
use super::{BloodPressureStore, UserStore};
use crate::models::{BloodPressureRecord, User};
use crate::page::{Page, PageRequest, Sort, SortField};

/// In-memory store for blood pressure records
#[derive(Debug, Clone, Default)]
pub struct InMemoryBloodPressureStore {
    records: Arc<Mutex<HashMap<Uuid, BloodPressureRecord>>>,
}

impl InMemoryBloodPressureStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Keep only the owner id, as a database row would. Logins are never
    /// cached on stored records.
    fn strip_owner(mut record: BloodPressureRecord) -> BloodPressureRecord {
        record.owner = record
            .owner
            .map(|owner| BloodPressureRecord::owner_stub(owner.id));
        record
    }
}

pub(crate) fn compare_records(
    a: &BloodPressureRecord,
    b: &BloodPressureRecord,
    sort: Sort,
) -> Ordering {
    let ordering = match sort.field {
        SortField::Timestamp => a.timestamp.cmp(&b.timestamp),
        SortField::Systolic => a.systolic.cmp(&b.systolic),
        SortField::Diastolic => a.diastolic.cmp(&b.diastolic),
        SortField::Id => a.id.cmp(&b.id),
    };
    let ordering = if sort.ascending {
        ordering
    } else {
        ordering.reverse()
    };
    // Tie break on id so paging windows never overlap
    ordering.then_with(|| a.id.cmp(&b.id))
}

#[async_trait]
impl BloodPressureStore for InMemoryBloodPressureStore {
    async fn insert(
        &self,
        record: BloodPressureRecord,
    ) -> Result<BloodPressureRecord, StoreError> {
        let mut record = Self::strip_owner(record);
        let id = Uuid::new_v4();
        record.id = Some(id);

        let mut store = self.records.lock()?;
        store.insert(id, record.clone());
        Ok(record)
    }

    async fn update(
        &self,
        record: BloodPressureRecord,
    ) -> Result<BloodPressureRecord, StoreError> {
        let record = Self::strip_owner(record);
        let id = record.id.ok_or(StoreError::MissingId)?;

        let mut store = self.records.lock()?;
        store.insert(id, record.clone());
        Ok(record)
    }

    async fn get(&self, id: Uuid) -> Result<Option<BloodPressureRecord>, StoreError> {
        let store = self.records.lock()?;
        Ok(store.get(&id).cloned())
    }

    async fn delete(&self, id: Uuid) -> Result<(), StoreError> {
        let mut store = self.records.lock()?;
        store.remove(&id);
        Ok(())
    }

    async fn find_page(
        &self,
        request: &PageRequest,
    ) -> Result<Page<BloodPressureRecord>, StoreError> {
        let store = self.records.lock()?;
        let sort = request
            .sort
            .unwrap_or_else(|| Sort::descending(SortField::Timestamp));

        let mut records: Vec<BloodPressureRecord> = store.values().cloned().collect();
        records.sort_by(|a, b| compare_records(a, b, sort));

        let total = records.len();
        let items = records
            .into_iter()
            .skip(request.offset())
            .take(request.size)
            .collect();

        Ok(Page::new(items, total, request))
    }
}

/// In-memory store for user records
#[derive(Debug, Clone, Default)]
pub struct InMemoryUserStore {
    users: Arc<Mutex<HashMap<Uuid, User>>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl UserStore for InMemoryUserStore {
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError> {
        let store = self.users.lock()?;
        Ok(store.get(&id).cloned())
    }

    async fn upsert(&self, user: User) -> Result<User, StoreError> {
        let mut store = self.users.lock()?;
        store.insert(user.id, user.clone());
        Ok(user)
    }
}
