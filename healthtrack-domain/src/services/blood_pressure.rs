use async_trait::async_trait;
use thiserror::Error;
use tracing::debug;
use uuid::Uuid;

use crate::dto::BloodPressureTransfer;
use crate::mapper::{self, MapperError};
use healthtrack_data::models::BloodPressureRecord;
use healthtrack_data::page::{Page, PageRequest};
use healthtrack_data::search::BloodPressureSearchIndex;
use healthtrack_data::store::{BloodPressureStore, StoreError, UserStore};

/// Record service errors
#[derive(Debug, Error)]
pub enum ServiceError {
    /// Mapper precondition failure (record without an owner)
    #[error(transparent)]
    Mapper(#[from] MapperError),

    /// The referenced owner has no user-store entry
    #[error("Owner {0} does not exist")]
    UnresolvedOwner(Uuid),

    /// Store or search-index failure
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Record service contract consumed by the HTTP handler
#[async_trait]
pub trait BloodPressureServiceTrait: Send + Sync {
    /// Insert when the transfer has no id, full-replace update otherwise.
    /// (Re-)indexes the persisted record and returns it with the id and
    /// current owner login populated.
    async fn save(
        &self,
        transfer: BloodPressureTransfer,
    ) -> Result<BloodPressureTransfer, ServiceError>;

    /// One page of transfers, timestamp-descending unless the request
    /// specifies a sort
    async fn find_all(
        &self,
        request: PageRequest,
    ) -> Result<Page<BloodPressureTransfer>, ServiceError>;

    /// One transfer by id, `None` when absent
    async fn find_one(&self, id: Uuid)
        -> Result<Option<BloodPressureTransfer>, ServiceError>;

    /// Remove from the store and the index. Idempotent.
    async fn delete(&self, id: Uuid) -> Result<(), ServiceError>;

    /// One page of transfers matching a free-text query against the
    /// search index only
    async fn search(
        &self,
        query: &str,
        request: PageRequest,
    ) -> Result<Page<BloodPressureTransfer>, ServiceError>;
}

/// Record service over an entity store, a user store, and a search index
pub struct BloodPressureService<S, U, I> {
    store: S,
    users: U,
    index: I,
}

impl<S, U, I> BloodPressureService<S, U, I>
where
    S: BloodPressureStore,
    U: UserStore,
    I: BloodPressureSearchIndex,
{
    pub fn new(store: S, users: U, index: I) -> Self {
        Self {
            store,
            users,
            index,
        }
    }

    /// Swap the record's owner stub for the current user-store entry, so
    /// the login flattened into the transfer is never a cached copy. A
    /// stub pointing at no user is a data-integrity error.
    async fn resolve_owner(
        &self,
        mut record: BloodPressureRecord,
    ) -> Result<BloodPressureRecord, ServiceError> {
        if let Some(stub) = record.owner.take() {
            let owner = self
                .users
                .get(stub.id)
                .await?
                .ok_or(ServiceError::UnresolvedOwner(stub.id))?;
            record.owner = Some(owner);
        }
        Ok(record)
    }

    async fn to_transfer_resolved(
        &self,
        record: BloodPressureRecord,
    ) -> Result<BloodPressureTransfer, ServiceError> {
        let resolved = self.resolve_owner(record).await?;
        Ok(mapper::to_transfer(&resolved)?)
    }

    async fn page_to_transfers(
        &self,
        page: Page<BloodPressureRecord>,
    ) -> Result<Page<BloodPressureTransfer>, ServiceError> {
        let mut items = Vec::with_capacity(page.items.len());
        for record in page.items {
            items.push(self.to_transfer_resolved(record).await?);
        }
        Ok(Page {
            items,
            total_count: page.total_count,
            page: page.page,
            size: page.size,
        })
    }
}

#[async_trait]
impl<S, U, I> BloodPressureServiceTrait for BloodPressureService<S, U, I>
where
    S: BloodPressureStore,
    U: UserStore,
    I: BloodPressureSearchIndex,
{
    async fn save(
        &self,
        transfer: BloodPressureTransfer,
    ) -> Result<BloodPressureTransfer, ServiceError> {
        debug!("Request to save BloodPressure : {:?}", transfer);

        let record = mapper::to_record(&transfer);
        let saved = if record.id.is_none() {
            self.store.insert(record).await?
        } else {
            self.store.update(record).await?
        };

        // Store and index are two separate writes; the index copy is
        // derived data, refreshed after every save.
        let resolved = self.resolve_owner(saved).await?;
        self.index.index_record(&resolved).await?;

        Ok(mapper::to_transfer(&resolved)?)
    }

    async fn find_all(
        &self,
        request: PageRequest,
    ) -> Result<Page<BloodPressureTransfer>, ServiceError> {
        debug!("Request to get a page of BloodPressures");
        let page = self.store.find_page(&request).await?;
        self.page_to_transfers(page).await
    }

    async fn find_one(
        &self,
        id: Uuid,
    ) -> Result<Option<BloodPressureTransfer>, ServiceError> {
        debug!("Request to get BloodPressure : {}", id);
        match self.store.get(id).await? {
            Some(record) => Ok(Some(self.to_transfer_resolved(record).await?)),
            None => Ok(None),
        }
    }

    async fn delete(&self, id: Uuid) -> Result<(), ServiceError> {
        debug!("Request to delete BloodPressure : {}", id);
        self.store.delete(id).await?;
        self.index.remove(id).await?;
        Ok(())
    }

    async fn search(
        &self,
        query: &str,
        request: PageRequest,
    ) -> Result<Page<BloodPressureTransfer>, ServiceError> {
        debug!("Request to search for a page of BloodPressures for query {}", query);
        let page = self.index.search(query, &request).await?;
        self.page_to_transfers(page).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use healthtrack_data::models::User;
    use healthtrack_data::search::InMemorySearchIndex;
    use healthtrack_data::store::{InMemoryBloodPressureStore, InMemoryUserStore};

    type TestService =
        BloodPressureService<InMemoryBloodPressureStore, InMemoryUserStore, InMemorySearchIndex>;

    async fn service_with_user(login: &str) -> (TestService, Uuid) {
        let users = InMemoryUserStore::new();
        let owner = Uuid::new_v4();
        users.upsert(User::new(owner, login)).await.unwrap();
        let service = BloodPressureService::new(
            InMemoryBloodPressureStore::new(),
            users,
            InMemorySearchIndex::new(),
        );
        (service, owner)
    }

    fn transfer(owner: Uuid, systolic: u16, day: u32) -> BloodPressureTransfer {
        BloodPressureTransfer {
            id: None,
            systolic,
            diastolic: 80,
            timestamp: Utc.with_ymd_and_hms(2023, 5, day, 8, 30, 0).unwrap(),
            owner_id: Some(owner),
            owner_login: None,
        }
    }

    #[tokio::test]
    async fn save_without_id_inserts_and_assigns_one() {
        let (service, owner) = service_with_user("alice").await;

        let saved = service.save(transfer(owner, 120, 1)).await.unwrap();
        assert!(saved.id.is_some());
        assert_eq!(saved.systolic, 120);
        assert_eq!(saved.owner_id, Some(owner));
        assert_eq!(saved.owner_login.as_deref(), Some("alice"));
    }

    #[tokio::test]
    async fn save_with_id_replaces_the_record() {
        let (service, owner) = service_with_user("alice").await;

        let saved = service.save(transfer(owner, 120, 1)).await.unwrap();
        let mut changed = saved.clone();
        changed.systolic = 150;

        let updated = service.save(changed).await.unwrap();
        assert_eq!(updated.id, saved.id);
        assert_eq!(updated.systolic, 150);

        let page = service.find_all(PageRequest::new(0, 10)).await.unwrap();
        assert_eq!(page.total_count, 1);
        assert_eq!(page.items[0].systolic, 150);
    }

    #[tokio::test]
    async fn owner_login_reflects_the_current_user_record() {
        let (service, owner) = service_with_user("alice").await;
        let saved = service.save(transfer(owner, 120, 1)).await.unwrap();

        service
            .users
            .upsert(User::new(owner, "alice_renamed"))
            .await
            .unwrap();

        let fetched = service.find_one(saved.id.unwrap()).await.unwrap().unwrap();
        assert_eq!(fetched.owner_login.as_deref(), Some("alice_renamed"));
    }

    #[tokio::test]
    async fn find_one_missing_is_none() {
        let (service, _) = service_with_user("alice").await;
        assert!(service.find_one(Uuid::new_v4()).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn delete_removes_from_store_and_index() {
        let (service, owner) = service_with_user("alice").await;
        let saved = service.save(transfer(owner, 120, 1)).await.unwrap();
        let id = saved.id.unwrap();

        service.delete(id).await.unwrap();
        service.delete(id).await.unwrap();

        assert!(service.find_one(id).await.unwrap().is_none());
        let hits = service.search("120", PageRequest::new(0, 10)).await.unwrap();
        assert_eq!(hits.total_count, 0);
    }

    #[tokio::test]
    async fn search_hits_only_indexed_matches() {
        let (service, owner) = service_with_user("alice").await;
        service.save(transfer(owner, 120, 1)).await.unwrap();
        service.save(transfer(owner, 135, 2)).await.unwrap();

        let hits = service.search("135", PageRequest::new(0, 10)).await.unwrap();
        assert_eq!(hits.total_count, 1);
        assert_eq!(hits.items[0].systolic, 135);
        assert_eq!(hits.items[0].owner_login.as_deref(), Some("alice"));

        let none = service.search("999", PageRequest::new(0, 10)).await.unwrap();
        assert!(none.items.is_empty());
    }

    #[tokio::test]
    async fn save_with_unknown_owner_is_an_error() {
        // The user store has no entry for this owner id
        let service = BloodPressureService::new(
            InMemoryBloodPressureStore::new(),
            InMemoryUserStore::new(),
            InMemorySearchIndex::new(),
        );
        let owner = Uuid::new_v4();

        let result = service.save(transfer(owner, 120, 1)).await;
        assert!(matches!(
            result,
            Err(ServiceError::UnresolvedOwner(id)) if id == owner
        ));
    }

    #[tokio::test]
    async fn reads_fail_when_the_owner_disappears() {
        let (service, owner) = service_with_user("alice").await;
        let saved = service.save(transfer(owner, 120, 1)).await.unwrap();

        // Simulate the owner row vanishing from under the record
        let stale = BloodPressureService::new(
            service.store.clone(),
            InMemoryUserStore::new(),
            service.index.clone(),
        );

        let result = stale.find_one(saved.id.unwrap()).await;
        assert!(matches!(result, Err(ServiceError::UnresolvedOwner(_))));
    }
}
