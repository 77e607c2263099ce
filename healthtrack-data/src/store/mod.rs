// Store module structure
pub mod errors;
mod in_memory;
mod sqlite;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::{BloodPressureRecord, User};
use crate::page::{Page, PageRequest};

// Re-export commonly used types
pub use errors::StoreError;
pub(crate) use in_memory::compare_records;
pub use in_memory::{InMemoryBloodPressureStore, InMemoryUserStore};
pub use sqlite::{open_pool, SqliteBloodPressureStore, SqlitePool, SqliteUserStore};

/// Primary store for blood pressure records, keyed by a store-assigned id
#[async_trait]
pub trait BloodPressureStore: Send + Sync {
    /// Insert a new record, assigning a fresh id. The input id must be
    /// unset; the returned record carries the assigned id.
    async fn insert(&self, record: BloodPressureRecord)
        -> Result<BloodPressureRecord, StoreError>;

    /// Full replacement of the record at `record.id`
    async fn update(&self, record: BloodPressureRecord)
        -> Result<BloodPressureRecord, StoreError>;

    /// Fetch one record by id
    async fn get(&self, id: Uuid) -> Result<Option<BloodPressureRecord>, StoreError>;

    /// Remove a record. Deleting a missing id is not an error.
    async fn delete(&self, id: Uuid) -> Result<(), StoreError>;

    /// One page of records. Default order is timestamp descending with id
    /// as the tie breaker; `request.sort` overrides it.
    async fn find_page(&self, request: &PageRequest)
        -> Result<Page<BloodPressureRecord>, StoreError>;
}

/// Store for user records referenced by blood pressure records
#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fetch one user by id
    async fn get(&self, id: Uuid) -> Result<Option<User>, StoreError>;

    /// Insert or replace a user
    async fn upsert(&self, user: User) -> Result<User, StoreError>;
}
