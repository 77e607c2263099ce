// Secondary search index over blood pressure records
mod in_memory;

use async_trait::async_trait;
use uuid::Uuid;

use crate::models::BloodPressureRecord;
use crate::page::{Page, PageRequest};
use crate::store::StoreError;

pub use in_memory::InMemorySearchIndex;

/// Free-text search index over blood pressure records. The index holds
/// derived copies; the entity store stays the source of truth.
#[async_trait]
pub trait BloodPressureSearchIndex: Send + Sync {
    /// Add or replace the indexed copy of a record. The record must carry
    /// an id; the owner login, when present, becomes part of the document.
    async fn index_record(&self, record: &BloodPressureRecord) -> Result<(), StoreError>;

    /// Drop a record from the index. Removing a missing id is not an error.
    async fn remove(&self, id: Uuid) -> Result<(), StoreError>;

    /// One page of records matching a free-text query, in relevance order
    /// unless the request specifies a sort.
    async fn search(
        &self,
        query: &str,
        request: &PageRequest,
    ) -> Result<Page<BloodPressureRecord>, StoreError>;
}
