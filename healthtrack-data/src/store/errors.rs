use std::sync::PoisonError;
use thiserror::Error;

/// Error type for store and search-index operations
#[derive(Error, Debug)]
pub enum StoreError {
    /// SQLite error
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// Connection pool error
    #[error("Connection pool error: {0}")]
    Pool(#[from] r2d2::Error),

    /// Lock error
    #[error("Lock error: {0}")]
    Lock(String),

    /// A persisted row holds an id that is not a UUID
    #[error("Invalid stored id: {0}")]
    InvalidId(String),

    /// A persisted row holds a timestamp that is not RFC 3339
    #[error("Timestamp parsing error: {0}")]
    DateParse(String),

    /// A persisted row holds a reading outside the storable range
    #[error("Reading out of range: {0}")]
    InvalidReading(i64),

    /// An update was attempted on a record with no id
    #[error("Record has no id")]
    MissingId,
}

impl<T> From<PoisonError<T>> for StoreError {
    fn from(error: PoisonError<T>) -> Self {
        StoreError::Lock(error.to_string())
    }
}
