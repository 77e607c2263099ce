use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Storage model for a blood pressure record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct BloodPressureRecord {
    /// Unique identifier, assigned by the store on insert. `None` before
    /// the first save; immutable afterwards.
    pub id: Option<Uuid>,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// When the measurement was taken
    pub timestamp: DateTime<Utc>,

    /// The user this record belongs to. Records loaded from a store carry
    /// a reference-only stub; the login is resolved from the user store at
    /// read time.
    pub owner: Option<User>,
}

impl BloodPressureRecord {
    /// Reference-only stub for the owning user, carrying just the id.
    pub fn owner_stub(id: Uuid) -> User {
        User { id, login: None }
    }
}

/// Owning user of a blood pressure record
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct User {
    /// Unique identifier
    pub id: Uuid,

    /// Display login. `None` on reference-only stubs.
    pub login: Option<String>,
}

impl User {
    pub fn new(id: Uuid, login: impl Into<String>) -> Self {
        Self {
            id,
            login: Some(login.into()),
        }
    }
}
