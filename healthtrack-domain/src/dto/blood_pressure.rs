use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

/// Wire representation of a blood pressure record. Decoupled from the
/// storage shape: the owner reference is flattened to id + login.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BloodPressureTransfer {
    /// Unique identifier. Absent on create requests; server-assigned.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<Uuid>,

    /// Systolic blood pressure (the higher number)
    pub systolic: u16,

    /// Diastolic blood pressure (the lower number)
    pub diastolic: u16,

    /// When the measurement was taken
    pub timestamp: DateTime<Utc>,

    /// Id of the owning user
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_id: Option<Uuid>,

    /// Login of the owning user, resolved from the user store at read
    /// time. Ignored on writes; only `owner_id` establishes the reference.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_login: Option<String>,
}
