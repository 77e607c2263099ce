use chrono::{DateTime, Utc};
use thiserror::Error;
use uuid::Uuid;

use crate::dto::BloodPressureTransfer;
use healthtrack_data::models::BloodPressureRecord;

/// Mapper failures
#[derive(Debug, Error, PartialEq, Eq)]
pub enum MapperError {
    /// Stored records must reference an owner; a record without one cannot
    /// be flattened into the wire shape.
    #[error("Blood pressure record {0:?} has no owner")]
    MissingOwner(Option<Uuid>),
}

/// Flatten a record into its wire shape. Each field mapping is enumerated
/// explicitly; the owner reference becomes `owner_id` + `owner_login`.
pub fn to_transfer(record: &BloodPressureRecord) -> Result<BloodPressureTransfer, MapperError> {
    let owner = record
        .owner
        .as_ref()
        .ok_or(MapperError::MissingOwner(record.id))?;

    Ok(BloodPressureTransfer {
        id: record.id,
        systolic: record.systolic,
        diastolic: record.diastolic,
        timestamp: record.timestamp,
        owner_id: Some(owner.id),
        owner_login: owner.login.clone(),
    })
}

/// Rebuild a record from its wire shape. The owner comes back as a
/// reference-only stub; callers needing the full owner re-resolve it via
/// the user store.
pub fn to_record(transfer: &BloodPressureTransfer) -> BloodPressureRecord {
    BloodPressureRecord {
        id: transfer.id,
        systolic: transfer.systolic,
        diastolic: transfer.diastolic,
        timestamp: transfer.timestamp,
        owner: transfer.owner_id.map(BloodPressureRecord::owner_stub),
    }
}

/// Id-only placeholder record, for expressing "refers to this record"
/// without a store round trip.
pub fn stub_from_id(id: Option<Uuid>) -> Option<BloodPressureRecord> {
    id.map(|id| BloodPressureRecord {
        id: Some(id),
        systolic: 0,
        diastolic: 0,
        timestamp: DateTime::<Utc>::UNIX_EPOCH,
        owner: None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use healthtrack_data::models::User;

    fn record_with_owner() -> BloodPressureRecord {
        BloodPressureRecord {
            id: Some(Uuid::new_v4()),
            systolic: 128,
            diastolic: 82,
            timestamp: Utc.with_ymd_and_hms(2023, 5, 1, 8, 30, 0).unwrap(),
            owner: Some(User::new(Uuid::new_v4(), "alice")),
        }
    }

    #[test]
    fn round_trip_preserves_scalars_and_owner_id() {
        let record = record_with_owner();
        let transfer = to_transfer(&record).unwrap();
        let back = to_record(&transfer);

        assert_eq!(back.id, record.id);
        assert_eq!(back.systolic, record.systolic);
        assert_eq!(back.diastolic, record.diastolic);
        assert_eq!(back.timestamp, record.timestamp);

        // Only the owner id survives; the login is re-derivable via lookup
        let back_owner = back.owner.unwrap();
        assert_eq!(Some(back_owner.id), record.owner.as_ref().map(|o| o.id));
        assert_eq!(back_owner.login, None);
    }

    #[test]
    fn to_transfer_flattens_owner() {
        let record = record_with_owner();
        let transfer = to_transfer(&record).unwrap();

        assert_eq!(transfer.owner_id, record.owner.as_ref().map(|o| o.id));
        assert_eq!(transfer.owner_login.as_deref(), Some("alice"));
    }

    #[test]
    fn to_transfer_requires_an_owner() {
        let mut record = record_with_owner();
        record.owner = None;

        assert_eq!(
            to_transfer(&record),
            Err(MapperError::MissingOwner(record.id))
        );
    }

    #[test]
    fn stub_from_id_carries_only_the_id() {
        assert!(stub_from_id(None).is_none());

        let id = Uuid::new_v4();
        let stub = stub_from_id(Some(id)).unwrap();
        assert_eq!(stub.id, Some(id));
        assert!(stub.owner.is_none());
    }
}
