// Storage model definitions
pub mod blood_pressure;

pub use blood_pressure::{BloodPressureRecord, User};
