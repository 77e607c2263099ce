// Wire-shape definitions
pub mod blood_pressure;

pub use blood_pressure::BloodPressureTransfer;
