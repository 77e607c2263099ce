// Services coordinating stores and the search index
pub mod blood_pressure;

pub use blood_pressure::{BloodPressureService, BloodPressureServiceTrait, ServiceError};
