// Request handlers
pub mod blood_pressure;
