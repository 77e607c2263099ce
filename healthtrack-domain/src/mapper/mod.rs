// Record/transfer conversion functions
pub mod blood_pressure;

pub use blood_pressure::{stub_from_id, to_record, to_transfer, MapperError};
