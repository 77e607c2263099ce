// HealthTrack Domain
// This crate contains the record service and wire representations

// Transfer (wire) representations
pub mod dto;

// Record/transfer conversion functions
pub mod mapper;

// Record service coordinating store and search index
pub mod services;
