// HealthTrack API
//
// HTTP surface for the HealthTrack application.

// Public modules
pub mod api;
pub mod openapi;
