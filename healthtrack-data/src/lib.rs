// HealthTrack Data
// This crate handles record storage and the secondary search index

// Storage models
pub mod models;

// Page request/result types shared by stores and the search index
pub mod page;

// Entity and user store traits plus backends
pub mod store;

// Secondary free-text search index
pub mod search;
