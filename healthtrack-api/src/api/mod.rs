// API module structure
pub mod errors;
pub mod handlers;
pub mod headers;
pub mod routes;
