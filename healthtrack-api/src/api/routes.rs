use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::trace::TraceLayer;
use tracing::debug;

use crate::api::handlers::blood_pressure::{self, RecordService};
use crate::openapi::configure_swagger_routes;
use healthtrack_data::search::InMemorySearchIndex;
use healthtrack_data::store::{
    open_pool, InMemoryBloodPressureStore, InMemoryUserStore, SqliteBloodPressureStore,
    SqliteUserStore, StoreError,
};
use healthtrack_domain::services::BloodPressureService;

/// Service backed entirely by in-memory stores
pub fn create_in_memory_service() -> RecordService {
    Arc::new(BloodPressureService::new(
        InMemoryBloodPressureStore::new(),
        InMemoryUserStore::new(),
        InMemorySearchIndex::new(),
    ))
}

/// Service backed by a SQLite database. The search index stays in memory
/// and is rebuilt on restart as records are saved.
pub fn create_sqlite_service(path: &str) -> Result<RecordService, StoreError> {
    let pool = open_pool(path)?;
    Ok(Arc::new(BloodPressureService::new(
        SqliteBloodPressureStore::new(pool.clone()),
        SqliteUserStore::new(pool),
        InMemorySearchIndex::new(),
    )))
}

/// Create the application router around a record service
pub fn create_app(service: RecordService) -> Router {
    debug!("Creating application router");

    let api_routes = Router::new()
        .route(
            "/blood-pressures",
            post(blood_pressure::create_blood_pressure)
                .put(blood_pressure::update_blood_pressure)
                .get(blood_pressure::get_all_blood_pressures),
        )
        .route(
            "/blood-pressures/:id",
            get(blood_pressure::get_blood_pressure)
                .delete(blood_pressure::delete_blood_pressure),
        )
        .route(
            "/_search/blood-pressures",
            get(blood_pressure::search_blood_pressures),
        );

    let app = Router::new()
        .nest("/api", api_routes)
        .with_state(service);

    app.merge(configure_swagger_routes())
        .layer(TraceLayer::new_for_http())
}
