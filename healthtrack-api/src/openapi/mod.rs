use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

/// Configure Swagger UI endpoints
pub fn configure_swagger_routes() -> SwaggerUi {
    SwaggerUi::new("/api-docs").url("/api-docs/openapi.json", ApiDoc::openapi())
}

// API Documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        crate::api::handlers::blood_pressure::create_blood_pressure,
        crate::api::handlers::blood_pressure::update_blood_pressure,
        crate::api::handlers::blood_pressure::get_all_blood_pressures,
        crate::api::handlers::blood_pressure::get_blood_pressure,
        crate::api::handlers::blood_pressure::delete_blood_pressure,
        crate::api::handlers::blood_pressure::search_blood_pressures,
    ),
    components(
        schemas(
            healthtrack_domain::dto::BloodPressureTransfer,
            crate::api::errors::BadRequestPayload,
            crate::api::errors::InternalErrorPayload,
        )
    ),
    tags(
        (name = "blood_pressure", description = "Blood pressure record management and search")
    ),
    info(
        title = "HealthTrack API",
        version = "0.1.0",
        description = "CRUD and free-text search over blood pressure records",
        license(
            name = "MIT",
            url = "https://opensource.org/licenses/MIT"
        ),
    ),
    servers(
        (url = "/", description = "Local development server")
    )
)]
struct ApiDoc;
