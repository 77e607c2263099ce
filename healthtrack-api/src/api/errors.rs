use axum::{
    http::{HeaderValue, StatusCode},
    response::{IntoResponse, Json, Response},
};
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use utoipa::ToSchema;

use crate::api::headers::{ERROR_HEADER, PARAMS_HEADER};
use healthtrack_domain::services::ServiceError;

/// API-level errors. Validation failures carry an entity name and a
/// machine-readable error key for client-side message lookup; anything
/// from the record service bubbles up unmodified as a generic 500.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    BadRequestAlert {
        entity_name: &'static str,
        error_key: &'static str,
        message: &'static str,
    },

    #[error(transparent)]
    Service(#[from] ServiceError),
}

impl ApiError {
    pub fn bad_request_alert(
        entity_name: &'static str,
        error_key: &'static str,
        message: &'static str,
    ) -> Self {
        Self::BadRequestAlert {
            entity_name,
            error_key,
            message,
        }
    }
}

/// Wire payload for bad-request alerts
#[derive(Debug, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct BadRequestPayload {
    /// Entity the violation concerns
    pub entity_name: String,

    /// Machine-readable error key (e.g. `idexists`, `idnull`)
    pub error_key: String,

    /// Human-readable message
    pub message: String,
}

/// Wire payload for unhandled server errors
#[derive(Debug, Serialize, ToSchema)]
pub struct InternalErrorPayload {
    pub error: String,
    pub message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::BadRequestAlert {
                entity_name,
                error_key,
                message,
            } => {
                let payload = BadRequestPayload {
                    entity_name: entity_name.to_string(),
                    error_key: error_key.to_string(),
                    message: message.to_string(),
                };
                let mut response = (StatusCode::BAD_REQUEST, Json(payload)).into_response();

                let headers = response.headers_mut();
                if let Ok(value) = HeaderValue::from_str(&format!("error.{error_key}")) {
                    headers.insert(ERROR_HEADER.clone(), value);
                }
                if let Ok(value) = HeaderValue::from_str(entity_name) {
                    headers.insert(PARAMS_HEADER.clone(), value);
                }
                response
            }
            ApiError::Service(err) => {
                error!("Unhandled service error: {}", err);
                let payload = InternalErrorPayload {
                    error: "internal_server_error".to_string(),
                    message: "An unexpected error occurred".to_string(),
                };
                (StatusCode::INTERNAL_SERVER_ERROR, Json(payload)).into_response()
            }
        }
    }
}
