use std::sync::Arc;

use axum::{
    extract::{Json, Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{IntoResponse, Response},
};
use serde::Deserialize;
use tracing::{debug, instrument};
use utoipa::IntoParams;
use uuid::Uuid;

use crate::api::errors::{ApiError, BadRequestPayload, InternalErrorPayload};
use crate::api::headers;
use healthtrack_data::page::{PageRequest, Sort};
use healthtrack_domain::dto::BloodPressureTransfer;
use healthtrack_domain::services::BloodPressureServiceTrait;

/// Entity name carried in alert headers and bad-request payloads
const ENTITY_NAME: &str = "bloodPressure";

/// Service handle injected as router state
pub type RecordService = Arc<dyn BloodPressureServiceTrait>;

/// Pagination query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct PageParams {
    /// Zero-based page index (default 0)
    pub page: Option<usize>,

    /// Page size (default 20, capped at 1000)
    pub size: Option<usize>,

    /// Sort specification, `field,asc|desc` over timestamp, systolic,
    /// diastolic, or id
    pub sort: Option<String>,
}

/// Search query parameters
#[derive(Debug, Deserialize, IntoParams)]
pub struct SearchParams {
    /// Free-text query string
    pub query: String,

    /// Zero-based page index (default 0)
    pub page: Option<usize>,

    /// Page size (default 20, capped at 1000)
    pub size: Option<usize>,

    /// Sort specification, `field,asc|desc`; index relevance order when
    /// absent
    pub sort: Option<String>,
}

fn page_request(
    page: Option<usize>,
    size: Option<usize>,
    sort: Option<&str>,
) -> Result<PageRequest, ApiError> {
    let mut request = PageRequest::new(page.unwrap_or(0), size.unwrap_or(20).min(1000));
    if let Some(raw) = sort {
        let sort = raw.parse::<Sort>().map_err(|_| {
            ApiError::bad_request_alert(ENTITY_NAME, "sortinvalid", "Invalid sort parameter")
        })?;
        request = request.with_sort(sort);
    }
    Ok(request)
}

/// Create a new blood pressure record
#[utoipa::path(
    post,
    path = "/api/blood-pressures",
    request_body = BloodPressureTransfer,
    responses(
        (status = 201, description = "Record created", body = BloodPressureTransfer),
        (status = 400, description = "Record already has an id", body = BadRequestPayload),
        (status = 500, description = "Internal server error", body = InternalErrorPayload),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service, transfer))]
pub async fn create_blood_pressure(
    State(service): State<RecordService>,
    Json(transfer): Json<BloodPressureTransfer>,
) -> Result<Response, ApiError> {
    debug!("REST request to save BloodPressure : {:?}", transfer);
    if transfer.id.is_some() {
        return Err(ApiError::bad_request_alert(
            ENTITY_NAME,
            "idexists",
            "A new bloodPressure cannot already have an ID",
        ));
    }

    let result = service.save(transfer).await?;
    let id = result
        .id
        .map(|id| id.to_string())
        .unwrap_or_default();

    let mut response = (StatusCode::CREATED, Json(result)).into_response();
    let response_headers = response.headers_mut();
    if let Ok(value) = HeaderValue::from_str(&format!("/api/blood-pressures/{id}")) {
        response_headers.insert(header::LOCATION, value);
    }
    headers::entity_alert(response_headers, "created", &id);
    Ok(response)
}

/// Update an existing blood pressure record (full replacement)
#[utoipa::path(
    put,
    path = "/api/blood-pressures",
    request_body = BloodPressureTransfer,
    responses(
        (status = 200, description = "Record updated", body = BloodPressureTransfer),
        (status = 400, description = "Record has no id", body = BadRequestPayload),
        (status = 500, description = "Internal server error", body = InternalErrorPayload),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service, transfer))]
pub async fn update_blood_pressure(
    State(service): State<RecordService>,
    Json(transfer): Json<BloodPressureTransfer>,
) -> Result<Response, ApiError> {
    debug!("REST request to update BloodPressure : {:?}", transfer);
    if transfer.id.is_none() {
        return Err(ApiError::bad_request_alert(ENTITY_NAME, "idnull", "Invalid id"));
    }

    let result = service.save(transfer).await?;
    let id = result
        .id
        .map(|id| id.to_string())
        .unwrap_or_default();

    let mut response = (StatusCode::OK, Json(result)).into_response();
    headers::entity_alert(response.headers_mut(), "updated", &id);
    Ok(response)
}

/// Get a page of blood pressure records
#[utoipa::path(
    get,
    path = "/api/blood-pressures",
    params(PageParams),
    responses(
        (status = 200, description = "Page of records", body = [BloodPressureTransfer]),
        (status = 500, description = "Internal server error", body = InternalErrorPayload),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn get_all_blood_pressures(
    State(service): State<RecordService>,
    Query(params): Query<PageParams>,
) -> Result<Response, ApiError> {
    debug!("REST request to get a page of BloodPressures");
    let request = page_request(params.page, params.size, params.sort.as_deref())?;
    let page = service.find_all(request).await?;

    let mut extra = Vec::new();
    if let Some(sort) = params.sort.as_deref() {
        extra.push(("sort", sort));
    }

    let mut response = Json(&page.items).into_response();
    headers::pagination(response.headers_mut(), "/api/blood-pressures", &page, &extra);
    Ok(response)
}

/// Get one blood pressure record by id
#[utoipa::path(
    get,
    path = "/api/blood-pressures/{id}",
    params(("id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 200, description = "Record found", body = BloodPressureTransfer),
        (status = 404, description = "Record not found"),
        (status = 500, description = "Internal server error", body = InternalErrorPayload),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn get_blood_pressure(
    State(service): State<RecordService>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    debug!("REST request to get BloodPressure : {}", id);
    match service.find_one(id).await? {
        Some(transfer) => Ok(Json(transfer).into_response()),
        None => Ok(StatusCode::NOT_FOUND.into_response()),
    }
}

/// Delete one blood pressure record by id
#[utoipa::path(
    delete,
    path = "/api/blood-pressures/{id}",
    params(("id" = Uuid, Path, description = "Record id")),
    responses(
        (status = 204, description = "Record deleted"),
        (status = 500, description = "Internal server error", body = InternalErrorPayload),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn delete_blood_pressure(
    State(service): State<RecordService>,
    Path(id): Path<Uuid>,
) -> Result<Response, ApiError> {
    debug!("REST request to delete BloodPressure : {}", id);
    service.delete(id).await?;

    let mut response = StatusCode::NO_CONTENT.into_response();
    headers::entity_alert(response.headers_mut(), "deleted", &id.to_string());
    Ok(response)
}

/// Search blood pressure records via the search index
#[utoipa::path(
    get,
    path = "/api/_search/blood-pressures",
    params(SearchParams),
    responses(
        (status = 200, description = "Page of matching records", body = [BloodPressureTransfer]),
        (status = 500, description = "Internal server error", body = InternalErrorPayload),
    ),
    tag = "blood_pressure"
)]
#[instrument(skip(service))]
pub async fn search_blood_pressures(
    State(service): State<RecordService>,
    Query(params): Query<SearchParams>,
) -> Result<Response, ApiError> {
    debug!(
        "REST request to search for a page of BloodPressures for query {}",
        params.query
    );
    let request = page_request(params.page, params.size, params.sort.as_deref())?;
    let page = service.search(&params.query, request).await?;

    let mut extra = vec![("query", params.query.as_str())];
    if let Some(sort) = params.sort.as_deref() {
        extra.push(("sort", sort));
    }

    let mut response = Json(&page.items).into_response();
    headers::pagination(
        response.headers_mut(),
        "/api/_search/blood-pressures",
        &page,
        &extra,
    );
    Ok(response)
}
