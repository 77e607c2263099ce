use axum::http::{HeaderMap, HeaderName, HeaderValue};

use healthtrack_data::page::Page;

/// Client application name used in alert and error header names
pub const APPLICATION_NAME: &str = "healthtrack";

/// Informational alert header (entity action for client display)
pub static ALERT_HEADER: HeaderName = HeaderName::from_static("x-healthtrack-alert");

/// Parameter companion for alert and error headers
pub static PARAMS_HEADER: HeaderName = HeaderName::from_static("x-healthtrack-params");

/// Machine-readable error key header on bad-request responses
pub static ERROR_HEADER: HeaderName = HeaderName::from_static("x-healthtrack-error");

/// Total item count across all pages
pub static TOTAL_COUNT_HEADER: HeaderName = HeaderName::from_static("x-total-count");

/// Informational alert headers on create/update/delete responses. Purely
/// observational; failures to encode are silently dropped.
pub fn entity_alert(headers: &mut HeaderMap, action: &str, id: &str) {
    let alert = format!("{APPLICATION_NAME}.bloodPressure.{action}");
    if let Ok(value) = HeaderValue::from_str(&alert) {
        headers.insert(ALERT_HEADER.clone(), value);
    }
    if let Ok(value) = HeaderValue::from_str(id) {
        headers.insert(PARAMS_HEADER.clone(), value);
    }
}

/// `X-Total-Count` plus an RFC 5988 `Link` header describing the first,
/// previous, next, and last pages of a result window. `extra_params` are
/// re-emitted on every link (sort, search query).
pub fn pagination<T>(
    headers: &mut HeaderMap,
    base_path: &str,
    page: &Page<T>,
    extra_params: &[(&str, &str)],
) {
    if let Ok(value) = HeaderValue::from_str(&page.total_count.to_string()) {
        headers.insert(TOTAL_COUNT_HEADER.clone(), value);
    }

    let link_to = |index: usize, rel: &str| {
        let mut query = format!("page={}&size={}", index, page.size);
        for (name, value) in extra_params {
            query.push('&');
            query.push_str(name);
            query.push('=');
            query.push_str(&urlencoding::encode(value));
        }
        format!("<{base_path}?{query}>; rel=\"{rel}\"")
    };

    let last = page.last_page();
    let mut links = Vec::new();
    if page.page < last {
        links.push(link_to(page.page + 1, "next"));
    }
    if page.page > 0 {
        links.push(link_to(page.page - 1, "prev"));
    }
    links.push(link_to(last, "last"));
    links.push(link_to(0, "first"));

    if let Ok(value) = HeaderValue::from_str(&links.join(",")) {
        headers.insert(axum::http::header::LINK, value);
    }
}
