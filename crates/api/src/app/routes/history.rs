use std::sync::Arc;

use axum::{
    extract::{Extension, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::get,
    Json, Router,
};

use crate::app::routes::common;
use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(recent_history))
        .route("/range", get(history_range).delete(delete_history_range))
}

/// The bounded recent window, newest first.
pub async fn recent_history(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let entries = services.history.recent();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "entries": entries,
        })),
    )
        .into_response()
}

pub async fn history_range(
    Extension(services): Extension<Arc<AppServices>>,
    Query(query): Query<dto::RangeQuery>,
) -> axum::response::Response {
    let start = match common::parse_timestamp("start", &query.start) {
        Ok(v) => v,
        Err(response) => return response,
    };
    let end = match common::parse_timestamp("end", &query.end) {
        Ok(v) => v,
        Err(response) => return response,
    };

    match services.history.by_range(start, end) {
        Ok(entries) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "entries": entries,
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn delete_history_range(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
    Query(query): Query<dto::RangeQuery>,
) -> axum::response::Response {
    if let Err(response) = common::require_admin(&headers) {
        return response;
    }
    let start = match common::parse_timestamp("start", &query.start) {
        Ok(v) => v,
        Err(response) => return response,
    };
    let end = match common::parse_timestamp("end", &query.end) {
        Ok(v) => v,
        Err(response) => return response,
    };

    match services.history.delete_range(start, end) {
        Ok(deleted) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "deleted": deleted,
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
