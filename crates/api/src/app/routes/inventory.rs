use std::sync::Arc;

use axum::{
    extract::Extension,
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::errors;
use crate::app::routes::common;
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_inventory))
        .route("/reset", post(reset_inventory))
}

/// Cached snapshot; eventually consistent with other sessions' commits.
pub async fn list_inventory(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let items = services.ledger.snapshot();
    (
        StatusCode::OK,
        Json(serde_json::json!({
            "success": true,
            "items": items,
        })),
    )
        .into_response()
}

pub async fn reset_inventory(
    Extension(services): Extension<Arc<AppServices>>,
    headers: HeaderMap,
) -> axum::response::Response {
    if let Err(response) = common::require_admin(&headers) {
        return response;
    }
    match services.ledger.reset_all() {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "count": count,
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
