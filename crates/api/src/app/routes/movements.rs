use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use telarstock_core::Actor;

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", post(apply_movement))
        .route("/undo", post(undo_last))
}

pub async fn apply_movement(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::MovementBody>,
) -> axum::response::Response {
    let request = body.into_request();
    match services.ledger.apply_movement(&request) {
        Ok(receipt) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "sku": receipt.sku,
                "new_stock": receipt.new_quantity,
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn undo_last(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::UndoBody>,
) -> axum::response::Response {
    match services.ledger.undo_last(&Actor::new(body.actor)) {
        Ok(receipt) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "message": receipt.message,
                "sku": receipt.sku,
                "new_stock": receipt.new_quantity,
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}
