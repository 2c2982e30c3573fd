use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use telarstock_core::DomainError;
use telarstock_infra::{ServiceError, StoreError};

/// Map a service failure onto the uniform `{success: false, ...}` envelope.
pub fn service_error_to_response(err: ServiceError) -> axum::response::Response {
    match err {
        ServiceError::Domain(domain) => match domain {
            DomainError::Validation(msg) => {
                json_error(StatusCode::BAD_REQUEST, "validation_error", msg)
            }
            DomainError::InsufficientStock { available } => json_error(
                StatusCode::CONFLICT,
                "insufficient_stock",
                format!("insufficient stock: {available} available"),
            ),
            DomainError::Duplicate(msg) => json_error(StatusCode::CONFLICT, "duplicate", msg),
            DomainError::NotFound => json_error(StatusCode::NOT_FOUND, "not_found", "not found"),
            DomainError::Conflict(msg) => json_error(StatusCode::CONFLICT, "conflict", msg),
            DomainError::Unauthorized => {
                json_error(StatusCode::FORBIDDEN, "unauthorized", "unauthorized")
            }
        },
        ServiceError::Store(StoreError::PartialBatch { committed, source }) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            axum::Json(json!({
                "success": false,
                "error": "partial_batch",
                "message": source.to_string(),
                "committed": committed,
            })),
        )
            .into_response(),
        ServiceError::Store(store) => json_error(
            StatusCode::INTERNAL_SERVER_ERROR,
            "store_error",
            store.to_string(),
        ),
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "success": false,
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}
