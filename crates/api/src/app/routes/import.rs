use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::post,
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new().route("/", post(import_stock))
}

pub async fn import_stock(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ImportBody>,
) -> axum::response::Response {
    match services
        .import
        .import_stock(&body.raw, body.mode, body.dry_run)
    {
        Ok(report) => {
            let mut payload = serde_json::json!({
                "success": true,
                "imported_count": report.imported_count,
                "total_units": report.total_units,
                "per_type_summary": report.per_type_summary,
                "unmapped": report.unmapped,
                "skipped": report.skipped,
            });
            if let Some(preview) = report.preview {
                payload["preview"] = serde_json::json!(preview);
            }
            (StatusCode::OK, Json(payload)).into_response()
        }
        Err(e) => errors::service_error_to_response(e),
    }
}
