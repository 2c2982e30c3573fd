use std::sync::Arc;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use crate::app::services::AppServices;
use crate::app::{dto, errors};

pub fn router() -> Router {
    Router::new()
        .route("/", get(get_catalog))
        .route("/garments", post(add_garment).delete(remove_garment))
        .route("/colors", post(add_color).delete(remove_color))
        .route("/sizes", post(add_size).delete(remove_size))
}

pub async fn get_catalog(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    match services.catalog.load_or_seed() {
        Ok(catalog) => (
            StatusCode::OK,
            Json(serde_json::json!({
                "success": true,
                "garments": catalog.garments,
                "colors": catalog.colors,
                "sizes": catalog.sizes,
            })),
        )
            .into_response(),
        Err(e) => errors::service_error_to_response(e),
    }
}

fn ok() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "success": true })),
    )
        .into_response()
}

pub async fn add_garment(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::NameBody>,
) -> axum::response::Response {
    match services.catalog.add_garment(&body.name) {
        Ok(()) => ok(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn remove_garment(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::NameBody>,
) -> axum::response::Response {
    match services.catalog.remove_garment(&body.name) {
        Ok(_) => ok(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_color(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::ColorBody>,
) -> axum::response::Response {
    match services.catalog.add_color(body.into_color()) {
        Ok(()) => ok(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn remove_color(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::NameBody>,
) -> axum::response::Response {
    match services.catalog.remove_color(&body.name) {
        Ok(_) => ok(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn add_size(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::NameBody>,
) -> axum::response::Response {
    match services.catalog.add_size(&body.name) {
        Ok(()) => ok(),
        Err(e) => errors::service_error_to_response(e),
    }
}

pub async fn remove_size(
    Extension(services): Extension<Arc<AppServices>>,
    Json(body): Json<dto::NameBody>,
) -> axum::response::Response {
    match services.catalog.remove_size(&body.name) {
        Ok(_) => ok(),
        Err(e) => errors::service_error_to_response(e),
    }
}
