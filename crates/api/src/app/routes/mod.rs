use axum::{routing::get, Router};

pub mod catalog;
pub mod common;
pub mod history;
pub mod import;
pub mod inventory;
pub mod movements;
pub mod system;

/// Router for all application endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/stream", get(system::stream))
        .nest("/movements", movements::router())
        .nest("/inventory", inventory::router())
        .nest("/history", history::router())
        .nest("/import", import::router())
        .nest("/catalog", catalog::router())
}
