//! Health check and the live push feed.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::Extension,
    http::StatusCode,
    response::{
        sse::{Event as SseEvent, KeepAlive, Sse},
        IntoResponse,
    },
    Json,
};
use tokio::sync::mpsc::unbounded_channel;
use tokio_stream::wrappers::UnboundedReceiverStream;

use telarstock_infra::StoreUpdate;

use crate::app::services::AppServices;

pub async fn health() -> axum::response::Response {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "status": "ok" })),
    )
        .into_response()
}

/// GET /stream
///
/// Server-sent snapshot feed. Every commit that touches stock, history or
/// the catalog arrives as one `inventory` / `history` / `catalog` event
/// carrying the full fresh snapshot.
pub async fn stream(
    Extension(services): Extension<Arc<AppServices>>,
) -> axum::response::Response {
    let (tx, rx) = unbounded_channel::<Result<SseEvent, std::convert::Infallible>>();

    // The bus subscription blocks on std mpsc, so it lives on a blocking task
    // that forwards into the async channel.
    let subscription = services.bus.subscribe();
    tokio::task::spawn_blocking(move || {
        let mut last_heartbeat = std::time::Instant::now();

        loop {
            match subscription.recv_timeout(Duration::from_millis(1000)) {
                Ok(Some(update)) => {
                    let payload = match &update {
                        StoreUpdate::Inventory(items) => serde_json::json!({ "items": items }),
                        StoreUpdate::History(entries) => serde_json::json!({ "entries": entries }),
                        StoreUpdate::Catalog(catalog) => serde_json::json!({
                            "garments": catalog.garments,
                            "colors": catalog.colors,
                            "sizes": catalog.sizes,
                        }),
                    };
                    let json_str = match serde_json::to_string(&payload) {
                        Ok(s) => s,
                        Err(_) => continue,
                    };

                    let sse_event = SseEvent::default().event(update.kind()).data(json_str);
                    if tx.send(Ok(sse_event)).is_err() {
                        break; // Receiver dropped
                    }
                    last_heartbeat = std::time::Instant::now();
                }
                Ok(None) => {
                    // Keep idle connections alive.
                    if last_heartbeat.elapsed() > Duration::from_secs(15) {
                        let heartbeat = SseEvent::default().event("heartbeat").data("{}");
                        if tx.send(Ok(heartbeat)).is_err() {
                            break;
                        }
                        last_heartbeat = std::time::Instant::now();
                    }
                }
                Err(()) => {
                    break; // Bus closed
                }
            }
        }
    });

    let stream = UnboundedReceiverStream::new(rx);
    Sse::new(stream)
        .keep_alive(KeepAlive::new().interval(Duration::from_secs(15)))
        .into_response()
}
