use reqwest::StatusCode;
use serde_json::json;

struct TestServer {
    base_url: String,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Build app (same router as prod), but bind to an ephemeral port.
        let app = telarstock_api::app::build_app();
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { base_url, handle }
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn movement(direction: &str, quantity: u32, actor: &str) -> serde_json::Value {
    json!({
        "direction": direction,
        "garment": "Polera",
        "color": "Negro",
        "size": "M",
        "quantity": quantity,
        "actor": actor,
    })
}

#[tokio::test]
async fn movement_lifecycle_entry_exit_undo() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/movements", srv.base_url))
        .json(&movement("entry", 10, "Raul"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["sku"], "polera_negro_m");
    assert_eq!(body["new_stock"], 10);

    let res = client
        .post(format!("{}/movements", srv.base_url))
        .json(&movement("exit", 3, "Raul"))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["new_stock"], 7);

    let res = client
        .post(format!("{}/movements/undo", srv.base_url))
        .json(&json!({ "actor": "Raul" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["new_stock"], 10);
    assert!(body["message"].as_str().unwrap().contains("Polera"));
}

#[tokio::test]
async fn overdrawn_exit_reports_available_quantity() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/movements", srv.base_url))
        .json(&movement("entry", 3, "Raul"))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/movements", srv.base_url))
        .json(&movement("exit", 8, "Raul"))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], false);
    assert_eq!(body["error"], "insufficient_stock");
    assert!(body["message"].as_str().unwrap().contains("3 available"));
}

#[tokio::test]
async fn inventory_listing_reflects_committed_movements() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    client
        .post(format!("{}/movements", srv.base_url))
        .json(&movement("entry", 6, "Jampier"))
        .send()
        .await
        .unwrap();

    let res = client
        .get(format!("{}/inventory", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    let items = body["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], 6);
    assert_eq!(items[0]["sku"], "polera_negro_m");
}

#[tokio::test]
async fn destructive_routes_require_the_admin_role() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/inventory/reset", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::FORBIDDEN);

    client
        .post(format!("{}/movements", srv.base_url))
        .json(&movement("entry", 2, "Raul"))
        .send()
        .await
        .unwrap();

    let res = client
        .post(format!("{}/inventory/reset", srv.base_url))
        .header("x-role", "admin")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["success"], true);
    assert_eq!(body["count"], 1);
}

#[tokio::test]
async fn history_window_lists_newest_first() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    for quantity in [1u32, 2, 3] {
        client
            .post(format!("{}/movements", srv.base_url))
            .json(&movement("entry", quantity, "Raul"))
            .send()
            .await
            .unwrap();
    }

    let res = client
        .get(format!("{}/history", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    let entries = body["entries"].as_array().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(entries[0]["quantity"], 3);
    assert_eq!(entries[2]["quantity"], 1);
    assert_eq!(entries[0]["action"], "entry");
}

#[tokio::test]
async fn malformed_range_timestamps_are_rejected() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!(
            "{}/history/range?start=yesterday&end=today",
            srv.base_url
        ))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "invalid_timestamp");
}

#[tokio::test]
async fn import_dry_run_previews_without_writing() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let raw = "Tipo,Color,Talla,Cantidad\nPolera,Negro,M,5\nPolera,Negro,M,7\n";
    let res = client
        .post(format!("{}/import", srv.base_url))
        .json(&json!({ "raw": raw, "mode": "accumulate", "dry_run": true }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["imported_count"], 1);
    assert_eq!(body["total_units"], 12);
    assert_eq!(body["preview"].as_array().unwrap().len(), 1);

    let res = client
        .get(format!("{}/inventory", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn import_commits_and_shows_up_in_inventory() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let raw = "Tipo,Color,Talla,Cantidad\nPolera,Negro,M,5\nCasaca,Azul,L,2\n";
    let res = client
        .post(format!("{}/import", srv.base_url))
        .json(&json!({ "raw": raw, "mode": "overwrite" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["imported_count"], 2);
    assert_eq!(body["total_units"], 7);

    let res = client
        .get(format!("{}/inventory", srv.base_url))
        .send()
        .await
        .unwrap();
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["items"].as_array().unwrap().len(), 2);
}

#[tokio::test]
async fn catalog_rejects_case_insensitive_duplicates() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/catalog/colors", srv.base_url))
        .json(&json!({ "name": "Turquesa Oscuro" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .post(format!("{}/catalog/colors", srv.base_url))
        .json(&json!({ "name": "turquesa oscuro" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["error"], "duplicate");

    // Removes are idempotent.
    let res = client
        .delete(format!("{}/catalog/colors", srv.base_url))
        .json(&json!({ "name": "Turquesa Oscuro" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let res = client
        .delete(format!("{}/catalog/colors", srv.base_url))
        .json(&json!({ "name": "Turquesa Oscuro" }))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn catalog_is_seeded_at_startup() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/catalog", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let body: serde_json::Value = res.json().await.unwrap();
    assert_eq!(body["garments"].as_array().unwrap().len(), 13);
    assert_eq!(body["sizes"].as_array().unwrap().len(), 12);
    assert_eq!(body["colors"].as_array().unwrap().len(), 42);
}

#[tokio::test]
async fn stream_pushes_snapshot_events_for_commits() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    // Subscribe first; the feed carries full snapshots, not deltas.
    let mut stream = client
        .get(format!("{}/stream", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(stream.status(), StatusCode::OK);
    let content_type = stream.headers()["content-type"].to_str().unwrap();
    assert!(content_type.starts_with("text/event-stream"));

    client
        .post(format!("{}/movements", srv.base_url))
        .json(&movement("entry", 4, "Raul"))
        .send()
        .await
        .unwrap();

    let mut body = String::new();
    tokio::time::timeout(std::time::Duration::from_secs(5), async {
        while let Some(chunk) = stream.chunk().await.unwrap() {
            body.push_str(&String::from_utf8_lossy(&chunk));
            if body.contains("event: inventory") && body.contains("event: history") {
                break;
            }
        }
    })
    .await
    .expect("snapshot events did not arrive");

    // Both snapshots carry the committed movement.
    assert!(body.contains("polera_negro_m"));
    assert!(body.contains("\"quantity\":4"));
}

#[tokio::test]
async fn health_is_open() {
    let srv = TestServer::spawn().await;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", srv.base_url))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}
