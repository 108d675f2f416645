//! Integration tests for the origin service endpoints.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Instant;

use apirelay::origin::{self, OriginState};
use serde_json::{json, Value};

async fn start_origin() -> (SocketAddr, tokio::sync::oneshot::Sender<()>) {
    let state = Arc::new(OriginState {
        start_time: Instant::now(),
    });
    let router = origin::router(state, 1_048_576);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    let (shutdown_tx, shutdown_rx) = tokio::sync::oneshot::channel::<()>();

    tokio::spawn(async move {
        axum::serve(listener, router)
            .with_graceful_shutdown(async {
                let _ = shutdown_rx.await;
            })
            .await
            .unwrap();
    });

    (addr, shutdown_tx)
}

fn is_iso_timestamp(value: &Value) -> bool {
    value
        .as_str()
        .is_some_and(|s| chrono::DateTime::parse_from_rfc3339(s).is_ok())
}

#[tokio::test]
async fn health_returns_ok_with_uptime() {
    let (addr, shutdown) = start_origin().await;

    let resp = reqwest::get(format!("http://{addr}/api/health"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["status"], "ok");
    assert!(body["uptime"].as_f64().unwrap() >= 0.0);
    assert!(is_iso_timestamp(&body["timestamp"]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn get_data_returns_static_record() {
    let (addr, shutdown) = start_origin().await;

    let body: Value = reqwest::get(format!("http://{addr}/api/data"))
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["message"], "Hello from the origin service!");
    assert_eq!(body["data"]["id"], 1);
    assert_eq!(body["data"]["name"], "Example Data");
    assert!(is_iso_timestamp(&body["data"]["timestamp"]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn post_echoes_name_and_value() {
    let (addr, shutdown) = start_origin().await;

    let resp = reqwest::Client::new()
        .post(format!("http://{addr}/api/data"))
        .json(&json!({"name": "x", "value": 5}))
        .send()
        .await
        .unwrap();
    assert_eq!(resp.status(), 200);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["message"], "Data received successfully");
    assert_eq!(body["received"]["name"], "x");
    assert_eq!(body["received"]["value"], 5);
    assert!(is_iso_timestamp(&body["received"]["timestamp"]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn put_echoes_name_and_value() {
    let (addr, shutdown) = start_origin().await;

    let body: Value = reqwest::Client::new()
        .put(format!("http://{addr}/api/data"))
        .json(&json!({"name": "updated", "value": [1, 2, 3]}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert_eq!(body["received"]["name"], "updated");
    assert_eq!(body["received"]["value"], json!([1, 2, 3]));

    let _ = shutdown.send(());
}

#[tokio::test]
async fn post_drops_fields_other_than_name_and_value() {
    let (addr, shutdown) = start_origin().await;

    let body: Value = reqwest::Client::new()
        .post(format!("http://{addr}/api/data"))
        .json(&json!({"name": "x", "value": 5, "extra": "dropped"}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(body["received"].get("extra").is_none());

    let _ = shutdown.send(());
}

#[tokio::test]
async fn post_omits_absent_fields() {
    let (addr, shutdown) = start_origin().await;

    let body: Value = reqwest::Client::new()
        .post(format!("http://{addr}/api/data"))
        .json(&json!({"value": 5}))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    assert!(body["received"].get("name").is_none());
    assert_eq!(body["received"]["value"], 5);

    let _ = shutdown.send(());
}

#[tokio::test]
async fn unmapped_path_returns_404_with_path() {
    let (addr, shutdown) = start_origin().await;

    let resp = reqwest::get(format!("http://{addr}/api/nope"))
        .await
        .unwrap();
    assert_eq!(resp.status(), 404);

    let body: Value = resp.json().await.unwrap();
    assert_eq!(body["error"], "Not found");
    assert_eq!(body["path"], "/api/nope");

    let _ = shutdown.send(());
}
