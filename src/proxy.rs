//! Forwarding proxy routes, handlers, and shared state.
//!
//! Every `/api/proxy/*` endpoint maps one-to-one onto an origin
//! endpoint: inbound headers are forwarded (hop-by-hop stripped, Host
//! rewritten), POST/PUT bodies are reduced to their `name`/`value`
//! fields, and the origin's JSON response is wrapped in an envelope
//! with a message and a fresh timestamp. Any failure to reach the
//! origin — transport error, timeout, or non-2xx status — collapses
//! into a single 500 response.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::http::{HeaderMap, HeaderValue, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::client::ApiClient;
use crate::error::RelayError;
use crate::headers;
use crate::server::{self, iso_timestamp};

/// Wire name for the origin in the 500 error body. Part of the
/// public contract; clients match on it.
const ORIGIN_CALL_FAILED: &str = "Failed to call express-server";

pub struct ProxyState {
    pub client: ApiClient,
    pub start_time: Instant,
    pub port: u16,
    pub stats: Stats,
}

#[derive(Debug)]
pub struct Stats {
    pub forwarded: AtomicU64,
    pub failed: AtomicU64,
}

impl Default for Stats {
    fn default() -> Self {
        Self::new()
    }
}

impl Stats {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            forwarded: AtomicU64::new(0),
            failed: AtomicU64::new(0),
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProxyHealth {
    pub status: String,
    pub message: String,
    pub timestamp: String,
    pub port: u16,
    pub uptime: f64,
    pub stats: StatsSnapshot,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct StatsSnapshot {
    pub requests_forwarded: u64,
    pub requests_failed: u64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
}

/// Which key the origin's response is nested under in the envelope:
/// `data` for reads, `response` for writes.
#[derive(Clone, Copy)]
enum EnvelopeKey {
    Data,
    Response,
}

/// The two fields forwarded from inbound POST/PUT bodies. Everything
/// else the caller sent is dropped; absent fields stay absent.
#[derive(Debug, Serialize, Deserialize)]
pub struct DataPayload {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
}

impl DataPayload {
    #[must_use]
    pub fn from_body(body: &Value) -> Self {
        Self {
            name: body.get("name").cloned(),
            value: body.get("value").cloned(),
        }
    }
}

pub fn router(state: Arc<ProxyState>, max_body: usize) -> Router {
    Router::new()
        .route("/health", get(local_health))
        .route("/api/proxy/health", get(proxy_health))
        .route(
            "/api/proxy/data",
            get(proxy_get_data).post(proxy_post_data).put(proxy_put_data),
        )
        .fallback(server::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body)),
        )
        .with_state(state)
}

async fn local_health(State(state): State<Arc<ProxyState>>) -> Json<ProxyHealth> {
    Json(ProxyHealth {
        status: "ok".to_string(),
        message: "Forwarding proxy is running".to_string(),
        timestamp: iso_timestamp(),
        port: state.port,
        uptime: state.start_time.elapsed().as_secs_f64(),
        stats: StatsSnapshot {
            requests_forwarded: state.stats.forwarded.load(Ordering::Relaxed),
            requests_failed: state.stats.failed.load(Ordering::Relaxed),
        },
    })
}

async fn proxy_health(State(state): State<Arc<ProxyState>>, inbound: HeaderMap) -> Response {
    let correlation_id = headers::correlation_id(&inbound);
    let forwarded = headers::forward_headers(&inbound, state.client.base_url(), &correlation_id);

    tracing::info!(correlation_id = %correlation_id, origin_path = "/api/health", "forwarding request");
    let result: Result<Value, RelayError> =
        state.client.get("/api/health", Some(&forwarded)).await;

    respond(
        &state,
        &correlation_id,
        EnvelopeKey::Data,
        "Health check relayed from the origin service",
        result,
    )
}

async fn proxy_get_data(State(state): State<Arc<ProxyState>>, inbound: HeaderMap) -> Response {
    let correlation_id = headers::correlation_id(&inbound);
    let forwarded = headers::forward_headers(&inbound, state.client.base_url(), &correlation_id);

    tracing::info!(correlation_id = %correlation_id, origin_path = "/api/data", "forwarding request");
    let result: Result<Value, RelayError> = state.client.get("/api/data", Some(&forwarded)).await;

    respond(
        &state,
        &correlation_id,
        EnvelopeKey::Data,
        "Data relayed from the origin service",
        result,
    )
}

async fn proxy_post_data(
    State(state): State<Arc<ProxyState>>,
    inbound: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let correlation_id = headers::correlation_id(&inbound);
    let forwarded = headers::forward_headers(&inbound, state.client.base_url(), &correlation_id);
    let payload = DataPayload::from_body(&body);

    tracing::info!(correlation_id = %correlation_id, origin_path = "/api/data", "forwarding request");
    let result: Result<Value, RelayError> = state
        .client
        .post("/api/data", Some(&payload), Some(&forwarded))
        .await;

    respond(
        &state,
        &correlation_id,
        EnvelopeKey::Response,
        "Data posted to the origin service",
        result,
    )
}

async fn proxy_put_data(
    State(state): State<Arc<ProxyState>>,
    inbound: HeaderMap,
    Json(body): Json<Value>,
) -> Response {
    let correlation_id = headers::correlation_id(&inbound);
    let forwarded = headers::forward_headers(&inbound, state.client.base_url(), &correlation_id);
    let payload = DataPayload::from_body(&body);

    tracing::info!(correlation_id = %correlation_id, origin_path = "/api/data", "forwarding request");
    let result: Result<Value, RelayError> = state
        .client
        .put("/api/data", Some(&payload), Some(&forwarded))
        .await;

    respond(
        &state,
        &correlation_id,
        EnvelopeKey::Response,
        "Data updated in the origin service",
        result,
    )
}

fn respond(
    state: &ProxyState,
    correlation_id: &str,
    key: EnvelopeKey,
    message: &str,
    result: Result<Value, RelayError>,
) -> Response {
    match result {
        Ok(value) => {
            state.stats.forwarded.fetch_add(1, Ordering::Relaxed);
            let envelope = match key {
                EnvelopeKey::Data => serde_json::json!({
                    "message": message,
                    "data": value,
                    "timestamp": iso_timestamp(),
                }),
                EnvelopeKey::Response => serde_json::json!({
                    "message": message,
                    "response": value,
                    "timestamp": iso_timestamp(),
                }),
            };
            let mut response = (StatusCode::OK, Json(envelope)).into_response();
            if let Ok(val) = HeaderValue::from_str(correlation_id) {
                response.headers_mut().insert("x-correlation-id", val);
            }
            response
        }
        Err(e) => {
            tracing::error!(correlation_id = %correlation_id, error = %e, "origin call failed");
            state.stats.failed.fetch_add(1, Ordering::Relaxed);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorBody {
                    error: ORIGIN_CALL_FAILED.to_string(),
                    message: e.to_string(),
                }),
            )
                .into_response()
        }
    }
}
