//! Origin service routes and handlers.
//!
//! A small stateless REST API: a health endpoint, a static data
//! record, and POST/PUT echo endpoints that return exactly the
//! `name` and `value` fields they received plus a fresh timestamp.
//! Nothing is validated or persisted.

use std::sync::Arc;
use std::time::Instant;

use axum::extract::State;
use axum::routing::get;
use axum::{Json, Router};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tower::ServiceBuilder;
use tower_http::limit::RequestBodyLimitLayer;
use tower_http::trace::TraceLayer;

use crate::server::{self, iso_timestamp};

pub struct OriginState {
    pub start_time: Instant,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct OriginHealth {
    pub status: String,
    pub timestamp: String,
    /// Seconds since the process started. Fractional, never negative.
    pub uptime: f64,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DataRecord {
    pub id: u32,
    pub name: String,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DataEnvelope {
    pub message: String,
    pub data: DataRecord,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct Received {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<Value>,
    pub timestamp: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct EchoResponse {
    pub message: String,
    pub received: Received,
}

pub fn router(state: Arc<OriginState>, max_body: usize) -> Router {
    Router::new()
        .route("/api/health", get(health))
        .route("/api/data", get(get_data).post(post_data).put(put_data))
        .fallback(server::not_found)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(RequestBodyLimitLayer::new(max_body)),
        )
        .with_state(state)
}

async fn health(State(state): State<Arc<OriginState>>) -> Json<OriginHealth> {
    Json(OriginHealth {
        status: "ok".to_string(),
        timestamp: iso_timestamp(),
        uptime: state.start_time.elapsed().as_secs_f64(),
    })
}

async fn get_data() -> Json<DataEnvelope> {
    Json(DataEnvelope {
        message: "Hello from the origin service!".to_string(),
        data: DataRecord {
            id: 1,
            name: "Example Data".to_string(),
            timestamp: iso_timestamp(),
        },
    })
}

async fn post_data(Json(body): Json<Value>) -> Json<EchoResponse> {
    Json(echo(&body))
}

async fn put_data(Json(body): Json<Value>) -> Json<EchoResponse> {
    tracing::debug!(body = %body, "data update received");
    Json(echo(&body))
}

/// Echo back only the `name` and `value` fields; absent fields are
/// omitted from the response rather than serialized as null.
fn echo(body: &Value) -> EchoResponse {
    EchoResponse {
        message: "Data received successfully".to_string(),
        received: Received {
            name: body.get("name").cloned(),
            value: body.get("value").cloned(),
            timestamp: iso_timestamp(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn echo_keeps_only_name_and_value() {
        let body = serde_json::json!({"name": "x", "value": 5, "extra": true});
        let echoed = echo(&body);
        let json = serde_json::to_value(&echoed).unwrap();

        assert_eq!(json["received"]["name"], "x");
        assert_eq!(json["received"]["value"], 5);
        assert!(json["received"].get("extra").is_none());
    }

    #[test]
    fn echo_omits_absent_fields() {
        let body = serde_json::json!({"value": 5});
        let json = serde_json::to_value(echo(&body)).unwrap();

        assert!(json["received"].get("name").is_none());
        assert_eq!(json["received"]["value"], 5);
    }

    #[test]
    fn echo_preserves_explicit_null() {
        let body = serde_json::json!({"name": null, "value": 5});
        let json = serde_json::to_value(echo(&body)).unwrap();

        assert_eq!(json["received"]["name"], Value::Null);
    }
}
