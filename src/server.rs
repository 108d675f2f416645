//! Axum serving plumbing shared by both services.
//!
//! Contains [`serve`] (bind + graceful serve loop), the shared 404
//! fallback returning the `{error, path}` JSON shape, the RFC 3339
//! timestamp helper used in every response body, and
//! [`shutdown_signal`] for SIGTERM / Ctrl+C handling.

use std::net::SocketAddr;

use axum::http::{StatusCode, Uri};
use axum::Json;
use axum::Router;
use serde::{Deserialize, Serialize};

use crate::error::RelayError;

/// Current UTC time as RFC 3339 with millisecond precision and `Z`
/// suffix (the JavaScript `Date#toISOString` shape).
#[must_use]
pub fn iso_timestamp() -> String {
    chrono::Utc::now()
        .to_rfc3339_opts(chrono::SecondsFormat::Millis, true)
}

#[derive(Debug, Serialize, Deserialize)]
pub struct NotFoundBody {
    pub error: String,
    pub path: String,
}

/// Fallback for unmapped routes on either service.
pub async fn not_found(uri: Uri) -> (StatusCode, Json<NotFoundBody>) {
    (
        StatusCode::NOT_FOUND,
        Json(NotFoundBody {
            error: "Not found".to_string(),
            path: uri.path().to_string(),
        }),
    )
}

pub async fn serve(
    router: Router,
    host: &str,
    port: u16,
    service: &'static str,
) -> Result<(), RelayError> {
    let addr: SocketAddr = format!("{host}:{port}").parse()?;
    let listener = tokio::net::TcpListener::bind(addr).await?;

    tracing::info!(service, addr = %addr, "server started");

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!(service, "server stopped");
    Ok(())
}

pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("received Ctrl+C"),
        () = terminate => tracing::info!("received SIGTERM"),
    }
}
