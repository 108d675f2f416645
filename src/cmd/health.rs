//! `apirelay health` — check the health of a running instance.
//!
//! Sends a `GET` to the instance's health endpoint (`/health` on the
//! proxy, `/api/health` on the origin via `--path`) and displays the
//! response as formatted text or raw JSON.

use http_body_util::BodyExt;
use hyper_util::client::legacy::Client;
use hyper_util::rt::TokioExecutor;

use crate::cli::HealthArgs;
use crate::error::RelayError;

pub async fn execute(args: HealthArgs) -> Result<(), RelayError> {
    let url = format!(
        "{}/{}",
        args.url.trim_end_matches('/'),
        args.path.trim_start_matches('/')
    );
    let uri: hyper::Uri = url.parse().map_err(|e: hyper::http::uri::InvalidUri| {
        RelayError::UrlParse {
            source: Box::new(e),
        }
    })?;

    let connector = hyper_util::client::legacy::connect::HttpConnector::new();
    let client = Client::builder(TokioExecutor::new()).build(connector);

    let request = hyper::Request::builder()
        .uri(uri)
        .body(http_body_util::Full::new(bytes::Bytes::new()))
        .map_err(|e| RelayError::HttpRequest {
            source: Box::new(e),
        })?;

    let response = tokio::time::timeout(std::time::Duration::from_secs(10), client.request(request))
        .await
        .map_err(|_| RelayError::Timeout(10_000))?
        .map_err(|e| RelayError::HttpRequest {
            source: Box::new(e),
        })?;

    let status = response.status();
    let body = response
        .into_body()
        .collect()
        .await
        .map_err(|e| RelayError::HttpRequest {
            source: Box::new(e),
        })?
        .to_bytes();

    if !status.is_success() {
        return Err(RelayError::HealthCheckFailed(status));
    }

    if args.json {
        println!("{}", String::from_utf8_lossy(&body));
        return Ok(());
    }

    match serde_json::from_slice::<serde_json::Value>(&body) {
        Ok(health) => {
            println!("\u{2713} {} is healthy", args.url);
            print_field(&health, "status");
            print_field(&health, "uptime");
            print_field(&health, "port");
            print_field(&health, "timestamp");
            if let Some(stats) = health.get("stats") {
                print_field(stats, "requests_forwarded");
                print_field(stats, "requests_failed");
            }
        }
        Err(e) => {
            eprintln!("Failed to parse health response: {e}");
            println!("{}", String::from_utf8_lossy(&body));
        }
    }

    Ok(())
}

fn print_field(value: &serde_json::Value, key: &str) {
    if let Some(v) = value.get(key) {
        println!("  {key:<20}{v}");
    }
}
