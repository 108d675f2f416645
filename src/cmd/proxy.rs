//! `apirelay proxy` — run the forwarding proxy.
//!
//! Builds the shared [`ApiClient`] pointed at the origin service and
//! starts the Axum server with graceful shutdown.

use std::sync::Arc;
use std::time::Instant;

use crate::cli::ProxyArgs;
use crate::client::ApiClient;
use crate::error::RelayError;
use crate::proxy::{self, ProxyState, Stats};
use crate::{logging, server};

pub async fn execute(args: ProxyArgs) -> Result<(), RelayError> {
    logging::init(&args.log);

    let origin_url = url::Url::parse(&args.origin_url).map_err(|e| RelayError::UrlParse {
        source: Box::new(e),
    })?;

    tracing::info!(origin = %origin_url, timeout_ms = args.timeout, "relaying to origin");

    let state = Arc::new(ProxyState {
        client: ApiClient::new(origin_url, args.timeout),
        start_time: Instant::now(),
        port: args.port,
        stats: Stats::new(),
    });
    let router = proxy::router(state, args.max_body);

    server::serve(router, &args.host, args.port, "proxy").await
}
