//! `apirelay origin` — run the origin service.

use std::sync::Arc;
use std::time::Instant;

use crate::cli::OriginArgs;
use crate::error::RelayError;
use crate::origin::{self, OriginState};
use crate::{logging, server};

pub async fn execute(args: OriginArgs) -> Result<(), RelayError> {
    logging::init(&args.log);

    let state = Arc::new(OriginState {
        start_time: Instant::now(),
    });
    let router = origin::router(state, args.max_body);

    server::serve(router, &args.host, args.port, "origin").await
}
