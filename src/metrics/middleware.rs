use axum::{body::Body, extract::Request, middleware::Next, response::Response};
use std::time::Instant;

use crate::metrics::prometheus::{ACTIVE_REQUESTS, ERRORS_TOTAL, LATENCY, REQUESTS_TOTAL};

pub async fn metrics_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();

    ACTIVE_REQUESTS.inc();

    let response = next.run(req).await;

    let elapsed = start.elapsed().as_secs_f64();
    let status = response.status().as_u16();

    ACTIVE_REQUESTS.dec();
    REQUESTS_TOTAL.inc();
    if status >= 400 {
        ERRORS_TOTAL.inc();
    }

    LATENCY.observe(elapsed);

    response
}
