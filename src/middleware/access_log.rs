use axum::{body::Body, extract::ConnectInfo, http::Request, middleware::Next, response::Response};
use chrono::Local;
use std::net::SocketAddr;
use std::time::Instant;
use tracing::{error, info};

use crate::handlers::utils::get_client_ip;
use crate::models::AccessLogMeta;

/// Access log middleware.
///
/// Writes one line per request in the style of the Nginx combined log
/// format, with the latency and the handler's error message appended.
/// Error lines also record the request body when the handler kept one.
pub async fn access_log_middleware(req: Request<Body>, next: Next) -> Response {
    let start = Instant::now();

    let method = req.method().clone();
    let uri = req.uri().clone();
    let version = req.version();
    let headers = req.headers().clone();

    let addr = req
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ci| ci.0);
    let client_ip = get_client_ip(&headers, addr);

    let user_agent = headers
        .get("user-agent")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    let response = next.run(req).await;

    let latency = start.elapsed();
    let status = response.status();

    // Content-Length is not always present
    let body_bytes = response
        .headers()
        .get("content-length")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("-");

    // Error detail and offending body injected by the error type via
    // response extensions
    let (error_msg, request_body) = match response.extensions().get::<AccessLogMeta>() {
        Some(meta) => (
            meta.error.clone().unwrap_or_else(|| "-".to_string()),
            meta.request_body.clone(),
        ),
        None => ("-".to_string(), None),
    };

    // Format: IP - - [Time] "Method URI Version" Status Bytes "Referer" "UserAgent" Latency "Error"
    let time_str = Local::now().format("%d/%b/%Y:%H:%M:%S %z");

    let mut log_line = format!(
        "{} - - [{}] \"{} {} {:?}\" {} {} \"-\" \"{}\" {:.3}s {:?}",
        client_ip,
        time_str,
        method,
        uri,
        version,
        status.as_u16(),
        body_bytes,
        user_agent,
        latency.as_secs_f64(),
        error_msg
    );

    if status.is_server_error() || status.is_client_error() {
        // Only error lines carry the request body
        if let Some(body) = request_body {
            log_line.push_str(&format!(" {:?}", body));
        } else {
            log_line.push_str(" \"-\"");
        }
        error!(target: "access_log", "{}", log_line);
    } else {
        info!(target: "access_log", "{}", log_line);
    }

    response
}
