use std::net::SocketAddr;

use axum::body::Bytes;
use axum::http::HeaderMap;
use serde::de::DeserializeOwned;

use crate::app_error::ApiError;

const HEADER_X_FORWARDED_FOR: &str = "x-forwarded-for";
const HEADER_X_REAL_IP: &str = "x-real-ip";

/// Extract the real client IP from the request.
///
/// Tried in order:
/// 1. `X-Forwarded-For`: standard proxy header, first IP wins
/// 2. `X-Real-IP`: common with nginx
/// 3. `SocketAddr`: remote address of the TCP connection
pub fn get_client_ip(headers: &HeaderMap, addr: Option<SocketAddr>) -> String {
    if let Some(xff) = headers.get(HEADER_X_FORWARDED_FOR) {
        if let Ok(xff_str) = xff.to_str() {
            let raw_ip = xff_str.split(',').next().unwrap_or(xff_str).trim();
            return clean_ip(raw_ip);
        }
    }

    if let Some(xri) = headers.get(HEADER_X_REAL_IP) {
        if let Ok(xri_str) = xri.to_str() {
            return clean_ip(xri_str.trim());
        }
    }

    if let Some(addr) = addr {
        return clean_ip(&addr.ip().to_string());
    }

    "unknown".to_string()
}

/// Strip the IPv4-mapped IPv6 prefix.
fn clean_ip(ip: &str) -> String {
    if let Some(ipv4) = ip.strip_prefix("::ffff:") {
        ipv4.to_string()
    } else {
        ip.to_string()
    }
}

/// Parse the raw request body as JSON.
///
/// Handlers take the body as `Bytes` so path-level checks (does the target
/// row exist?) can answer before the body is ever looked at; the 404 for a
/// missing row must win over the 400 for a missing body. An empty body gets
/// the caller's message; a malformed one gets the parser's, with the raw
/// body kept on the error so the access log line can carry it.
pub fn parse_body<T: DeserializeOwned>(bytes: &Bytes, missing_msg: &str) -> Result<T, ApiError> {
    if bytes.is_empty() {
        return Err(ApiError::validation(missing_msg));
    }

    serde_json::from_slice(bytes).map_err(|err| {
        ApiError::invalid_json(
            format!("invalid JSON body: {}", err),
            String::from_utf8_lossy(bytes),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;
    use serde::Deserialize;

    #[test]
    fn client_ip_prefers_forwarded_header() {
        let mut headers = HeaderMap::new();
        headers.insert(
            HEADER_X_FORWARDED_FOR,
            HeaderValue::from_static("203.0.113.9, 10.0.0.1"),
        );
        let addr: SocketAddr = "127.0.0.1:5000".parse().unwrap();

        assert_eq!(get_client_ip(&headers, Some(addr)), "203.0.113.9");
    }

    #[test]
    fn client_ip_unmaps_ipv6_prefix() {
        let headers = HeaderMap::new();
        let addr: SocketAddr = "[::ffff:192.0.2.4]:5000".parse().unwrap();

        assert_eq!(get_client_ip(&headers, Some(addr)), "192.0.2.4");
    }

    #[derive(Debug, Deserialize)]
    struct NameOnly {
        name: Option<String>,
    }

    #[test]
    fn empty_body_gets_the_caller_message() {
        let err =
            parse_body::<NameOnly>(&Bytes::new(), "you must send the person data").unwrap_err();
        assert!(err.to_string().contains("you must send the person data"));
    }

    #[test]
    fn malformed_body_reports_the_parser_error_and_keeps_the_body() {
        let err = parse_body::<NameOnly>(&Bytes::from_static(b"{not json"), "missing").unwrap_err();
        assert!(err.to_string().contains("invalid JSON body"));
        match err {
            ApiError::InvalidJson { body, .. } => assert_eq!(body, "{not json"),
            other => panic!("unexpected error: {}", other),
        }

        let parsed: NameOnly =
            parse_body(&Bytes::from_static(b"{\"name\": \"Luke\"}"), "missing").unwrap();
        assert_eq!(parsed.name.as_deref(), Some("Luke"));
    }
}
