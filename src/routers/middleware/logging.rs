use std::{
    net::{IpAddr, SocketAddr},
    sync::Arc,
};

use axum::{
    body::Body,
    extract::{ConnectInfo, State},
    http::{HeaderMap, HeaderValue, Request, Response},
    middleware::Next,
};
use chrono::Utc;
use tokio::time::Instant;
use tracing::{Level, warn};

use crate::{
    build_info::{AXUM_VERSION, BUILD_TIME, RUST_VERSION},
    init::state::ServerState,
    util::time::duration_formatter::format_duration,
};

const ERROR_HEADERS: [&str; 5] = [
    "x-error-log-level",
    "x-error-status-code",
    "x-error-code",
    "x-error-message",
    "x-error-detail",
];

// by default, debug and below not logged at all; hence why
macro_rules! log_codeerror {
    ($level:expr, $kind:expr, response.method = $method:expr, response.path = $path:expr, response.client_ip = $client_ip:expr, response.status_code = $status_code:expr, response.duration = $duration:expr, response.error_code = $error_code:expr, response.message = $message:expr, response.detail = $detail:expr) => {
        match $level {
            Level::ERROR => tracing::error!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::WARN => tracing::warn!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::INFO => tracing::info!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::DEBUG => tracing::debug!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
            Level::TRACE => tracing::trace!(kind = %$kind, method = %$method, path = %$path, client_ip = ?$client_ip, status_code = %$status_code, duration = %$duration, error_code = %$error_code, message = %$message, detail = %$detail),
        }
    };
}

fn client_ip(headers: &HeaderMap, peer: SocketAddr) -> Option<IpAddr> {
    let Some(forwarded) = headers
        .get("x-forwarded-for")
        .and_then(|value| value.to_str().ok())
    else {
        return Some(peer.ip());
    };

    // left-most entry is the original client
    let first = forwarded.split(',').next().unwrap_or_default().trim();
    match first.parse() {
        Ok(ip) => Some(ip),
        Err(e) => {
            warn!(error = ?e, forwarded, "Could not parse x-forwarded-for into IpAddr");
            None
        }
    }
}

pub async fn log_middleware(
    State(state): State<Arc<ServerState>>,
    ConnectInfo(info): ConnectInfo<SocketAddr>,
    mut request: Request<Body>,
    next: Next,
) -> Response<Body> {
    let start = Instant::now();
    let now = Utc::now(); // earliest possible timestamp of server-received request

    state.add_responses_handled();

    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let client_ip = client_ip(request.headers(), info);

    tracing::info!(kind = %"RECV", method = %method, path = %path, client_ip = ?client_ip);
    request.extensions_mut().insert(now);

    let mut response = next.run(request).await;
    let duration = format_duration(start.elapsed());
    let status = response.status();
    let headers = response.headers_mut();

    if let Some(log_level) = header_value_to_str(headers.get("x-error-log-level")) {
        let status_code = header_value_to_str(headers.get("x-error-status-code")).unwrap_or("");
        let error_code = header_value_to_str(headers.get("x-error-code")).unwrap_or("");
        let message = header_value_to_str(headers.get("x-error-message")).unwrap_or("");
        let detail = header_value_to_str(headers.get("x-error-detail")).unwrap_or("");

        log_codeerror!(
            log_level.parse::<Level>().unwrap_or(Level::ERROR),
            "ERSP",
            response.method = method,
            response.path = path,
            response.client_ip = client_ip,
            response.status_code = status_code,
            response.duration = duration,
            response.error_code = error_code,
            response.message = message,
            response.detail = detail
        );

        for header in ERROR_HEADERS {
            headers.remove(header);
        }
    } else {
        tracing::info!(kind = %"RESP", method = %method, path = %path, client_ip = ?client_ip, status = %status.as_u16(), duration = %duration);
    }

    headers.insert("x-server-built-time", HeaderValue::from_static(BUILD_TIME));
    headers.insert("x-server-name", HeaderValue::from_static(AXUM_VERSION));
    headers.insert(
        "x-server-rust-version",
        HeaderValue::from_static(RUST_VERSION),
    );

    response
}

fn header_value_to_str(value: Option<&HeaderValue>) -> Option<&str> {
    value.and_then(|v| v.to_str().ok())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_ip_prefers_forwarded_header() {
        let peer: SocketAddr = "10.0.0.1:4000".parse().unwrap();
        let mut headers = HeaderMap::new();
        assert_eq!(client_ip(&headers, peer), Some(peer.ip()));

        headers.insert(
            "x-forwarded-for",
            HeaderValue::from_static("203.0.113.7, 10.0.0.1"),
        );
        assert_eq!(
            client_ip(&headers, peer),
            Some("203.0.113.7".parse().unwrap())
        );

        headers.insert("x-forwarded-for", HeaderValue::from_static("garbage"));
        assert_eq!(client_ip(&headers, peer), None);
    }
}
