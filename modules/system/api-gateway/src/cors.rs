use std::time::Duration;

use axum::http::{HeaderName, HeaderValue, Method};
use tower_http::cors::{AllowHeaders, AllowOrigin, Any, CorsLayer};

use crate::config::{ApiGatewayConfig, CorsConfig};

/// Build the CORS layer. Entries that do not parse are skipped with a warning.
#[must_use]
pub fn build_cors_layer(cfg: &ApiGatewayConfig) -> CorsLayer {
    let cors = cfg.cors.clone().unwrap_or_default();

    CorsLayer::new()
        .allow_origin(allow_origin(&cors))
        .allow_methods(
            cors.allowed_methods
                .iter()
                .filter_map(|m| parse_or_warn("method", m, |v| Method::from_bytes(v.as_bytes()).ok()))
                .collect::<Vec<_>>(),
        )
        .allow_headers(allow_headers(&cors))
        .max_age(Duration::from_secs(cors.max_age_seconds))
}

fn allow_origin(cors: &CorsConfig) -> AllowOrigin {
    if cors.allowed_origins.iter().any(|o| o == "*") {
        return AllowOrigin::any();
    }
    AllowOrigin::list(
        cors.allowed_origins
            .iter()
            .filter_map(|o| parse_or_warn("origin", o, |v| HeaderValue::from_str(v).ok())),
    )
}

fn allow_headers(cors: &CorsConfig) -> AllowHeaders {
    if cors.allowed_headers.iter().any(|h| h == "*") {
        return AllowHeaders::from(Any);
    }
    AllowHeaders::list(
        cors.allowed_headers
            .iter()
            .filter_map(|h| parse_or_warn("header", h, |v| HeaderName::from_bytes(v.as_bytes()).ok())),
    )
}

fn parse_or_warn<T>(kind: &str, value: &str, parse: impl Fn(&str) -> Option<T>) -> Option<T> {
    let parsed = parse(value);
    if parsed.is_none() {
        tracing::warn!(kind, value, "Ignoring invalid CORS entry");
    }
    parsed
}
