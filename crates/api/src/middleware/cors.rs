//! CORS allowlist.
//!
//! Origins are compared verbatim, except that an entry may contain one `*`
//! standing for a non-empty run of characters without `/`, so
//! `https://*.expo.dev` admits `https://abc.expo.dev`.

use std::time::Duration;

use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{HeaderValue, Method};
use tower_http::cors::{AllowOrigin, CorsLayer};

/// Whether `origin` matches the allowlist entry `pattern`.
pub fn origin_matches(pattern: &str, origin: &str) -> bool {
    match pattern.split_once('*') {
        None => pattern == origin,
        Some((prefix, suffix)) => {
            origin.len() > prefix.len() + suffix.len()
                && origin.starts_with(prefix)
                && origin.ends_with(suffix)
                && !origin[prefix.len()..origin.len() - suffix.len()].contains('/')
        }
    }
}

/// Build the CORS middleware layer from the configured origin patterns.
///
/// Credentials are allowed, so every matching origin is echoed back rather
/// than answered with `*`.
pub fn build_cors_layer(origins: &[String]) -> CorsLayer {
    let patterns = origins.to_vec();

    CorsLayer::new()
        .allow_origin(AllowOrigin::predicate(
            move |origin: &HeaderValue, _request| {
                origin
                    .to_str()
                    .map(|o| patterns.iter().any(|p| origin_matches(p, o)))
                    .unwrap_or(false)
            },
        ))
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::DELETE,
            Method::PATCH,
        ])
        .allow_headers([CONTENT_TYPE, AUTHORIZATION])
        .allow_credentials(true)
        .max_age(Duration::from_secs(3600))
}
