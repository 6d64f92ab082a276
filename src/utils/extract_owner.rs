//! Owner identity extraction from HTTP request headers.
//!
//! Authentication happens upstream; the gateway forwards the authenticated
//! user id in [`OWNER_HEADER`]. Requests without it are anonymous.

use axum::http::HeaderMap;

/// Header carrying the authenticated owner id.
pub const OWNER_HEADER: &str = "x-owner-id";

/// Extracts the owner id from request headers.
///
/// Returns `None` when the header is missing, not valid UTF-8, or blank.
/// Surrounding whitespace is trimmed.
pub fn extract_owner_from_headers(headers: &HeaderMap) -> Option<String> {
    headers
        .get(OWNER_HEADER)
        .and_then(|v| v.to_str().ok())
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}
