//! API route configuration.
//!
//! Mounted under `/api`. Callers are identified by the `X-Owner-Id` header
//! forwarded by the upstream authentication layer.

use crate::api::handlers::{
    analytics_handler, get_link_handler, list_links_handler, rename_link_handler,
    shorten_handler,
};
use crate::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

/// All API routes.
///
/// # Endpoints
///
/// - `POST /shorten`           - Resolve a long URL to a short link
/// - `GET  /urls`              - Links of the calling owner
/// - `GET  /urls/{slug}`       - A single link
/// - `PUT  /urls/{slug}`       - Rename a link's slug
/// - `GET  /analytics/{slug}`  - Visit analytics for a link
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .route("/shorten", post(shorten_handler))
        .route("/urls", get(list_links_handler))
        .route(
            "/urls/{slug}",
            get(get_link_handler).put(rename_link_handler),
        )
        .route("/analytics/{slug}", get(analytics_handler))
}
