//! Handler for short URL redirect.

use axum::{
    extract::{ConnectInfo, Path, State},
    http::{HeaderMap, StatusCode, header},
    response::{IntoResponse, Response},
};
use metrics::counter;
use std::net::SocketAddr;
use tokio::sync::mpsc::{Sender, error::TrySendError};
use tracing::{debug, error, warn};

use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::url_validator::to_absolute_url;

/// Redirects a slug to its long URL.
///
/// # Endpoint
///
/// `GET /{slug}`
///
/// # Request Flow
///
/// 1. Look up the link by slug
/// 2. Queue a visit event for the background worker
/// 3. Return 301 Moved Permanently
///
/// # Visit Recording
///
/// The redirect never waits for the visit write. When the queue is full the
/// event is handed to a spawned task that waits for room; only a closed
/// queue drops it.
///
/// # Errors
///
/// - Unknown slug: 301 to the configured not-found target, or 404 if none
/// - Any other failure: plain `500 Server error`
pub async fn redirect_handler(
    Path(slug): Path<String>,
    State(state): State<AppState>,
    headers: HeaderMap,
    ConnectInfo(addr): ConnectInfo<SocketAddr>,
) -> Response {
    let link = match state.link_service.lookup_by_slug(&slug).await {
        Ok(link) => link,
        Err(err @ AppError::NotFound { .. }) => {
            debug!(%slug, "Slug not found");
            return match state.not_found_redirect.as_deref() {
                Some(target) => moved_permanently(target),
                None => err.into_response(),
            };
        }
        Err(e) => {
            error!(%slug, error = %e, "Redirect lookup failed");
            return (StatusCode::INTERNAL_SERVER_ERROR, "Server error").into_response();
        }
    };

    let event = VisitEvent::new(
        link.id,
        slug,
        Some(addr.ip().to_string()),
        headers
            .get(header::USER_AGENT)
            .and_then(|v| v.to_str().ok()),
        headers.get(header::REFERER).and_then(|v| v.to_str().ok()),
    );
    enqueue_visit(&state.visit_sender, event);

    moved_permanently(&to_absolute_url(&link.long_url))
}

fn moved_permanently(location: &str) -> Response {
    (
        StatusCode::MOVED_PERMANENTLY,
        [(header::LOCATION, location.to_string())],
    )
        .into_response()
}

fn enqueue_visit(sender: &Sender<VisitEvent>, event: VisitEvent) {
    match sender.try_send(event) {
        Ok(()) => {}
        Err(TrySendError::Full(event)) => {
            counter!("visits_deferred_total").increment(1);
            let sender = sender.clone();
            tokio::spawn(async move {
                if let Err(e) = sender.send(event).await {
                    warn!(slug = %e.0.slug, "Visit queue closed, dropping visit");
                }
            });
        }
        Err(TrySendError::Closed(event)) => {
            warn!(slug = %event.slug, "Visit queue closed, dropping visit");
        }
    }
}
