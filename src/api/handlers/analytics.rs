//! Handler for link analytics.

use axum::{
    Json,
    extract::{Path, State},
};

use crate::api::dto::analytics::AnalyticsResponse;
use crate::error::AppError;
use crate::state::AppState;

/// Summarizes the visit history of a link.
///
/// # Endpoint
///
/// `GET /api/analytics/{slug}`
///
/// # Response
///
/// ```json
/// {
///   "url": { "id": 1, "slug": "abc123", "shortUrl": "...", "...": "..." },
///   "analytics": {
///     "totalVisits": 3,
///     "lastDayVisits": 1,
///     "browsers": { "Chrome": 2, "Unknown": 1 },
///     "recentVisits": [{ "visitedAt": "...", "ipAddress": "203.0.113.7" }]
///   }
/// }
/// ```
///
/// # Errors
///
/// Returns 404 Not Found if the slug is unknown.
pub async fn analytics_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<AnalyticsResponse>, AppError> {
    let report = state.analytics_service.summarize(&slug).await?;

    Ok(Json(AnalyticsResponse::from_report(report, &state.base_url)))
}
