//! Handler for link shortening endpoint.

use axum::{
    Json,
    extract::State,
    http::{HeaderMap, StatusCode},
};
use validator::Validate;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::shorten::ShortenRequest;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_owner::extract_owner_from_headers;

/// Resolves a long URL to a short link.
///
/// # Endpoint
///
/// `POST /api/shorten`
///
/// # Request Body
///
/// ```json
/// {
///   "longUrl": "https://example.com",
///   "customSlug": "my-link"
/// }
/// ```
///
/// `customSlug` is optional. The caller's owner id is read from `X-Owner-Id`;
/// an owner re-shortening the same URL gets their existing link back.
///
/// # Response
///
/// ```json
/// {
///   "id": 1,
///   "longUrl": "https://example.com",
///   "slug": "my-link",
///   "shortUrl": "http://localhost:3001/my-link",
///   "createdAt": "2025-01-01T00:00:00Z"
/// }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if validation fails.
/// Returns 409 Conflict with `invalid_url` or `slug_exhausted`.
pub async fn shorten_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
    Json(payload): Json<ShortenRequest>,
) -> Result<(StatusCode, Json<LinkResponse>), AppError> {
    payload.validate()?;

    let owner_id = extract_owner_from_headers(&headers);

    let link = state
        .link_service
        .create(payload.long_url, payload.custom_slug, owner_id)
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(LinkResponse::from_link(link, &state.base_url)),
    ))
}
