//! Handlers for link lookup and rename endpoints.

use axum::{
    Json,
    extract::{Path, State},
    http::HeaderMap,
};
use serde_json::json;
use validator::Validate;

use crate::api::dto::link::LinkResponse;
use crate::api::dto::update_link::UpdateLinkRequest;
use crate::error::AppError;
use crate::state::AppState;
use crate::utils::extract_owner::{OWNER_HEADER, extract_owner_from_headers};

/// Lists the caller's links, newest first, each with its `visitCount`.
///
/// # Endpoint
///
/// `GET /api/urls`
///
/// # Errors
///
/// Returns 401 Unauthorized if `X-Owner-Id` is missing.
pub async fn list_links_handler(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Json<Vec<LinkResponse>>, AppError> {
    let owner_id = extract_owner_from_headers(&headers).ok_or_else(|| {
        AppError::unauthorized("Owner identity required", json!({ "header": OWNER_HEADER }))
    })?;

    let links = state.link_service.list_by_owner(&owner_id).await?;

    Ok(Json(
        links
            .into_iter()
            .map(|link| LinkResponse::from_counted(link, &state.base_url))
            .collect(),
    ))
}

/// Returns a single link by slug, with its `visitCount`.
///
/// # Endpoint
///
/// `GET /api/urls/{slug}`
///
/// # Errors
///
/// Returns 404 Not Found if the slug is unknown.
pub async fn get_link_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<LinkResponse>, AppError> {
    let link = state.link_service.describe(&slug).await?;

    Ok(Json(LinkResponse::from_counted(link, &state.base_url)))
}

/// Moves a link to a new slug.
///
/// # Endpoint
///
/// `PUT /api/urls/{slug}`
///
/// # Request Body
///
/// ```json
/// { "newSlug": "better-name" }
/// ```
///
/// # Errors
///
/// Returns 400 Bad Request if `newSlug` is malformed or reserved.
/// Returns 404 Not Found if the slug is unknown.
/// Returns 409 Conflict if `newSlug` is already in use.
pub async fn rename_link_handler(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Json(payload): Json<UpdateLinkRequest>,
) -> Result<Json<LinkResponse>, AppError> {
    payload.validate()?;

    let link = state.link_service.rename(&slug, &payload.new_slug).await?;

    Ok(Json(LinkResponse::from_link(link, &state.base_url)))
}
