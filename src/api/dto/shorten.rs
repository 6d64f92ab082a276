//! DTO for the link shortening endpoint.

use serde::Deserialize;
use validator::Validate;

use crate::api::dto::slug::{SLUG_REGEX, validate_not_reserved};

/// Request body for `POST /api/shorten`.
///
/// `longUrl` (format and length) is checked by the resolution engine rather
/// than here, so any rejected URL answers `409 invalid_url`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct ShortenRequest {
    pub long_url: String,

    /// Preferred slug. Ignored in favour of a random one if already bound to
    /// a different URL.
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*SLUG_REGEX", message = "Only letters, digits, '-' and '_' are allowed"))]
    #[validate(custom(function = "validate_not_reserved"))]
    pub custom_slug: Option<String>,
}
