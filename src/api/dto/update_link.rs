//! DTO for the link rename endpoint.

use serde::Deserialize;
use validator::Validate;

use crate::api::dto::slug::{SLUG_REGEX, validate_not_reserved};

/// Request body for `PUT /api/urls/{slug}`.
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLinkRequest {
    #[validate(length(min = 1, max = 64))]
    #[validate(regex(path = "*SLUG_REGEX", message = "Only letters, digits, '-' and '_' are allowed"))]
    #[validate(custom(function = "validate_not_reserved"))]
    pub new_slug: String,
}
