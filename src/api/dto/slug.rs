//! Validation rules shared by DTOs that accept a slug.

use regex::Regex;
use std::sync::LazyLock;
use validator::ValidationError;

/// Characters accepted in a caller-chosen slug.
pub static SLUG_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z0-9_-]+$").expect("slug regex is valid"));

/// First path segments owned by other routes.
pub const RESERVED_SLUGS: &[&str] = &["api", "health"];

/// Rejects slugs that would shadow another route.
pub fn validate_not_reserved(slug: &str) -> Result<(), ValidationError> {
    if RESERVED_SLUGS
        .iter()
        .any(|reserved| reserved.eq_ignore_ascii_case(slug))
    {
        let mut err = ValidationError::new("reserved_slug");
        err.message = Some(format!("'{slug}' is reserved").into());
        return Err(err);
    }
    Ok(())
}
