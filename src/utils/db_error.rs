//! Helpers for classifying PostgreSQL constraint violations.

/// Name of the unique constraint guarding `links.slug`.
pub const SLUG_UNIQUE_CONSTRAINT: &str = "links_slug_key";

/// Returns true if `e` is a unique violation on the slug constraint.
///
/// Repositories translate this into [`crate::error::AppError::SlugConflict`].
pub fn is_unique_violation_on_slug(e: &sqlx::Error) -> bool {
    let Some(db_err) = e.as_database_error() else {
        return false;
    };

    if !db_err.is_unique_violation() {
        return false;
    }

    matches!(db_err.constraint(), Some(SLUG_UNIQUE_CONSTRAINT))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_non_database_errors_are_not_violations() {
        assert!(!is_unique_violation_on_slug(&sqlx::Error::RowNotFound));
        assert!(!is_unique_violation_on_slug(&sqlx::Error::PoolTimedOut));
    }
}
