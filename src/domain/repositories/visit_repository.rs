//! Repository trait for the append-only visit log.

use crate::domain::entities::{Link, NewVisit, Visit};
use crate::error::AppError;
use async_trait::async_trait;

/// A link together with its complete visit history.
///
/// `visits` is ordered newest first.
#[derive(Debug, Clone)]
pub struct LinkWithVisits {
    pub link: Link,
    pub visits: Vec<Visit>,
}

/// Repository interface for recording and reading visits.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgVisitRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Appends a visit for an existing link.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the referenced link does not exist.
    /// Returns [`AppError::Internal`] on store errors.
    async fn append_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError>;

    /// Counts the visits recorded for a link; zero for an unknown id.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn count_visits(&self, link_id: i64) -> Result<i64, AppError>;

    /// Loads a link by slug with all of its visits, newest first.
    ///
    /// # Returns
    ///
    /// - `Ok(Some(LinkWithVisits))` if the link exists
    /// - `Ok(None)` if the slug is unknown
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn get_with_visits(&self, slug: &str) -> Result<Option<LinkWithVisits>, AppError>;
}
