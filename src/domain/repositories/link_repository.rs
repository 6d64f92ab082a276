//! Repository trait for short link data access.

use crate::domain::entities::{Link, LinkWithVisitCount, NewLink};
use crate::error::AppError;
use async_trait::async_trait;

/// Repository interface for managing short links.
///
/// The store is the single source of truth for the slug namespace and must
/// enforce slug uniqueness itself; callers never assume in-memory
/// exclusivity.
///
/// # Implementations
///
/// - [`crate::infrastructure::persistence::PgLinkRepository`] - PostgreSQL implementation
/// - [`crate::infrastructure::persistence::MemoryStore`] - In-process implementation
/// - Test mocks available with `cfg(test)`
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LinkRepository: Send + Sync {
    /// Finds a link by its exact slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError>;

    /// Finds a link created by `owner_id` for exactly `long_url`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn find_by_long_url_and_owner(
        &self,
        long_url: &str,
        owner_id: &str,
    ) -> Result<Option<Link>, AppError>;

    /// Inserts a new link. `created_at` is assigned by the store.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugConflict`] if the slug is already bound.
    /// Returns [`AppError::Internal`] on store errors.
    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError>;

    /// Renames the link currently bound to `current_slug`.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses `current_slug`.
    /// Returns [`AppError::SlugConflict`] if `new_slug` is bound to another link.
    /// Returns [`AppError::Internal`] on store errors.
    async fn update_slug(&self, current_slug: &str, new_slug: &str) -> Result<Link, AppError>;

    /// Lists all links of an owner, newest first, each with its visit count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<LinkWithVisitCount>, AppError>;

    /// Checks that the store is reachable.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store cannot be queried.
    async fn ping(&self) -> Result<(), AppError>;
}
