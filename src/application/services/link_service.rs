//! Slug resolution and collision management.

use std::sync::Arc;

use metrics::counter;
use serde_json::json;
use tracing::{debug, info, warn};

use crate::domain::entities::{Link, LinkWithVisitCount, NewLink, NewVisit, Visit};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::error::AppError;
use crate::utils::slug_generator::{DEFAULT_SLUG_LENGTH, generate_slug};
use crate::utils::url_validator::is_valid_url;

/// Number of random slugs tried before giving up with [`AppError::SlugExhausted`].
pub const MAX_SLUG_ATTEMPTS: usize = 5;

/// Service deciding which slug a creation request resolves to.
///
/// Every collision check is a round-trip to the store; the store's unique
/// constraint on `slug` is the final arbiter, and an insert that loses a
/// race is treated as one more collision rather than a failure.
pub struct LinkService<L, V>
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    link_repository: Arc<L>,
    visit_repository: Arc<V>,
    slug_length: usize,
}

impl<L, V> LinkService<L, V>
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    /// Creates a new link service generating slugs of [`DEFAULT_SLUG_LENGTH`].
    pub fn new(link_repository: Arc<L>, visit_repository: Arc<V>) -> Self {
        Self {
            link_repository,
            visit_repository,
            slug_length: DEFAULT_SLUG_LENGTH,
        }
    }

    /// Overrides the length of generated slugs.
    pub fn with_slug_length(mut self, slug_length: usize) -> Self {
        self.slug_length = slug_length;
        self
    }

    /// Resolves a creation request to a link, creating one when needed.
    ///
    /// # Resolution order
    ///
    /// 1. `long_url` must pass [`is_valid_url`]
    /// 2. With an owner, an existing link for the same `(long_url, owner)` is
    ///    returned unchanged
    /// 3. With a custom slug:
    ///    - unused: the custom slug is inserted as-is
    ///    - bound to the same `long_url`: that link is returned unchanged
    ///    - bound to a different `long_url`: the custom slug is discarded and a
    ///      random slug is generated instead
    /// 4. Random slugs are tried up to [`MAX_SLUG_ATTEMPTS`] times
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidUrl`] if `long_url` is rejected.
    /// Returns [`AppError::SlugExhausted`] if every random slug collided.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn create(
        &self,
        long_url: String,
        custom_slug: Option<String>,
        owner_id: Option<String>,
    ) -> Result<Link, AppError> {
        if !is_valid_url(&long_url) {
            return Err(AppError::InvalidUrl { url: long_url });
        }

        if let Some(owner) = owner_id.as_deref()
            && let Some(existing) = self
                .link_repository
                .find_by_long_url_and_owner(&long_url, owner)
                .await?
        {
            debug!(slug = %existing.slug, owner, "Returning existing link for owner");
            return Ok(existing);
        }

        if let Some(custom) = custom_slug {
            match self.link_repository.find_by_slug(&custom).await? {
                Some(existing) if existing.long_url == long_url => {
                    debug!(slug = %custom, "Custom slug already bound to the same URL");
                    return Ok(existing);
                }
                Some(_) => {
                    counter!("slug_collisions_total").increment(1);
                    info!(slug = %custom, "Custom slug taken, falling back to a random slug");
                }
                None => {
                    if let Some(link) = self
                        .insert_custom_slug(&long_url, &custom, owner_id.clone())
                        .await?
                    {
                        return Ok(link);
                    }
                }
            }
        }

        self.insert_with_random_slug(long_url, owner_id).await
    }

    /// Retrieves a link by its exact slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses the slug.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn lookup_by_slug(&self, slug: &str) -> Result<Link, AppError> {
        self.link_repository
            .find_by_slug(slug)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "slug": slug })))
    }

    /// Retrieves a link by slug together with its visit count.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses the slug.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn describe(&self, slug: &str) -> Result<LinkWithVisitCount, AppError> {
        let link = self.lookup_by_slug(slug).await?;
        let visit_count = self.visit_repository.count_visits(link.id).await?;

        Ok(LinkWithVisitCount { link, visit_count })
    }

    /// Moves a link from `current_slug` to `new_slug`.
    ///
    /// Renaming a slug to itself is a no-op rename that still goes through the
    /// store (and so still reports a missing link).
    ///
    /// # Errors
    ///
    /// Returns [`AppError::SlugConflict`] if `new_slug` is already in use.
    /// Returns [`AppError::NotFound`] if `current_slug` does not exist.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn rename(&self, current_slug: &str, new_slug: &str) -> Result<Link, AppError> {
        if new_slug != current_slug
            && self.link_repository.find_by_slug(new_slug).await?.is_some()
        {
            return Err(AppError::SlugConflict {
                slug: new_slug.to_string(),
            });
        }

        let link = self
            .link_repository
            .update_slug(current_slug, new_slug)
            .await?;

        info!(from = current_slug, to = %link.slug, "Link renamed");
        Ok(link)
    }

    /// Appends one visit for a link.
    ///
    /// No deduplication: every call produces a new visit.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if the link does not exist.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn record_visit(
        &self,
        link_id: i64,
        ip_address: Option<String>,
        user_agent: Option<String>,
        referrer: Option<String>,
    ) -> Result<Visit, AppError> {
        self.visit_repository
            .append_visit(NewVisit {
                link_id,
                ip_address,
                user_agent,
                referrer,
            })
            .await
    }

    /// Lists the links created by an owner, newest first, with visit counts.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn list_by_owner(
        &self,
        owner_id: &str,
    ) -> Result<Vec<LinkWithVisitCount>, AppError> {
        self.link_repository.list_by_owner(owner_id).await
    }

    /// Checks that the underlying store answers.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Internal`] if the store is unreachable.
    pub async fn ping(&self) -> Result<(), AppError> {
        self.link_repository.ping().await
    }

    /// Inserts a custom slug that looked free.
    ///
    /// Returns `Ok(None)` when a concurrent writer claimed the slug for a
    /// different URL in the meantime.
    async fn insert_custom_slug(
        &self,
        long_url: &str,
        slug: &str,
        owner_id: Option<String>,
    ) -> Result<Option<Link>, AppError> {
        let new_link = NewLink {
            long_url: long_url.to_string(),
            slug: slug.to_string(),
            owner_id,
        };

        match self.link_repository.insert(new_link).await {
            Ok(link) => Ok(Some(link)),
            Err(AppError::SlugConflict { .. }) => {
                counter!("slug_collisions_total").increment(1);
                match self.link_repository.find_by_slug(slug).await? {
                    Some(existing) if existing.long_url == long_url => Ok(Some(existing)),
                    _ => {
                        info!(slug, "Custom slug claimed concurrently, falling back");
                        Ok(None)
                    }
                }
            }
            Err(e) => Err(e),
        }
    }

    /// Generates random slugs until one can be inserted.
    ///
    /// Each attempt checks the store first, so exhausting the budget on
    /// pre-checks performs no insert at all. An insert rejected by the unique
    /// constraint counts as a collision; the first one grants a single extra
    /// attempt.
    async fn insert_with_random_slug(
        &self,
        long_url: String,
        owner_id: Option<String>,
    ) -> Result<Link, AppError> {
        let mut budget = MAX_SLUG_ATTEMPTS;
        let mut race_retry_granted = false;
        let mut attempts = 0;

        while attempts < budget {
            attempts += 1;
            let slug = generate_slug(self.slug_length);

            if self.link_repository.find_by_slug(&slug).await?.is_some() {
                counter!("slug_collisions_total").increment(1);
                debug!(%slug, attempts, "Generated slug already taken");
                continue;
            }

            let new_link = NewLink {
                long_url: long_url.clone(),
                slug,
                owner_id: owner_id.clone(),
            };

            match self.link_repository.insert(new_link).await {
                Ok(link) => return Ok(link),
                Err(AppError::SlugConflict { slug }) => {
                    counter!("slug_collisions_total").increment(1);
                    if !race_retry_granted {
                        race_retry_granted = true;
                        budget += 1;
                    }
                    debug!(%slug, attempts, "Generated slug claimed concurrently");
                }
                Err(e) => return Err(e),
            }
        }

        counter!("slug_exhausted_total").increment(1);
        warn!(
            attempts,
            slug_length = self.slug_length,
            "Random slug attempts exhausted; slug space is densely populated"
        );

        Err(AppError::SlugExhausted { attempts })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::repositories::{MockLinkRepository, MockVisitRepository};
    use crate::utils::slug_generator::is_slug_charset;
    use chrono::Utc;

    fn create_test_link(id: i64, slug: &str, url: &str, owner: Option<&str>) -> Link {
        Link::new(
            id,
            url.to_string(),
            slug.to_string(),
            owner.map(str::to_string),
            Utc::now(),
        )
    }

    fn echo_insert(new_link: NewLink) -> Result<Link, AppError> {
        Ok(Link::new(
            99,
            new_link.long_url,
            new_link.slug,
            new_link.owner_id,
            Utc::now(),
        ))
    }

    fn service(
        links: MockLinkRepository,
    ) -> LinkService<MockLinkRepository, MockVisitRepository> {
        LinkService::new(Arc::new(links), Arc::new(MockVisitRepository::new()))
    }

    #[tokio::test]
    async fn test_create_generates_random_slug() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_find_by_slug()
            .times(1)
            .returning(|_| Ok(None));
        mock_links
            .expect_insert()
            .withf(|new_link| new_link.slug.len() == 6 && is_slug_charset(&new_link.slug))
            .times(1)
            .returning(echo_insert);

        let link = service(mock_links)
            .create("http://a.com".to_string(), None, None)
            .await
            .unwrap();

        assert_eq!(link.slug.len(), 6);
        assert!(is_slug_charset(&link.slug));
        assert!(link.owner_id.is_none());
    }

    #[tokio::test]
    async fn test_create_respects_slug_length() {
        let mut mock_links = MockLinkRepository::new();

        mock_links.expect_find_by_slug().returning(|_| Ok(None));
        mock_links
            .expect_insert()
            .times(1)
            .returning(echo_insert);

        let link = service(mock_links)
            .with_slug_length(10)
            .create("https://example.com".to_string(), None, None)
            .await
            .unwrap();

        assert_eq!(link.slug.len(), 10);
    }

    #[tokio::test]
    async fn test_create_invalid_url() {
        let mut mock_links = MockLinkRepository::new();
        mock_links.expect_insert().times(0);
        mock_links.expect_find_by_slug().times(0);

        let result = service(mock_links)
            .create("not a url".to_string(), None, None)
            .await;

        assert!(matches!(result, Err(AppError::InvalidUrl { .. })));
    }

    #[tokio::test]
    async fn test_create_returns_existing_link_for_same_owner() {
        let mut mock_links = MockLinkRepository::new();

        let existing = create_test_link(5, "exists", "https://example.com", Some("user-1"));
        mock_links
            .expect_find_by_long_url_and_owner()
            .withf(|url, owner| url == "https://example.com" && owner == "user-1")
            .times(1)
            .returning(move |_, _| Ok(Some(existing.clone())));
        mock_links.expect_find_by_slug().times(0);
        mock_links.expect_insert().times(0);

        let link = service(mock_links)
            .create(
                "https://example.com".to_string(),
                Some("other".to_string()),
                Some("user-1".to_string()),
            )
            .await
            .unwrap();

        assert_eq!(link.id, 5);
        assert_eq!(link.slug, "exists");
    }

    #[tokio::test]
    async fn test_create_anonymous_skips_owner_lookup() {
        let mut mock_links = MockLinkRepository::new();

        mock_links.expect_find_by_long_url_and_owner().times(0);
        mock_links.expect_find_by_slug().returning(|_| Ok(None));
        mock_links.expect_insert().times(1).returning(echo_insert);

        let result = service(mock_links)
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_with_free_custom_slug() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_find_by_slug()
            .withf(|slug| slug == "dup")
            .times(1)
            .returning(|_| Ok(None));
        mock_links
            .expect_insert()
            .withf(|new_link| new_link.slug == "dup" && new_link.owner_id.is_none())
            .times(1)
            .returning(echo_insert);

        let link = service(mock_links)
            .create("http://b.com".to_string(), Some("dup".to_string()), None)
            .await
            .unwrap();

        assert_eq!(link.slug, "dup");
    }

    #[tokio::test]
    async fn test_create_custom_slug_same_url_is_idempotent() {
        let mut mock_links = MockLinkRepository::new();

        let existing = create_test_link(7, "mine", "https://example.com", None);
        mock_links
            .expect_find_by_slug()
            .withf(|slug| slug == "mine")
            .times(1)
            .returning(move |_| Ok(Some(existing.clone())));
        mock_links.expect_insert().times(0);

        let link = service(mock_links)
            .create(
                "https://example.com".to_string(),
                Some("mine".to_string()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(link.id, 7);
    }

    #[tokio::test]
    async fn test_create_custom_slug_collision_falls_back_to_random() {
        let mut mock_links = MockLinkRepository::new();

        let other = create_test_link(3, "dup", "http://b.com", None);
        mock_links
            .expect_find_by_slug()
            .returning(move |slug| {
                if slug == "dup" {
                    Ok(Some(other.clone()))
                } else {
                    Ok(None)
                }
            });
        mock_links
            .expect_insert()
            .withf(|new_link| new_link.slug != "dup" && new_link.long_url == "http://c.com")
            .times(1)
            .returning(echo_insert);

        let link = service(mock_links)
            .create("http://c.com".to_string(), Some("dup".to_string()), None)
            .await
            .unwrap();

        assert_ne!(link.slug, "dup");
        assert_eq!(link.slug.len(), 6);
    }

    #[tokio::test]
    async fn test_create_custom_slug_race_returns_winner_with_same_url() {
        let mut mock_links = MockLinkRepository::new();
        let mut lookups = 0;

        let winner = create_test_link(11, "race", "https://example.com", None);
        mock_links
            .expect_find_by_slug()
            .withf(|slug| slug == "race")
            .times(2)
            .returning(move |_| {
                lookups += 1;
                if lookups == 1 {
                    Ok(None)
                } else {
                    Ok(Some(winner.clone()))
                }
            });
        mock_links
            .expect_insert()
            .times(1)
            .returning(|new_link| Err(AppError::SlugConflict { slug: new_link.slug }));

        let link = service(mock_links)
            .create(
                "https://example.com".to_string(),
                Some("race".to_string()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(link.id, 11);
    }

    #[tokio::test]
    async fn test_create_exhausts_retry_budget_without_insert() {
        let mut mock_links = MockLinkRepository::new();

        let taken = create_test_link(1, "taken", "https://other.com", None);
        mock_links
            .expect_find_by_slug()
            .times(MAX_SLUG_ATTEMPTS)
            .returning(move |_| Ok(Some(taken.clone())));
        mock_links.expect_insert().times(0);

        let result = service(mock_links)
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(matches!(
            result,
            Err(AppError::SlugExhausted { attempts }) if attempts == MAX_SLUG_ATTEMPTS
        ));
    }

    #[tokio::test]
    async fn test_create_succeeds_on_last_attempt() {
        let mut mock_links = MockLinkRepository::new();
        let mut lookups = 0;

        let taken = create_test_link(1, "taken", "https://other.com", None);
        mock_links
            .expect_find_by_slug()
            .times(MAX_SLUG_ATTEMPTS)
            .returning(move |_| {
                lookups += 1;
                if lookups < MAX_SLUG_ATTEMPTS {
                    Ok(Some(taken.clone()))
                } else {
                    Ok(None)
                }
            });
        mock_links.expect_insert().times(1).returning(echo_insert);

        let result = service(mock_links)
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_insert_race_grants_one_extra_attempt() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_find_by_slug()
            .times(MAX_SLUG_ATTEMPTS + 1)
            .returning(|_| Ok(None));
        mock_links
            .expect_insert()
            .times(MAX_SLUG_ATTEMPTS + 1)
            .returning(|new_link| Err(AppError::SlugConflict { slug: new_link.slug }));

        let result = service(mock_links)
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(matches!(
            result,
            Err(AppError::SlugExhausted { attempts }) if attempts == MAX_SLUG_ATTEMPTS + 1
        ));
    }

    #[tokio::test]
    async fn test_create_insert_race_then_success() {
        let mut mock_links = MockLinkRepository::new();
        let mut inserts = 0;

        mock_links
            .expect_find_by_slug()
            .times(2)
            .returning(|_| Ok(None));
        mock_links
            .expect_insert()
            .times(2)
            .returning(move |new_link| {
                inserts += 1;
                if inserts == 1 {
                    Err(AppError::SlugConflict { slug: new_link.slug })
                } else {
                    echo_insert(new_link)
                }
            });

        let result = service(mock_links)
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(result.is_ok());
    }

    #[tokio::test]
    async fn test_create_propagates_store_errors() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_find_by_slug()
            .times(1)
            .returning(|_| Err(AppError::internal("Database error", json!({}))));
        mock_links.expect_insert().times(0);

        let result = service(mock_links)
            .create("https://example.com".to_string(), None, None)
            .await;

        assert!(matches!(result, Err(AppError::Internal { .. })));
    }

    #[tokio::test]
    async fn test_lookup_by_slug_found() {
        let mut mock_links = MockLinkRepository::new();

        let link = create_test_link(1, "abc123", "https://example.com", None);
        mock_links
            .expect_find_by_slug()
            .withf(|slug| slug == "abc123")
            .times(1)
            .returning(move |_| Ok(Some(link.clone())));

        let result = service(mock_links).lookup_by_slug("abc123").await.unwrap();
        assert_eq!(result.long_url, "https://example.com");
    }

    #[tokio::test]
    async fn test_lookup_by_slug_not_found() {
        let mut mock_links = MockLinkRepository::new();
        mock_links.expect_find_by_slug().returning(|_| Ok(None));

        let result = service(mock_links).lookup_by_slug("missing").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_rename_success() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_find_by_slug()
            .withf(|slug| slug == "new")
            .times(1)
            .returning(|_| Ok(None));
        mock_links
            .expect_update_slug()
            .withf(|current, new| current == "old" && new == "new")
            .times(1)
            .returning(|_, new| Ok(create_test_link(1, new, "https://example.com", None)));

        let link = service(mock_links).rename("old", "new").await.unwrap();
        assert_eq!(link.slug, "new");
    }

    #[tokio::test]
    async fn test_rename_conflict_leaves_store_unchanged() {
        let mut mock_links = MockLinkRepository::new();

        let other = create_test_link(2, "taken", "https://other.com", None);
        mock_links
            .expect_find_by_slug()
            .times(1)
            .returning(move |_| Ok(Some(other.clone())));
        mock_links.expect_update_slug().times(0);

        let result = service(mock_links).rename("old", "taken").await;
        assert!(matches!(result, Err(AppError::SlugConflict { slug }) if slug == "taken"));
    }

    #[tokio::test]
    async fn test_rename_to_same_slug_skips_conflict_check() {
        let mut mock_links = MockLinkRepository::new();

        mock_links.expect_find_by_slug().times(0);
        mock_links
            .expect_update_slug()
            .times(1)
            .returning(|current, _| Ok(create_test_link(1, current, "https://example.com", None)));

        let link = service(mock_links).rename("same", "same").await.unwrap();
        assert_eq!(link.slug, "same");
    }

    #[tokio::test]
    async fn test_rename_missing_link() {
        let mut mock_links = MockLinkRepository::new();

        mock_links.expect_find_by_slug().returning(|_| Ok(None));
        mock_links
            .expect_update_slug()
            .returning(|current, _| Err(AppError::not_found("URL not found", json!({ "slug": current }))));

        let result = service(mock_links).rename("ghost", "new").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_record_visit() {
        let mut mock_visits = MockVisitRepository::new();

        mock_visits
            .expect_append_visit()
            .withf(|v| v.link_id == 10 && v.user_agent.as_deref() == Some("Mozilla/5.0"))
            .times(1)
            .returning(|v| {
                Ok(Visit::new(
                    1,
                    v.link_id,
                    Utc::now(),
                    v.ip_address,
                    v.user_agent,
                    v.referrer,
                ))
            });

        let service = LinkService::new(Arc::new(MockLinkRepository::new()), Arc::new(mock_visits));

        let visit = service
            .record_visit(
                10,
                Some("192.168.1.1".to_string()),
                Some("Mozilla/5.0".to_string()),
                None,
            )
            .await
            .unwrap();

        assert_eq!(visit.link_id, 10);
        assert_eq!(visit.ip_address.as_deref(), Some("192.168.1.1"));
    }

    #[tokio::test]
    async fn test_record_visit_unknown_link() {
        let mut mock_visits = MockVisitRepository::new();

        mock_visits
            .expect_append_visit()
            .returning(|_| Err(AppError::not_found("Referenced link not found", json!({}))));

        let service = LinkService::new(Arc::new(MockLinkRepository::new()), Arc::new(mock_visits));

        let result = service.record_visit(404, None, None, None).await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }

    #[tokio::test]
    async fn test_list_by_owner() {
        let mut mock_links = MockLinkRepository::new();

        mock_links
            .expect_list_by_owner()
            .withf(|owner| owner == "user-1")
            .times(1)
            .returning(|_| {
                Ok(vec![
                    LinkWithVisitCount {
                        link: create_test_link(2, "second", "https://b.com", Some("user-1")),
                        visit_count: 0,
                    },
                    LinkWithVisitCount {
                        link: create_test_link(1, "first", "https://a.com", Some("user-1")),
                        visit_count: 7,
                    },
                ])
            });

        let links = service(mock_links).list_by_owner("user-1").await.unwrap();
        assert_eq!(links.len(), 2);
        assert_eq!(links[0].link.slug, "second");
        assert_eq!(links[1].visit_count, 7);
    }

    #[tokio::test]
    async fn test_describe() {
        let mut mock_links = MockLinkRepository::new();
        let mut mock_visits = MockVisitRepository::new();

        mock_links
            .expect_find_by_slug()
            .returning(|_| Ok(Some(create_test_link(5, "abc", "https://a.com", None))));
        mock_visits
            .expect_count_visits()
            .withf(|id| *id == 5)
            .times(1)
            .returning(|_| Ok(3));

        let service = LinkService::new(Arc::new(mock_links), Arc::new(mock_visits));

        let described = service.describe("abc").await.unwrap();
        assert_eq!(described.link.id, 5);
        assert_eq!(described.visit_count, 3);
    }

    #[tokio::test]
    async fn test_describe_missing_link_skips_count() {
        let mut mock_links = MockLinkRepository::new();

        mock_links.expect_find_by_slug().returning(|_| Ok(None));

        let result = service(mock_links).describe("ghost").await;
        assert!(matches!(result, Err(AppError::NotFound { .. })));
    }
}
