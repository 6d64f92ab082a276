//! In-process record store.
//!
//! Implements both repository traits over a single lock so slug uniqueness
//! and the visit-to-link reference hold exactly as they do in PostgreSQL.
//! Selected with `STORE_BACKEND=memory`; data does not survive a restart.

use std::collections::HashMap;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::json;
use tokio::sync::RwLock;

use crate::domain::entities::{Link, LinkWithVisitCount, NewLink, NewVisit, Visit};
use crate::domain::repositories::{LinkRepository, LinkWithVisits, VisitRepository};
use crate::error::AppError;

#[derive(Default)]
struct MemoryState {
    links: HashMap<i64, Link>,
    slugs: HashMap<String, i64>,
    visits: Vec<Visit>,
    next_link_id: i64,
    next_visit_id: i64,
}

impl MemoryState {
    fn link_by_slug(&self, slug: &str) -> Option<&Link> {
        self.slugs.get(slug).and_then(|id| self.links.get(id))
    }

    fn visit_count(&self, link_id: i64) -> i64 {
        self.visits.iter().filter(|v| v.link_id == link_id).count() as i64
    }
}

#[derive(Default)]
pub struct MemoryStore {
    state: RwLock<MemoryState>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl LinkRepository for MemoryStore {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        Ok(self.state.read().await.link_by_slug(slug).cloned())
    }

    async fn find_by_long_url_and_owner(
        &self,
        long_url: &str,
        owner_id: &str,
    ) -> Result<Option<Link>, AppError> {
        let state = self.state.read().await;

        Ok(state
            .links
            .values()
            .filter(|link| link.long_url == long_url && link.owner_id.as_deref() == Some(owner_id))
            .min_by_key(|link| (link.created_at, link.id))
            .cloned())
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let mut state = self.state.write().await;

        if state.slugs.contains_key(&new_link.slug) {
            return Err(AppError::SlugConflict {
                slug: new_link.slug,
            });
        }

        state.next_link_id += 1;
        let link = Link::new(
            state.next_link_id,
            new_link.long_url,
            new_link.slug,
            new_link.owner_id,
            Utc::now(),
        );

        state.slugs.insert(link.slug.clone(), link.id);
        state.links.insert(link.id, link.clone());

        Ok(link)
    }

    async fn update_slug(&self, current_slug: &str, new_slug: &str) -> Result<Link, AppError> {
        let mut state = self.state.write().await;

        let Some(id) = state.slugs.get(current_slug).copied() else {
            return Err(AppError::not_found(
                "URL not found",
                json!({ "slug": current_slug }),
            ));
        };

        if current_slug != new_slug && state.slugs.contains_key(new_slug) {
            return Err(AppError::SlugConflict {
                slug: new_slug.to_string(),
            });
        }

        state.slugs.remove(current_slug);
        state.slugs.insert(new_slug.to_string(), id);

        let link = state
            .links
            .get_mut(&id)
            .ok_or_else(|| AppError::internal("Slug index out of sync", json!({ "id": id })))?;
        link.slug = new_slug.to_string();

        Ok(link.clone())
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<LinkWithVisitCount>, AppError> {
        let state = self.state.read().await;

        let mut links: Vec<Link> = state
            .links
            .values()
            .filter(|link| link.owner_id.as_deref() == Some(owner_id))
            .cloned()
            .collect();
        links.sort_by(|a, b| (b.created_at, b.id).cmp(&(a.created_at, a.id)));

        Ok(links
            .into_iter()
            .map(|link| LinkWithVisitCount {
                visit_count: state.visit_count(link.id),
                link,
            })
            .collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        Ok(())
    }
}

#[async_trait]
impl VisitRepository for MemoryStore {
    async fn append_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let mut state = self.state.write().await;

        if !state.links.contains_key(&new_visit.link_id) {
            return Err(AppError::not_found(
                "Referenced link not found",
                json!({ "link_id": new_visit.link_id }),
            ));
        }

        state.next_visit_id += 1;
        let visit = Visit::new(
            state.next_visit_id,
            new_visit.link_id,
            Utc::now(),
            new_visit.ip_address,
            new_visit.user_agent,
            new_visit.referrer,
        );
        state.visits.push(visit.clone());

        Ok(visit)
    }

    async fn count_visits(&self, link_id: i64) -> Result<i64, AppError> {
        Ok(self.state.read().await.visit_count(link_id))
    }

    async fn get_with_visits(&self, slug: &str) -> Result<Option<LinkWithVisits>, AppError> {
        let state = self.state.read().await;

        let Some(link) = state.link_by_slug(slug).cloned() else {
            return Ok(None);
        };

        let mut visits: Vec<Visit> = state
            .visits
            .iter()
            .filter(|visit| visit.link_id == link.id)
            .cloned()
            .collect();
        visits.sort_by(|a, b| (b.visited_at, b.id).cmp(&(a.visited_at, a.id)));

        Ok(Some(LinkWithVisits { link, visits }))
    }
}
