//! PostgreSQL implementation of visit repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, NewVisit, Visit};
use crate::domain::repositories::{LinkWithVisits, VisitRepository};
use crate::error::AppError;
use crate::infrastructure::persistence::pg_link_repository::LinkRow;

#[derive(sqlx::FromRow)]
struct VisitRow {
    id: i64,
    link_id: i64,
    visited_at: DateTime<Utc>,
    ip_address: Option<String>,
    user_agent: Option<String>,
    referrer: Option<String>,
}

impl From<VisitRow> for Visit {
    fn from(r: VisitRow) -> Self {
        Visit::new(
            r.id,
            r.link_id,
            r.visited_at,
            r.ip_address,
            r.user_agent,
            r.referrer,
        )
    }
}

/// PostgreSQL repository for the append-only visit log.
///
/// Appending a visit for a missing link trips the `visits.link_id` foreign
/// key and surfaces as [`AppError::NotFound`].
pub struct PgVisitRepository {
    pool: Arc<PgPool>,
}

impl PgVisitRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for PgVisitRepository {
    async fn append_visit(&self, new_visit: NewVisit) -> Result<Visit, AppError> {
        let row = sqlx::query_as::<_, VisitRow>(
            r#"
            INSERT INTO visits (link_id, ip_address, user_agent, referrer)
            VALUES ($1, $2, $3, $4)
            RETURNING id, link_id, visited_at, ip_address, user_agent, referrer
            "#,
        )
        .bind(new_visit.link_id)
        .bind(new_visit.ip_address)
        .bind(new_visit.user_agent)
        .bind(new_visit.referrer)
        .fetch_one(self.pool.as_ref())
        .await?;

        Ok(row.into())
    }

    async fn count_visits(&self, link_id: i64) -> Result<i64, AppError> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM visits WHERE link_id = $1")
            .bind(link_id)
            .fetch_one(self.pool.as_ref())
            .await?;

        Ok(count)
    }

    async fn get_with_visits(&self, slug: &str) -> Result<Option<LinkWithVisits>, AppError> {
        let link_row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, long_url, slug, owner_id, created_at
            FROM links
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        let Some(link_row) = link_row else {
            return Ok(None);
        };
        let link = Link::from(link_row);

        let visits = sqlx::query_as::<_, VisitRow>(
            r#"
            SELECT id, link_id, visited_at, ip_address, user_agent, referrer
            FROM visits
            WHERE link_id = $1
            ORDER BY visited_at DESC, id DESC
            "#,
        )
        .bind(link.id)
        .fetch_all(self.pool.as_ref())
        .await?
        .into_iter()
        .map(Visit::from)
        .collect();

        Ok(Some(LinkWithVisits { link, visits }))
    }
}
