//! PostgreSQL implementation of link repository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::json;
use sqlx::PgPool;
use std::sync::Arc;

use crate::domain::entities::{Link, LinkWithVisitCount, NewLink};
use crate::domain::repositories::LinkRepository;
use crate::error::{AppError, map_sqlx_error};
use crate::utils::db_error::is_unique_violation_on_slug;

/// Row shape shared by every `links` query.
#[derive(sqlx::FromRow)]
pub(crate) struct LinkRow {
    pub id: i64,
    pub long_url: String,
    pub slug: String,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl From<LinkRow> for Link {
    fn from(r: LinkRow) -> Self {
        Link::new(r.id, r.long_url, r.slug, r.owner_id, r.created_at)
    }
}

#[derive(sqlx::FromRow)]
struct LinkCountRow {
    #[sqlx(flatten)]
    link: LinkRow,
    visit_count: i64,
}

impl From<LinkCountRow> for LinkWithVisitCount {
    fn from(r: LinkCountRow) -> Self {
        LinkWithVisitCount {
            link: r.link.into(),
            visit_count: r.visit_count,
        }
    }
}

/// PostgreSQL repository for link storage and retrieval.
///
/// Slug uniqueness is enforced by the `links_slug_key` constraint; a
/// violation is reported as [`AppError::SlugConflict`].
pub struct PgLinkRepository {
    pool: Arc<PgPool>,
}

impl PgLinkRepository {
    /// Creates a new repository with a database connection pool.
    pub fn new(pool: Arc<PgPool>) -> Self {
        Self { pool }
    }
}

fn slug_error(e: sqlx::Error, slug: &str) -> AppError {
    if is_unique_violation_on_slug(&e) {
        AppError::SlugConflict {
            slug: slug.to_string(),
        }
    } else {
        map_sqlx_error(e)
    }
}

#[async_trait]
impl LinkRepository for PgLinkRepository {
    async fn find_by_slug(&self, slug: &str) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, long_url, slug, owner_id, created_at
            FROM links
            WHERE slug = $1
            "#,
        )
        .bind(slug)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn find_by_long_url_and_owner(
        &self,
        long_url: &str,
        owner_id: &str,
    ) -> Result<Option<Link>, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            SELECT id, long_url, slug, owner_id, created_at
            FROM links
            WHERE long_url = $1 AND owner_id = $2
            ORDER BY created_at ASC, id ASC
            LIMIT 1
            "#,
        )
        .bind(long_url)
        .bind(owner_id)
        .fetch_optional(self.pool.as_ref())
        .await?;

        Ok(row.map(Link::from))
    }

    async fn insert(&self, new_link: NewLink) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            INSERT INTO links (long_url, slug, owner_id)
            VALUES ($1, $2, $3)
            RETURNING id, long_url, slug, owner_id, created_at
            "#,
        )
        .bind(&new_link.long_url)
        .bind(&new_link.slug)
        .bind(&new_link.owner_id)
        .fetch_one(self.pool.as_ref())
        .await
        .map_err(|e| slug_error(e, &new_link.slug))?;

        Ok(row.into())
    }

    async fn update_slug(&self, current_slug: &str, new_slug: &str) -> Result<Link, AppError> {
        let row = sqlx::query_as::<_, LinkRow>(
            r#"
            UPDATE links
            SET slug = $2
            WHERE slug = $1
            RETURNING id, long_url, slug, owner_id, created_at
            "#,
        )
        .bind(current_slug)
        .bind(new_slug)
        .fetch_optional(self.pool.as_ref())
        .await
        .map_err(|e| slug_error(e, new_slug))?;

        row.map(Link::from).ok_or_else(|| {
            AppError::not_found("URL not found", json!({ "slug": current_slug }))
        })
    }

    async fn list_by_owner(&self, owner_id: &str) -> Result<Vec<LinkWithVisitCount>, AppError> {
        let rows = sqlx::query_as::<_, LinkCountRow>(
            r#"
            SELECT l.id, l.long_url, l.slug, l.owner_id, l.created_at,
                   COUNT(v.id) AS visit_count
            FROM links l
            LEFT JOIN visits v ON v.link_id = l.id
            WHERE l.owner_id = $1
            GROUP BY l.id
            ORDER BY l.created_at DESC, l.id DESC
            "#,
        )
        .bind(owner_id)
        .fetch_all(self.pool.as_ref())
        .await?;

        Ok(rows.into_iter().map(LinkWithVisitCount::from).collect())
    }

    async fn ping(&self) -> Result<(), AppError> {
        sqlx::query("SELECT 1")
            .execute(self.pool.as_ref())
            .await?;
        Ok(())
    }
}
