//! DTO for link representations.

use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_with::skip_serializing_none;

use crate::domain::entities::{Link, LinkWithVisitCount};

/// JSON representation of a link.
///
/// `ownerId` is omitted for anonymous links. `visitCount` is only present
/// on reads (single link and owner listing).
#[skip_serializing_none]
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LinkResponse {
    pub id: i64,
    pub long_url: String,
    pub slug: String,
    pub short_url: String,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
    pub visit_count: Option<i64>,
}

impl LinkResponse {
    /// Renders a link with its public short URL under `base_url`.
    pub fn from_link(link: Link, base_url: &str) -> Self {
        Self {
            short_url: link.short_url(base_url),
            id: link.id,
            long_url: link.long_url,
            slug: link.slug,
            owner_id: link.owner_id,
            created_at: link.created_at,
            visit_count: None,
        }
    }

    /// Renders a link and its visit count.
    pub fn from_counted(counted: LinkWithVisitCount, base_url: &str) -> Self {
        Self {
            visit_count: Some(counted.visit_count),
            ..Self::from_link(counted.link, base_url)
        }
    }
}
