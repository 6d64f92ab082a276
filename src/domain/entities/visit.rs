//! Visit entity representing a single redirect event.

use chrono::{DateTime, Utc};

/// A visit recorded when a short link is resolved by the redirect path.
///
/// Visits are append-only: never updated or deleted by this service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Visit {
    pub id: i64,
    pub link_id: i64,
    pub visited_at: DateTime<Utc>,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}

impl Visit {
    /// Creates a new Visit instance.
    pub fn new(
        id: i64,
        link_id: i64,
        visited_at: DateTime<Utc>,
        ip_address: Option<String>,
        user_agent: Option<String>,
        referrer: Option<String>,
    ) -> Self {
        Self {
            id,
            link_id,
            visited_at,
            ip_address,
            user_agent,
            referrer,
        }
    }
}

/// Input data for appending a visit.
///
/// The `link_id` must reference an existing link; the timestamp is set by
/// the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewVisit {
    pub link_id: i64,
    pub ip_address: Option<String>,
    pub user_agent: Option<String>,
    pub referrer: Option<String>,
}
