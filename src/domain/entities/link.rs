//! Link entity representing a shortened URL mapping.

use chrono::{DateTime, Utc};

/// A shortened URL link with metadata.
///
/// Represents the mapping between a unique slug and a long URL. `owner_id`
/// references a user managed outside this service and is absent for
/// anonymous links.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Link {
    pub id: i64,
    pub long_url: String,
    pub slug: String,
    pub owner_id: Option<String>,
    pub created_at: DateTime<Utc>,
}

impl Link {
    /// Creates a new Link instance.
    pub fn new(
        id: i64,
        long_url: String,
        slug: String,
        owner_id: Option<String>,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            long_url,
            slug,
            owner_id,
            created_at,
        }
    }

    /// Builds the public short URL for this link.
    ///
    /// `base_url` is injected configuration; a trailing slash is tolerated.
    pub fn short_url(&self, base_url: &str) -> String {
        format!("{}/{}", base_url.trim_end_matches('/'), self.slug)
    }
}

/// A link with the number of visits recorded for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LinkWithVisitCount {
    pub link: Link,
    pub visit_count: i64,
}

/// Input data for creating a new link.
///
/// `id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewLink {
    pub long_url: String,
    pub slug: String,
    pub owner_id: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_link_creation() {
        let now = Utc::now();
        let link = Link::new(
            1,
            "https://example.com".to_string(),
            "abc123".to_string(),
            None,
            now,
        );

        assert_eq!(link.id, 1);
        assert_eq!(link.slug, "abc123");
        assert_eq!(link.long_url, "https://example.com");
        assert!(link.owner_id.is_none());
        assert_eq!(link.created_at, now);
    }

    #[test]
    fn test_short_url() {
        let link = Link::new(
            1,
            "https://example.com".to_string(),
            "Ab3xYz".to_string(),
            Some("user-1".to_string()),
            Utc::now(),
        );

        assert_eq!(link.short_url("https://s.example.com"), "https://s.example.com/Ab3xYz");
        assert_eq!(link.short_url("https://s.example.com/"), "https://s.example.com/Ab3xYz");
    }
}
