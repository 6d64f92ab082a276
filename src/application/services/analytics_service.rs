//! Visit analytics aggregation.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use serde_json::json;

use crate::domain::entities::{Link, Visit};
use crate::domain::repositories::VisitRepository;
use crate::error::AppError;

/// Number of visits projected into [`VisitTotals::recent_visits`].
pub const RECENT_VISITS_LIMIT: usize = 10;

/// Width of the trailing window counted by [`VisitTotals::last_day_visits`].
pub const LAST_DAY_HOURS: i64 = 24;

/// User-agent tokens checked in order; the first match wins.
///
/// Chromium user agents also carry a `Safari` token, so `Chrome` is checked
/// before `Safari`.
const BROWSER_TOKENS: &[(&str, &str)] = &[
    ("Chrome", "Chrome"),
    ("Firefox", "Firefox"),
    ("Safari", "Safari"),
    ("Edge", "Edge"),
    ("MSIE", "Internet Explorer"),
    ("Trident", "Internet Explorer"),
];

const UNKNOWN_BROWSER: &str = "Unknown";

/// A visit reduced to its timestamp and client address.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecentVisit {
    pub visited_at: DateTime<Utc>,
    pub ip_address: Option<String>,
}

/// Aggregated counters for one link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VisitTotals {
    pub total_visits: usize,
    pub last_day_visits: usize,
    pub browsers: BTreeMap<&'static str, usize>,
    pub recent_visits: Vec<RecentVisit>,
}

#[derive(Debug, Clone)]
pub struct AnalyticsReport {
    pub link: Link,
    pub totals: VisitTotals,
}

/// Service turning a link's visit history into a summary report.
///
/// Read-only: never writes to the store. The 24-hour window is evaluated
/// against the wall clock at each call.
pub struct AnalyticsService<V: VisitRepository + ?Sized> {
    repository: Arc<V>,
}

impl<V: VisitRepository + ?Sized> AnalyticsService<V> {
    /// Creates a new analytics service.
    pub fn new(repository: Arc<V>) -> Self {
        Self { repository }
    }

    /// Builds the analytics report for a slug.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::NotFound`] if no link uses the slug.
    /// Returns [`AppError::Internal`] on store errors.
    pub async fn summarize(&self, slug: &str) -> Result<AnalyticsReport, AppError> {
        let record = self
            .repository
            .get_with_visits(slug)
            .await?
            .ok_or_else(|| AppError::not_found("URL not found", json!({ "slug": slug })))?;

        let totals = summarize_visits(&record.visits, Utc::now());

        Ok(AnalyticsReport {
            link: record.link,
            totals,
        })
    }
}

/// Aggregates a newest-first visit list as of `now`.
///
/// A visit counts towards `last_day_visits` when it is strictly newer than
/// `now - 24h`.
pub fn summarize_visits(visits: &[Visit], now: DateTime<Utc>) -> VisitTotals {
    let window_start = now - Duration::hours(LAST_DAY_HOURS);

    let last_day_visits = visits
        .iter()
        .filter(|visit| visit.visited_at > window_start)
        .count();

    let mut browsers = BTreeMap::new();
    for visit in visits {
        *browsers
            .entry(classify_browser(visit.user_agent.as_deref()))
            .or_insert(0) += 1;
    }

    let recent_visits = visits
        .iter()
        .take(RECENT_VISITS_LIMIT)
        .map(|visit| RecentVisit {
            visited_at: visit.visited_at,
            ip_address: visit.ip_address.clone(),
        })
        .collect();

    VisitTotals {
        total_visits: visits.len(),
        last_day_visits,
        browsers,
        recent_visits,
    }
}

/// Maps a user agent to a browser label by substring match.
///
/// # Examples
///
/// ```ignore
/// assert_eq!(classify_browser(Some("Mozilla/5.0 Chrome/120.0 Safari/537.36")), "Chrome");
/// assert_eq!(classify_browser(None), "Unknown");
/// ```
pub fn classify_browser(user_agent: Option<&str>) -> &'static str {
    let Some(user_agent) = user_agent else {
        return UNKNOWN_BROWSER;
    };

    BROWSER_TOKENS
        .iter()
        .find(|(token, _)| user_agent.contains(token))
        .map_or(UNKNOWN_BROWSER, |(_, label)| label)
}
