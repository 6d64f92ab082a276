//! DTOs for the analytics endpoint.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::api::dto::link::LinkResponse;
use crate::application::services::analytics_service::{AnalyticsReport, RecentVisit, VisitTotals};

/// Response for `GET /api/analytics/{slug}`.
#[derive(Debug, Serialize)]
pub struct AnalyticsResponse {
    pub url: LinkResponse,
    pub analytics: AnalyticsTotals,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsTotals {
    pub total_visits: usize,
    pub last_day_visits: usize,
    pub browsers: BTreeMap<&'static str, usize>,
    pub recent_visits: Vec<RecentVisitItem>,
}

/// A recent visit; user agent and referrer are not exposed.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RecentVisitItem {
    pub visited_at: DateTime<Utc>,
    pub ip_address: Option<String>,
}

impl From<RecentVisit> for RecentVisitItem {
    fn from(v: RecentVisit) -> Self {
        Self {
            visited_at: v.visited_at,
            ip_address: v.ip_address,
        }
    }
}

impl From<VisitTotals> for AnalyticsTotals {
    fn from(t: VisitTotals) -> Self {
        Self {
            total_visits: t.total_visits,
            last_day_visits: t.last_day_visits,
            browsers: t.browsers,
            recent_visits: t.recent_visits.into_iter().map(Into::into).collect(),
        }
    }
}

impl AnalyticsResponse {
    pub fn from_report(report: AnalyticsReport, base_url: &str) -> Self {
        Self {
            url: LinkResponse::from_link(report.link, base_url),
            analytics: report.totals.into(),
        }
    }
}
