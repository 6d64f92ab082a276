//! Shared application state injected into every handler.

use std::sync::Arc;
use tokio::sync::mpsc;

use crate::application::services::{AnalyticsService, LinkService};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::domain::visit_event::VisitEvent;

/// Link service over type-erased repositories, as stored in [`AppState`].
pub type DynLinkService = LinkService<dyn LinkRepository, dyn VisitRepository>;

/// Analytics service over a type-erased repository, as stored in [`AppState`].
pub type DynAnalyticsService = AnalyticsService<dyn VisitRepository>;

#[derive(Clone)]
pub struct AppState {
    pub link_service: Arc<DynLinkService>,
    pub analytics_service: Arc<DynAnalyticsService>,
    pub visit_sender: mpsc::Sender<VisitEvent>,
    /// Prefix of rendered short URLs, without trailing slash.
    pub base_url: Arc<str>,
    /// Where unknown slugs redirect to; `None` answers 404 instead.
    pub not_found_redirect: Option<Arc<str>>,
}

impl AppState {
    /// Wires services around a pair of repositories.
    ///
    /// Both repositories usually point at the same store (one PostgreSQL pool
    /// or one [`crate::infrastructure::persistence::MemoryStore`]).
    pub fn new(
        link_repository: Arc<dyn LinkRepository>,
        visit_repository: Arc<dyn VisitRepository>,
        visit_sender: mpsc::Sender<VisitEvent>,
        base_url: &str,
        slug_length: usize,
    ) -> Self {
        let link_service = LinkService::new(link_repository, Arc::clone(&visit_repository))
            .with_slug_length(slug_length);
        let analytics_service = AnalyticsService::new(visit_repository);

        Self {
            link_service: Arc::new(link_service),
            analytics_service: Arc::new(analytics_service),
            visit_sender,
            base_url: Arc::from(base_url.trim_end_matches('/')),
            not_found_redirect: None,
        }
    }

    /// Redirects unknown slugs to `target` instead of answering 404.
    pub fn with_not_found_redirect(mut self, target: Option<String>) -> Self {
        self.not_found_redirect = target.map(Arc::from);
        self
    }
}
