//! Background persistence of queued visit events.

use std::sync::Arc;
use std::time::Duration;

use metrics::counter;
use tokio::sync::{Semaphore, mpsc};
use tokio::task::JoinSet;
use tokio_retry::RetryIf;
use tokio_retry::strategy::ExponentialBackoff;
use tracing::{debug, info, warn};

use crate::application::services::LinkService;
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::domain::visit_event::VisitEvent;
use crate::error::AppError;

/// Retries after the first failed write.
const MAX_RETRIES: usize = 3;

/// Drains the visit channel until every sender is dropped.
///
/// Each event is written through [`LinkService::record_visit`]. At most
/// `concurrency` writes are in flight at once; the returned future completes
/// only after every received event has been handled. Transient store
/// failures are retried with exponential backoff (50ms, 100ms, 200ms);
/// `NotFound` (the link disappeared) is not. Failures are logged and counted,
/// never surfaced to the redirect that produced the event.
pub async fn run_visit_worker<L, V>(
    mut rx: mpsc::Receiver<VisitEvent>,
    links: Arc<LinkService<L, V>>,
    concurrency: usize,
) where
    L: LinkRepository + ?Sized + 'static,
    V: VisitRepository + ?Sized + 'static,
{
    let permits = Arc::new(Semaphore::new(concurrency.max(1)));
    let mut tasks = JoinSet::new();

    while let Some(event) = rx.recv().await {
        let Ok(permit) = Arc::clone(&permits).acquire_owned().await else {
            break;
        };
        let links = Arc::clone(&links);

        tasks.spawn(async move {
            let _permit = permit;
            persist_visit(links.as_ref(), &event).await;
        });

        while tasks.try_join_next().is_some() {}
    }

    while tasks.join_next().await.is_some() {}
    info!("Visit worker stopped");
}

async fn persist_visit<L, V>(links: &LinkService<L, V>, event: &VisitEvent)
where
    L: LinkRepository + ?Sized,
    V: VisitRepository + ?Sized,
{
    let strategy = ExponentialBackoff::from_millis(2)
        .factor(25)
        .max_delay(Duration::from_secs(2))
        .take(MAX_RETRIES);

    let result = RetryIf::spawn(
        strategy,
        || {
            links.record_visit(
                event.link_id,
                event.ip_address.clone(),
                event.user_agent.clone(),
                event.referrer.clone(),
            )
        },
        |e: &AppError| e.is_transient(),
    )
    .await;

    match result {
        Ok(visit) => {
            counter!("visits_recorded_total").increment(1);
            debug!(slug = %event.slug, visit_id = visit.id, "Visit recorded");
        }
        Err(e) => {
            counter!("visits_failed_total").increment(1);
            warn!(slug = %event.slug, link_id = event.link_id, error = %e, "Failed to record visit");
        }
    }
}
