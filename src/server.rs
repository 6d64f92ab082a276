//! HTTP server initialization and runtime setup.
//!
//! Handles store selection, worker spawning, and Axum server lifecycle.

use crate::application::visit_worker::run_visit_worker;
use crate::config::{Config, StoreBackend};
use crate::domain::repositories::{LinkRepository, VisitRepository};
use crate::infrastructure::persistence::{MemoryStore, PgLinkRepository, PgVisitRepository};
use crate::routes::app_router;
use crate::state::AppState;

use anyhow::{Context, Result};
use axum::ServiceExt;
use axum::extract::Request;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

/// How long shutdown waits for queued visits to be written.
const VISIT_DRAIN_TIMEOUT: Duration = Duration::from_secs(10);

/// Repository pair backing one running service.
pub struct Store {
    pub links: Arc<dyn LinkRepository>,
    pub visits: Arc<dyn VisitRepository>,
}

/// Opens a PostgreSQL pool using the pool settings from `config`.
///
/// # Errors
///
/// Returns an error if `DATABASE_URL` is missing or the connection fails.
pub async fn connect_pool(config: &Config) -> Result<PgPool> {
    let database_url = config
        .database_url
        .as_deref()
        .context("DATABASE_URL is not configured")?;

    PgPoolOptions::new()
        .max_connections(config.db_max_connections)
        .acquire_timeout(Duration::from_secs(config.db_connect_timeout))
        .idle_timeout(Duration::from_secs(config.db_idle_timeout))
        .max_lifetime(Duration::from_secs(config.db_max_lifetime))
        .connect(database_url)
        .await
        .context("Failed to connect to database")
}

/// Builds the configured store, running migrations for PostgreSQL.
///
/// # Errors
///
/// Returns an error if the database is unreachable or migrations fail.
pub async fn open_store(config: &Config) -> Result<Store> {
    match config.store_backend {
        StoreBackend::Postgres => {
            let pool = connect_pool(config).await?;
            tracing::info!("Connected to database");

            sqlx::migrate!("./migrations")
                .run(&pool)
                .await
                .context("Failed to run migrations")?;

            let pool = Arc::new(pool);
            Ok(Store {
                links: Arc::new(PgLinkRepository::new(Arc::clone(&pool))),
                visits: Arc::new(PgVisitRepository::new(pool)),
            })
        }
        StoreBackend::Memory => {
            tracing::warn!("Using in-memory store; data is lost on restart");
            let store = Arc::new(MemoryStore::new());
            Ok(Store {
                links: store.clone(),
                visits: store,
            })
        }
    }
}

/// Runs the HTTP server with the given configuration.
///
/// Initializes:
/// - Record store (PostgreSQL with migrations, or in-memory)
/// - Background visit worker
/// - Axum HTTP server, stopped by Ctrl+C
///
/// # Errors
///
/// Returns an error if:
/// - Database connection or migration fails
/// - Server bind fails
/// - Server runtime error occurs
pub async fn run(config: Config) -> Result<()> {
    let store = open_store(&config).await?;

    let addr: SocketAddr = config
        .listen_addr
        .parse()
        .with_context(|| format!("Invalid LISTEN address '{}'", config.listen_addr))?;
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("Listening on http://{addr}");

    serve(listener, store, &config, shutdown_signal()).await
}

/// Serves the API on `listener` until `shutdown` resolves.
///
/// After the last connection closes the router (and with it every visit
/// sender) is dropped, and the visit worker is awaited for at most
/// [`VISIT_DRAIN_TIMEOUT`] so redirects answered before shutdown are still
/// recorded.
///
/// # Errors
///
/// Returns an error if the server fails while running.
pub async fn serve<F>(
    listener: TcpListener,
    store: Store,
    config: &Config,
    shutdown: F,
) -> Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let (visit_tx, visit_rx) = mpsc::channel(config.visit_queue_capacity);

    let state = AppState::new(
        store.links,
        store.visits,
        visit_tx,
        &config.base_url,
        config.slug_length,
    )
    .with_not_found_redirect(config.not_found_redirect.clone());

    let worker = tokio::spawn(run_visit_worker(
        visit_rx,
        Arc::clone(&state.link_service),
        config.visit_worker_concurrency,
    ));
    tracing::info!(
        concurrency = config.visit_worker_concurrency,
        "Visit worker started"
    );

    let app = app_router(state);

    axum::serve(
        listener,
        ServiceExt::<Request>::into_make_service_with_connect_info::<SocketAddr>(app),
    )
    .with_graceful_shutdown(shutdown)
    .await?;

    tracing::info!("Server stopped, draining visit queue");
    drain_visits(worker).await;

    Ok(())
}

async fn drain_visits(worker: JoinHandle<()>) {
    match tokio::time::timeout(VISIT_DRAIN_TIMEOUT, worker).await {
        Ok(Ok(())) => {}
        Ok(Err(e)) => tracing::error!("Visit worker failed: {e}"),
        Err(_) => tracing::warn!(
            timeout_secs = VISIT_DRAIN_TIMEOUT.as_secs(),
            "Visit queue not drained before timeout"
        ),
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {e}");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
