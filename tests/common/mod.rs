#![allow(dead_code)]

use axum::{
    Router,
    extract::ConnectInfo,
    routing::get,
};
use axum_test::TestServer;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::mpsc;
use tower::Layer;

use slug_shortener::api::handlers::{health_handler, redirect_handler};
use slug_shortener::api::routes::api_routes;
use slug_shortener::domain::entities::{Link, NewLink, NewVisit};
use slug_shortener::domain::repositories::{LinkRepository, VisitRepository};
use slug_shortener::domain::visit_event::VisitEvent;
use slug_shortener::infrastructure::persistence::MemoryStore;
use slug_shortener::state::AppState;

pub const BASE_URL: &str = "http://sho.rt";
pub const CLIENT_IP: &str = "127.0.0.1";

pub fn create_test_state(store: Arc<MemoryStore>) -> (AppState, mpsc::Receiver<VisitEvent>) {
    create_test_state_with_capacity(store, 100)
}

pub fn create_test_state_with_capacity(
    store: Arc<MemoryStore>,
    capacity: usize,
) -> (AppState, mpsc::Receiver<VisitEvent>) {
    let (tx, rx) = mpsc::channel(capacity);
    let state = AppState::new(store.clone(), store, tx, BASE_URL, 6);
    (state, rx)
}

/// Full route table with a fixed peer address injected.
pub fn test_router(state: AppState) -> Router {
    Router::new()
        .route("/{slug}", get(redirect_handler))
        .route("/health", get(health_handler))
        .nest("/api", api_routes())
        .layer(MockConnectInfoLayer)
        .with_state(state)
}

pub fn test_server(state: AppState) -> TestServer {
    TestServer::new(test_router(state)).unwrap()
}

pub async fn create_test_link(
    store: &MemoryStore,
    slug: &str,
    url: &str,
    owner: Option<&str>,
) -> Link {
    store
        .insert(NewLink {
            long_url: url.to_string(),
            slug: slug.to_string(),
            owner_id: owner.map(str::to_string),
        })
        .await
        .unwrap()
}

pub async fn create_test_visit(store: &MemoryStore, link_id: i64, user_agent: Option<&str>) {
    store
        .append_visit(NewVisit {
            link_id,
            ip_address: Some(CLIENT_IP.to_string()),
            user_agent: user_agent.map(str::to_string),
            referrer: None,
        })
        .await
        .unwrap();
}

#[derive(Clone)]
pub struct MockConnectInfoLayer;

impl<S> Layer<S> for MockConnectInfoLayer {
    type Service = MockConnectInfoService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        MockConnectInfoService { inner }
    }
}

#[derive(Clone)]
pub struct MockConnectInfoService<S> {
    inner: S,
}

impl<S, B> tower::Service<axum::http::Request<B>> for MockConnectInfoService<S>
where
    S: tower::Service<axum::http::Request<B>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    B: Send + 'static,
{
    type Response = S::Response;
    type Error = S::Error;
    type Future = S::Future;

    fn poll_ready(
        &mut self,
        cx: &mut std::task::Context<'_>,
    ) -> std::task::Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut req: axum::http::Request<B>) -> Self::Future {
        let addr: SocketAddr = format!("{CLIENT_IP}:12345").parse().unwrap();
        req.extensions_mut().insert(ConnectInfo(addr));
        self.inner.call(req)
    }
}
