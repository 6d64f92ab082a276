mod common;

use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;

use slug_shortener::application::visit_worker::run_visit_worker;
use slug_shortener::infrastructure::persistence::MemoryStore;

#[tokio::test]
async fn test_analytics_report() {
    let store = Arc::new(MemoryStore::new());
    let link = common::create_test_link(&store, "stats", "https://example.com", None).await;
    common::create_test_visit(&store, link.id, Some("Mozilla/5.0 Chrome/120.0 Safari/537.36")).await;
    common::create_test_visit(&store, link.id, Some("Mozilla/5.0 Firefox/121.0")).await;
    common::create_test_visit(&store, link.id, None).await;
    let (state, _rx) = common::create_test_state(store);
    let server = common::test_server(state);

    let response = server.get("/api/analytics/stats").await;

    response.assert_status_ok();
    let json = response.json::<Value>();

    assert_eq!(json["url"]["slug"], "stats");
    assert_eq!(json["url"]["shortUrl"], "http://sho.rt/stats");

    let analytics = &json["analytics"];
    assert_eq!(analytics["totalVisits"], 3);
    assert_eq!(analytics["lastDayVisits"], 3);
    assert_eq!(analytics["browsers"]["Chrome"], 1);
    assert_eq!(analytics["browsers"]["Firefox"], 1);
    assert_eq!(analytics["browsers"]["Unknown"], 1);

    let recent = analytics["recentVisits"].as_array().unwrap();
    assert_eq!(recent.len(), 3);
    assert_eq!(recent[0]["ipAddress"], common::CLIENT_IP);
    assert!(recent[0].get("userAgent").is_none());
}

#[tokio::test]
async fn test_analytics_without_visits() {
    let store = Arc::new(MemoryStore::new());
    common::create_test_link(&store, "quiet", "https://example.com", None).await;
    let (state, _rx) = common::create_test_state(store);
    let server = common::test_server(state);

    let json = server.get("/api/analytics/quiet").await.json::<Value>();

    assert_eq!(json["analytics"]["totalVisits"], 0);
    assert_eq!(json["analytics"]["browsers"], serde_json::json!({}));
    assert_eq!(json["analytics"]["recentVisits"], serde_json::json!([]));
}

#[tokio::test]
async fn test_analytics_not_found() {
    let store = Arc::new(MemoryStore::new());
    let (state, _rx) = common::create_test_state(store);
    let server = common::test_server(state);

    let response = server.get("/api/analytics/missing").await;

    response.assert_status_not_found();
}

#[tokio::test]
async fn test_redirect_is_counted_by_worker() {
    let store = Arc::new(MemoryStore::new());
    common::create_test_link(&store, "live", "https://example.com", None).await;
    let (state, rx) = common::create_test_state(store.clone());
    tokio::spawn(run_visit_worker(rx, state.link_service.clone(), 2));
    let server = common::test_server(state);

    server
        .get("/live")
        .add_header("User-Agent", "Mozilla/5.0 Firefox/121.0")
        .await
        .assert_status(axum::http::StatusCode::MOVED_PERMANENTLY);

    let mut total = Value::Null;
    for _ in 0..50 {
        let json = server.get("/api/analytics/live").await.json::<Value>();
        total = json["analytics"]["totalVisits"].clone();
        if total == 1 {
            assert_eq!(json["analytics"]["browsers"]["Firefox"], 1);
            break;
        }
        tokio::time::sleep(Duration::from_millis(20)).await;
    }

    assert_eq!(total, 1);
}
