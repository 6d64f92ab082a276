mod common;

use axum_test::TestServer;
use serde_json::{Value, json};
use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

use slug_shortener::infrastructure::persistence::MemoryStore;

fn server() -> (TestServer, Arc<MemoryStore>) {
    let store = Arc::new(MemoryStore::new());
    let (state, _rx) = common::create_test_state(store.clone());
    (common::test_server(state), store)
}

#[tokio::test]
async fn test_shorten_random_slug() {
    let (server, _store) = server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "http://a.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<Value>();
    let slug = json["slug"].as_str().unwrap();
    assert_eq!(slug.len(), 6);
    assert!(slug.chars().all(|c| c.is_ascii_alphanumeric()));
    assert_eq!(json["longUrl"], "http://a.com");
    assert_eq!(json["shortUrl"], format!("{}/{}", common::BASE_URL, slug));
    assert!(json.get("ownerId").is_none());

    let lookup = server.get(&format!("/api/urls/{slug}")).await;
    lookup.assert_status_ok();
    assert_eq!(lookup.json::<Value>()["id"], json["id"]);
}

#[tokio::test]
async fn test_shorten_with_custom_slug() {
    let (server, _store) = server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "http://b.com", "customSlug": "dup" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    assert_eq!(response.json::<Value>()["slug"], "dup");
}

#[tokio::test]
async fn test_shorten_custom_slug_collision_falls_back() {
    let (server, _store) = server();

    server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "http://b.com", "customSlug": "dup" }))
        .await
        .assert_status(axum::http::StatusCode::CREATED);

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "http://c.com", "customSlug": "dup" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);

    let json = response.json::<Value>();
    assert_ne!(json["slug"], "dup");
    assert_eq!(json["longUrl"], "http://c.com");
}

#[tokio::test]
async fn test_shorten_custom_slug_same_url_is_idempotent() {
    let (server, _store) = server();

    let first = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "http://b.com", "customSlug": "mine" }))
        .await
        .json::<Value>();

    let second = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "http://b.com", "customSlug": "mine" }))
        .await
        .json::<Value>();

    assert_eq!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_shorten_same_owner_is_idempotent() {
    let (server, store) = server();

    let first = server
        .post("/api/shorten")
        .add_header("X-Owner-Id", "user-1")
        .json(&json!({ "longUrl": "https://example.com", "customSlug": "first" }))
        .await
        .json::<Value>();

    let second = server
        .post("/api/shorten")
        .add_header("X-Owner-Id", "user-1")
        .json(&json!({ "longUrl": "https://example.com", "customSlug": "other" }))
        .await
        .json::<Value>();

    assert_eq!(first["id"], second["id"]);
    assert_eq!(second["slug"], "first");
    assert_eq!(second["ownerId"], "user-1");

    use slug_shortener::domain::repositories::LinkRepository;
    assert_eq!(store.list_by_owner("user-1").await.unwrap().len(), 1);
}

#[tokio::test]
async fn test_shorten_anonymous_creates_new_links() {
    let (server, _store) = server();

    let first = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await
        .json::<Value>();

    let second = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com" }))
        .await
        .json::<Value>();

    assert_ne!(first["id"], second["id"]);
}

#[tokio::test]
async fn test_shorten_invalid_url() {
    let (server, _store) = server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "not a url" }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);

    let json = response.json::<Value>();
    assert_eq!(json["error"]["code"], "invalid_url");
    assert_eq!(json["error"]["message"], "Invalid URL format");
}

#[tokio::test]
async fn test_shorten_too_long_url_is_invalid_url() {
    let (server, _store) = server();
    let long_url = format!("https://example.com/{}", "a".repeat(2048));

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": long_url }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    assert_eq!(response.json::<Value>()["error"]["code"], "invalid_url");
}

#[tokio::test]
async fn test_shorten_schemeless_url_with_nested_url_in_query() {
    let (server, _store) = server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "example.com/login?next=https://foo.com" }))
        .await;

    response.assert_status(axum::http::StatusCode::CREATED);
    let slug = response.json::<Value>()["slug"].as_str().unwrap().to_string();

    let redirect = server.get(&format!("/{slug}")).await;
    redirect.assert_status(axum::http::StatusCode::MOVED_PERMANENTLY);
    assert_eq!(
        redirect.header("location"),
        "http://example.com/login?next=https://foo.com"
    );
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_requests_for_same_custom_slug_get_distinct_slugs() {
    let store = Arc::new(MemoryStore::new());
    let (state, _rx) = common::create_test_state(store);

    let mut tasks = JoinSet::new();
    for i in 0..16 {
        let links = Arc::clone(&state.link_service);
        tasks.spawn(async move {
            links
                .create(format!("https://site{i}.com"), Some("x".to_string()), None)
                .await
        });
    }

    let mut slugs = Vec::new();
    while let Some(result) = tasks.join_next().await {
        slugs.push(result.unwrap().unwrap().slug);
    }

    assert_eq!(slugs.iter().filter(|s| s.as_str() == "x").count(), 1);
    let distinct: HashSet<&String> = slugs.iter().collect();
    assert_eq!(distinct.len(), slugs.len());
}

#[tokio::test]
async fn test_shorten_reserved_custom_slug() {
    let (server, _store) = server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com", "customSlug": "health" }))
        .await;

    response.assert_status_bad_request();
    assert_eq!(response.json::<Value>()["error"]["code"], "validation_error");
}

#[tokio::test]
async fn test_shorten_malformed_custom_slug() {
    let (server, _store) = server();

    let response = server
        .post("/api/shorten")
        .json(&json!({ "longUrl": "https://example.com", "customSlug": "no/slash" }))
        .await;

    response.assert_status_bad_request();
}
