//! End-to-end flows through the full router

use std::time::Duration;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use linkctl_server::{build_router, AppState, Link, Store, Tag};

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("linkctl_server=debug")
        .with_test_writer()
        .try_init();
}

async fn app() -> Router {
    init_tracing();
    let store = Store::open_in_memory().await.expect("store");
    build_router(AppState::new(&store), Duration::from_secs(5))
}

async fn call(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Vec<u8>) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, bytes.to_vec())
}

async fn create_tag(app: &Router, name: &str) -> Tag {
    let (status, bytes) = call(app, Method::POST, "/tags", Some(json!({ "name": name }))).await;
    assert_eq!(status, StatusCode::CREATED);
    serde_json::from_slice(&bytes).unwrap()
}

async fn get_links(app: &Router, uri: &str) -> Vec<Link> {
    let (status, bytes) = call(app, Method::GET, uri, None).await;
    assert_eq!(status, StatusCode::OK);
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn tag_link_filter_and_cascade() {
    let app = app().await;
    let ambient = create_tag(&app, "ambient").await;

    let (status, bytes) = call(
        &app,
        Method::POST,
        "/links",
        Some(json!({ "url": "http://x", "tags": [{ "id": ambient.id }] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    let link: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(link["url"], "http://x");
    assert_eq!(link["tags"], json!([{ "id": ambient.id, "name": "ambient" }]));

    let found = get_links(&app, "/links?tags=ambient").await;
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].url, "http://x");

    let uri = format!("/tags?id={}", ambient.id);
    let (status, bytes) = call(&app, Method::DELETE, &uri, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(bytes, b"Tag deleted");

    let all = get_links(&app, "/links").await;
    assert_eq!(all.len(), 1);
    assert!(all[0].tags.is_empty());
    assert!(get_links(&app, "/links?tags=ambient").await.is_empty());
}

#[tokio::test]
async fn rename_is_visible_on_links() {
    let app = app().await;
    let rock = create_tag(&app, "rock").await;
    call(
        &app,
        Method::POST,
        "/links",
        Some(json!({ "url": "http://x", "tags": [{ "id": rock.id }] })),
    )
    .await;

    let (status, _) = call(
        &app,
        Method::PUT,
        "/tags",
        Some(json!({ "id": rock.id, "name": "stone" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let links = get_links(&app, "/links?tags=stone").await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].tag_names().collect::<Vec<_>>(), vec!["stone"]);
    assert!(get_links(&app, "/links?tags=rock").await.is_empty());
}

#[tokio::test]
async fn links_listed_in_id_order_with_tags_by_name() {
    let app = app().await;
    let b = create_tag(&app, "b").await;
    let a = create_tag(&app, "a").await;

    for url in ["http://one", "http://two", "http://three"] {
        let (status, _) = call(
            &app,
            Method::POST,
            "/links",
            Some(json!({ "url": url, "tags": [{ "id": b.id }, { "id": a.id }] })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
    }

    let links = get_links(&app, "/links").await;
    let ids: Vec<_> = links.iter().map(|l| l.id.clone()).collect();
    let mut sorted = ids.clone();
    sorted.sort();
    assert_eq!(ids, sorted);
    assert!(links
        .iter()
        .all(|l| l.tag_names().collect::<Vec<_>>() == vec!["a", "b"]));
}

#[tokio::test]
async fn failed_replace_keeps_previous_tags() {
    let app = app().await;
    let rock = create_tag(&app, "rock").await;
    call(
        &app,
        Method::POST,
        "/links",
        Some(json!({ "url": "http://x", "tags": [{ "id": rock.id }] })),
    )
    .await;

    let (status, _) = call(
        &app,
        Method::POST,
        "/links",
        Some(json!({ "url": "http://x", "tags": [{ "id": "ghost" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    let links = get_links(&app, "/links").await;
    assert_eq!(links.len(), 1);
    assert_eq!(links[0].tags, vec![rock]);
}

#[tokio::test]
async fn failed_post_of_new_url_leaves_no_link() {
    let app = app().await;
    let (status, _) = call(
        &app,
        Method::POST,
        "/links",
        Some(json!({ "url": "http://new", "tags": [{ "id": "ghost" }] })),
    )
    .await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);

    assert!(get_links(&app, "/links").await.is_empty());
}

#[tokio::test]
async fn error_statuses_and_bodies() {
    let app = app().await;
    create_tag(&app, "rock").await;

    let (status, bytes) = call(&app, Method::POST, "/tags", Some(json!({ "name": "rock" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "conflict");

    let (status, _) = call(&app, Method::DELETE, "/links?id=nope", None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/tags")
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from("{\"name\":"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let response = app
        .clone()
        .oneshot(
            Request::builder()
                .method(Method::POST)
                .uri("/links")
                .body(Body::from("url=http://x"))
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["error"], "validation_error");

    assert!(get_links(&app, "/links?tags=,").await.is_empty());
}

#[tokio::test]
async fn health_reports_ok() {
    let app = app().await;
    let (status, bytes) = call(&app, Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(body["status"], "ok");
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_posts_share_one_link() {
    init_tracing();
    let dir = tempfile::tempdir().unwrap();
    let store = Store::open(dir.path().join("links.db"), 4).await.unwrap();
    let app = build_router(AppState::new(&store), Duration::from_secs(10));
    let tag = create_tag(&app, "live").await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let app = app.clone();
        let id = tag.id.clone();
        handles.push(tokio::spawn(async move {
            call(
                &app,
                Method::POST,
                "/links",
                Some(json!({ "url": "http://race", "tags": [{ "id": id }] })),
            )
            .await
        }));
    }

    let mut ids = Vec::new();
    for handle in handles {
        let (status, bytes) = handle.await.unwrap();
        assert_eq!(status, StatusCode::CREATED);
        let link: Link = serde_json::from_slice(&bytes).unwrap();
        ids.push(link.id);
    }
    ids.dedup();
    assert_eq!(ids.len(), 1);
    assert_eq!(get_links(&app, "/links").await.len(), 1);
}
