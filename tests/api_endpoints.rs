//! Book API Endpoint Tests
//!
//! Drives the full router (health, CORS, `/api/books`) in-process and checks
//! the HTTP contract:
//! - create returns 201 with a fresh id; list contains it exactly once
//! - partial update merges; unknown ids give `null`
//! - delete returns 204 whether or not the id existed
//! - malformed input is a 400 with an error body

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{header, Method, Request, StatusCode};
use axum::Router;
use bookshelf::http_server::{HttpServer, HttpServerConfig};
use bookshelf::rest_api::ServiceContext;
use bookshelf::storage::FileStore;
use serde_json::{json, Value};
use tempfile::TempDir;
use tower::ServiceExt;

// =============================================================================
// Test Utilities
// =============================================================================

fn app() -> Router {
    HttpServer::with_context(HttpServerConfig::default(), ServiceContext::in_memory()).router()
}

/// Router over the file backend `serve` uses by default
fn file_app(data_dir: &TempDir) -> Router {
    let store = FileStore::open(data_dir.path()).unwrap();
    HttpServer::with_context(
        HttpServerConfig::default(),
        ServiceContext::new(Arc::new(store)),
    )
    .router()
}

async fn send(app: &Router, method: Method, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let builder = Request::builder().method(method).uri(uri);
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, body)
}

async fn create_dune(app: &Router) -> Value {
    let (status, body) = send(
        app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Dune", "author": "Herbert", "publishedYear": 1965 })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    body
}

fn id_of(book: &Value) -> String {
    book["_id"].as_str().unwrap().to_string()
}

// =============================================================================
// End-to-end scenarios
// =============================================================================

/// Scenario 1: POST then GET lists exactly the created record.
#[tokio::test]
async fn test_create_then_list() {
    let app = app();

    let created = create_dune(&app).await;
    assert_eq!(created["title"], "Dune");
    assert_eq!(created["author"], "Herbert");
    assert_eq!(created["publishedYear"], 1965);
    let id = id_of(&created);
    assert!(!id.is_empty());

    let (status, list) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(list, json!([created]));
}

/// Scenario 2: PUT with a subset merges into the stored record.
#[tokio::test]
async fn test_partial_update_merges() {
    let app = app();
    let created = create_dune(&app).await;
    let id = id_of(&created);

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{}", id),
        Some(json!({ "publishedYear": 1966 })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["_id"], id.as_str());
    assert_eq!(updated["title"], "Dune");
    assert_eq!(updated["author"], "Herbert");
    assert_eq!(updated["publishedYear"], 1966);

    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list, json!([updated]));
}

/// Scenario 3: DELETE removes the record from later lists.
#[tokio::test]
async fn test_delete_removes_record() {
    let app = app();
    let created = create_dune(&app).await;
    let id = id_of(&created);

    let (status, body) = send(&app, Method::DELETE, &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert_eq!(body, Value::Null);

    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list, json!([]));
}

/// Scenarios 1-3 against the file backend, checked again after reopening.
#[tokio::test]
async fn test_scenarios_on_file_store() {
    let data_dir = TempDir::new().unwrap();
    let app = file_app(&data_dir);

    let created = create_dune(&app).await;
    let id = id_of(&created);
    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list, json!([created]));

    let (status, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{}", id),
        Some(json!({ "publishedYear": 1966 })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Dune");
    assert_eq!(updated["author"], "Herbert");
    assert_eq!(updated["publishedYear"], 1966);

    // Only one store holds the file at a time.
    drop(app);
    let app = file_app(&data_dir);
    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list, json!([updated]));

    let (status, _) = send(&app, Method::DELETE, &format!("/api/books/{}", id), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    drop(app);
    let app = file_app(&data_dir);
    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list, json!([]));
}

// =============================================================================
// Contract details
// =============================================================================

#[tokio::test]
async fn test_delete_is_idempotent() {
    let app = app();
    let id = id_of(&create_dune(&app).await);
    let uri = format!("/api/books/{}", id);

    let (first, _) = send(&app, Method::DELETE, &uri, None).await;
    let (second, _) = send(&app, Method::DELETE, &uri, None).await;
    let (never, _) = send(
        &app,
        Method::DELETE,
        "/api/books/00000000-0000-4000-8000-000000000000",
        None,
    )
    .await;

    assert_eq!(first, StatusCode::NO_CONTENT);
    assert_eq!(second, StatusCode::NO_CONTENT);
    assert_eq!(never, StatusCode::NO_CONTENT);
}

#[tokio::test]
async fn test_update_of_unknown_id_returns_null() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::PUT,
        "/api/books/00000000-0000-4000-8000-000000000000",
        Some(json!({ "title": "Ghost" })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, Value::Null);
}

#[tokio::test]
async fn test_ids_are_unique_and_list_keeps_insertion_order() {
    let app = app();

    let mut ids = Vec::new();
    for title in ["A", "B", "C"] {
        let (_, book) = send(
            &app,
            Method::POST,
            "/api/books",
            Some(json!({ "title": title, "author": "X", "publishedYear": 2000 })),
        )
        .await;
        ids.push(id_of(&book));
    }

    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    let titles: Vec<_> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|b| b["title"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(titles, vec!["A", "B", "C"]);

    ids.sort();
    ids.dedup();
    assert_eq!(ids.len(), 3);
}

#[tokio::test]
async fn test_client_supplied_id_and_unknown_fields_are_ignored() {
    let app = app();

    let (status, book) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "_id": "00000000-0000-4000-8000-000000000000",
            "title": "Dune",
            "author": "Herbert",
            "publishedYear": 1965,
            "isbn": "0441013597"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    assert_ne!(book["_id"], "00000000-0000-4000-8000-000000000000");
    assert!(book.get("isbn").is_none());
}

#[tokio::test]
async fn test_description_is_optional_and_round_trips() {
    let app = app();

    let (_, book) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({
            "title": "Dune",
            "author": "Herbert",
            "description": "Spice",
            "publishedYear": 1965
        })),
    )
    .await;
    assert_eq!(book["description"], "Spice");

    let (_, updated) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{}", id_of(&book)),
        Some(json!({ "title": "Dune Messiah" })),
    )
    .await;
    assert_eq!(updated["title"], "Dune Messiah");
    assert_eq!(updated["description"], "Spice");

    // An empty description clears it; the key disappears as on create.
    let (status, cleared) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{}", id_of(&book)),
        Some(json!({ "description": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert!(cleared.get("description").is_none());
    assert_eq!(cleared["title"], "Dune Messiah");
}

// =============================================================================
// Client errors
// =============================================================================

#[tokio::test]
async fn test_create_with_missing_fields_is_rejected() {
    let app = app();

    let (status, body) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Dune", "publishedYear": 1965 })),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 400);
    assert_eq!(body["error"], "Missing required fields: author");

    let (_, list) = send(&app, Method::GET, "/api/books", None).await;
    assert_eq!(list, json!([]));
}

#[tokio::test]
async fn test_wrong_types_are_rejected() {
    let app = app();
    let id = id_of(&create_dune(&app).await);

    let (status, _) = send(
        &app,
        Method::POST,
        "/api/books",
        Some(json!({ "title": "Dune", "author": "Herbert", "publishedYear": "soon" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(
        &app,
        Method::PUT,
        &format!("/api/books/{}", id),
        Some(json!({ "author": "" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid value for 'author': must not be blank");
}

#[tokio::test]
async fn test_malformed_id_is_rejected() {
    let app = app();

    let (status, _) = send(
        &app,
        Method::PUT,
        "/api/books/42",
        Some(json!({ "title": "x" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_health() {
    let (status, body) = send(&app(), Method::GET, "/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}
