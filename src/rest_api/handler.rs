//! # Book Handlers
//!
//! Bodies are taken as raw JSON and parsed into [`NewBook`] / [`BookPatch`]
//! here, so every client error leaves through [`RestError`] with the same
//! error shape.

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    routing::{get, put},
    Json, Router,
};
use serde_json::Value;
use tracing::info;

use crate::book::{Book, BookId, BookPatch, NewBook};

use super::context::ServiceContext;
use super::errors::{RestError, RestResult};

/// Create book routes. Mounted under `/api` by the HTTP server.
pub fn book_routes(ctx: ServiceContext) -> Router {
    Router::new()
        .route("/books", get(list_books_handler).post(create_book_handler))
        .route(
            "/books/:id",
            put(update_book_handler).delete(delete_book_handler),
        )
        .with_state(ctx)
}

fn json_body(body: Result<Json<Value>, JsonRejection>) -> RestResult<Value> {
    body.map(|Json(value)| value)
        .map_err(|rejection| RestError::InvalidBody(rejection.body_text()))
}

async fn create_book_handler(
    State(ctx): State<ServiceContext>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<(StatusCode, Json<Book>)> {
    let new_book = NewBook::from_value(json_body(body)?)?;
    let book = ctx.store().insert(new_book)?;

    info!(id = %book.id, title = %book.title, "created book");
    Ok((StatusCode::CREATED, Json(book)))
}

async fn list_books_handler(State(ctx): State<ServiceContext>) -> RestResult<Json<Vec<Book>>> {
    Ok(Json(ctx.store().list()?))
}

/// Responds with `null` when the id does not exist.
async fn update_book_handler(
    State(ctx): State<ServiceContext>,
    Path(id): Path<String>,
    body: Result<Json<Value>, JsonRejection>,
) -> RestResult<Json<Option<Book>>> {
    let id: BookId = id.parse()?;
    let patch = BookPatch::from_value(json_body(body)?)?;
    let book = ctx.store().update(&id, patch)?;

    info!(id = %id, found = book.is_some(), "updated book");
    Ok(Json(book))
}

/// Responds 204 whether or not the id existed.
async fn delete_book_handler(
    State(ctx): State<ServiceContext>,
    Path(id): Path<String>,
) -> RestResult<StatusCode> {
    let id: BookId = id.parse()?;
    let existed = ctx.store().delete(&id)?;

    info!(id = %id, existed, "deleted book");
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{header, Request};
    use serde_json::json;
    use tower::ServiceExt;

    fn app() -> Router {
        book_routes(ServiceContext::in_memory())
    }

    async fn body_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    #[tokio::test]
    async fn test_list_starts_empty() {
        let response = app()
            .oneshot(Request::get("/books").body(Body::empty()).unwrap())
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await, json!([]));
    }

    #[tokio::test]
    async fn test_create_without_json_content_type_is_rejected() {
        let response = app()
            .oneshot(
                Request::post("/books")
                    .body(Body::from(r#"{"title":"Dune"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert_eq!(body["code"], 400);
        assert!(body["error"]
            .as_str()
            .unwrap()
            .starts_with("Invalid request body"));
    }

    #[tokio::test]
    async fn test_create_with_broken_json_is_rejected() {
        let response = app()
            .oneshot(
                Request::post("/books")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from("{\"title\":"))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_malformed_id_is_rejected() {
        let response = app()
            .oneshot(
                Request::delete("/books/not-a-uuid")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await["error"],
            "Invalid book id: not-a-uuid"
        );
    }
}
