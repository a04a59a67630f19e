// Shelfmark - Personal Library Catalog
// Copyright (C) 2026 Shelfmark contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.
//
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE. See the
// GNU General Public License for more details.
//
// You should have received a copy of the GNU General Public License
// along with this program. If not, see <https://www.gnu.org/licenses/>.


//! HTTP handlers
//!
//! Thin glue: parse transport input, validate, call into the repository,
//! map the error taxonomy onto status codes. Status mapping:
//!
//! | Error kind     | Status |
//! |----------------|--------|
//! | `InvalidInput` | 400    |
//! | `NotFound`     | 404    |
//! | `Conflict`     | 409    |
//! | anything else  | 500    |

use super::AppState;
use crate::error::ShelfmarkError;
use crate::storage::models::{Book, BookFilter, Collection, CollectionDetail, NewBook, NewCollection};
use crate::storage::queries;
use crate::validation;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;
use serde_json::json;

/// Error wrapper that renders the taxonomy as an HTTP response
pub struct ApiError(ShelfmarkError);

impl<E: Into<ShelfmarkError>> From<E> for ApiError {
    fn from(err: E) -> Self {
        Self(err.into())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self.0 {
            ShelfmarkError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ShelfmarkError::NotFound(_) => StatusCode::NOT_FOUND,
            ShelfmarkError::Conflict(_) => StatusCode::CONFLICT,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self.0, "request failed");
        }

        (status, Json(json!({ "error": self.0.to_string() }))).into_response()
    }
}

/// Query parameters accepted by the book listing
///
/// Empty strings count as absent, so `?author=` lists everything.
#[derive(Debug, Default, Deserialize)]
pub struct BookListParams {
    pub author: Option<String>,
    pub genre: Option<String>,
    pub from: Option<String>,
    pub to: Option<String>,
}

impl BookListParams {
    fn into_filter(self) -> crate::Result<BookFilter> {
        let present = |v: Option<String>| v.filter(|s| !s.is_empty());

        let from = present(self.from).map(|s| validation::parse_date(&s)).transpose()?;
        let to = present(self.to).map(|s| validation::parse_date(&s)).transpose()?;

        Ok(BookFilter {
            author: present(self.author),
            genre: present(self.genre),
            from,
            to,
        })
    }
}

/// Liveness probe
pub async fn health() -> &'static str {
    "ok"
}

// ============================================================================
// BOOK HANDLERS
// ============================================================================

pub async fn list_books(
    State(state): State<AppState>,
    Query(params): Query<BookListParams>,
) -> Result<Json<Vec<Book>>, ApiError> {
    let filter = params.into_filter()?;
    let books = queries::list_books(state.db.pool(), &filter).await?;
    Ok(Json(books))
}

pub async fn create_book(
    State(state): State<AppState>,
    Json(payload): Json<NewBook>,
) -> Result<(StatusCode, Json<Book>), ApiError> {
    validation::validate_book_fields(&payload.title, &payload.author, &payload.published_date)?;

    let id = queries::insert_book(state.db.pool(), &payload).await?;
    let book = queries::get_book(state.db.pool(), id).await?;
    Ok((StatusCode::CREATED, Json(book)))
}

pub async fn get_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Book>, ApiError> {
    let book = queries::get_book(state.db.pool(), id).await?;
    Ok(Json(book))
}

pub async fn update_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewBook>,
) -> Result<Json<Book>, ApiError> {
    validation::validate_book_fields(&payload.title, &payload.author, &payload.published_date)?;

    let book = queries::update_book(state.db.pool(), id, &payload).await?;
    Ok(Json(book))
}

pub async fn delete_book(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    queries::delete_book(state.db.pool(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// COLLECTION HANDLERS
// ============================================================================

pub async fn list_collections(
    State(state): State<AppState>,
) -> Result<Json<Vec<Collection>>, ApiError> {
    let collections = queries::list_collections(state.db.pool()).await?;
    Ok(Json(collections))
}

pub async fn create_collection(
    State(state): State<AppState>,
    Json(payload): Json<NewCollection>,
) -> Result<(StatusCode, Json<Collection>), ApiError> {
    validation::validate_collection_fields(&payload.name)?;

    let id = queries::insert_collection(state.db.pool(), &payload).await?;
    let collection = queries::get_collection_row(state.db.pool(), id).await?;
    Ok((StatusCode::CREATED, Json(collection)))
}

pub async fn get_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<CollectionDetail>, ApiError> {
    let detail = queries::get_collection(state.db.pool(), id).await?;
    Ok(Json(detail))
}

pub async fn update_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(payload): Json<NewCollection>,
) -> Result<Json<Collection>, ApiError> {
    validation::validate_collection_fields(&payload.name)?;

    let collection = queries::update_collection(state.db.pool(), id, &payload).await?;
    Ok(Json(collection))
}

pub async fn delete_collection(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    queries::delete_collection(state.db.pool(), id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ============================================================================
// MEMBERSHIP HANDLERS
// ============================================================================

pub async fn add_book_to_collection(
    State(state): State<AppState>,
    Path((id, book_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    queries::add_member(state.db.pool(), id, book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

pub async fn remove_book_from_collection(
    State(state): State<AppState>,
    Path((id, book_id)): Path<(i64, i64)>,
) -> Result<StatusCode, ApiError> {
    queries::remove_member(state.db.pool(), id, book_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

#[cfg(test)]
mod tests {
    use crate::server::router;
    use crate::storage::models::Book;
    use crate::storage::Database;
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use axum::Router;
    use tower::ServiceExt;

    async fn test_app() -> Router {
        let db = Database::new_in_memory().await.expect("Failed to create database");
        router(db)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .expect("Failed to build request")
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder()
            .uri(uri)
            .body(Body::empty())
            .expect("Failed to build request")
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("Failed to read body");
        serde_json::from_slice(&bytes).expect("Body was not valid JSON")
    }

    const DUNE: &str = r#"{
        "title": "Dune",
        "author": "Frank Herbert",
        "published_date": "1965-08-01",
        "genre": "Sci-Fi"
    }"#;

    #[tokio::test]
    async fn test_health() {
        let app = test_app().await;
        let response = app.oneshot(get("/health")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_create_book_returns_201() {
        let app = test_app().await;

        let response = app.oneshot(post_json("/api/v1/books", DUNE)).await.unwrap();
        assert_eq!(response.status(), StatusCode::CREATED);

        let body = body_json(response).await;
        assert_eq!(body["id"], 1);
        assert_eq!(body["title"], "Dune");
        assert_eq!(body["published_date"], "1965-08-01");
        assert_eq!(body["created_at"], body["updated_at"]);
    }

    #[tokio::test]
    async fn test_create_book_invalid_date_writes_nothing() {
        let app = test_app().await;

        let bad = r#"{"title": "Dune", "author": "Frank Herbert", "published_date": "1965-13-99"}"#;
        let response = app.clone().oneshot(post_json("/api/v1/books", bad)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = body_json(response).await;
        assert!(body["error"].as_str().unwrap().contains("1965-13-99"));

        // Rejected before persistence: nothing was written
        let response = app.oneshot(get("/api/v1/books")).await.unwrap();
        let books: Vec<Book> = serde_json::from_value(body_json(response).await).unwrap();
        assert!(books.is_empty());
    }

    #[tokio::test]
    async fn test_create_book_missing_fields() {
        let app = test_app().await;

        let bad = r#"{"title": "", "author": "Frank Herbert", "published_date": "1965-08-01"}"#;
        let response = app.oneshot(post_json("/api/v1/books", bad)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_book_is_404() {
        let app = test_app().await;

        let response = app.oneshot(get("/api/v1/books/42")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_json(response).await;
        assert_eq!(body["error"], "book 42 not found");
    }

    #[tokio::test]
    async fn test_list_books_with_filters() {
        let app = test_app().await;

        app.clone().oneshot(post_json("/api/v1/books", DUNE)).await.unwrap();
        let hobbit = r#"{"title": "The Hobbit", "author": "J.R.R. Tolkien", "published_date": "1937-09-21", "genre": "Fantasy"}"#;
        app.clone().oneshot(post_json("/api/v1/books", hobbit)).await.unwrap();

        let response = app
            .clone()
            .oneshot(get("/api/v1/books?author=Frank%20Herbert"))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let books: Vec<Book> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(books.len(), 1);
        assert_eq!(books[0].title, "Dune");

        // Empty parameters are ignored, not matched literally
        let response = app
            .clone()
            .oneshot(get("/api/v1/books?author=&genre="))
            .await
            .unwrap();
        let books: Vec<Book> = serde_json::from_value(body_json(response).await).unwrap();
        assert_eq!(books.len(), 2);

        // Malformed date bound is rejected up front
        let response = app.oneshot(get("/api/v1/books?from=yesterday")).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_update_book() {
        let app = test_app().await;

        app.clone().oneshot(post_json("/api/v1/books", DUNE)).await.unwrap();

        let updated = r#"{"title": "Dune", "author": "Frank Herbert", "published_date": "1965-08-01", "genre": "Classic Sci-Fi"}"#;
        let request = Request::builder()
            .method("PUT")
            .uri("/api/v1/books/1")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(updated))
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        assert_eq!(body["genre"], "Classic Sci-Fi");

        // Updating a missing id is 404, not a silent no-op
        let request = Request::builder()
            .method("PUT")
            .uri("/api/v1/books/42")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(updated))
            .unwrap();
        let response = app.oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_delete_book() {
        let app = test_app().await;

        app.clone().oneshot(post_json("/api/v1/books", DUNE)).await.unwrap();

        let request = Request::builder()
            .method("DELETE")
            .uri("/api/v1/books/1")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        let response = app.oneshot(get("/api/v1/books/1")).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_collection_membership_statuses() {
        let app = test_app().await;

        app.clone().oneshot(post_json("/api/v1/books", DUNE)).await.unwrap();
        app.clone()
            .oneshot(post_json("/api/v1/collections", r#"{"name": "Sci-Fi"}"#))
            .await
            .unwrap();

        let add = || {
            Request::builder()
                .method("POST")
                .uri("/api/v1/collections/1/books/1")
                .body(Body::empty())
                .unwrap()
        };

        let response = app.clone().oneshot(add()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Same pair again: 409
        let response = app.clone().oneshot(add()).await.unwrap();
        assert_eq!(response.status(), StatusCode::CONFLICT);

        // Unknown book id: 404 via the foreign key
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/collections/1/books/42")
            .body(Body::empty())
            .unwrap();
        let response = app.clone().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.clone().oneshot(get("/api/v1/collections/1")).await.unwrap();
        let body = body_json(response).await;
        assert_eq!(body["books"].as_array().unwrap().len(), 1);
        assert_eq!(body["books"][0]["title"], "Dune");

        let remove = || {
            Request::builder()
                .method("DELETE")
                .uri("/api/v1/collections/1/books/1")
                .body(Body::empty())
                .unwrap()
        };
        let response = app.clone().oneshot(remove()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NO_CONTENT);

        // Removing a non-member: 404
        let response = app.clone().oneshot(remove()).await.unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = app.oneshot(get("/api/v1/collections/1")).await.unwrap();
        let body = body_json(response).await;
        assert!(body["books"].as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_collection_requires_name() {
        let app = test_app().await;

        let response = app
            .oneshot(post_json("/api/v1/collections", r#"{"name": ""}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_list_collections_has_no_books_field() {
        let app = test_app().await;

        app.clone()
            .oneshot(post_json("/api/v1/collections", r#"{"name": "Sci-Fi"}"#))
            .await
            .unwrap();

        let response = app.oneshot(get("/api/v1/collections")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = body_json(response).await;
        let list = body.as_array().unwrap();
        assert_eq!(list.len(), 1);
        assert_eq!(list[0]["name"], "Sci-Fi");
        // Books are only resolved when fetching a single collection
        assert!(list[0].get("books").is_none());
    }
}
