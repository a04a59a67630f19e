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


//! HTTP API server
//!
//! axum router over the catalog. The [`Database`] is injected into the
//! router; handlers reach it through shared state, never a global.
//!
//! # Routes
//! - `GET  /health`
//! - `GET|POST /api/v1/books` (list with filters / create)
//! - `GET|PUT|DELETE /api/v1/books/{id}`
//! - `GET|POST /api/v1/collections`
//! - `GET|PUT|DELETE /api/v1/collections/{id}`
//! - `POST|DELETE /api/v1/collections/{id}/books/{book_id}`

pub mod handlers;

use crate::error::Result;
use crate::storage::Database;
use axum::routing::{get, post};
use axum::Router;
use std::net::SocketAddr;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Shared state handed to every handler
#[derive(Clone)]
pub struct AppState {
    pub db: Database,
}

/// Build the API router around an opened database
pub fn router(db: Database) -> Router {
    let state = AppState { db };

    // Permissive CORS; the catalog is a single-user tool
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(handlers::health))
        .route(
            "/api/v1/books",
            get(handlers::list_books).post(handlers::create_book),
        )
        .route(
            "/api/v1/books/:id",
            get(handlers::get_book)
                .put(handlers::update_book)
                .delete(handlers::delete_book),
        )
        .route(
            "/api/v1/collections",
            get(handlers::list_collections).post(handlers::create_collection),
        )
        .route(
            "/api/v1/collections/:id",
            get(handlers::get_collection)
                .put(handlers::update_collection)
                .delete(handlers::delete_collection),
        )
        .route(
            "/api/v1/collections/:id/books/:book_id",
            post(handlers::add_book_to_collection).delete(handlers::remove_book_from_collection),
        )
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

/// Bind the address and serve the API until the process stops
pub async fn serve(db: Database, addr: SocketAddr) -> Result<()> {
    let app = router(db);
    let listener = TcpListener::bind(addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
