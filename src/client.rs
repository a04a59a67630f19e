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


//! HTTP client for the catalog API
//!
//! Typed wrapper around `reqwest::Client` with one method per API
//! operation. Error responses are translated back into the
//! [`ShelfmarkError`] taxonomy from their status code, so callers handle
//! a remote miss the same way they would a local one.

use crate::error::{Result, ShelfmarkError};
use crate::storage::models::{
    Book, BookFilter, Collection, CollectionDetail, NewBook, NewCollection,
};
use reqwest::{Client, Response, StatusCode};
use std::time::Duration;

/// Default request timeout in seconds
const DEFAULT_TIMEOUT_SECS: u64 = 10;

/// Client for the Shelfmark HTTP API
#[derive(Debug, Clone)]
pub struct CatalogClient {
    base_url: String,
    http: Client,
}

impl CatalogClient {
    /// Create a client for the API at `base_url` (e.g. `http://localhost:8080`)
    pub fn new<S: Into<String>>(base_url: S) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            http,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// Pass a successful response through, or translate the error body
    async fn ensure_success(response: Response) -> Result<Response> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let endpoint = response.url().path().to_string();
        let message = match response.json::<serde_json::Value>().await {
            Ok(body) => body
                .get("error")
                .and_then(|e| e.as_str())
                .map(str::to_string)
                .unwrap_or_else(|| format!("server returned {status}")),
            Err(_) => format!("server returned {status}"),
        };

        Err(error_from_status(status, message, endpoint))
    }

    // =========================================================================
    // Books
    // =========================================================================

    /// List books, optionally narrowed by the filter
    pub async fn list_books(&self, filter: &BookFilter) -> Result<Vec<Book>> {
        let mut params: Vec<(&str, String)> = Vec::new();
        if let Some(author) = &filter.author {
            params.push(("author", author.clone()));
        }
        if let Some(genre) = &filter.genre {
            params.push(("genre", genre.clone()));
        }
        if let Some(from) = &filter.from {
            params.push(("from", from.to_string()));
        }
        if let Some(to) = &filter.to {
            params.push(("to", to.to_string()));
        }

        let response = self
            .http
            .get(self.url("/api/v1/books"))
            .query(&params)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Get a single book by id
    pub async fn get_book(&self, id: i64) -> Result<Book> {
        let response = self
            .http
            .get(self.url(&format!("/api/v1/books/{id}")))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Create a book; returns the stored book with its assigned id
    pub async fn create_book(&self, book: &NewBook) -> Result<Book> {
        let response = self
            .http
            .post(self.url("/api/v1/books"))
            .json(book)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Replace a book's fields; returns the updated book
    pub async fn update_book(&self, id: i64, book: &NewBook) -> Result<Book> {
        let response = self
            .http
            .put(self.url(&format!("/api/v1/books/{id}")))
            .json(book)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Delete a book
    pub async fn delete_book(&self, id: i64) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/v1/books/{id}")))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    // =========================================================================
    // Collections
    // =========================================================================

    /// List all collections (without member books)
    pub async fn list_collections(&self) -> Result<Vec<Collection>> {
        let response = self.http.get(self.url("/api/v1/collections")).send().await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Get a single collection with its member books
    pub async fn get_collection(&self, id: i64) -> Result<CollectionDetail> {
        let response = self
            .http
            .get(self.url(&format!("/api/v1/collections/{id}")))
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Create a collection; returns the stored collection with its id
    pub async fn create_collection(&self, collection: &NewCollection) -> Result<Collection> {
        let response = self
            .http
            .post(self.url("/api/v1/collections"))
            .json(collection)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Rename a collection; returns the updated collection
    pub async fn update_collection(
        &self,
        id: i64,
        collection: &NewCollection,
    ) -> Result<Collection> {
        let response = self
            .http
            .put(self.url(&format!("/api/v1/collections/{id}")))
            .json(collection)
            .send()
            .await?;
        let response = Self::ensure_success(response).await?;
        Ok(response.json().await?)
    }

    /// Delete a collection
    pub async fn delete_collection(&self, id: i64) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/v1/collections/{id}")))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    // =========================================================================
    // Membership
    // =========================================================================

    /// Add a book to a collection
    pub async fn add_book_to_collection(&self, collection_id: i64, book_id: i64) -> Result<()> {
        let response = self
            .http
            .post(self.url(&format!("/api/v1/collections/{collection_id}/books/{book_id}")))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }

    /// Remove a book from a collection
    pub async fn remove_book_from_collection(
        &self,
        collection_id: i64,
        book_id: i64,
    ) -> Result<()> {
        let response = self
            .http
            .delete(self.url(&format!("/api/v1/collections/{collection_id}/books/{book_id}")))
            .send()
            .await?;
        Self::ensure_success(response).await?;
        Ok(())
    }
}

/// Reconstruct an error kind from a response status and body message
///
/// The Display prefixes/suffixes the server baked into the message are
/// stripped before re-wrapping, so errors don't stutter ("Invalid input:
/// Invalid input: ...") after the round trip.
fn error_from_status(status: StatusCode, message: String, endpoint: String) -> ShelfmarkError {
    match status {
        StatusCode::BAD_REQUEST => {
            let msg = message.strip_prefix("Invalid input: ").unwrap_or(&message);
            ShelfmarkError::invalid_input(msg)
        }
        StatusCode::NOT_FOUND => {
            let msg = message.strip_suffix(" not found").unwrap_or(&message);
            ShelfmarkError::not_found(msg)
        }
        StatusCode::CONFLICT => ShelfmarkError::conflict(message),
        _ => ShelfmarkError::api_failed(message, Some(status.as_u16()), Some(endpoint)),
    }
}
