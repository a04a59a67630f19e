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


//! Database storage and models
//!
//! This module handles all database operations using SQLite via sqlx.
//!
//! # Database Schema
//! - books: catalogued books (title, author, publication date, metadata)
//! - collections: named groups of books
//! - collection_books: many-to-many junction with cascading deletes
//!
//! # Usage Example
//! ```no_run
//! use shelfmark::storage::{queries, Database, NewBook};
//!
//! # async fn example() -> shelfmark::Result<()> {
//! let db = Database::new("./catalog.db").await?;
//!
//! let new_book = NewBook::new(
//!     "Dune".to_string(),
//!     "Frank Herbert".to_string(),
//!     "1965-08-01".to_string(),
//! );
//! let id = queries::insert_book(db.pool(), &new_book).await?;
//!
//! let book = queries::get_book(db.pool(), id).await?;
//! # Ok(())
//! # }
//! ```

pub mod database;
pub mod migrations;
pub mod models;
pub mod queries;

// Re-export commonly used types
pub use database::Database;
pub use models::{
    Book, BookFilter, Collection, CollectionBook, CollectionDetail, NewBook, NewCollection,
};
