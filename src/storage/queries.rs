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


//! Database query functions
//!
//! Repository for the two catalog entities plus the membership relation
//! between them. All functions take the pool explicitly; there is no shared
//! handle hidden in a global.
//!
//! # Query Patterns
//! - Async/await for all database operations
//! - `rows_affected() == 0` surfaces as NotFound on update/delete, so a
//!   missing id never turns into a silent no-op write
//! - Timestamps are written by SQLite itself (`strftime` in the statement
//!   or the column default), never bound from the caller
//! - Duplicate membership is the junction table's primary-key violation,
//!   translated to Conflict; a dangling collection/book id is the
//!   foreign-key violation, translated to NotFound

use crate::error::{Result, ShelfmarkError};
use crate::storage::models::{
    Book, BookFilter, Collection, CollectionBook, CollectionDetail, NewBook, NewCollection,
};
use sqlx::SqlitePool;

const BOOK_COLUMNS: &str =
    "id, title, author, published_date, edition, description, genre, created_at, updated_at";

// ============================================================================
// BOOK QUERIES
// ============================================================================

/// Insert a new book
///
/// Fields must already have passed validation. Both timestamps are set to
/// the same statement clock by the column defaults.
///
/// Returns the id of the inserted book.
pub async fn insert_book(pool: &SqlitePool, book: &NewBook) -> Result<i64> {
    let result = sqlx::query(
        r#"
        INSERT INTO books (title, author, published_date, edition, description, genre)
        VALUES (?, ?, ?, ?, ?, ?)
        "#,
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.published_date)
    .bind(&book.edition)
    .bind(&book.description)
    .bind(&book.genre)
    .execute(pool)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Get a book by id, failing with NotFound if no row matches
pub async fn get_book(pool: &SqlitePool, id: i64) -> Result<Book> {
    let book = sqlx::query_as::<_, Book>(&format!("SELECT {BOOK_COLUMNS} FROM books WHERE id = ?"))
        .bind(id)
        .fetch_optional(pool)
        .await?;

    book.ok_or_else(|| ShelfmarkError::not_found(format!("book {id}")))
}

/// List books matching the filter, in insertion order
///
/// Omitted filter dimensions are not constrained. An empty result is Ok,
/// not an error.
pub async fn list_books(pool: &SqlitePool, filter: &BookFilter) -> Result<Vec<Book>> {
    let mut query: sqlx::QueryBuilder<sqlx::Sqlite> =
        sqlx::QueryBuilder::new(format!("SELECT {BOOK_COLUMNS} FROM books WHERE 1=1"));

    if let Some(author) = &filter.author {
        query.push(" AND author = ").push_bind(author);
    }
    if let Some(genre) = &filter.genre {
        query.push(" AND genre = ").push_bind(genre);
    }
    if let Some(from) = &filter.from {
        query.push(" AND published_date >= ").push_bind(from);
    }
    if let Some(to) = &filter.to {
        query.push(" AND published_date <= ").push_bind(to);
    }
    query.push(" ORDER BY id");

    let books = query.build_query_as::<Book>().fetch_all(pool).await?;

    Ok(books)
}

/// Replace a book's mutable fields
///
/// `updated_at` is refreshed unconditionally, even when the new values equal
/// the old ones; `created_at` is never touched. Fails with NotFound when the
/// id does not exist.
///
/// Returns the updated row.
pub async fn update_book(pool: &SqlitePool, id: i64, book: &NewBook) -> Result<Book> {
    let result = sqlx::query(
        r#"
        UPDATE books SET
            title = ?, author = ?, published_date = ?,
            edition = ?, description = ?, genre = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
        WHERE id = ?
        "#,
    )
    .bind(&book.title)
    .bind(&book.author)
    .bind(&book.published_date)
    .bind(&book.edition)
    .bind(&book.description)
    .bind(&book.genre)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfmarkError::not_found(format!("book {id}")));
    }

    get_book(pool, id).await
}

/// Delete a book (memberships are removed via CASCADE)
///
/// Fails with NotFound when the id does not exist.
pub async fn delete_book(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM books WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfmarkError::not_found(format!("book {id}")));
    }

    Ok(())
}

// ============================================================================
// COLLECTION QUERIES
// ============================================================================

/// Insert a new collection
///
/// Returns the id of the inserted collection.
pub async fn insert_collection(pool: &SqlitePool, collection: &NewCollection) -> Result<i64> {
    let result = sqlx::query("INSERT INTO collections (name) VALUES (?)")
        .bind(&collection.name)
        .execute(pool)
        .await?;

    Ok(result.last_insert_rowid())
}

/// Get a bare collection row by id, failing with NotFound if no row matches
pub async fn get_collection_row(pool: &SqlitePool, id: i64) -> Result<Collection> {
    let collection = sqlx::query_as::<_, Collection>(
        "SELECT id, name, created_at, updated_at FROM collections WHERE id = ?",
    )
    .bind(id)
    .fetch_optional(pool)
    .await?;

    collection.ok_or_else(|| ShelfmarkError::not_found(format!("collection {id}")))
}

/// Get a collection by id with its member books resolved
///
/// Member books come back in the order they were added. Fails with NotFound
/// if no collection matches.
pub async fn get_collection(pool: &SqlitePool, id: i64) -> Result<CollectionDetail> {
    let collection = get_collection_row(pool, id).await?;

    let books = sqlx::query_as::<_, Book>(
        r#"
        SELECT b.id, b.title, b.author, b.published_date, b.edition,
               b.description, b.genre, b.created_at, b.updated_at
        FROM books b
        JOIN collection_books cb ON b.id = cb.book_id
        WHERE cb.collection_id = ?
        ORDER BY cb.added_at, b.id
        "#,
    )
    .bind(id)
    .fetch_all(pool)
    .await?;

    Ok(CollectionDetail {
        id: collection.id,
        name: collection.name,
        created_at: collection.created_at,
        updated_at: collection.updated_at,
        books,
    })
}

/// List all collections, in insertion order, without resolving books
pub async fn list_collections(pool: &SqlitePool) -> Result<Vec<Collection>> {
    let collections = sqlx::query_as::<_, Collection>(
        "SELECT id, name, created_at, updated_at FROM collections ORDER BY id",
    )
    .fetch_all(pool)
    .await?;

    Ok(collections)
}

/// Rename a collection
///
/// Same timestamp contract as [`update_book`]. Fails with NotFound when the
/// id does not exist. Returns the updated row.
pub async fn update_collection(
    pool: &SqlitePool,
    id: i64,
    collection: &NewCollection,
) -> Result<Collection> {
    let result = sqlx::query(
        r#"
        UPDATE collections SET
            name = ?,
            updated_at = strftime('%Y-%m-%dT%H:%M:%fZ','now')
        WHERE id = ?
        "#,
    )
    .bind(&collection.name)
    .bind(id)
    .execute(pool)
    .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfmarkError::not_found(format!("collection {id}")));
    }

    get_collection_row(pool, id).await
}

/// Delete a collection (memberships are removed via CASCADE, books survive)
///
/// Fails with NotFound when the id does not exist.
pub async fn delete_collection(pool: &SqlitePool, id: i64) -> Result<()> {
    let result = sqlx::query("DELETE FROM collections WHERE id = ?")
        .bind(id)
        .execute(pool)
        .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfmarkError::not_found(format!("collection {id}")));
    }

    Ok(())
}

// ============================================================================
// MEMBERSHIP QUERIES
// ============================================================================

/// Check whether a book belongs to a collection
///
/// Only fails on storage errors; a missing pair is simply `false`.
pub async fn is_member(pool: &SqlitePool, collection_id: i64, book_id: i64) -> Result<bool> {
    let row: Option<CollectionBook> = sqlx::query_as(
        r#"
        SELECT collection_id, book_id, added_at
        FROM collection_books
        WHERE collection_id = ? AND book_id = ?
        "#,
    )
    .bind(collection_id)
    .bind(book_id)
    .fetch_optional(pool)
    .await?;

    Ok(row.is_some())
}

/// Add a book to a collection
///
/// A bare INSERT: the junction table's constraints decide the outcome, so
/// concurrent duplicate inserts cannot both succeed. Fails with Conflict
/// when the pair already exists and with NotFound when either the
/// collection or the book is missing.
pub async fn add_member(pool: &SqlitePool, collection_id: i64, book_id: i64) -> Result<()> {
    let result = sqlx::query("INSERT INTO collection_books (collection_id, book_id) VALUES (?, ?)")
        .bind(collection_id)
        .bind(book_id)
        .execute(pool)
        .await;

    match result {
        Ok(_) => Ok(()),
        Err(sqlx::Error::Database(db_err))
            if matches!(db_err.kind(), sqlx::error::ErrorKind::UniqueViolation) =>
        {
            Err(ShelfmarkError::conflict(format!(
                "book {book_id} is already in collection {collection_id}"
            )))
        }
        Err(sqlx::Error::Database(db_err))
            if matches!(db_err.kind(), sqlx::error::ErrorKind::ForeignKeyViolation) =>
        {
            Err(ShelfmarkError::not_found(format!(
                "collection {collection_id} or book {book_id}"
            )))
        }
        Err(e) => Err(e.into()),
    }
}

/// Remove a book from a collection
///
/// Fails with NotFound when no such membership exists.
pub async fn remove_member(pool: &SqlitePool, collection_id: i64, book_id: i64) -> Result<()> {
    let result =
        sqlx::query("DELETE FROM collection_books WHERE collection_id = ? AND book_id = ?")
            .bind(collection_id)
            .bind(book_id)
            .execute(pool)
            .await?;

    if result.rows_affected() == 0 {
        return Err(ShelfmarkError::not_found(format!(
            "book {book_id} in collection {collection_id}"
        )));
    }

    Ok(())
}
