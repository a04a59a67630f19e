//! Database models for Shelfmark
//!
//! Entity models for the catalog, mapped with sqlx.
//!
//! # SQLite Adaptations
//! - Dates stored as TEXT in `YYYY-MM-DD` format
//! - Timestamps stored as TEXT in ISO 8601 format, generated by SQLite itself
//! - The Book <-> Collection relationship uses a junction table with a
//!   composite primary key and cascading foreign keys to both parents

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

// ============================================================================
// MAIN ENTITIES
// ============================================================================

/// Book entity - one catalogued book
///
/// `id`, `created_at`, and `updated_at` are assigned by the storage engine;
/// callers never supply them. `created_at == updated_at` right after insert,
/// and every successful update refreshes `updated_at`.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Book {
    /// Primary key (auto-increment)
    pub id: i64,
    pub title: String,
    pub author: String,
    pub published_date: NaiveDate,
    #[sqlx(default)]
    pub edition: Option<String>,
    #[sqlx(default)]
    pub description: Option<String>,
    #[sqlx(default)]
    pub genre: Option<String>,

    // Timestamps
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Collection entity - a named group of books
///
/// Listing collections returns these bare rows; fetching a single
/// collection resolves the member books as a [`CollectionDetail`].
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct Collection {
    /// Primary key (auto-increment)
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Collection with its member books resolved through the junction table
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CollectionDetail {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    /// Member books in the order they were added to the collection
    pub books: Vec<Book>,
}

// ============================================================================
// JUNCTION TABLE (Many-to-Many Relationship)
// ============================================================================

/// CollectionBook - junction row for Collection <-> Book
///
/// Composite primary key: (collection_id, book_id). Rows are removed when
/// either parent is deleted (ON DELETE CASCADE).
#[derive(Debug, Clone, PartialEq, FromRow, Serialize, Deserialize)]
pub struct CollectionBook {
    pub collection_id: i64,
    pub book_id: i64,
    pub added_at: DateTime<Utc>,
}

// ============================================================================
// NEW RECORD STRUCTS (for inserts and updates)
// ============================================================================

/// Book fields supplied by a caller on create or update
///
/// `published_date` stays a string here: it is caller input and must pass
/// [`crate::validation::validate_book_fields`] before it reaches the
/// repository.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub published_date: String,
    #[serde(default)]
    pub edition: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub genre: Option<String>,
}

impl NewBook {
    pub fn new(title: String, author: String, published_date: String) -> Self {
        Self {
            title,
            author,
            published_date,
            edition: None,
            description: None,
            genre: None,
        }
    }
}

/// Collection fields supplied by a caller on create or update
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewCollection {
    pub name: String,
}

impl NewCollection {
    pub fn new(name: String) -> Self {
        Self { name }
    }
}

// ============================================================================
// QUERY FILTERS
// ============================================================================

/// Optional predicates narrowing a book listing
///
/// Every field may be omitted; omitted dimensions are not filtered on.
/// `author` and `genre` are exact matches, `from`/`to` are inclusive
/// bounds on `published_date`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookFilter {
    pub author: Option<String>,
    pub genre: Option<String>,
    pub from: Option<NaiveDate>,
    pub to: Option<NaiveDate>,
}
