//! Integration test for the catalog API
//!
//! Boots the real server on an ephemeral port and drives it through
//! `CatalogClient`, end to end over HTTP: create a book and a collection,
//! associate them, read the collection back, and check that error kinds
//! survive the round trip.

use shelfmark::server::router;
use shelfmark::storage::models::{BookFilter, NewBook, NewCollection};
use shelfmark::storage::Database;
use shelfmark::{CatalogClient, ShelfmarkError};
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// Start the API on an ephemeral port, returning its address
async fn start_server() -> Result<SocketAddr, Box<dyn std::error::Error>> {
    let db = Database::new_in_memory().await?;
    let app = router(db);

    let listener = TcpListener::bind("127.0.0.1:0").await?;
    let addr = listener.local_addr()?;

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("server crashed");
    });

    Ok(addr)
}

async fn connect() -> Result<CatalogClient, Box<dyn std::error::Error>> {
    let addr = start_server().await?;
    Ok(CatalogClient::new(format!("http://{addr}"))?)
}

#[tokio::test]
async fn test_full_catalog_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;

    // Create a book
    let dune = client
        .create_book(&NewBook::new(
            "Dune".to_string(),
            "Herbert".to_string(),
            "1965-08-01".to_string(),
        ))
        .await?;
    assert_eq!(dune.id, 1);
    assert_eq!(dune.title, "Dune");
    assert_eq!(dune.created_at, dune.updated_at);

    // Create a collection
    let scifi = client
        .create_collection(&NewCollection::new("Sci-Fi".to_string()))
        .await?;
    assert_eq!(scifi.id, 1);

    // Associate and read back
    client.add_book_to_collection(1, 1).await?;

    let detail = client.get_collection(1).await?;
    assert_eq!(detail.name, "Sci-Fi");
    assert_eq!(detail.books.len(), 1);
    assert_eq!(detail.books[0].title, "Dune");

    // Dissociate and read back
    client.remove_book_from_collection(1, 1).await?;

    let detail = client.get_collection(1).await?;
    assert!(detail.books.is_empty());

    Ok(())
}

#[tokio::test]
async fn test_list_books_with_filters_over_http() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;

    let mut dune = NewBook::new(
        "Dune".to_string(),
        "Frank Herbert".to_string(),
        "1965-08-01".to_string(),
    );
    dune.genre = Some("Sci-Fi".to_string());
    client.create_book(&dune).await?;

    let mut hobbit = NewBook::new(
        "The Hobbit".to_string(),
        "J.R.R. Tolkien".to_string(),
        "1937-09-21".to_string(),
    );
    hobbit.genre = Some("Fantasy".to_string());
    client.create_book(&hobbit).await?;

    let all = client.list_books(&BookFilter::default()).await?;
    assert_eq!(all.len(), 2);

    let filtered = client
        .list_books(&BookFilter {
            author: Some("Frank Herbert".to_string()),
            genre: Some("Sci-Fi".to_string()),
            ..Default::default()
        })
        .await?;
    assert_eq!(filtered.len(), 1);
    assert_eq!(filtered[0].title, "Dune");

    let in_range = client
        .list_books(&BookFilter {
            from: Some("1930-01-01".parse()?),
            to: Some("1940-01-01".parse()?),
            ..Default::default()
        })
        .await?;
    assert_eq!(in_range.len(), 1);
    assert_eq!(in_range[0].title, "The Hobbit");

    Ok(())
}

#[tokio::test]
async fn test_update_over_http_bumps_timestamp() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;

    let created = client
        .create_book(&NewBook::new(
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "1965-08-01".to_string(),
        ))
        .await?;

    tokio::time::sleep(std::time::Duration::from_millis(20)).await;

    let mut fields = NewBook::new(
        "Dune".to_string(),
        "Frank Herbert".to_string(),
        "1965-08-01".to_string(),
    );
    fields.genre = Some("Classic Sci-Fi".to_string());
    let updated = client.update_book(created.id, &fields).await?;

    assert_eq!(updated.genre.as_deref(), Some("Classic Sci-Fi"));
    assert_eq!(updated.created_at, created.created_at);
    assert!(updated.updated_at > created.updated_at);

    Ok(())
}

#[tokio::test]
async fn test_error_kinds_survive_the_round_trip() -> Result<(), Box<dyn std::error::Error>> {
    let client = connect().await?;

    // Missing entity
    let err = client.get_book(42).await.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got {err:?}");
    assert_eq!(err.to_string(), "book 42 not found");

    // Validation failure before any row is written
    let err = client
        .create_book(&NewBook::new(
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "1965-13-99".to_string(),
        ))
        .await
        .unwrap_err();
    assert!(err.is_invalid_input(), "expected InvalidInput, got {err:?}");
    assert!(client.list_books(&BookFilter::default()).await?.is_empty());

    // Duplicate membership
    client
        .create_book(&NewBook::new(
            "Dune".to_string(),
            "Frank Herbert".to_string(),
            "1965-08-01".to_string(),
        ))
        .await?;
    client
        .create_collection(&NewCollection::new("Sci-Fi".to_string()))
        .await?;
    client.add_book_to_collection(1, 1).await?;

    let err = client.add_book_to_collection(1, 1).await.unwrap_err();
    assert!(err.is_conflict(), "expected Conflict, got {err:?}");

    // Membership against a missing book
    let err = client.add_book_to_collection(1, 99).await.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got {err:?}");

    // Removing a non-member
    client.remove_book_from_collection(1, 1).await?;
    let err = client.remove_book_from_collection(1, 1).await.unwrap_err();
    assert!(err.is_not_found(), "expected NotFound, got {err:?}");

    // Deleting a missing collection
    let err = client.delete_collection(42).await.unwrap_err();
    assert!(matches!(err, ShelfmarkError::NotFound(_)));

    Ok(())
}
