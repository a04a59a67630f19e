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


//! Shelfmark CLI
//!
//! Command-line client for the catalog API. Every subcommand maps to one
//! API operation; book fields are validated locally before a request is
//! sent, with the same rules the server applies.

use clap::{Parser, Subcommand};
use shelfmark::storage::models::{Book, BookFilter, Collection, NewBook, NewCollection};
use shelfmark::{validation, CatalogClient, Result};

#[derive(Parser)]
#[command(name = "shelfmark-cli")]
#[command(about = "Shelfmark CLI - manage your library catalog", long_about = None)]
#[command(version)]
struct Cli {
    /// Base URL of the catalog server
    #[arg(long, global = true, default_value = "http://localhost:8080")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage books
    Book {
        #[command(subcommand)]
        command: BookCommands,
    },
    /// Manage collections
    Collection {
        #[command(subcommand)]
        command: CollectionCommands,
    },
}

#[derive(Subcommand)]
enum BookCommands {
    /// Add a new book
    Add {
        /// Title of the book
        #[arg(long)]
        title: String,
        /// Author of the book
        #[arg(long)]
        author: String,
        /// Published date (YYYY-MM-DD)
        #[arg(long)]
        published: String,
        /// Edition of the book
        #[arg(long)]
        edition: Option<String>,
        /// Description of the book
        #[arg(long)]
        description: Option<String>,
        /// Genre of the book
        #[arg(long)]
        genre: Option<String>,
    },
    /// List books
    List {
        /// Filter books by author
        #[arg(long)]
        author: Option<String>,
        /// Filter books by genre
        #[arg(long)]
        genre: Option<String>,
        /// Only books published on or after this date (YYYY-MM-DD)
        #[arg(long)]
        from: Option<String>,
        /// Only books published on or before this date (YYYY-MM-DD)
        #[arg(long)]
        to: Option<String>,
    },
    /// Get details of a specific book
    Get {
        /// ID of the book
        id: i64,
    },
    /// Update a book's information
    Update {
        /// ID of the book
        id: i64,
        /// Title of the book
        #[arg(long)]
        title: String,
        /// Author of the book
        #[arg(long)]
        author: String,
        /// Published date (YYYY-MM-DD)
        #[arg(long)]
        published: String,
        /// Edition of the book
        #[arg(long)]
        edition: Option<String>,
        /// Description of the book
        #[arg(long)]
        description: Option<String>,
        /// Genre of the book
        #[arg(long)]
        genre: Option<String>,
    },
    /// Delete a book
    Delete {
        /// ID of the book
        id: i64,
    },
}

#[derive(Subcommand)]
enum CollectionCommands {
    /// Create a new collection
    Create {
        /// Name of the collection
        #[arg(long)]
        name: String,
    },
    /// List all collections
    List,
    /// Get a collection and its books
    Get {
        /// ID of the collection
        id: i64,
    },
    /// Rename a collection
    Update {
        /// ID of the collection
        id: i64,
        /// New name of the collection
        #[arg(long)]
        name: String,
    },
    /// Delete a collection
    Delete {
        /// ID of the collection
        id: i64,
    },
    /// Add a book to a collection
    AddBook {
        /// ID of the collection
        collection_id: i64,
        /// ID of the book
        book_id: i64,
    },
    /// Remove a book from a collection
    RemoveBook {
        /// ID of the collection
        collection_id: i64,
        /// ID of the book
        book_id: i64,
    },
}

fn build_book(
    title: String,
    author: String,
    published: String,
    edition: Option<String>,
    description: Option<String>,
    genre: Option<String>,
) -> Result<NewBook> {
    // Same checks the server runs; fail fast before any request goes out
    validation::validate_book_fields(&title, &author, &published)?;

    let mut book = NewBook::new(title, author, published);
    book.edition = edition;
    book.description = description;
    book.genre = genre;
    Ok(book)
}

fn build_filter(
    author: Option<String>,
    genre: Option<String>,
    from: Option<String>,
    to: Option<String>,
) -> Result<BookFilter> {
    Ok(BookFilter {
        author,
        genre,
        from: from.map(|s| validation::parse_date(&s)).transpose()?,
        to: to.map(|s| validation::parse_date(&s)).transpose()?,
    })
}

fn print_books_table(books: &[Book]) {
    if books.is_empty() {
        println!("No books found");
        return;
    }
    println!(
        "{:<6} {:<32} {:<24} {:<12} {:<10} {:<16}",
        "ID", "TITLE", "AUTHOR", "PUBLISHED", "EDITION", "GENRE"
    );
    for book in books {
        println!(
            "{:<6} {:<32} {:<24} {:<12} {:<10} {:<16}",
            book.id,
            book.title,
            book.author,
            book.published_date.to_string(),
            book.edition.as_deref().unwrap_or("-"),
            book.genre.as_deref().unwrap_or("-"),
        );
    }
}

fn print_collections_table(collections: &[Collection]) {
    if collections.is_empty() {
        println!("No collections found");
        return;
    }
    println!("{:<6} {:<32} {:<20}", "ID", "NAME", "CREATED");
    for collection in collections {
        println!(
            "{:<6} {:<32} {:<20}",
            collection.id,
            collection.name,
            collection.created_at.format("%Y-%m-%d %H:%M").to_string(),
        );
    }
}

async fn run_book_command(client: &CatalogClient, command: BookCommands) -> Result<()> {
    match command {
        BookCommands::Add { title, author, published, edition, description, genre } => {
            let book = build_book(title, author, published, edition, description, genre)?;
            let created = client.create_book(&book).await?;
            println!("Book {} added successfully", created.id);
        }
        BookCommands::List { author, genre, from, to } => {
            let filter = build_filter(author, genre, from, to)?;
            let books = client.list_books(&filter).await?;
            print_books_table(&books);
        }
        BookCommands::Get { id } => {
            let book = client.get_book(id).await?;
            print_books_table(std::slice::from_ref(&book));
            if let Some(description) = &book.description {
                println!("\n{description}");
            }
        }
        BookCommands::Update { id, title, author, published, edition, description, genre } => {
            let book = build_book(title, author, published, edition, description, genre)?;
            client.update_book(id, &book).await?;
            println!("Book {id} updated successfully");
        }
        BookCommands::Delete { id } => {
            client.delete_book(id).await?;
            println!("Book {id} deleted successfully");
        }
    }
    Ok(())
}

async fn run_collection_command(client: &CatalogClient, command: CollectionCommands) -> Result<()> {
    match command {
        CollectionCommands::Create { name } => {
            validation::validate_collection_fields(&name)?;
            let created = client.create_collection(&NewCollection::new(name)).await?;
            println!("Collection {} created successfully", created.id);
        }
        CollectionCommands::List => {
            let collections = client.list_collections().await?;
            print_collections_table(&collections);
        }
        CollectionCommands::Get { id } => {
            let detail = client.get_collection(id).await?;
            println!("Collection {}: {}\n", detail.id, detail.name);
            print_books_table(&detail.books);
        }
        CollectionCommands::Update { id, name } => {
            validation::validate_collection_fields(&name)?;
            client.update_collection(id, &NewCollection::new(name)).await?;
            println!("Collection {id} updated successfully");
        }
        CollectionCommands::Delete { id } => {
            client.delete_collection(id).await?;
            println!("Collection {id} deleted successfully");
        }
        CollectionCommands::AddBook { collection_id, book_id } => {
            client.add_book_to_collection(collection_id, book_id).await?;
            println!("Book {book_id} added to collection {collection_id}");
        }
        CollectionCommands::RemoveBook { collection_id, book_id } => {
            client.remove_book_from_collection(collection_id, book_id).await?;
            println!("Book {book_id} removed from collection {collection_id}");
        }
    }
    Ok(())
}

async fn run(cli: Cli) -> Result<()> {
    let client = CatalogClient::new(&cli.server)?;

    match cli.command {
        Commands::Book { command } => run_book_command(&client, command).await,
        Commands::Collection { command } => run_collection_command(&client, command).await,
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(err) = run(cli).await {
        eprintln!("Error: {err}");
        std::process::exit(1);
    }
}
