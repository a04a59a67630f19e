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


//! Shelfmark API server binary
//!
//! Opens (or creates) the catalog database and serves the HTTP API.

use anyhow::Context;
use clap::Parser;
use shelfmark::server;
use shelfmark::storage::Database;
use std::net::SocketAddr;
use tracing_subscriber::{fmt, EnvFilter};

/// Shelfmark API server
#[derive(Parser, Debug)]
#[command(name = "shelfmark-server")]
#[command(about = "Personal library catalog API server")]
#[command(version)]
struct Args {
    /// Path to the SQLite database file (created if missing)
    #[arg(short, long, default_value = "./shelfmark.db")]
    database: String,

    /// Listen address (host:port)
    #[arg(short, long, default_value = "127.0.0.1:8080")]
    listen: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing/logging
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,shelfmark=debug"));

    fmt().with_env_filter(filter).init();

    let args = Args::parse();

    let addr: SocketAddr = args
        .listen
        .parse()
        .with_context(|| format!("invalid listen address {:?}", args.listen))?;

    tracing::info!("Shelfmark server v{}", shelfmark::VERSION);
    tracing::info!("Database: {}", args.database);

    let db = Database::new(&args.database)
        .await
        .with_context(|| format!("failed to open database at {:?}", args.database))?;

    server::serve(db, addr).await?;

    Ok(())
}
