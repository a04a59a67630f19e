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


//! Shelfmark - personal library catalog
//!
//! Books and named collections of books over SQLite, exposed through an
//! HTTP API ([`server`]) and consumed by a typed HTTP client ([`client`]).
//! The `shelfmark-server` and `shelfmark-cli` binaries are thin shells
//! around these modules.

pub mod client;
pub mod error;
pub mod server;
pub mod storage;
pub mod validation;

pub use client::CatalogClient;
pub use error::{Result, ShelfmarkError};

/// Crate version, surfaced by both binaries
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
