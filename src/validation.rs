// Shelfmark - Personal Library Catalog
// Copyright (C) 2026 Shelfmark contributors
//
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU General Public License as published by
// the Free Software Foundation, either version 3 of the License, or
// (at your option) any later version.


//! Input validation
//!
//! Pure field-presence and date-format checks, shared by the HTTP handlers
//! and the CLI so the rules cannot drift between the two entry points.
//! Nothing here touches the database.

use crate::error::{Result, ShelfmarkError};
use chrono::NaiveDate;

/// Date format required for `published_date` and for list filter bounds
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Validate the required book fields and the published date format.
///
/// `edition`, `description`, and `genre` are optional and not checked.
/// The date must be a real calendar date written as `YYYY-MM-DD`;
/// `2024-02-30` and `1965-13-99` are both rejected.
pub fn validate_book_fields(title: &str, author: &str, published_date: &str) -> Result<()> {
    if title.is_empty() || author.is_empty() || published_date.is_empty() {
        return Err(ShelfmarkError::invalid_input(
            "title, author, and published date are required",
        ));
    }
    parse_date(published_date)?;
    Ok(())
}

/// Validate the required collection fields.
pub fn validate_collection_fields(name: &str) -> Result<()> {
    if name.is_empty() {
        return Err(ShelfmarkError::invalid_input("collection name is required"));
    }
    Ok(())
}

/// Parse a `YYYY-MM-DD` string into a calendar date.
///
/// Round-trips the parsed date back through the format so unpadded
/// variants like `1965-8-1` are rejected, not silently normalized.
pub fn parse_date(value: &str) -> Result<NaiveDate> {
    let date = NaiveDate::parse_from_str(value, DATE_FORMAT).map_err(|_| {
        ShelfmarkError::invalid_input(format!(
            "invalid date {value:?}, expected YYYY-MM-DD"
        ))
    })?;
    if date.format(DATE_FORMAT).to_string() != value {
        return Err(ShelfmarkError::invalid_input(format!(
            "invalid date {value:?}, expected YYYY-MM-DD"
        )));
    }
    Ok(date)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_book_fields() {
        validate_book_fields("Dune", "Frank Herbert", "1965-08-01")
            .expect("valid fields rejected");
    }

    #[test]
    fn test_missing_required_fields() {
        assert!(validate_book_fields("", "Frank Herbert", "1965-08-01")
            .unwrap_err()
            .is_invalid_input());
        assert!(validate_book_fields("Dune", "", "1965-08-01")
            .unwrap_err()
            .is_invalid_input());
        assert!(validate_book_fields("Dune", "Frank Herbert", "")
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_impossible_calendar_dates() {
        assert!(validate_book_fields("Dune", "Frank Herbert", "1965-13-99")
            .unwrap_err()
            .is_invalid_input());
        assert!(validate_book_fields("Dune", "Frank Herbert", "2024-02-30")
            .unwrap_err()
            .is_invalid_input());
    }

    #[test]
    fn test_malformed_date_strings() {
        for bad in ["1965/08/01", "01-08-1965", "1965-8-1", "not-a-date"] {
            assert!(
                parse_date(bad).is_err(),
                "date {bad:?} should have been rejected"
            );
        }
    }

    #[test]
    fn test_leap_day() {
        parse_date("2024-02-29").expect("2024 is a leap year");
        assert!(parse_date("2023-02-29").is_err());
    }

    #[test]
    fn test_collection_name_required() {
        assert!(validate_collection_fields("").unwrap_err().is_invalid_input());
        validate_collection_fields("Sci-Fi").expect("valid name rejected");
    }
}
