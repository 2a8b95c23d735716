//! Error handling utilities for repositories

use sqlx::Error as SqlxError;
use tally_core::error::DomainError;

/// Convert SQLx error to DomainError
pub fn map_db_error(e: SqlxError) -> DomainError {
    DomainError::DatabaseError(e.to_string())
}

/// Check for unique violation and return appropriate error or fallback
pub fn map_unique_violation<F>(e: SqlxError, on_unique: F) -> DomainError
where
    F: FnOnce(Option<&str>) -> DomainError,
{
    if let Some(db_err) = e.as_database_error() {
        if db_err.is_unique_violation() {
            return on_unique(db_err.constraint());
        }
    }
    DomainError::DatabaseError(e.to_string())
}

/// Validation failure for a value another record already uses
pub fn taken(field: &'static str) -> DomainError {
    DomainError::field(field, "taken", "has already been taken")
}

/// Escape LIKE metacharacters so user text matches literally
pub fn escape_like(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        if matches!(ch, '\\' | '%' | '_') {
            out.push('\\');
        }
        out.push(ch);
    }
    out
}
