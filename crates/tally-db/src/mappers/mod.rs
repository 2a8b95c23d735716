//! Entity to model mappers
//!
//! Conversions from database rows (`models`) into domain objects (tally-core).
//! Rows whose stored enums no longer parse map to `DomainError::DatabaseError`.

mod client;
mod company;
mod invoice_line_item;
mod project;
mod timesheet_entry;
mod user;

pub use timesheet_entry::entries_from_models;
