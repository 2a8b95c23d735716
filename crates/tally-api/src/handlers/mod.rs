//! Route handlers
//!
//! All HTTP request handlers organized by resource.

pub mod clients;
pub mod health;
pub mod invoices;
pub mod projects;
pub mod timesheet_entries;
