//! Repository implementations
//!
//! PostgreSQL implementations of the repository traits defined in tally-core.
//! Each repository handles database operations for a specific domain entity.

mod client;
mod company;
mod error;
mod invoice_line_item;
mod project;
mod timesheet_entry;
mod user;

pub use client::PgClientRepository;
pub use company::PgCompanyRepository;
pub use error::escape_like;
pub use invoice_line_item::PgInvoiceLineItemRepository;
pub use project::{build_project_list, PgProjectRepository};
pub use timesheet_entry::PgTimesheetEntryRepository;
pub use user::PgUserRepository;
