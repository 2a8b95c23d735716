//! Database models - SQLx-compatible structs for PostgreSQL tables

mod client;
mod company;
mod invoice_line_item;
mod project;
mod timesheet_entry;
mod user;

pub use client::{ClientModel, LineItemCandidateModel};
pub use company::{CompanyMemberModel, CompanyModel};
pub use invoice_line_item::InvoiceLineItemModel;
pub use project::{ProjectModel, ProjectSummaryModel, TeamMemberModel};
pub use timesheet_entry::{EntryProjectionModel, TimesheetEntryModel};
pub use user::UserModel;
