//! Domain entities - core business objects

mod client;
mod company;
mod invoice_line_item;
mod project;
mod timesheet_entry;
mod user;

pub use client::{Client, ClientChanges, NewClient};
pub use company::{Company, CompanyMember};
pub use invoice_line_item::{InvoiceLineItem, LineItemCandidate, NewInvoiceLineItem};
pub use project::{NewProject, Project, ProjectMember, TeamMember};
pub use timesheet_entry::{
    NewTimesheetEntry, TimesheetEntry, TimesheetEntryChanges, MAX_DURATION_MINUTES,
};
pub use user::{full_name, NewUser, User};
