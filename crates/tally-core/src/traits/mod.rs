//! Ports implemented by the infrastructure crates

mod repositories;
mod search;

pub use repositories::{
    ClientRepository, CompanyRepository, InvoiceLineItemRepository, ProjectRepository,
    RepoResult, TimesheetEntryRepository, UserRepository,
};
pub use search::SearchIndex;
