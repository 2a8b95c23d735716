//! # tally-core
//!
//! Domain layer containing entities, value objects, the project query object,
//! the search projection and the repository traits.
//! This crate has zero dependencies on infrastructure (database, web framework, etc.).

pub mod entities;
pub mod error;
pub mod query;
pub mod search;
pub mod traits;
pub mod value_objects;

// Re-export commonly used types at crate root
pub use entities::{
    full_name, Client, ClientChanges, Company, CompanyMember, InvoiceLineItem, LineItemCandidate,
    NewClient, NewInvoiceLineItem, NewProject, NewTimesheetEntry, NewUser, Project, ProjectMember,
    TeamMember, TimesheetEntry, TimesheetEntryChanges, User, MAX_DURATION_MINUTES,
};
pub use error::DomainError;
pub use query::{ProjectFilter, ProjectPredicate, ProjectQuery, ProjectRecord, ProjectSummary};
pub use search::{EntryProjectionSource, EntrySearchDocument, SearchIndexSettings};
pub use traits::{
    ClientRepository, CompanyRepository, InvoiceLineItemRepository, ProjectRepository,
    RepoResult, SearchIndex, TimesheetEntryRepository, UserRepository,
};
pub use value_objects::{
    Actor, BillStatus, ClientId, CompanyId, CompanyRole, DateRange, IdParseError,
    InvoiceLineItemId, ProjectId, TimeFrame, TimesheetEntryId, TransitionError, UserId,
};
