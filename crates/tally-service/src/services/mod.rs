//! Business logic services
//!
//! This module contains all service layer implementations that handle
//! business logic, validation, and orchestration of domain operations.

pub mod client;
pub mod context;
pub mod error;
pub mod invoice;
pub mod project;
pub mod timesheet;
pub mod workspace;

// Re-export all services for convenience
pub use client::ClientService;
pub use context::{ServiceContext, ServiceContextBuilder};
pub use error::{ServiceError, ServiceResult};
pub use invoice::InvoiceService;
pub use project::ProjectService;
pub use timesheet::TimesheetService;
pub use workspace::{Workspace, WorkspaceService};
