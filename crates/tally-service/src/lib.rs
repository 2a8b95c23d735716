//! # tally-service
//!
//! Application layer containing business logic, services, and DTOs.

pub mod dto;
pub mod services;

pub use services::{
    ClientService, InvoiceService, ProjectService, ServiceContext, ServiceContextBuilder,
    ServiceError, ServiceResult, TimesheetService, Workspace, WorkspaceService,
};
