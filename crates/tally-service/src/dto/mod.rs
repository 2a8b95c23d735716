//! Data transfer objects for API requests and responses
//!
//! This module provides:
//! - Request DTOs for API inputs
//! - Response DTOs for serializing API outputs
//! - Mappers for converting domain entities to DTOs

pub mod mappers;
pub mod requests;
pub mod responses;

pub use requests::{
    AddProjectMemberRequest, CreateClientRequest, CreateInvoiceLineItemsRequest,
    CreateProjectRequest, CreateTimesheetEntryRequest, UpdateClientRequest,
    UpdateTimesheetEntryRequest,
};

pub use responses::{
    ClientDetail, ClientListResponse, ClientResponse, ClientShowResponse, DiscardClientResponse,
    HealthChecks, HealthResponse, InvoiceLineItemResponse, InvoiceLineItemsResponse,
    LineItemEntriesResponse, LineItemEntryResponse, ProjectDetails, ProjectListResponse,
    ProjectResponse, ProjectShowResponse, ReadinessResponse, TeamMemberResponse,
    TimesheetEntriesResponse, TimesheetEntryResponse,
};
