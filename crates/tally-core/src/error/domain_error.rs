//! Domain errors - error types for the domain layer

use std::borrow::Cow;
use thiserror::Error;
use validator::{ValidationError, ValidationErrors};

use crate::value_objects::{ClientId, CompanyId, CompanyRole, ProjectId, TimesheetEntryId, UserId};

/// Domain layer errors
#[derive(Debug, Error)]
pub enum DomainError {
    // =========================================================================
    // Not Found Errors
    // =========================================================================
    #[error("Company not found: {0}")]
    CompanyNotFound(CompanyId),

    #[error("User not found: {0}")]
    UserNotFound(UserId),

    #[error("Client not found: {0}")]
    ClientNotFound(ClientId),

    #[error("Project not found: {0}")]
    ProjectNotFound(ProjectId),

    #[error("Timesheet entry not found: {0}")]
    TimesheetEntryNotFound(TimesheetEntryId),

    #[error("User is not a member of this project")]
    ProjectMemberNotFound,

    // =========================================================================
    // Validation Errors
    // =========================================================================
    /// Record validation failure, collected per field
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Validation error: {0}")]
    ValidationError(String),

    // =========================================================================
    // Authorization Errors
    // =========================================================================
    #[error("No workspace selected")]
    NoCurrentWorkspace,

    #[error("Not a member of this workspace")]
    NotWorkspaceMember,

    #[error("Role {0} may not perform this action")]
    InsufficientRole(CompanyRole),

    // =========================================================================
    // Conflict Errors
    // =========================================================================
    #[error("User is already a member of this project")]
    AlreadyProjectMember,

    #[error("Timesheet entry is already billed")]
    AlreadyBilled,

    #[error("Timesheet entry {0} was changed by another request")]
    StaleTimesheetEntry(TimesheetEntryId),

    // =========================================================================
    // Infrastructure Errors (wrapped)
    // =========================================================================
    #[error("Database error: {0}")]
    DatabaseError(String),

    #[error("Search index error: {0}")]
    SearchError(String),

    #[error("Internal error: {0}")]
    InternalError(String),
}

impl DomainError {
    /// Single-field validation failure
    pub fn field(field: &'static str, code: &'static str, message: &'static str) -> Self {
        let mut errors = ValidationErrors::new();
        errors.add(
            field,
            ValidationError::new(code).with_message(Cow::Borrowed(message)),
        );
        Self::Validation(errors)
    }

    /// Get an error code string for API responses
    pub fn code(&self) -> &'static str {
        match self {
            // Not Found
            Self::CompanyNotFound(_) => "UNKNOWN_COMPANY",
            Self::UserNotFound(_) => "UNKNOWN_USER",
            Self::ClientNotFound(_) => "UNKNOWN_CLIENT",
            Self::ProjectNotFound(_) => "UNKNOWN_PROJECT",
            Self::TimesheetEntryNotFound(_) => "UNKNOWN_TIMESHEET_ENTRY",
            Self::ProjectMemberNotFound => "UNKNOWN_PROJECT_MEMBER",

            // Validation
            Self::Validation(_) => "RECORD_INVALID",
            Self::ValidationError(_) => "VALIDATION_ERROR",

            // Authorization
            Self::NoCurrentWorkspace => "NO_WORKSPACE",
            Self::NotWorkspaceMember => "NOT_WORKSPACE_MEMBER",
            Self::InsufficientRole(_) => "INSUFFICIENT_ROLE",

            // Conflict
            Self::AlreadyProjectMember => "ALREADY_PROJECT_MEMBER",
            Self::AlreadyBilled => "ALREADY_BILLED",
            Self::StaleTimesheetEntry(_) => "STALE_TIMESHEET_ENTRY",

            // Infrastructure
            Self::DatabaseError(_) => "DATABASE_ERROR",
            Self::SearchError(_) => "SEARCH_ERROR",
            Self::InternalError(_) => "INTERNAL_ERROR",
        }
    }

    /// Check if this is a "not found" error
    pub fn is_not_found(&self) -> bool {
        matches!(
            self,
            Self::CompanyNotFound(_)
                | Self::UserNotFound(_)
                | Self::ClientNotFound(_)
                | Self::ProjectNotFound(_)
                | Self::TimesheetEntryNotFound(_)
                | Self::ProjectMemberNotFound
        )
    }

    /// Check if this is a validation error
    pub fn is_validation(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::ValidationError(_))
    }

    /// Check if this is an authorization error
    pub fn is_authorization(&self) -> bool {
        matches!(
            self,
            Self::NoCurrentWorkspace | Self::NotWorkspaceMember | Self::InsufficientRole(_)
        )
    }

    /// Check if this is a conflict error
    pub fn is_conflict(&self) -> bool {
        matches!(
            self,
            Self::AlreadyProjectMember | Self::AlreadyBilled | Self::StaleTimesheetEntry(_)
        )
    }
}

impl From<ValidationErrors> for DomainError {
    fn from(errors: ValidationErrors) -> Self {
        Self::Validation(errors)
    }
}
