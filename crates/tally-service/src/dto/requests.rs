//! Request DTOs for API endpoints
//!
//! All request DTOs implement `Deserialize`; the ones checked before any
//! record is touched also implement `Validate`.

use chrono::NaiveDate;
use serde::Deserialize;
use validator::Validate;

use tally_core::{
    BillStatus, ClientChanges, ClientId, ProjectId, TimesheetEntryChanges, TimesheetEntryId,
    UserId,
};

// ============================================================================
// Client Requests
// ============================================================================

/// Create client request; record rules are enforced on `NewClient`
#[derive(Debug, Clone, Deserialize)]
pub struct CreateClientRequest {
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub client_code: String,
}

/// Update client request
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateClientRequest {
    pub name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub client_code: Option<String>,
}

impl From<UpdateClientRequest> for ClientChanges {
    fn from(req: UpdateClientRequest) -> Self {
        Self {
            name: req.name,
            email: req.email,
            phone: req.phone,
            address: req.address,
            client_code: req.client_code,
        }
    }
}

// ============================================================================
// Project Requests
// ============================================================================

/// Create project request
#[derive(Debug, Clone, Deserialize)]
pub struct CreateProjectRequest {
    pub client_id: ClientId,
    pub name: String,
    pub description: Option<String>,
    #[serde(default)]
    pub billable: bool,
}

/// Add a user to a project team
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct AddProjectMemberRequest {
    pub user_id: UserId,

    #[validate(range(min = 0.0, message = "must be greater than or equal to 0"))]
    pub hourly_rate: f64,
}

// ============================================================================
// Timesheet Requests
// ============================================================================

/// Log time against a project
#[derive(Debug, Clone, Deserialize)]
pub struct CreateTimesheetEntryRequest {
    pub project_id: ProjectId,
    pub work_date: NaiveDate,
    /// Minutes
    pub duration: f64,
    #[serde(default)]
    pub note: String,
    pub bill_status: Option<BillStatus>,
}

/// Partial update of an entry
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateTimesheetEntryRequest {
    pub project_id: Option<ProjectId>,
    pub work_date: Option<NaiveDate>,
    pub duration: Option<f64>,
    pub note: Option<String>,
    pub bill_status: Option<BillStatus>,
}

impl From<UpdateTimesheetEntryRequest> for TimesheetEntryChanges {
    fn from(req: UpdateTimesheetEntryRequest) -> Self {
        Self {
            project_id: req.project_id,
            work_date: req.work_date,
            duration: req.duration,
            note: req.note,
            bill_status: req.bill_status,
        }
    }
}

// ============================================================================
// Invoice Requests
// ============================================================================

/// Bill the selected entries of a client
#[derive(Debug, Clone, Deserialize, Validate)]
pub struct CreateInvoiceLineItemsRequest {
    #[validate(length(min = 1, message = "select at least one entry"))]
    pub timesheet_entry_ids: Vec<TimesheetEntryId>,
}
