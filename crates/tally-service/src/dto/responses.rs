//! Response DTOs for API endpoints
//!
//! All response DTOs implement `Serialize` for JSON output.
//! Record ids serialize as plain numbers, durations as minutes.

use chrono::{DateTime, NaiveDate, Utc};
use serde::Serialize;

use tally_core::{
    BillStatus, ClientId, InvoiceLineItemId, ProjectId, ProjectSummary, TimesheetEntryId, UserId,
};

// ============================================================================
// Client Responses
// ============================================================================

/// Client record
#[derive(Debug, Clone, Serialize)]
pub struct ClientResponse {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub client_code: String,
}

/// Client with the minutes logged in the requested time frame
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClientDetail {
    pub id: ClientId,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub minutes_spent: f64,
}

/// Per-project rollup of a client
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProjectDetails {
    pub name: String,
    /// Full names of the team members
    pub team: Vec<String>,
    pub minutes_spent: f64,
}

/// `GET /clients`
#[derive(Debug, Clone, Serialize)]
pub struct ClientListResponse {
    pub client_details: Vec<ClientDetail>,
    pub total_minutes: f64,
}

impl ClientListResponse {
    pub fn new(client_details: Vec<ClientDetail>) -> Self {
        let total_minutes = client_details.iter().map(|c| c.minutes_spent).sum();
        Self {
            client_details,
            total_minutes,
        }
    }
}

/// `GET /clients/:id`
#[derive(Debug, Clone, Serialize)]
pub struct ClientShowResponse {
    pub client_details: ClientDetail,
    pub project_details: Vec<ProjectDetails>,
    pub total_minutes: f64,
}

/// Result of discarding a client
#[derive(Debug, Clone, Serialize)]
pub struct DiscardClientResponse {
    pub id: ClientId,
    pub discarded_projects: u64,
}

// ============================================================================
// Project Responses
// ============================================================================

/// `GET /projects`
#[derive(Debug, Clone, Serialize)]
pub struct ProjectListResponse {
    pub projects: Vec<ProjectSummary>,
}

/// Project record
#[derive(Debug, Clone, Serialize)]
pub struct ProjectResponse {
    pub id: ProjectId,
    pub client_id: ClientId,
    pub name: String,
    pub description: Option<String>,
    pub is_billable: bool,
}

/// Team member of a project
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TeamMemberResponse {
    pub user_id: UserId,
    pub full_name: String,
    pub hourly_rate: f64,
}

/// `GET /projects/:id`
#[derive(Debug, Clone, Serialize)]
pub struct ProjectShowResponse {
    #[serde(flatten)]
    pub project: ProjectResponse,
    pub client_name: String,
    pub team: Vec<TeamMemberResponse>,
    pub minutes_spent: f64,
}

// ============================================================================
// Timesheet Responses
// ============================================================================

/// Entry snippet with the related names resolved
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TimesheetEntryResponse {
    pub id: TimesheetEntryId,
    pub project: String,
    pub project_id: ProjectId,
    pub client: String,
    pub duration: f64,
    pub formatted_duration: String,
    pub note: String,
    pub work_date: NaiveDate,
    pub bill_status: BillStatus,
    pub team_member: String,
}

/// `GET /timesheet_entries`
#[derive(Debug, Clone, Serialize)]
pub struct TimesheetEntriesResponse {
    pub entries: Vec<TimesheetEntryResponse>,
}

// ============================================================================
// Invoice Responses
// ============================================================================

/// Unbilled entry offered for invoicing
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LineItemEntryResponse {
    pub timesheet_entry_id: TimesheetEntryId,
    pub first_name: String,
    pub last_name: String,
    pub name: String,
    pub date: NaiveDate,
    pub description: String,
    pub rate: f64,
    pub qty: f64,
}

/// `GET /clients/:id/line_item_entries`
#[derive(Debug, Clone, Serialize)]
pub struct LineItemEntriesResponse {
    pub new_line_item_entries: Vec<LineItemEntryResponse>,
}

/// Invoice line item
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLineItemResponse {
    pub id: InvoiceLineItemId,
    pub timesheet_entry_id: TimesheetEntryId,
    pub client_id: ClientId,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub rate: f64,
    pub quantity: f64,
    pub amount: f64,
}

/// `POST /clients/:id/invoice_line_items`
#[derive(Debug, Clone, Serialize)]
pub struct InvoiceLineItemsResponse {
    pub line_items: Vec<InvoiceLineItemResponse>,
}

// ============================================================================
// Health Responses
// ============================================================================

/// Basic health check response
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
}

impl HealthResponse {
    pub fn healthy() -> Self {
        Self {
            status: "healthy".to_string(),
            timestamp: Utc::now(),
        }
    }
}

/// Readiness check response
#[derive(Debug, Clone, Serialize)]
pub struct ReadinessResponse {
    pub status: String,
    pub timestamp: DateTime<Utc>,
    pub checks: HealthChecks,
}

/// Health check status for each backing service
#[derive(Debug, Clone, Serialize)]
pub struct HealthChecks {
    pub database: String,
    /// `None` when no Redis is configured
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redis: Option<String>,
}

fn health_label(healthy: bool) -> String {
    if healthy { "healthy" } else { "unhealthy" }.to_string()
}

impl ReadinessResponse {
    /// `redis_healthy` is `None` when the search backend does not use Redis
    pub fn ready(database_healthy: bool, redis_healthy: Option<bool>) -> Self {
        let all_healthy = database_healthy && redis_healthy.unwrap_or(true);
        Self {
            status: if all_healthy { "ready" } else { "not_ready" }.to_string(),
            timestamp: Utc::now(),
            checks: HealthChecks {
                database: health_label(database_healthy),
                redis: redis_healthy.map(health_label),
            },
        }
    }

    pub fn is_ready(&self) -> bool {
        self.status == "ready"
    }
}
