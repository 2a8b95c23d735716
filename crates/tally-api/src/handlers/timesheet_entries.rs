//! Timesheet entry handlers
//!
//! Entries are always the caller's own when listed; updates of other
//! members' entries are gated by role in the service.

use axum::{extract::State, Json};
use tally_core::TimesheetEntryId;
use tally_service::dto::{
    CreateTimesheetEntryRequest, TimesheetEntriesResponse, TimesheetEntryResponse,
    UpdateTimesheetEntryRequest,
};
use tally_service::TimesheetService;

use crate::extractors::{CurrentWorkspace, DateRangeParams, IdPath, JsonBody, QueryParams};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// GET /timesheet_entries?from=&to=
pub async fn list_entries(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    QueryParams(params): QueryParams<DateRangeParams>,
) -> ApiResult<Json<TimesheetEntriesResponse>> {
    let range = params.range()?;
    let service = TimesheetService::new(state.service_context());
    let response = service.list_entries(&workspace, range).await?;
    Ok(Json(response))
}

/// POST /timesheet_entries
pub async fn create_entry(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    JsonBody(request): JsonBody<CreateTimesheetEntryRequest>,
) -> ApiResult<Created<Json<TimesheetEntryResponse>>> {
    let service = TimesheetService::new(state.service_context());
    let response = service.create_entry(&workspace, request).await?;
    Ok(Created(Json(response)))
}

/// PATCH /timesheet_entries/{entry_id}
pub async fn update_entry(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    IdPath(entry_id): IdPath<TimesheetEntryId>,
    JsonBody(request): JsonBody<UpdateTimesheetEntryRequest>,
) -> ApiResult<Json<TimesheetEntryResponse>> {
    let service = TimesheetService::new(state.service_context());
    let response = service
        .update_entry(&workspace, entry_id, request)
        .await?;
    Ok(Json(response))
}
