//! Timesheet service
//!
//! Logging and editing time. Every write goes through the bill status guard
//! on the entity and is followed by a re-projection into the search index.

use futures::future::try_join_all;
use tracing::{info, instrument, warn};

use tally_core::{
    DateRange, DomainError, EntryProjectionSource, NewTimesheetEntry, TimesheetEntryChanges,
    TimesheetEntryId,
};

use crate::dto::{
    CreateTimesheetEntryRequest, TimesheetEntriesResponse, TimesheetEntryResponse,
    UpdateTimesheetEntryRequest,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::workspace::{Workspace, WorkspaceService};

/// Timesheet service
pub struct TimesheetService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> TimesheetService<'a> {
    /// Create a new TimesheetService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// The caller's entries between two dates, most recent first
    #[instrument(skip(self, workspace), fields(company_id = %workspace.company_id))]
    pub async fn list_entries(
        &self,
        workspace: &Workspace,
        range: DateRange,
    ) -> ServiceResult<TimesheetEntriesResponse> {
        let entries = self
            .ctx
            .entry_repo()
            .find_by_user_during(workspace.user_id, workspace.company_id, range)
            .await?;

        let sources = try_join_all(entries.iter().map(|entry| self.source(entry.id))).await?;

        Ok(TimesheetEntriesResponse {
            entries: sources.iter().map(TimesheetEntryResponse::from).collect(),
        })
    }

    /// Log time for the caller
    ///
    /// The bill status defaults from the project's billable flag; asking for
    /// `billed` is rejected.
    #[instrument(skip(self, workspace, request), fields(company_id = %workspace.company_id))]
    pub async fn create_entry(
        &self,
        workspace: &Workspace,
        request: CreateTimesheetEntryRequest,
    ) -> ServiceResult<TimesheetEntryResponse> {
        let project = WorkspaceService::new(self.ctx)
            .kept_project(workspace, request.project_id)
            .await?;

        let new_entry = NewTimesheetEntry {
            project_id: project.id,
            user_id: workspace.user_id,
            work_date: request.work_date,
            duration: request.duration,
            note: request.note,
            bill_status: request.bill_status,
        };
        let bill_status = new_entry.resolve_bill_status(project.billable)?;

        let entry = self.ctx.entry_repo().create(&new_entry, bill_status).await?;
        info!(entry_id = %entry.id, bill_status = %entry.bill_status, "Timesheet entry created");

        let source = self.source(entry.id).await?;
        self.ctx.search_indexer().reproject(&source);

        Ok(TimesheetEntryResponse::from(&source))
    }

    /// Edit an entry on behalf of the caller
    ///
    /// Employees edit their own entries; managers may edit any entry of the
    /// workspace. Leaving `billed` needs a billing role.
    #[instrument(skip(self, workspace, request), fields(company_id = %workspace.company_id))]
    pub async fn update_entry(
        &self,
        workspace: &Workspace,
        entry_id: TimesheetEntryId,
        request: UpdateTimesheetEntryRequest,
    ) -> ServiceResult<TimesheetEntryResponse> {
        let workspaces = WorkspaceService::new(self.ctx);
        let mut entry = self
            .ctx
            .entry_repo()
            .find_by_id(entry_id)
            .await?
            .ok_or(DomainError::TimesheetEntryNotFound(entry_id))?;

        let in_workspace = self.ctx.project_repo().find_company_id(entry.project_id).await?
            == Some(workspace.company_id);
        if !in_workspace {
            return Err(DomainError::TimesheetEntryNotFound(entry_id).into());
        }
        if entry.user_id != workspace.user_id {
            workspace.require_manager()?;
        }

        let changes = TimesheetEntryChanges::from(request);
        if let Some(project_id) = changes.project_id {
            workspaces.kept_project(workspace, project_id).await?;
        }

        let read_status = entry.bill_status;
        entry.apply_changes(changes, workspace.actor())?;
        self.ctx.entry_repo().update(&entry, read_status).await?;
        info!(entry_id = %entry.id, bill_status = %entry.bill_status, "Timesheet entry updated");

        let source = self.source(entry.id).await?;
        self.ctx.search_indexer().reproject(&source);

        Ok(TimesheetEntryResponse::from(&source))
    }

    /// Re-send the search documents of several entries
    ///
    /// Entries that cannot be loaded are skipped with a warning.
    #[instrument(skip(self, ids), fields(count = ids.len()))]
    pub async fn reproject_entries(&self, ids: &[TimesheetEntryId]) {
        for &id in ids {
            match self.ctx.entry_repo().projection_source(id).await {
                Ok(Some(source)) => {
                    self.ctx.search_indexer().reproject(&source);
                }
                Ok(None) => warn!(entry_id = %id, "Entry vanished before re-projection"),
                Err(e) => warn!(entry_id = %id, error = %e, "Failed to load entry for re-projection"),
            }
        }
    }

    async fn source(&self, id: TimesheetEntryId) -> ServiceResult<EntryProjectionSource> {
        self.ctx
            .entry_repo()
            .projection_source(id)
            .await?
            .ok_or_else(|| DomainError::TimesheetEntryNotFound(id).into())
    }
}
