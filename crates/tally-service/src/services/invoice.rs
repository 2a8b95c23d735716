//! Invoice service
//!
//! Turns unbilled timesheet entries of a client into invoice line items.
//! Billing is done by the system actor, never by the caller's role, so the
//! entity guard only lets entries into `billed` through this path.

use std::borrow::Cow;
use std::collections::HashMap;

use tracing::{info, instrument};
use validator::{Validate, ValidationError, ValidationErrors};

use tally_core::{
    ClientId, LineItemCandidate, NewInvoiceLineItem, TimesheetEntry, TimesheetEntryId,
};

use crate::dto::{
    CreateInvoiceLineItemsRequest, InvoiceLineItemResponse, InvoiceLineItemsResponse,
    LineItemEntriesResponse, LineItemEntryResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::timesheet::TimesheetService;
use super::workspace::{Workspace, WorkspaceService};

/// Invoice service
pub struct InvoiceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> InvoiceService<'a> {
    /// Create a new InvoiceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Unbilled entries of a client not yet selected for the invoice
    #[instrument(skip(self, workspace, selected), fields(company_id = %workspace.company_id))]
    pub async fn line_item_entries(
        &self,
        workspace: &Workspace,
        client_id: ClientId,
        selected: &[TimesheetEntryId],
    ) -> ServiceResult<LineItemEntriesResponse> {
        workspace.require_invoicing()?;

        let client = WorkspaceService::new(self.ctx)
            .kept_client(workspace, client_id)
            .await?;
        let candidates = self
            .ctx
            .client_repo()
            .line_item_candidates(client.id, selected)
            .await?;

        Ok(LineItemEntriesResponse {
            new_line_item_entries: candidates.iter().map(LineItemEntryResponse::from).collect(),
        })
    }

    /// Bill the selected entries and create their line items
    ///
    /// Every selected entry must be an unbilled entry of the client. Nothing
    /// is written when any of them is not.
    #[instrument(skip(self, workspace, request), fields(company_id = %workspace.company_id))]
    pub async fn bill_entries(
        &self,
        workspace: &Workspace,
        client_id: ClientId,
        request: CreateInvoiceLineItemsRequest,
    ) -> ServiceResult<InvoiceLineItemsResponse> {
        workspace.require_invoicing()?;
        request.validate()?;

        let client = WorkspaceService::new(self.ctx)
            .kept_client(workspace, client_id)
            .await?;

        let candidates: HashMap<_, _> = self
            .ctx
            .client_repo()
            .line_item_candidates(client.id, &[])
            .await?
            .into_iter()
            .map(|candidate| (candidate.timesheet_entry_id, candidate))
            .collect();

        let mut ids = request.timesheet_entry_ids;
        ids.sort_unstable();
        ids.dedup();

        let unknown: Vec<_> = ids.iter().filter(|id| !candidates.contains_key(id)).collect();
        if !unknown.is_empty() {
            let mut err = ValidationError::new("not_unbilled")
                .with_message(Cow::Borrowed("must be unbilled entries of this client"));
            err.add_param(Cow::Borrowed("ids"), &unknown);
            let mut errors = ValidationErrors::new();
            errors.add("timesheet_entry_ids", err);
            return Err(errors.into());
        }

        // Line items come only from entries the lifecycle guard let through
        let entries = self.ctx.entry_repo().find_many(&ids).await?;
        let items = billable_items(client.id, entries, &candidates)?;
        let line_items = self.ctx.line_item_repo().bill_entries(&items).await?;

        info!(client_id = %client.id, count = line_items.len(), "Timesheet entries billed");

        TimesheetService::new(self.ctx).reproject_entries(&ids).await;

        Ok(InvoiceLineItemsResponse {
            line_items: line_items.iter().map(InvoiceLineItemResponse::from).collect(),
        })
    }
}

/// Guard each entry into `billed` and build its line item
fn billable_items(
    client_id: ClientId,
    entries: Vec<TimesheetEntry>,
    candidates: &HashMap<TimesheetEntryId, LineItemCandidate>,
) -> Result<Vec<NewInvoiceLineItem>, ValidationErrors> {
    let mut items = Vec::with_capacity(entries.len());
    for mut entry in entries {
        entry.mark_billed()?;
        if let Some(candidate) = candidates.get(&entry.id) {
            items.push(NewInvoiceLineItem::from_candidate(client_id, candidate));
        }
    }
    Ok(items)
}
