//! Invoice handlers
//!
//! Unbilled entries of a client become invoice line items.

use axum::{extract::State, Json};
use tally_core::ClientId;
use tally_service::dto::{
    CreateInvoiceLineItemsRequest, InvoiceLineItemsResponse, LineItemEntriesResponse,
};
use tally_service::InvoiceService;

use crate::extractors::{
    CurrentWorkspace, IdPath, QueryParams, SelectedEntriesParams, ValidatedJson,
};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// Unbilled candidates for a client's invoice, minus the already selected ones
///
/// GET /clients/{client_id}/line_item_entries?selected_entries[]=
pub async fn line_item_entries(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    IdPath(client_id): IdPath<ClientId>,
    QueryParams(params): QueryParams<SelectedEntriesParams>,
) -> ApiResult<Json<LineItemEntriesResponse>> {
    let service = InvoiceService::new(state.service_context());
    let response = service
        .line_item_entries(&workspace, client_id, &params.selected_entries)
        .await?;
    Ok(Json(response))
}

/// Bill the selected entries and create one line item per entry
///
/// POST /clients/{client_id}/invoice_line_items
pub async fn create_line_items(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    IdPath(client_id): IdPath<ClientId>,
    ValidatedJson(request): ValidatedJson<CreateInvoiceLineItemsRequest>,
) -> ApiResult<Created<Json<InvoiceLineItemsResponse>>> {
    let service = InvoiceService::new(state.service_context());
    let response = service.bill_entries(&workspace, client_id, request).await?;
    Ok(Created(Json(response)))
}
