//! Client handlers
//!
//! Client reports with logged-time rollups, plus client CRUD.

use axum::{extract::State, Json};
use tally_core::ClientId;
use tally_service::dto::{
    ClientListResponse, ClientResponse, ClientShowResponse, CreateClientRequest,
    DiscardClientResponse, UpdateClientRequest,
};
use tally_service::ClientService;

use crate::extractors::{CurrentWorkspace, IdPath, JsonBody, QueryParams, TimeFrameParams};
use crate::response::{ApiResult, Created};
use crate::state::AppState;

/// List the workspace's kept clients with minutes logged in the time frame
///
/// GET /clients?time_frame=
pub async fn list_clients(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    QueryParams(params): QueryParams<TimeFrameParams>,
) -> ApiResult<Json<ClientListResponse>> {
    let service = ClientService::new(state.service_context());
    let response = service
        .list_clients(&workspace, params.time_frame())
        .await?;
    Ok(Json(response))
}

/// One client with a per-project breakdown
///
/// GET /clients/{client_id}?time_frame=
pub async fn get_client(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    IdPath(client_id): IdPath<ClientId>,
    QueryParams(params): QueryParams<TimeFrameParams>,
) -> ApiResult<Json<ClientShowResponse>> {
    let service = ClientService::new(state.service_context());
    let response = service
        .get_client(&workspace, client_id, params.time_frame())
        .await?;
    Ok(Json(response))
}

/// POST /clients
pub async fn create_client(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    JsonBody(request): JsonBody<CreateClientRequest>,
) -> ApiResult<Created<Json<ClientResponse>>> {
    let service = ClientService::new(state.service_context());
    let response = service.create_client(&workspace, request).await?;
    Ok(Created(Json(response)))
}

/// PATCH /clients/{client_id}
pub async fn update_client(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    IdPath(client_id): IdPath<ClientId>,
    JsonBody(request): JsonBody<UpdateClientRequest>,
) -> ApiResult<Json<ClientResponse>> {
    let service = ClientService::new(state.service_context());
    let response = service
        .update_client(&workspace, client_id, request)
        .await?;
    Ok(Json(response))
}

/// Soft-delete a client together with its projects
///
/// DELETE /clients/{client_id}
pub async fn discard_client(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    IdPath(client_id): IdPath<ClientId>,
) -> ApiResult<Json<DiscardClientResponse>> {
    let service = ClientService::new(state.service_context());
    let response = service.discard_client(&workspace, client_id).await?;
    Ok(Json(response))
}
