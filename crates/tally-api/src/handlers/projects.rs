//! Project handlers

use axum::{extract::State, Json};
use tally_core::ProjectId;
use tally_service::dto::{
    AddProjectMemberRequest, CreateProjectRequest, ProjectListResponse, ProjectResponse,
    ProjectShowResponse, TeamMemberResponse,
};
use tally_service::ProjectService;

use crate::extractors::{
    CurrentWorkspace, IdPath, JsonBody, ProjectFilterParams, ProjectMemberPath, QueryParams,
    TimeFrameParams, ValidatedJson,
};
use crate::response::{ApiResult, Created, NoContent};
use crate::state::AppState;

/// Filtered project list
///
/// GET /projects?client_id[]=&user_id[]=&billable=&search=
pub async fn list_projects(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    QueryParams(params): QueryParams<ProjectFilterParams>,
) -> ApiResult<Json<ProjectListResponse>> {
    let service = ProjectService::new(state.service_context());
    let response = service.list_projects(&workspace, params.into()).await?;
    Ok(Json(response))
}

/// POST /projects
pub async fn create_project(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    JsonBody(request): JsonBody<CreateProjectRequest>,
) -> ApiResult<Created<Json<ProjectResponse>>> {
    let service = ProjectService::new(state.service_context());
    let response = service.create_project(&workspace, request).await?;
    Ok(Created(Json(response)))
}

/// GET /projects/{project_id}?time_frame=
pub async fn get_project(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    IdPath(project_id): IdPath<ProjectId>,
    QueryParams(params): QueryParams<TimeFrameParams>,
) -> ApiResult<Json<ProjectShowResponse>> {
    let service = ProjectService::new(state.service_context());
    let response = service
        .get_project(&workspace, project_id, params.time_frame())
        .await?;
    Ok(Json(response))
}

/// Add a workspace member to the project team; returns the new team
///
/// POST /projects/{project_id}/members
pub async fn add_member(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    IdPath(project_id): IdPath<ProjectId>,
    ValidatedJson(request): ValidatedJson<AddProjectMemberRequest>,
) -> ApiResult<Created<Json<Vec<TeamMemberResponse>>>> {
    let service = ProjectService::new(state.service_context());
    let team = service.add_member(&workspace, project_id, request).await?;
    Ok(Created(Json(team)))
}

/// DELETE /projects/{project_id}/members/{user_id}
pub async fn remove_member(
    State(state): State<AppState>,
    CurrentWorkspace(workspace): CurrentWorkspace,
    IdPath(path): IdPath<ProjectMemberPath>,
) -> ApiResult<NoContent> {
    let service = ProjectService::new(state.service_context());
    service
        .remove_member(&workspace, path.project_id, path.user_id)
        .await?;
    Ok(NoContent)
}
