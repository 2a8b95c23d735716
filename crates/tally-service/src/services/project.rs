//! Project service
//!
//! Workspace-scoped project listing and team management.

use chrono::Utc;
use tracing::{info, instrument};
use validator::Validate;

use tally_core::{
    DomainError, NewProject, ProjectFilter, ProjectId, ProjectMember, ProjectQuery, TimeFrame,
    UserId,
};

use crate::dto::{
    AddProjectMemberRequest, CreateProjectRequest, ProjectListResponse, ProjectResponse,
    ProjectShowResponse, TeamMemberResponse,
};

use super::context::ServiceContext;
use super::error::ServiceResult;
use super::workspace::{Workspace, WorkspaceService};

/// Project service
pub struct ProjectService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ProjectService<'a> {
    /// Create a new ProjectService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// List the workspace's projects narrowed by `filter`
    ///
    /// The workspace scope is always applied, whatever the filter holds.
    #[instrument(skip(self, workspace), fields(company_id = %workspace.company_id))]
    pub async fn list_projects(
        &self,
        workspace: &Workspace,
        filter: ProjectFilter,
    ) -> ServiceResult<ProjectListResponse> {
        let query = ProjectQuery::for_workspace(workspace.company_id).with_filter(filter);
        let projects = self.ctx.project_repo().list(&query).await?;
        Ok(ProjectListResponse { projects })
    }

    /// Create a project under a client of the workspace
    #[instrument(skip(self, workspace, request), fields(company_id = %workspace.company_id))]
    pub async fn create_project(
        &self,
        workspace: &Workspace,
        request: CreateProjectRequest,
    ) -> ServiceResult<ProjectResponse> {
        workspace.require_manager()?;

        let client = WorkspaceService::new(self.ctx)
            .kept_client(workspace, request.client_id)
            .await?;

        let new_project = NewProject {
            client_id: client.id,
            name: request.name,
            description: request.description,
            billable: request.billable,
        };
        new_project.validate()?;

        let project = self.ctx.project_repo().create(&new_project).await?;
        info!(project_id = %project.id, client_id = %client.id, "Project created");

        Ok(ProjectResponse::from(&project))
    }

    /// Project with its client name, team and minutes in the time frame
    #[instrument(skip(self, workspace), fields(company_id = %workspace.company_id))]
    pub async fn get_project(
        &self,
        workspace: &Workspace,
        project_id: ProjectId,
        time_frame: TimeFrame,
    ) -> ServiceResult<ProjectShowResponse> {
        let project = WorkspaceService::new(self.ctx)
            .kept_project(workspace, project_id)
            .await?;
        let client = self
            .ctx
            .client_repo()
            .find_by_id(project.client_id)
            .await?
            .ok_or(DomainError::ClientNotFound(project.client_id))?;

        let range = time_frame.range(Utc::now().date_naive());
        let team = self.ctx.project_repo().team(project.id).await?;
        let minutes_spent = self.ctx.entry_repo().sum_duration(project.id, range).await?;

        Ok(ProjectShowResponse {
            project: ProjectResponse::from(&project),
            client_name: client.name,
            team: team.into_iter().map(TeamMemberResponse::from).collect(),
            minutes_spent,
        })
    }

    /// Add a workspace member to the project team
    #[instrument(skip(self, workspace, request), fields(company_id = %workspace.company_id))]
    pub async fn add_member(
        &self,
        workspace: &Workspace,
        project_id: ProjectId,
        request: AddProjectMemberRequest,
    ) -> ServiceResult<Vec<TeamMemberResponse>> {
        workspace.require_manager()?;

        let workspaces = WorkspaceService::new(self.ctx);
        let project = workspaces.kept_project(workspace, project_id).await?;
        if !workspaces.is_member(workspace, request.user_id).await? {
            return Err(DomainError::field(
                "user_id",
                "not_workspace_member",
                "must belong to the workspace",
            )
            .into());
        }

        let member = ProjectMember {
            project_id: project.id,
            user_id: request.user_id,
            hourly_rate: request.hourly_rate,
        };
        member.validate()?;
        self.ctx.project_repo().add_member(&member).await?;

        info!(project_id = %project.id, user_id = %member.user_id, "Project member added");

        self.team(project.id).await
    }

    /// Remove a user from the project team
    #[instrument(skip(self, workspace), fields(company_id = %workspace.company_id))]
    pub async fn remove_member(
        &self,
        workspace: &Workspace,
        project_id: ProjectId,
        user_id: UserId,
    ) -> ServiceResult<()> {
        workspace.require_manager()?;

        let project = WorkspaceService::new(self.ctx)
            .kept_project(workspace, project_id)
            .await?;
        if !self.ctx.project_repo().remove_member(project.id, user_id).await? {
            return Err(DomainError::ProjectMemberNotFound.into());
        }

        info!(project_id = %project.id, user_id = %user_id, "Project member removed");
        Ok(())
    }

    async fn team(&self, project_id: ProjectId) -> ServiceResult<Vec<TeamMemberResponse>> {
        let team = self.ctx.project_repo().team(project_id).await?;
        Ok(team.into_iter().map(TeamMemberResponse::from).collect())
    }
}
