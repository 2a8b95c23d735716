//! Workspace service
//!
//! Resolves the company a request acts in and the caller's role there.
//! Every other service starts from a `Workspace`, so nothing is ever read
//! or written outside the caller's current company.

use tally_core::{Actor, ClientId, CompanyId, CompanyRole, DomainError, ProjectId, User, UserId};
use tracing::instrument;

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};

/// The caller inside their current company
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Workspace {
    pub company_id: CompanyId,
    pub user_id: UserId,
    pub role: CompanyRole,
}

impl Workspace {
    /// Actor used for lifecycle checks on the caller's behalf
    pub fn actor(&self) -> Actor {
        Actor::Member(self.role)
    }

    /// Fail unless the role may manage clients and projects
    pub fn require_manager(&self) -> ServiceResult<()> {
        if self.role.manages_workspace() {
            Ok(())
        } else {
            Err(DomainError::InsufficientRole(self.role).into())
        }
    }

    /// Fail unless the role may bill entries
    pub fn require_invoicing(&self) -> ServiceResult<()> {
        if self.role.issues_invoices() {
            Ok(())
        } else {
            Err(DomainError::InsufficientRole(self.role).into())
        }
    }
}

/// Workspace service
pub struct WorkspaceService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> WorkspaceService<'a> {
    /// Create a new WorkspaceService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Resolve the authenticated user's current workspace
    ///
    /// A token for a user that no longer exists is treated as invalid.
    #[instrument(skip(self))]
    pub async fn current(&self, user_id: UserId) -> ServiceResult<Workspace> {
        let user = self.current_user(user_id).await?;
        let company_id = user
            .current_workspace_id
            .ok_or(DomainError::NoCurrentWorkspace)?;

        let member = self
            .ctx
            .company_repo()
            .find_member(company_id, user_id)
            .await?
            .ok_or(DomainError::NotWorkspaceMember)?;

        Ok(Workspace {
            company_id,
            user_id,
            role: member.role,
        })
    }

    /// Load the authenticated user
    #[instrument(skip(self))]
    pub async fn current_user(&self, user_id: UserId) -> ServiceResult<User> {
        self.ctx
            .user_repo()
            .find_by_id(user_id)
            .await?
            .ok_or(ServiceError::App(tally_common::AppError::InvalidToken))
    }

    /// Whether a user belongs to the workspace's company
    pub async fn is_member(&self, workspace: &Workspace, user_id: UserId) -> ServiceResult<bool> {
        Ok(self
            .ctx
            .company_repo()
            .find_member(workspace.company_id, user_id)
            .await?
            .is_some())
    }

    /// Load a kept client of the workspace
    ///
    /// Clients of other companies are reported as missing.
    #[instrument(skip(self, workspace))]
    pub async fn kept_client(
        &self,
        workspace: &Workspace,
        client_id: ClientId,
    ) -> ServiceResult<tally_core::Client> {
        match self.ctx.client_repo().find_by_id(client_id).await? {
            Some(client) if client.company_id == workspace.company_id && client.is_kept() => {
                Ok(client)
            }
            _ => Err(DomainError::ClientNotFound(client_id).into()),
        }
    }

    /// Load a kept project of the workspace
    #[instrument(skip(self, workspace))]
    pub async fn kept_project(
        &self,
        workspace: &Workspace,
        project_id: ProjectId,
    ) -> ServiceResult<tally_core::Project> {
        let in_workspace = self.ctx.project_repo().find_company_id(project_id).await?
            == Some(workspace.company_id);
        if !in_workspace {
            return Err(DomainError::ProjectNotFound(project_id).into());
        }
        match self.ctx.project_repo().find_by_id(project_id).await? {
            Some(project) if project.is_kept() => Ok(project),
            _ => Err(DomainError::ProjectNotFound(project_id).into()),
        }
    }
}
