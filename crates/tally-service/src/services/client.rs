//! Client service
//!
//! Client records plus the time-windowed rollups of the minutes logged on
//! their projects.

use std::borrow::Cow;

use chrono::Utc;
use futures::future::try_join_all;
use tracing::{info, instrument};
use validator::{Validate, ValidationError, ValidationErrors};

use tally_core::{Client, ClientChanges, ClientId, CompanyId, DateRange, NewClient, TimeFrame};

use crate::dto::{
    ClientDetail, ClientListResponse, ClientResponse, ClientShowResponse, CreateClientRequest,
    DiscardClientResponse, ProjectDetails, UpdateClientRequest,
};

use super::context::ServiceContext;
use super::error::{ServiceError, ServiceResult};
use super::workspace::{Workspace, WorkspaceService};

/// Client service
pub struct ClientService<'a> {
    ctx: &'a ServiceContext,
}

impl<'a> ClientService<'a> {
    /// Create a new ClientService
    pub fn new(ctx: &'a ServiceContext) -> Self {
        Self { ctx }
    }

    /// Kept clients of the workspace with minutes logged in the time frame
    #[instrument(skip(self, workspace), fields(company_id = %workspace.company_id))]
    pub async fn list_clients(
        &self,
        workspace: &Workspace,
        time_frame: TimeFrame,
    ) -> ServiceResult<ClientListResponse> {
        let range = time_frame.range(Utc::now().date_naive());
        let clients = self
            .ctx
            .client_repo()
            .find_kept_by_company(workspace.company_id)
            .await?;

        let details = try_join_all(clients.iter().map(|client| self.client_detail(client, range)))
            .await?;

        Ok(ClientListResponse::new(details))
    }

    /// One client with its per-project rollup
    #[instrument(skip(self, workspace), fields(company_id = %workspace.company_id))]
    pub async fn get_client(
        &self,
        workspace: &Workspace,
        client_id: ClientId,
        time_frame: TimeFrame,
    ) -> ServiceResult<ClientShowResponse> {
        let client = WorkspaceService::new(self.ctx)
            .kept_client(workspace, client_id)
            .await?;
        let range = time_frame.range(Utc::now().date_naive());

        let project_details = self.project_details(client.id, range).await?;
        let total_minutes = total_minutes(&project_details);

        Ok(ClientShowResponse {
            client_details: detail_of(&client, total_minutes),
            project_details,
            total_minutes,
        })
    }

    /// Minutes logged on the client's kept projects within `range`
    ///
    /// Summed per project, then combined.
    #[instrument(skip(self))]
    pub async fn total_hours_logged(
        &self,
        client_id: ClientId,
        range: DateRange,
    ) -> ServiceResult<f64> {
        let projects = self.ctx.project_repo().find_kept_by_client(client_id).await?;
        let sums = try_join_all(
            projects
                .iter()
                .map(|project| self.ctx.entry_repo().sum_duration(project.id, range)),
        )
        .await?;
        Ok(sums.into_iter().sum())
    }

    /// Name, team and minutes of each kept project of the client
    #[instrument(skip(self))]
    pub async fn project_details(
        &self,
        client_id: ClientId,
        range: DateRange,
    ) -> ServiceResult<Vec<ProjectDetails>> {
        let projects = self.ctx.project_repo().find_kept_by_client(client_id).await?;

        try_join_all(projects.into_iter().map(|project| async move {
            let team = self.ctx.project_repo().team(project.id).await?;
            let minutes_spent = self.ctx.entry_repo().sum_duration(project.id, range).await?;
            Ok::<_, ServiceError>(ProjectDetails {
                name: project.name,
                team: team.into_iter().map(|member| member.full_name).collect(),
                minutes_spent,
            })
        }))
        .await
    }

    /// Create a client in the workspace
    #[instrument(skip(self, workspace, request), fields(company_id = %workspace.company_id))]
    pub async fn create_client(
        &self,
        workspace: &Workspace,
        request: CreateClientRequest,
    ) -> ServiceResult<ClientResponse> {
        workspace.require_manager()?;

        let new_client = NewClient {
            company_id: workspace.company_id,
            name: request.name,
            email: request.email,
            phone: request.phone,
            address: request.address,
            client_code: request.client_code,
        };

        let mut errors = new_client.validate().err().unwrap_or_default();
        self.check_uniqueness(
            &mut errors,
            workspace.company_id,
            &new_client.email,
            &new_client.client_code,
            None,
        )
        .await?;
        if !errors.is_empty() {
            return Err(errors.into());
        }

        let client = self.ctx.client_repo().create(&new_client).await?;
        info!(client_id = %client.id, "Client created");

        Ok(ClientResponse::from(&client))
    }

    /// Update a client of the workspace
    #[instrument(skip(self, workspace, request), fields(company_id = %workspace.company_id))]
    pub async fn update_client(
        &self,
        workspace: &Workspace,
        client_id: ClientId,
        request: UpdateClientRequest,
    ) -> ServiceResult<ClientResponse> {
        workspace.require_manager()?;

        let mut client = WorkspaceService::new(self.ctx)
            .kept_client(workspace, client_id)
            .await?;
        client.apply(ClientChanges::from(request));

        let mut errors = client.validate().err().unwrap_or_default();
        self.check_uniqueness(
            &mut errors,
            workspace.company_id,
            &client.email,
            &client.client_code,
            Some(client.id),
        )
        .await?;
        if !errors.is_empty() {
            return Err(errors.into());
        }

        self.ctx.client_repo().update(&client).await?;
        info!(client_id = %client.id, "Client updated");

        Ok(ClientResponse::from(&client))
    }

    /// Discard a client and, with it, all of its projects
    ///
    /// Timesheet entries of those projects stay in place.
    #[instrument(skip(self, workspace), fields(company_id = %workspace.company_id))]
    pub async fn discard_client(
        &self,
        workspace: &Workspace,
        client_id: ClientId,
    ) -> ServiceResult<DiscardClientResponse> {
        workspace.require_manager()?;

        let client = WorkspaceService::new(self.ctx)
            .kept_client(workspace, client_id)
            .await?;
        let discarded_projects = self.ctx.client_repo().discard(client.id, Utc::now()).await?;

        info!(client_id = %client.id, discarded_projects, "Client discarded");

        Ok(DiscardClientResponse {
            id: client.id,
            discarded_projects,
        })
    }

    async fn client_detail(&self, client: &Client, range: DateRange) -> ServiceResult<ClientDetail> {
        let minutes = self.total_hours_logged(client.id, range).await?;
        Ok(detail_of(client, minutes))
    }

    async fn check_uniqueness(
        &self,
        errors: &mut ValidationErrors,
        company_id: CompanyId,
        email: &str,
        client_code: &str,
        except: Option<ClientId>,
    ) -> ServiceResult<()> {
        let repo = self.ctx.client_repo();
        if !email.is_empty() && repo.email_taken(company_id, email, except).await? {
            errors.add("email", taken());
        }
        if !client_code.is_empty()
            && repo
                .client_code_taken(company_id, client_code, except)
                .await?
        {
            errors.add("client_code", taken());
        }
        Ok(())
    }
}

fn taken() -> ValidationError {
    ValidationError::new("taken").with_message(Cow::Borrowed("has already been taken"))
}

fn detail_of(client: &Client, minutes_spent: f64) -> ClientDetail {
    ClientDetail {
        id: client.id,
        name: client.name.clone(),
        email: client.email.clone(),
        phone: client.phone.clone(),
        address: client.address.clone(),
        minutes_spent,
    }
}

fn total_minutes(details: &[ProjectDetails]) -> f64 {
    details.iter().map(|p| p.minutes_spent).sum()
}
