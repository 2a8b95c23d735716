//! PostgreSQL implementation of ClientRepository

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use tracing::{debug, instrument};

use tally_core::entities::{Client, LineItemCandidate, NewClient};
use tally_core::error::DomainError;
use tally_core::traits::{ClientRepository, RepoResult};
use tally_core::value_objects::{raw_ids, BillStatus, ClientId, CompanyId, TimesheetEntryId};

use crate::models::{ClientModel, LineItemCandidateModel};

use super::error::{map_db_error, map_unique_violation, taken};

const EMAIL_CONSTRAINT: &str = "clients_email_company_key";
const CLIENT_CODE_CONSTRAINT: &str = "clients_client_code_company_key";

/// Unique violations on either per-company key become field errors
fn map_client_write_error(e: sqlx::Error) -> DomainError {
    map_unique_violation(e, |constraint| match constraint {
        Some(EMAIL_CONSTRAINT) => taken("email"),
        Some(CLIENT_CODE_CONSTRAINT) => taken("client_code"),
        other => DomainError::DatabaseError(format!(
            "unique violation on {}",
            other.unwrap_or("unknown constraint")
        )),
    })
}

/// PostgreSQL implementation of ClientRepository
#[derive(Clone)]
pub struct PgClientRepository {
    pool: PgPool,
}

impl PgClientRepository {
    /// Create a new PgClientRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ClientRepository for PgClientRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ClientId) -> RepoResult<Option<Client>> {
        let result = sqlx::query_as::<_, ClientModel>(
            r"
            SELECT id, company_id, name, email, phone, address, client_code,
                   discarded_at, created_at, updated_at
            FROM clients
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Client::from))
    }

    #[instrument(skip(self))]
    async fn find_kept_by_company(&self, company_id: CompanyId) -> RepoResult<Vec<Client>> {
        let results = sqlx::query_as::<_, ClientModel>(
            r"
            SELECT id, company_id, name, email, phone, address, client_code,
                   discarded_at, created_at, updated_at
            FROM clients
            WHERE company_id = $1 AND discarded_at IS NULL
            ORDER BY LOWER(name), id
            ",
        )
        .bind(company_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Client::from).collect())
    }

    #[instrument(skip(self))]
    async fn email_taken(
        &self,
        company_id: CompanyId,
        email: &str,
        except: Option<ClientId>,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM clients
                WHERE company_id = $1 AND email = $2 AND ($3::BIGINT IS NULL OR id <> $3)
            )
            ",
        )
        .bind(company_id.into_inner())
        .bind(email)
        .bind(except.map(ClientId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn client_code_taken(
        &self,
        company_id: CompanyId,
        client_code: &str,
        except: Option<ClientId>,
    ) -> RepoResult<bool> {
        sqlx::query_scalar::<_, bool>(
            r"
            SELECT EXISTS(
                SELECT 1 FROM clients
                WHERE company_id = $1 AND client_code = $2 AND ($3::BIGINT IS NULL OR id <> $3)
            )
            ",
        )
        .bind(company_id.into_inner())
        .bind(client_code)
        .bind(except.map(ClientId::into_inner))
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self, client), fields(company_id = %client.company_id))]
    async fn create(&self, client: &NewClient) -> RepoResult<Client> {
        let model = sqlx::query_as::<_, ClientModel>(
            r"
            INSERT INTO clients (company_id, name, email, phone, address, client_code)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, company_id, name, email, phone, address, client_code,
                      discarded_at, created_at, updated_at
            ",
        )
        .bind(client.company_id.into_inner())
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.client_code)
        .fetch_one(&self.pool)
        .await
        .map_err(map_client_write_error)?;

        Ok(Client::from(model))
    }

    #[instrument(skip(self, client), fields(client_id = %client.id))]
    async fn update(&self, client: &Client) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE clients
            SET name = $2, email = $3, phone = $4, address = $5, client_code = $6, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(client.id.into_inner())
        .bind(&client.name)
        .bind(&client.email)
        .bind(&client.phone)
        .bind(&client.address)
        .bind(&client.client_code)
        .execute(&self.pool)
        .await
        .map_err(map_client_write_error)?;

        if result.rows_affected() == 0 {
            return Err(DomainError::ClientNotFound(client.id));
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn discard(&self, id: ClientId, at: DateTime<Utc>) -> RepoResult<u64> {
        // Client and projects are discarded together or not at all
        let mut tx = self.pool.begin().await.map_err(map_db_error)?;

        let client = sqlx::query(
            r"
            UPDATE clients
            SET discarded_at = $2, updated_at = NOW()
            WHERE id = $1 AND discarded_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        if client.rows_affected() == 0 {
            return Err(DomainError::ClientNotFound(id));
        }

        let projects = sqlx::query(
            r"
            UPDATE projects
            SET discarded_at = $2, updated_at = NOW()
            WHERE client_id = $1 AND discarded_at IS NULL
            ",
        )
        .bind(id.into_inner())
        .bind(at)
        .execute(&mut *tx)
        .await
        .map_err(map_db_error)?;

        tx.commit().await.map_err(map_db_error)?;

        debug!(projects = projects.rows_affected(), "Client discarded");
        Ok(projects.rows_affected())
    }

    #[instrument(skip(self))]
    async fn line_item_candidates(
        &self,
        id: ClientId,
        except: &[TimesheetEntryId],
    ) -> RepoResult<Vec<LineItemCandidate>> {
        let results = sqlx::query_as::<_, LineItemCandidateModel>(
            r"
            SELECT te.id,
                   u.first_name,
                   u.last_name,
                   te.work_date AS date,
                   te.note AS description,
                   pm.hourly_rate AS rate,
                   te.duration AS qty
            FROM timesheet_entries te
            JOIN projects p ON p.id = te.project_id
            JOIN project_members pm ON pm.project_id = te.project_id AND pm.user_id = te.user_id
            JOIN users u ON u.id = pm.user_id
            WHERE p.client_id = $1
              AND te.bill_status = $3
              AND NOT (te.id = ANY($2))
            ORDER BY te.work_date, te.id
            ",
        )
        .bind(id.into_inner())
        .bind(raw_ids(except))
        .bind(BillStatus::Unbilled.as_i16())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(LineItemCandidate::from).collect())
    }
}
