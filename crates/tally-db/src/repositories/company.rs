//! PostgreSQL implementation of CompanyRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tally_core::entities::{Company, CompanyMember};
use tally_core::traits::{CompanyRepository, RepoResult};
use tally_core::value_objects::{CompanyId, UserId};

use crate::models::{CompanyMemberModel, CompanyModel};

use super::error::map_db_error;

/// PostgreSQL implementation of CompanyRepository
#[derive(Clone)]
pub struct PgCompanyRepository {
    pool: PgPool,
}

impl PgCompanyRepository {
    /// Create a new PgCompanyRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl CompanyRepository for PgCompanyRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: CompanyId) -> RepoResult<Option<Company>> {
        let result = sqlx::query_as::<_, CompanyModel>(
            r"
            SELECT id, name, created_at, updated_at
            FROM companies
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Company::from))
    }

    #[instrument(skip(self))]
    async fn create(&self, name: &str) -> RepoResult<Company> {
        let model = sqlx::query_as::<_, CompanyModel>(
            r"
            INSERT INTO companies (name)
            VALUES ($1)
            RETURNING id, name, created_at, updated_at
            ",
        )
        .bind(name)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Company::from(model))
    }

    #[instrument(skip(self))]
    async fn find_member(
        &self,
        company_id: CompanyId,
        user_id: UserId,
    ) -> RepoResult<Option<CompanyMember>> {
        let result = sqlx::query_as::<_, CompanyMemberModel>(
            r"
            SELECT company_id, user_id, role
            FROM company_users
            WHERE company_id = $1 AND user_id = $2
            ",
        )
        .bind(company_id.into_inner())
        .bind(user_id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(CompanyMember::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn add_member(&self, member: &CompanyMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO company_users (company_id, user_id, role)
            VALUES ($1, $2, $3)
            ON CONFLICT (company_id, user_id) DO UPDATE SET role = EXCLUDED.role
            ",
        )
        .bind(member.company_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.role.as_str())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(())
    }
}
