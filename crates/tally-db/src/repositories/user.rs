//! PostgreSQL implementation of UserRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tally_core::entities::{NewUser, User};
use tally_core::traits::{RepoResult, UserRepository};
use tally_core::value_objects::{CompanyId, UserId};

use crate::models::UserModel;

use super::error::{map_db_error, map_unique_violation, taken};

/// PostgreSQL implementation of UserRepository
#[derive(Clone)]
pub struct PgUserRepository {
    pool: PgPool,
}

impl PgUserRepository {
    /// Create a new PgUserRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UserRepository for PgUserRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: UserId) -> RepoResult<Option<User>> {
        let result = sqlx::query_as::<_, UserModel>(
            r"
            SELECT id, first_name, last_name, email, current_workspace_id, created_at, updated_at
            FROM users
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(User::from))
    }

    #[instrument(skip(self, user), fields(email = %user.email))]
    async fn create(&self, user: &NewUser) -> RepoResult<User> {
        let model = sqlx::query_as::<_, UserModel>(
            r"
            INSERT INTO users (first_name, last_name, email)
            VALUES ($1, $2, $3)
            RETURNING id, first_name, last_name, email, current_workspace_id, created_at, updated_at
            ",
        )
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.email)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| taken("email")))?;

        Ok(User::from(model))
    }

    #[instrument(skip(self))]
    async fn set_current_workspace(&self, id: UserId, company_id: CompanyId) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE users
            SET current_workspace_id = $2, updated_at = NOW()
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .bind(company_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            return Err(tally_core::DomainError::UserNotFound(id));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgUserRepository>();
    }
}
