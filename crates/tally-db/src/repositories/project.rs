//! PostgreSQL implementation of ProjectRepository

use async_trait::async_trait;
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::instrument;

use tally_core::entities::{NewProject, Project, ProjectMember, TeamMember};
use tally_core::error::DomainError;
use tally_core::query::{ProjectPredicate, ProjectQuery, ProjectSummary};
use tally_core::traits::{ProjectRepository, RepoResult};
use tally_core::value_objects::{raw_ids, ClientId, CompanyId, ProjectId, UserId};

use crate::models::{ProjectModel, ProjectSummaryModel, TeamMemberModel};

use super::error::{escape_like, map_db_error, map_unique_violation};

/// Render a project query as SQL
///
/// Every predicate is appended with AND after the kept-rows condition, so the
/// workspace predicate applies to every filter combination.
pub fn build_project_list(query: &ProjectQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(
        r"
        SELECT p.id, p.name, p.client_id, c.name AS client_name, p.billable
        FROM projects p
        JOIN clients c ON c.id = p.client_id
        WHERE p.discarded_at IS NULL AND c.discarded_at IS NULL",
    );

    for predicate in query.predicates() {
        qb.push(" AND ");
        match predicate {
            ProjectPredicate::InWorkspace(company_id) => {
                qb.push("c.company_id = ").push_bind(company_id.into_inner());
            }
            ProjectPredicate::InClients(client_ids) => {
                qb.push("p.client_id = ANY(")
                    .push_bind(raw_ids(&client_ids))
                    .push(")");
            }
            ProjectPredicate::HasTeamMember(user_ids) => {
                qb.push(
                    "EXISTS (SELECT 1 FROM project_members pm \
                     WHERE pm.project_id = p.id AND pm.user_id = ANY(",
                )
                .push_bind(raw_ids(&user_ids))
                .push("))");
            }
            ProjectPredicate::Billable(billable) => {
                qb.push("p.billable = ").push_bind(billable);
            }
            ProjectPredicate::NameOrClientMatches(text) => {
                let pattern = format!("%{}%", escape_like(&text));
                qb.push("(p.name ILIKE ")
                    .push_bind(pattern.clone())
                    .push(" OR c.name ILIKE ")
                    .push_bind(pattern)
                    .push(")");
            }
        }
    }

    qb.push(" ORDER BY LOWER(p.name), p.id");
    qb
}

/// PostgreSQL implementation of ProjectRepository
#[derive(Clone)]
pub struct PgProjectRepository {
    pool: PgPool,
}

impl PgProjectRepository {
    /// Create a new PgProjectRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ProjectRepository for PgProjectRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: ProjectId) -> RepoResult<Option<Project>> {
        let result = sqlx::query_as::<_, ProjectModel>(
            r"
            SELECT id, client_id, name, description, billable, discarded_at, created_at, updated_at
            FROM projects
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(Project::from))
    }

    #[instrument(skip(self))]
    async fn find_company_id(&self, id: ProjectId) -> RepoResult<Option<CompanyId>> {
        let result = sqlx::query_scalar::<_, i64>(
            r"
            SELECT c.company_id
            FROM projects p
            JOIN clients c ON c.id = p.client_id
            WHERE p.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.map(CompanyId::new))
    }

    #[instrument(skip(self))]
    async fn find_kept_by_client(&self, client_id: ClientId) -> RepoResult<Vec<Project>> {
        let results = sqlx::query_as::<_, ProjectModel>(
            r"
            SELECT id, client_id, name, description, billable, discarded_at, created_at, updated_at
            FROM projects
            WHERE client_id = $1 AND discarded_at IS NULL
            ORDER BY LOWER(name), id
            ",
        )
        .bind(client_id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(Project::from).collect())
    }

    #[instrument(skip(self), fields(workspace = %query.workspace()))]
    async fn list(&self, query: &ProjectQuery) -> RepoResult<Vec<ProjectSummary>> {
        let results = build_project_list(query)
            .build_query_as::<ProjectSummaryModel>()
            .fetch_all(&self.pool)
            .await
            .map_err(map_db_error)?;

        Ok(results.into_iter().map(ProjectSummary::from).collect())
    }

    #[instrument(skip(self, project), fields(client_id = %project.client_id))]
    async fn create(&self, project: &NewProject) -> RepoResult<Project> {
        let model = sqlx::query_as::<_, ProjectModel>(
            r"
            INSERT INTO projects (client_id, name, description, billable)
            VALUES ($1, $2, $3, $4)
            RETURNING id, client_id, name, description, billable, discarded_at, created_at, updated_at
            ",
        )
        .bind(project.client_id.into_inner())
        .bind(&project.name)
        .bind(&project.description)
        .bind(project.billable)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(Project::from(model))
    }

    #[instrument(skip(self))]
    async fn team(&self, id: ProjectId) -> RepoResult<Vec<TeamMember>> {
        let results = sqlx::query_as::<_, TeamMemberModel>(
            r"
            SELECT pm.user_id, u.first_name, u.last_name, pm.hourly_rate
            FROM project_members pm
            JOIN users u ON u.id = pm.user_id
            WHERE pm.project_id = $1
            ORDER BY u.first_name, u.last_name, u.id
            ",
        )
        .bind(id.into_inner())
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(results.into_iter().map(TeamMember::from).collect())
    }

    #[instrument(skip(self))]
    async fn add_member(&self, member: &ProjectMember) -> RepoResult<()> {
        sqlx::query(
            r"
            INSERT INTO project_members (project_id, user_id, hourly_rate)
            VALUES ($1, $2, $3)
            ",
        )
        .bind(member.project_id.into_inner())
        .bind(member.user_id.into_inner())
        .bind(member.hourly_rate)
        .execute(&self.pool)
        .await
        .map_err(|e| map_unique_violation(e, |_| DomainError::AlreadyProjectMember))?;

        Ok(())
    }

    #[instrument(skip(self))]
    async fn remove_member(&self, id: ProjectId, user_id: UserId) -> RepoResult<bool> {
        let result = sqlx::query(
            r"
            DELETE FROM project_members
            WHERE project_id = $1 AND user_id = $2
            ",
        )
        .bind(id.into_inner())
        .bind(user_id.into_inner())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tally_core::query::ProjectFilter;

    #[test]
    fn test_repo_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<PgProjectRepository>();
    }

    #[test]
    fn test_unfiltered_sql_is_workspace_scoped() {
        let qb = build_project_list(&ProjectQuery::for_workspace(CompanyId::new(1)));
        let sql = qb.sql();
        assert!(sql.contains("c.company_id = $1"));
        assert!(sql.contains("p.discarded_at IS NULL AND c.discarded_at IS NULL"));
        assert!(sql.trim_end().ends_with("ORDER BY LOWER(p.name), p.id"));
    }

    #[test]
    fn test_all_filters_render_in_order() {
        let query = ProjectQuery::for_workspace(CompanyId::new(1)).with_filter(ProjectFilter {
            client_ids: vec![ClientId::new(2)],
            user_ids: vec![UserId::new(3)],
            billable: Some(true),
            search: Some("acme".to_string()),
        });
        let qb = build_project_list(&query);
        let sql = qb.sql();

        let workspace = sql.find("c.company_id = $1").unwrap();
        let clients = sql.find("p.client_id = ANY($2)").unwrap();
        let team = sql.find("pm.user_id = ANY($3)").unwrap();
        let billable = sql.find("p.billable = $4").unwrap();
        let search = sql.find("(p.name ILIKE $5 OR c.name ILIKE $6)").unwrap();
        assert!(workspace < clients && clients < team && team < billable && billable < search);
    }
}
