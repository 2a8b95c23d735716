//! PostgreSQL implementation of TimesheetEntryRepository

use async_trait::async_trait;
use sqlx::PgPool;
use tracing::instrument;

use tally_core::entities::{NewTimesheetEntry, TimesheetEntry};
use tally_core::error::DomainError;
use tally_core::search::EntryProjectionSource;
use tally_core::traits::{RepoResult, TimesheetEntryRepository};
use tally_core::value_objects::{
    raw_ids, BillStatus, CompanyId, DateRange, ProjectId, TimesheetEntryId, UserId,
};

use crate::mappers::entries_from_models;
use crate::models::{EntryProjectionModel, TimesheetEntryModel};

use super::error::map_db_error;

/// PostgreSQL implementation of TimesheetEntryRepository
#[derive(Clone)]
pub struct PgTimesheetEntryRepository {
    pool: PgPool,
}

impl PgTimesheetEntryRepository {
    /// Create a new PgTimesheetEntryRepository
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl TimesheetEntryRepository for PgTimesheetEntryRepository {
    #[instrument(skip(self))]
    async fn find_by_id(&self, id: TimesheetEntryId) -> RepoResult<Option<TimesheetEntry>> {
        let result = sqlx::query_as::<_, TimesheetEntryModel>(
            r"
            SELECT id, project_id, user_id, work_date, duration, note, bill_status,
                   created_at, updated_at
            FROM timesheet_entries
            WHERE id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(TimesheetEntry::try_from).transpose()
    }

    #[instrument(skip(self))]
    async fn find_by_user_during(
        &self,
        user_id: UserId,
        company_id: CompanyId,
        range: DateRange,
    ) -> RepoResult<Vec<TimesheetEntry>> {
        let results = sqlx::query_as::<_, TimesheetEntryModel>(
            r"
            SELECT te.id, te.project_id, te.user_id, te.work_date, te.duration, te.note,
                   te.bill_status, te.created_at, te.updated_at
            FROM timesheet_entries te
            JOIN projects p ON p.id = te.project_id
            JOIN clients c ON c.id = p.client_id
            WHERE te.user_id = $1
              AND c.company_id = $2
              AND te.work_date BETWEEN $3 AND $4
            ORDER BY te.work_date DESC, te.id DESC
            ",
        )
        .bind(user_id.into_inner())
        .bind(company_id.into_inner())
        .bind(range.from)
        .bind(range.to)
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        entries_from_models(results)
    }

    #[instrument(skip(self))]
    async fn find_many(&self, ids: &[TimesheetEntryId]) -> RepoResult<Vec<TimesheetEntry>> {
        let results = sqlx::query_as::<_, TimesheetEntryModel>(
            r"
            SELECT id, project_id, user_id, work_date, duration, note, bill_status,
                   created_at, updated_at
            FROM timesheet_entries
            WHERE id = ANY($1)
            ORDER BY work_date, id
            ",
        )
        .bind(raw_ids(ids))
        .fetch_all(&self.pool)
        .await
        .map_err(map_db_error)?;

        entries_from_models(results)
    }

    #[instrument(skip(self, entry), fields(project_id = %entry.project_id, user_id = %entry.user_id))]
    async fn create(
        &self,
        entry: &NewTimesheetEntry,
        bill_status: BillStatus,
    ) -> RepoResult<TimesheetEntry> {
        let model = sqlx::query_as::<_, TimesheetEntryModel>(
            r"
            INSERT INTO timesheet_entries (project_id, user_id, work_date, duration, note, bill_status)
            VALUES ($1, $2, $3, $4, $5, $6)
            RETURNING id, project_id, user_id, work_date, duration, note, bill_status,
                      created_at, updated_at
            ",
        )
        .bind(entry.project_id.into_inner())
        .bind(entry.user_id.into_inner())
        .bind(entry.work_date)
        .bind(entry.duration)
        .bind(&entry.note)
        .bind(bill_status.as_i16())
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)?;

        TimesheetEntry::try_from(model)
    }

    #[instrument(skip(self, entry), fields(entry_id = %entry.id))]
    async fn update(&self, entry: &TimesheetEntry, read_status: BillStatus) -> RepoResult<()> {
        let result = sqlx::query(
            r"
            UPDATE timesheet_entries
            SET project_id = $2, work_date = $3, duration = $4, note = $5, bill_status = $6,
                updated_at = NOW()
            WHERE id = $1 AND bill_status = $7
            ",
        )
        .bind(entry.id.into_inner())
        .bind(entry.project_id.into_inner())
        .bind(entry.work_date)
        .bind(entry.duration)
        .bind(&entry.note)
        .bind(entry.bill_status.as_i16())
        .bind(read_status.as_i16())
        .execute(&self.pool)
        .await
        .map_err(map_db_error)?;

        if result.rows_affected() == 0 {
            let exists = sqlx::query_scalar::<_, bool>(
                "SELECT EXISTS(SELECT 1 FROM timesheet_entries WHERE id = $1)",
            )
            .bind(entry.id.into_inner())
            .fetch_one(&self.pool)
            .await
            .map_err(map_db_error)?;

            return Err(if exists {
                DomainError::StaleTimesheetEntry(entry.id)
            } else {
                DomainError::TimesheetEntryNotFound(entry.id)
            });
        }

        Ok(())
    }

    #[instrument(skip(self))]
    async fn sum_duration(&self, project_id: ProjectId, range: DateRange) -> RepoResult<f64> {
        sqlx::query_scalar::<_, f64>(
            r"
            SELECT COALESCE(SUM(duration), 0)::DOUBLE PRECISION
            FROM timesheet_entries
            WHERE project_id = $1 AND work_date BETWEEN $2 AND $3
            ",
        )
        .bind(project_id.into_inner())
        .bind(range.from)
        .bind(range.to)
        .fetch_one(&self.pool)
        .await
        .map_err(map_db_error)
    }

    #[instrument(skip(self))]
    async fn projection_source(
        &self,
        id: TimesheetEntryId,
    ) -> RepoResult<Option<EntryProjectionSource>> {
        let result = sqlx::query_as::<_, EntryProjectionModel>(
            r"
            SELECT te.id, te.project_id, te.user_id, te.work_date, te.duration, te.note,
                   te.bill_status, te.created_at, te.updated_at,
                   p.client_id,
                   u.first_name,
                   u.last_name,
                   p.name AS project_name,
                   c.name AS client_name
            FROM timesheet_entries te
            JOIN users u ON u.id = te.user_id
            JOIN projects p ON p.id = te.project_id
            JOIN clients c ON c.id = p.client_id
            WHERE te.id = $1
            ",
        )
        .bind(id.into_inner())
        .fetch_optional(&self.pool)
        .await
        .map_err(map_db_error)?;

        result.map(EntryProjectionSource::try_from).transpose()
    }
}
