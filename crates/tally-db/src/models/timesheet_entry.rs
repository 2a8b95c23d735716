//! Timesheet entry database models

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for timesheet_entries table
#[derive(Debug, Clone, FromRow)]
pub struct TimesheetEntryModel {
    pub id: i64,
    pub project_id: i64,
    pub user_id: i64,
    pub work_date: NaiveDate,
    pub duration: f64,
    pub note: String,
    pub bill_status: i16,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Entry joined with user, project and client names
#[derive(Debug, Clone, FromRow)]
pub struct EntryProjectionModel {
    #[sqlx(flatten)]
    pub entry: TimesheetEntryModel,
    pub client_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub project_name: String,
    pub client_name: String,
}
