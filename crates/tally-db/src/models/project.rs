//! Project database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for projects table
#[derive(Debug, Clone, FromRow)]
pub struct ProjectModel {
    pub id: i64,
    pub client_id: i64,
    pub name: String,
    pub description: Option<String>,
    pub billable: bool,
    pub discarded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Row of the project listing query
#[derive(Debug, Clone, FromRow)]
pub struct ProjectSummaryModel {
    pub id: i64,
    pub name: String,
    pub client_id: i64,
    pub client_name: String,
    pub billable: bool,
}

/// project_members row joined with users
#[derive(Debug, Clone, FromRow)]
pub struct TeamMemberModel {
    pub user_id: i64,
    pub first_name: String,
    pub last_name: String,
    pub hourly_rate: f64,
}
