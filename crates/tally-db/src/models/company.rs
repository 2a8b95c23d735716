//! Company and membership database models

use chrono::{DateTime, Utc};
use sqlx::FromRow;

/// Database model for companies table
#[derive(Debug, Clone, FromRow)]
pub struct CompanyModel {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Database model for company_users table
#[derive(Debug, Clone, FromRow)]
pub struct CompanyMemberModel {
    pub company_id: i64,
    pub user_id: i64,
    pub role: String,
}
