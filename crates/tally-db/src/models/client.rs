//! Client database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for clients table
#[derive(Debug, Clone, FromRow)]
pub struct ClientModel {
    pub id: i64,
    pub company_id: i64,
    pub name: String,
    pub email: String,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub client_code: String,
    pub discarded_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ClientModel {
    /// Check if client is discarded
    #[inline]
    pub fn is_discarded(&self) -> bool {
        self.discarded_at.is_some()
    }
}

/// Unbilled entry joined with its team member's rate and name
#[derive(Debug, Clone, FromRow)]
pub struct LineItemCandidateModel {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub date: NaiveDate,
    pub description: String,
    pub rate: f64,
    pub qty: f64,
}
