//! Invoice line item database model

use chrono::{DateTime, NaiveDate, Utc};
use sqlx::FromRow;

/// Database model for invoice_line_items table
#[derive(Debug, Clone, FromRow)]
pub struct InvoiceLineItemModel {
    pub id: i64,
    pub timesheet_entry_id: i64,
    pub client_id: i64,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub rate: f64,
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
}
