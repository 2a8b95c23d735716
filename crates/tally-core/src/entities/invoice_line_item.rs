//! Invoice line items created when entries are billed

use chrono::{DateTime, NaiveDate, Utc};

use crate::entities::user::full_name;
use crate::value_objects::{ClientId, InvoiceLineItemId, TimesheetEntryId};

/// Line item backed by exactly one billed timesheet entry
#[derive(Debug, Clone, PartialEq)]
pub struct InvoiceLineItem {
    pub id: InvoiceLineItemId,
    pub timesheet_entry_id: TimesheetEntryId,
    pub client_id: ClientId,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub rate: f64,
    /// Minutes
    pub quantity: f64,
    pub created_at: DateTime<Utc>,
}

impl InvoiceLineItem {
    /// Amount charged, rate being per hour
    pub fn amount(&self) -> f64 {
        self.rate * self.quantity / 60.0
    }
}

/// Unbilled entry of a client that may be turned into a line item
#[derive(Debug, Clone, PartialEq)]
pub struct LineItemCandidate {
    pub timesheet_entry_id: TimesheetEntryId,
    pub first_name: String,
    pub last_name: String,
    pub date: NaiveDate,
    pub description: String,
    pub rate: f64,
    pub quantity: f64,
}

impl LineItemCandidate {
    /// Line item name: the team member's full name
    pub fn name(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }
}

/// Attributes of a line item about to be inserted
#[derive(Debug, Clone, PartialEq)]
pub struct NewInvoiceLineItem {
    pub timesheet_entry_id: TimesheetEntryId,
    pub client_id: ClientId,
    pub name: String,
    pub description: String,
    pub date: NaiveDate,
    pub rate: f64,
    pub quantity: f64,
}

impl NewInvoiceLineItem {
    pub fn from_candidate(client_id: ClientId, candidate: &LineItemCandidate) -> Self {
        Self {
            timesheet_entry_id: candidate.timesheet_entry_id,
            client_id,
            name: candidate.name(),
            description: candidate.description.clone(),
            date: candidate.date,
            rate: candidate.rate,
            quantity: candidate.quantity,
        }
    }
}
