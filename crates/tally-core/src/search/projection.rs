//! Search document for timesheet entries
//!
//! The document is a flat, denormalized view of an entry together with the
//! names of its user, project and client, keyed by the entry id. It carries
//! the entry's `updated_at` so an index can drop documents older than the one
//! it holds.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{full_name, TimesheetEntry};
use crate::value_objects::{BillStatus, ClientId, ProjectId, TimesheetEntryId, UserId};

/// Name of the index holding entry documents
pub const TIMESHEET_ENTRY_INDEX: &str = "timesheet_entries";

/// Entry with the related records needed to build its document
#[derive(Debug, Clone, PartialEq)]
pub struct EntryProjectionSource {
    pub entry: TimesheetEntry,
    pub client_id: ClientId,
    pub user_first_name: String,
    pub user_last_name: String,
    pub project_name: String,
    pub client_name: String,
}

/// Indexed representation of a timesheet entry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EntrySearchDocument {
    pub id: TimesheetEntryId,
    pub project_id: ProjectId,
    pub client_id: ClientId,
    pub user_id: UserId,
    pub work_date: NaiveDate,
    pub note: String,
    pub user_name: String,
    pub project_name: String,
    pub client_name: String,
    pub bill_status: BillStatus,
    /// Whole minutes, truncated
    pub duration: i64,
    pub created_at: DateTime<Utc>,
    /// Version of the entry the document was built from
    pub updated_at: DateTime<Utc>,
}

impl EntrySearchDocument {
    /// Whether this document may replace `held`
    ///
    /// Equal versions replace, since renames of the related records change
    /// the document without touching the entry.
    #[inline]
    pub fn supersedes(&self, held: &Self) -> bool {
        self.updated_at >= held.updated_at
    }
}

impl From<&EntryProjectionSource> for EntrySearchDocument {
    fn from(source: &EntryProjectionSource) -> Self {
        let entry = &source.entry;
        Self {
            id: entry.id,
            project_id: entry.project_id,
            client_id: source.client_id,
            user_id: entry.user_id,
            work_date: entry.work_date,
            note: entry.note.clone(),
            user_name: full_name(&source.user_first_name, &source.user_last_name),
            project_name: source.project_name.clone(),
            client_name: source.client_name.clone(),
            bill_status: entry.bill_status,
            duration: entry.duration.trunc() as i64,
            created_at: entry.created_at,
            updated_at: entry.updated_at,
        }
    }
}

/// Field capabilities the index must be configured with
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SearchIndexSettings {
    pub index: &'static str,
    pub filterable: &'static [&'static str],
    pub word_middle: &'static [&'static str],
}

impl SearchIndexSettings {
    pub const fn timesheet_entries() -> Self {
        Self {
            index: TIMESHEET_ENTRY_INDEX,
            filterable: &[
                "user_name",
                "created_at",
                "project_name",
                "client_name",
                "bill_status",
            ],
            word_middle: &["user_name", "note"],
        }
    }
}
