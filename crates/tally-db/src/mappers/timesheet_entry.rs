//! Timesheet entry entity <-> model mapper

use tally_core::entities::TimesheetEntry;
use tally_core::error::DomainError;
use tally_core::search::EntryProjectionSource;
use tally_core::value_objects::{BillStatus, ClientId, ProjectId, TimesheetEntryId, UserId};

use crate::models::{EntryProjectionModel, TimesheetEntryModel};

impl TryFrom<TimesheetEntryModel> for TimesheetEntry {
    type Error = DomainError;

    fn try_from(model: TimesheetEntryModel) -> Result<Self, Self::Error> {
        let bill_status = BillStatus::try_from(model.bill_status).map_err(|raw| {
            DomainError::DatabaseError(format!("invalid bill_status {raw} on entry {}", model.id))
        })?;
        Ok(TimesheetEntry {
            id: TimesheetEntryId::new(model.id),
            project_id: ProjectId::new(model.project_id),
            user_id: UserId::new(model.user_id),
            work_date: model.work_date,
            duration: model.duration,
            note: model.note,
            bill_status,
            created_at: model.created_at,
            updated_at: model.updated_at,
        })
    }
}

impl TryFrom<EntryProjectionModel> for EntryProjectionSource {
    type Error = DomainError;

    fn try_from(model: EntryProjectionModel) -> Result<Self, Self::Error> {
        Ok(EntryProjectionSource {
            entry: TimesheetEntry::try_from(model.entry)?,
            client_id: ClientId::new(model.client_id),
            user_first_name: model.first_name,
            user_last_name: model.last_name,
            project_name: model.project_name,
            client_name: model.client_name,
        })
    }
}

/// Map a batch of rows, failing on the first corrupt one
pub fn entries_from_models(
    models: Vec<TimesheetEntryModel>,
) -> Result<Vec<TimesheetEntry>, DomainError> {
    models.into_iter().map(TimesheetEntry::try_from).collect()
}
