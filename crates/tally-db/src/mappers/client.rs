//! Client entity <-> model mapper

use tally_core::entities::{Client, LineItemCandidate};
use tally_core::value_objects::{ClientId, CompanyId, TimesheetEntryId};

use crate::models::{ClientModel, LineItemCandidateModel};

impl From<ClientModel> for Client {
    fn from(model: ClientModel) -> Self {
        Client {
            id: ClientId::new(model.id),
            company_id: CompanyId::new(model.company_id),
            name: model.name,
            email: model.email,
            phone: model.phone,
            address: model.address,
            client_code: model.client_code,
            discarded_at: model.discarded_at,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<LineItemCandidateModel> for LineItemCandidate {
    fn from(model: LineItemCandidateModel) -> Self {
        LineItemCandidate {
            timesheet_entry_id: TimesheetEntryId::new(model.id),
            first_name: model.first_name,
            last_name: model.last_name,
            date: model.date,
            description: model.description,
            rate: model.rate,
            quantity: model.qty,
        }
    }
}
