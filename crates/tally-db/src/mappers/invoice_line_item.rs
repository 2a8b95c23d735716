//! Invoice line item entity <-> model mapper

use tally_core::entities::InvoiceLineItem;
use tally_core::value_objects::{ClientId, InvoiceLineItemId, TimesheetEntryId};

use crate::models::InvoiceLineItemModel;

impl From<InvoiceLineItemModel> for InvoiceLineItem {
    fn from(model: InvoiceLineItemModel) -> Self {
        InvoiceLineItem {
            id: InvoiceLineItemId::new(model.id),
            timesheet_entry_id: TimesheetEntryId::new(model.timesheet_entry_id),
            client_id: ClientId::new(model.client_id),
            name: model.name,
            description: model.description,
            date: model.date,
            rate: model.rate,
            quantity: model.quantity,
            created_at: model.created_at,
        }
    }
}
