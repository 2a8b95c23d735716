//! Value objects - immutable types that represent domain concepts

mod bill_status;
mod ids;
mod role;
mod time_frame;

pub use bill_status::{BillStatus, TransitionError};
pub use ids::{
    raw_ids, ClientId, CompanyId, IdParseError, InvoiceLineItemId, ProjectId, TimesheetEntryId,
    UserId,
};
pub use role::{Actor, CompanyRole};
pub use time_frame::{DateRange, TimeFrame};
