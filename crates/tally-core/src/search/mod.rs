//! Search projection of domain records

mod projection;

pub use projection::{
    EntryProjectionSource, EntrySearchDocument, SearchIndexSettings, TIMESHEET_ENTRY_INDEX,
};
