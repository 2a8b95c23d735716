//! Search index port

use async_trait::async_trait;

use crate::search::EntrySearchDocument;
use crate::traits::RepoResult;
use crate::value_objects::TimesheetEntryId;

/// External index receiving timesheet entry documents
#[async_trait]
pub trait SearchIndex: Send + Sync {
    /// Insert or replace the document keyed by its entry id
    async fn index(&self, document: &EntrySearchDocument) -> RepoResult<()>;

    /// Drop the document of an entry
    async fn remove(&self, id: TimesheetEntryId) -> RepoResult<()>;
}
