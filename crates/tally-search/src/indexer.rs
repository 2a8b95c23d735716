//! Fire-and-forget dispatch of search index writes
//!
//! Index writes never fail the request that triggered them. Each write runs
//! on its own tokio task and failures are logged and dropped. Tasks may finish
//! in any order; documents carry the entry version, so an index keeps the
//! newest one.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tracing::{debug, warn};

use tally_core::{EntryProjectionSource, EntrySearchDocument, SearchIndex, TimesheetEntryId};

/// Dispatcher in front of a `SearchIndex`
#[derive(Clone)]
pub struct SearchIndexer {
    index: Arc<dyn SearchIndex>,
}

impl std::fmt::Debug for SearchIndexer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchIndexer").finish_non_exhaustive()
    }
}

impl SearchIndexer {
    pub fn new(index: Arc<dyn SearchIndex>) -> Self {
        Self { index }
    }

    /// The wrapped index
    pub fn index(&self) -> &Arc<dyn SearchIndex> {
        &self.index
    }

    /// Project an entry and dispatch its document
    pub fn reproject(&self, source: &EntryProjectionSource) -> JoinHandle<()> {
        self.dispatch(EntrySearchDocument::from(source))
    }

    /// Write a document in the background
    ///
    /// The returned handle resolves once the attempt finished, successful or
    /// not. Callers are free to drop it.
    pub fn dispatch(&self, document: EntrySearchDocument) -> JoinHandle<()> {
        let index = Arc::clone(&self.index);
        tokio::spawn(async move {
            let entry_id = document.id;
            match index.index(&document).await {
                Ok(()) => debug!(entry_id = %entry_id, "Search document dispatched"),
                Err(e) => warn!(entry_id = %entry_id, error = %e, "Failed to index timesheet entry"),
            }
        })
    }

    /// Remove an entry's document in the background
    pub fn dispatch_remove(&self, id: TimesheetEntryId) -> JoinHandle<()> {
        let index = Arc::clone(&self.index);
        tokio::spawn(async move {
            if let Err(e) = index.remove(id).await {
                warn!(entry_id = %id, error = %e, "Failed to remove timesheet entry from index");
            }
        })
    }
}
