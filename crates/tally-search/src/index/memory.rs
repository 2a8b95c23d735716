//! Process-local search index

use async_trait::async_trait;
use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::Arc;
use tracing::debug;

use tally_core::{EntrySearchDocument, RepoResult, SearchIndex, TimesheetEntryId};

/// `SearchIndex` holding documents in a concurrent map
///
/// Clones share the same storage. A document older than the one already
/// held for its entry is ignored, so out-of-order writes settle on the newest.
#[derive(Debug, Clone, Default)]
pub struct InMemorySearchIndex {
    documents: Arc<DashMap<TimesheetEntryId, EntrySearchDocument>>,
}

impl InMemorySearchIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, id: TimesheetEntryId) -> Option<EntrySearchDocument> {
        self.documents.get(&id).map(|doc| doc.value().clone())
    }

    pub fn len(&self) -> usize {
        self.documents.len()
    }

    pub fn is_empty(&self) -> bool {
        self.documents.is_empty()
    }

    /// Case-insensitive substring match over the word-middle fields
    /// (`user_name`, `note`), ordered by entry id
    pub fn search(&self, term: &str) -> Vec<EntrySearchDocument> {
        let needle = term.trim().to_lowercase();
        let mut hits: Vec<_> = self
            .documents
            .iter()
            .filter(|doc| {
                needle.is_empty()
                    || doc.user_name.to_lowercase().contains(&needle)
                    || doc.note.to_lowercase().contains(&needle)
            })
            .map(|doc| doc.value().clone())
            .collect();
        hits.sort_by_key(|doc| doc.id);
        hits
    }
}

#[async_trait]
impl SearchIndex for InMemorySearchIndex {
    async fn index(&self, document: &EntrySearchDocument) -> RepoResult<()> {
        match self.documents.entry(document.id) {
            Entry::Occupied(mut held) => {
                if document.supersedes(held.get()) {
                    held.insert(document.clone());
                } else {
                    debug!(entry_id = %document.id, "Ignoring outdated search document");
                }
            }
            Entry::Vacant(slot) => {
                slot.insert(document.clone());
            }
        }
        Ok(())
    }

    async fn remove(&self, id: TimesheetEntryId) -> RepoResult<()> {
        self.documents.remove(&id);
        Ok(())
    }
}
