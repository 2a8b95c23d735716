//! Redis-backed index queue
//!
//! Index writes are not applied here. Each write becomes an `IndexOperation`
//! pushed onto a Redis list and the external indexer pops from the tail.
//! Writes are enqueued from independent tasks, so list order is not version
//! order: consumers keep the document with the newest `updated_at` per entry.
//! Delivery is at-least-once, so consumers deduplicate on `op_id`.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use tally_core::search::{EntrySearchDocument, TIMESHEET_ENTRY_INDEX};
use tally_core::{DomainError, RepoResult, SearchIndex, TimesheetEntryId};

use crate::pool::{RedisPool, RedisPoolError};

/// One queued write against the search index
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum IndexOperation {
    Index {
        op_id: Uuid,
        index: String,
        enqueued_at: DateTime<Utc>,
        document: EntrySearchDocument,
    },
    Remove {
        op_id: Uuid,
        index: String,
        enqueued_at: DateTime<Utc>,
        id: TimesheetEntryId,
    },
}

impl IndexOperation {
    /// Upsert of an entry document
    pub fn index(document: EntrySearchDocument) -> Self {
        Self::Index {
            op_id: Uuid::new_v4(),
            index: TIMESHEET_ENTRY_INDEX.to_string(),
            enqueued_at: Utc::now(),
            document,
        }
    }

    /// Removal of an entry document
    pub fn remove(id: TimesheetEntryId) -> Self {
        Self::Remove {
            op_id: Uuid::new_v4(),
            index: TIMESHEET_ENTRY_INDEX.to_string(),
            enqueued_at: Utc::now(),
            id,
        }
    }

    pub fn op_id(&self) -> Uuid {
        match self {
            Self::Index { op_id, .. } | Self::Remove { op_id, .. } => *op_id,
        }
    }

    /// Entry the operation concerns
    pub fn entry_id(&self) -> TimesheetEntryId {
        match self {
            Self::Index { document, .. } => document.id,
            Self::Remove { id, .. } => *id,
        }
    }
}

impl From<RedisPoolError> for DomainError {
    fn from(err: RedisPoolError) -> Self {
        DomainError::SearchError(err.to_string())
    }
}

/// `SearchIndex` that enqueues operations on a Redis list
#[derive(Debug, Clone)]
pub struct RedisSearchIndex {
    pool: RedisPool,
    queue_key: String,
}

impl RedisSearchIndex {
    pub fn new(pool: RedisPool, queue_key: impl Into<String>) -> Self {
        Self {
            pool,
            queue_key: queue_key.into(),
        }
    }

    pub fn queue_key(&self) -> &str {
        &self.queue_key
    }

    /// Operations waiting for the external indexer
    pub async fn pending(&self) -> RepoResult<u64> {
        Ok(self.pool.list_len(&self.queue_key).await?)
    }

    async fn enqueue(&self, op: &IndexOperation) -> RepoResult<()> {
        let depth = self.pool.push_json(&self.queue_key, op).await?;
        tracing::debug!(
            queue = %self.queue_key,
            op_id = %op.op_id(),
            entry_id = %op.entry_id(),
            depth,
            "Enqueued index operation"
        );
        Ok(())
    }
}

#[async_trait]
impl SearchIndex for RedisSearchIndex {
    #[tracing::instrument(skip(self, document), fields(entry_id = %document.id))]
    async fn index(&self, document: &EntrySearchDocument) -> RepoResult<()> {
        self.enqueue(&IndexOperation::index(document.clone())).await
    }

    #[tracing::instrument(skip(self))]
    async fn remove(&self, id: TimesheetEntryId) -> RepoResult<()> {
        self.enqueue(&IndexOperation::remove(id)).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use tally_core::{BillStatus, ClientId, ProjectId, UserId};

    fn document() -> EntrySearchDocument {
        EntrySearchDocument {
            id: TimesheetEntryId::new(11),
            project_id: ProjectId::new(2),
            client_id: ClientId::new(3),
            user_id: UserId::new(4),
            work_date: NaiveDate::from_ymd_opt(2024, 6, 3).unwrap(),
            note: "standup".to_string(),
            user_name: "Ada Lovelace".to_string(),
            project_name: "Engine".to_string(),
            client_name: "Babbage Ltd".to_string(),
            bill_status: BillStatus::Unbilled,
            duration: 15,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_operation_json_shape() {
        let op = IndexOperation::index(document());
        let json = serde_json::to_value(&op).unwrap();
        assert_eq!(json["op"], "index");
        assert_eq!(json["index"], TIMESHEET_ENTRY_INDEX);
        assert_eq!(json["document"]["id"], 11);
        assert!(json["document"]["updated_at"].is_string());
        assert_eq!(json["op_id"], op.op_id().to_string());

        let json = serde_json::to_value(IndexOperation::remove(TimesheetEntryId::new(9))).unwrap();
        assert_eq!(json["op"], "remove");
        assert_eq!(json["id"], 9);
    }

    #[test]
    fn test_operation_ids_are_unique() {
        let a = IndexOperation::remove(TimesheetEntryId::new(1));
        let b = IndexOperation::remove(TimesheetEntryId::new(1));
        assert_ne!(a.op_id(), b.op_id());
        assert_eq!(a.entry_id(), b.entry_id());
    }

    #[test]
    fn test_operation_parses_back() {
        let op = IndexOperation::index(document());
        let json = serde_json::to_string(&op).unwrap();
        let parsed: IndexOperation = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, op);
    }

    #[tokio::test]
    async fn test_unreachable_redis_is_a_search_error() {
        let pool = RedisPool::new(crate::RedisPoolConfig {
            url: "redis://127.0.0.1:1".to_string(),
            max_connections: 1,
        })
        .unwrap();
        let index = RedisSearchIndex::new(pool, "tally:test:queue");

        let err = index.index(&document()).await.unwrap_err();
        assert!(matches!(err, DomainError::SearchError(_)));
    }
}
