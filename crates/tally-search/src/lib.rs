//! # tally-search
//!
//! Adapters for the timesheet entry search index.
//!
//! ## Features
//!
//! - **Connection Pool**: Managed Redis connection pool with deadpool
//! - **Redis index queue**: `IndexOperation`s pushed onto a Redis list that
//!   the external indexer drains
//! - **In-memory index**: process-local index for development and tests
//! - **Dispatcher**: fire-and-forget `SearchIndexer` used by the services
//!
//! ## Example
//!
//! ```ignore
//! use tally_search::{RedisPool, RedisPoolConfig, RedisSearchIndex, SearchIndexer};
//!
//! let pool = RedisPool::new(RedisPoolConfig::default())?;
//! let index = RedisSearchIndex::new(pool, "tally:search:timesheet_entries");
//! let indexer = SearchIndexer::new(Arc::new(index));
//!
//! // Never fails the caller; errors are logged
//! indexer.dispatch(document);
//! ```

pub mod index;
pub mod indexer;
pub mod pool;

pub use index::{InMemorySearchIndex, IndexOperation, RedisSearchIndex};
pub use indexer::SearchIndexer;
pub use pool::{
    create_shared_pool, RedisPool, RedisPoolConfig, RedisPoolError, RedisResult, SharedRedisPool,
};
