//! `SearchIndex` implementations

mod memory;
mod redis_queue;

pub use memory::InMemorySearchIndex;
pub use redis_queue::{IndexOperation, RedisSearchIndex};
