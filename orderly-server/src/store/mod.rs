//! Location Store
//!
//! Storage contract consumed by the queue manager, plus its backends:
//!
//! - [`DynamoStore`]: remote DynamoDB table keyed by location id
//! - [`FileStore`]: local JSON file holding the whole collection
//! - [`TieredStore`]: primary/secondary composition with one-shot fallback
//!
//! Absent records are `Ok(None)`; [`StoreError`] is reserved for backend
//! failures. There is no retry logic anywhere — a single attempt per tier.

pub mod dynamo;
pub mod file;
pub mod tiered;

pub use dynamo::DynamoStore;
pub use file::FileStore;
pub use tiered::TieredStore;

use async_trait::async_trait;
use shared::models::Location;
use thiserror::Error;

/// Store error types
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage read failed: {0}")]
    Read(String),

    #[error("Storage write failed: {0}")]
    Write(String),

    #[error("Corrupt location record: {0}")]
    Corrupt(String),
}

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// Contract between the queue manager and its storage
///
/// The value is always the full [`Location`] aggregate (metadata plus the
/// embedded queue entries), keyed by the opaque location id. Backends are
/// interchangeable; the manager never sees which one is active.
#[async_trait]
pub trait LocationStore: Send + Sync {
    /// Fetch one location aggregate; `Ok(None)` when absent
    async fn get(&self, id: &str) -> StoreResult<Option<Location>>;

    /// Persist a whole location aggregate (create or replace)
    async fn put(&self, location: &Location) -> StoreResult<()>;

    /// Fetch every location aggregate
    async fn list(&self) -> StoreResult<Vec<Location>>;

    /// Remove a location; returns whether it existed
    async fn delete(&self, id: &str) -> StoreResult<bool>;

    /// Backend name for logs and health reporting
    fn backend(&self) -> &'static str;
}
