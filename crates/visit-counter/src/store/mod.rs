//! Visit record stores
//!
//! The handler only needs two capabilities from a key-value table:
//! - `get` a record by user key
//! - `put` a record, overwriting whatever is there
//!
//! Two backends are provided:
//! - DynamoDB (the deployed table)
//! - Memory (actor-backed, for local invocation and tests)

pub mod actor;
pub mod dynamodb;
pub mod memory;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use actor::ActorError;

pub use dynamodb::DynamoStore;
pub use memory::MemoryStore;

/// A user's visit counter as persisted in the table
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VisitRecord {
    /// User identifier (partition key)
    pub key: String,

    /// Number of recorded visits
    pub count: u64,
}

impl VisitRecord {
    pub fn new(key: impl Into<String>, count: u64) -> Self {
        Self {
            key: key.into(),
            count,
        }
    }
}

/// Key-value capabilities the handler depends on
///
/// Writes are unconditional: `put` replaces any existing record for the key,
/// so concurrent read-increment-write sequences for one key may lose updates.
#[async_trait]
pub trait VisitStore: Send + Sync {
    /// Fetch the record for `key`, `None` if the user has never visited
    async fn get(&self, key: &str) -> Result<Option<VisitRecord>, StoreError>;

    /// Persist `record`, last writer wins
    async fn put(&self, record: &VisitRecord) -> Result<(), StoreError>;

    /// Backend name for logs
    fn kind(&self) -> &'static str;
}

/// Errors raised by a store backend
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Store unavailable: {0}")]
    Unavailable(String),

    #[error("Read failed: {0}")]
    ReadFailed(String),

    #[error("Write failed: {0}")]
    WriteFailed(String),

    #[error("Malformed record for {key}: {reason}")]
    Malformed { key: String, reason: String },
}

impl From<ActorError> for StoreError {
    fn from(err: ActorError) -> Self {
        StoreError::Unavailable(format!("memory store: {}", err))
    }
}
