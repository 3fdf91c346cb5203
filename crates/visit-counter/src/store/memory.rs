//! In-process visit table
//!
//! Runs as an actor owning a `HashMap` of counters. Used by `invoke-local`
//! and the tests; it has the same last-writer-wins semantics as the
//! DynamoDB table.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};

use super::actor::{spawn_actor, ActorError, ActorHandle, ActorMessage};
use super::{StoreError, VisitRecord, VisitStore};

/// Commands sent to the memory store actor
pub enum MemoryCommand {
    Get {
        key: String,
        reply: oneshot::Sender<Option<VisitRecord>>,
    },

    Put {
        record: VisitRecord,
        reply: oneshot::Sender<()>,
    },

    Shutdown,
}

impl ActorMessage for MemoryCommand {}

/// Memory store handle - cheap to clone
#[derive(Clone, Debug)]
pub struct MemoryStore {
    handle: ActorHandle<MemoryCommand>,
}

impl MemoryStore {
    /// Start the store actor with an empty table
    pub fn start() -> Self {
        Self::with_records(Vec::new())
    }

    /// Start the store actor with pre-existing records
    pub fn with_records(records: impl IntoIterator<Item = VisitRecord>) -> Self {
        let table: HashMap<String, u64> = records
            .into_iter()
            .map(|record| (record.key, record.count))
            .collect();

        let handle = spawn_actor(64, move |rx| memory_actor(table, rx));
        Self { handle }
    }

    /// Stop the actor; later calls fail with `StoreError::Unavailable`
    pub async fn shutdown(&self) {
        if let Err(err) = self.handle.send(MemoryCommand::Shutdown).await {
            tracing::debug!("Memory store already stopped: {}", err);
        }
    }
}

#[async_trait]
impl VisitStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<VisitRecord>, StoreError> {
        let (tx, rx) = oneshot::channel();

        self.handle
            .send(MemoryCommand::Get {
                key: key.to_string(),
                reply: tx,
            })
            .await?;

        Ok(rx.await.map_err(ActorError::from)?)
    }

    async fn put(&self, record: &VisitRecord) -> Result<(), StoreError> {
        let (tx, rx) = oneshot::channel();

        self.handle
            .send(MemoryCommand::Put {
                record: record.clone(),
                reply: tx,
            })
            .await?;

        Ok(rx.await.map_err(ActorError::from)?)
    }

    fn kind(&self) -> &'static str {
        "memory"
    }
}

async fn memory_actor(mut table: HashMap<String, u64>, mut rx: mpsc::Receiver<MemoryCommand>) {
    tracing::debug!(records = table.len(), "Memory store actor started");

    while let Some(cmd) = rx.recv().await {
        match cmd {
            MemoryCommand::Get { key, reply } => {
                let record = table
                    .get(&key)
                    .map(|count| VisitRecord::new(key.clone(), *count));
                let _ = reply.send(record);
            }

            MemoryCommand::Put { record, reply } => {
                table.insert(record.key, record.count);
                let _ = reply.send(());
            }

            MemoryCommand::Shutdown => {
                tracing::debug!("Memory store actor shutting down");
                break;
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_get_missing_key() {
        let store = MemoryStore::start();
        assert_eq!(store.get("nobody").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_put_overwrites() {
        let store = MemoryStore::start();

        store.put(&VisitRecord::new("alim", 3)).await.unwrap();
        store.put(&VisitRecord::new("alim", 1)).await.unwrap();

        let record = store.get("alim").await.unwrap().unwrap();
        assert_eq!(record, VisitRecord::new("alim", 1));
    }

    #[tokio::test]
    async fn test_seeded_records() {
        let store = MemoryStore::with_records(vec![
            VisitRecord::new("a", 7),
            VisitRecord::new("b", 0),
        ]);

        assert_eq!(store.get("a").await.unwrap().map(|r| r.count), Some(7));
        assert_eq!(store.get("b").await.unwrap().map(|r| r.count), Some(0));
        assert_eq!(store.kind(), "memory");
    }

    #[tokio::test]
    async fn test_unavailable_after_shutdown() {
        let store = MemoryStore::start();
        store.shutdown().await;

        let err = store.get("alim").await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
        assert!(err.to_string().starts_with("Store unavailable: memory store: Actor"));

        let err = store.put(&VisitRecord::new("alim", 1)).await.unwrap_err();
        assert!(matches!(err, StoreError::Unavailable(_)));
    }

    #[tokio::test]
    async fn test_shutdown_twice() {
        let store = MemoryStore::start();
        store.shutdown().await;
        while store.handle.is_alive() {
            tokio::task::yield_now().await;
        }

        // The second call finds the channel closed and only logs it.
        store.shutdown().await;
        assert!(!store.handle.is_alive());
    }
}
