//! Visit counter handler
//!
//! One invocation is a linear read-increment-write against the visit table:
//!
//! ```ignore
//! let handler = VisitCounterHandler::from_config(config, Arc::new(MemoryStore::start()));
//! let result = handler.handle(json!({"user": "alim"})).await?;
//! assert_eq!(result.message, "Hello alim! You have visited us 1 times.");
//! ```

use std::sync::Arc;

use serde_json::Value as JsonValue;

use crate::config::AppConfig;
use crate::error::HandlerError;
use crate::event::{InvocationEvent, InvocationResult};
use crate::store::{VisitRecord, VisitStore};
use crate::tracer::{self, Tracer};

/// Increments and reports a per-user visit counter
pub struct VisitCounterHandler {
    config: Arc<AppConfig>,
    store: Arc<dyn VisitStore>,
    tracer: Box<dyn Tracer>,
}

impl VisitCounterHandler {
    pub fn new(config: Arc<AppConfig>, store: Arc<dyn VisitStore>, tracer: Box<dyn Tracer>) -> Self {
        Self {
            config,
            store,
            tracer,
        }
    }

    /// Create a handler with the tracer selected by `config`
    pub fn from_config(config: Arc<AppConfig>, store: Arc<dyn VisitStore>) -> Self {
        let tracer = tracer::from_config(&config);
        Self::new(config, store, tracer)
    }

    /// Handle one invocation event.
    ///
    /// Not idempotent: every successful call adds one visit. The write is
    /// unconditional, so concurrent calls for the same user can lose updates.
    pub async fn handle(&self, payload: JsonValue) -> Result<InvocationResult, HandlerError> {
        self.tracer.wrap("handle", self.visit(payload)).await
    }

    async fn visit(&self, payload: JsonValue) -> Result<InvocationResult, HandlerError> {
        let event = InvocationEvent::from_payload(&payload)?;

        let previous = self
            .store
            .get(&event.user)
            .await?
            .map(|record| record.count)
            .unwrap_or(0);

        let record = VisitRecord::new(event.user, previous.saturating_add(1));
        self.store.put(&record).await?;

        let result = InvocationResult::greeting(&record);
        tracing::info!(
            store = self.store.kind(),
            table = %self.config.table_name,
            "{}",
            result.message
        );

        Ok(result)
    }
}

impl std::fmt::Debug for VisitCounterHandler {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("VisitCounterHandler")
            .field("config", &self.config)
            .field("store", &self.store.kind())
            .finish()
    }
}
