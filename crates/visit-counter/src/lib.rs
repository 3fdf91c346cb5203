//! Visit counter - a Lambda function that counts visits per user
//!
//! Each invocation reads the caller's counter from a DynamoDB table,
//! increments it, writes it back and greets the user with the new count.

pub mod config;
pub mod error;
pub mod event;
pub mod handler;
pub mod store;
pub mod tracer;

// Re-export key types at crate root
pub use config::AppConfig;
pub use error::HandlerError;
pub use event::{InvocationEvent, InvocationResult};
pub use handler::VisitCounterHandler;
pub use store::{DynamoStore, MemoryStore, StoreError, VisitRecord, VisitStore};
pub use tracer::{NoopTracer, SpanTracer, Tracer};
