//! Visit counter - Lambda entry point
//!
//! Configuration and the DynamoDB client are set up once per execution
//! environment; every invocation then reuses them.

use std::sync::Arc;

use lambda_runtime::{run, service_fn, Error, LambdaEvent};
use serde_json::Value as JsonValue;
use tracing::Instrument;

use visit_counter::{tracer, AppConfig, DynamoStore, VisitCounterHandler};

#[tokio::main]
async fn main() -> Result<(), Error> {
    tracer::init_subscriber(std::io::stdout);

    let config = AppConfig::from_env()?;
    tracing::info!("Configuration loaded: {:?}", config);

    let store = DynamoStore::from_env(config.table_name.clone()).await;
    let handler = VisitCounterHandler::from_config(Arc::new(config), Arc::new(store));

    run(service_fn(|event: LambdaEvent<JsonValue>| {
        let handler = &handler;
        async move {
            let (payload, context) = event.into_parts();
            let span = tracing::info_span!("request", request_id = %context.request_id);
            handler.handle(payload).instrument(span).await
        }
    }))
    .await
}
