//! Invoke the visit counter handler outside of Lambda
//!
//! ```text
//! TABLE_NAME=visit-count-table invoke-local --user alim
//! invoke-local --user alim --times 3 --memory
//! ```

use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Parser;
use serde_json::json;

use visit_counter::config::DEFAULT_SERVICE_NAME;
use visit_counter::{tracer, AppConfig, DynamoStore, MemoryStore, VisitCounterHandler, VisitStore};

#[derive(Parser, Debug)]
#[command(name = "invoke-local", about = "Invoke the visit counter handler locally")]
struct Args {
    /// User to record a visit for
    #[arg(long)]
    user: String,

    /// Number of invocations to run
    #[arg(long, default_value_t = 1)]
    times: u32,

    /// Use an in-process table instead of DynamoDB
    #[arg(long)]
    memory: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    // stdout carries the JSON results
    tracer::init_subscriber(std::io::stderr);
    let args = Args::parse();

    let (config, store): (AppConfig, Arc<dyn VisitStore>) = if args.memory {
        let config = AppConfig::from_env()
            .unwrap_or_else(|_| AppConfig::new("local-visit-count-table", DEFAULT_SERVICE_NAME));
        (config, Arc::new(MemoryStore::start()))
    } else {
        let config = AppConfig::from_env().context("TABLE_NAME must be set unless --memory is given")?;
        let store = DynamoStore::from_env(config.table_name.clone()).await;
        (config, Arc::new(store))
    };

    let handler = VisitCounterHandler::from_config(Arc::new(config), store);

    for _ in 0..args.times {
        let result = handler.handle(json!({ "user": args.user })).await?;
        println!("{}", serde_json::to_string(&result)?);
    }

    Ok(())
}
