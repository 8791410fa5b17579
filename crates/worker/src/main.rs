//! `sentinel-worker` -- SQS-triggered telemetry ingestion Lambda.
//!
//! Decodes each queued sensor reading, flags incidents, and writes the
//! enriched record to DynamoDB.
//!
//! # Environment variables
//!
//! | Variable         | Required | Default                                | Description                  |
//! |------------------|----------|----------------------------------------|------------------------------|
//! | `DYNAMODB_TABLE` | yes      | --                                     | Target telemetry table       |
//! | `RUST_LOG`       | no       | `sentinel_worker=info,sentinel_db=info` | Log filter                  |
//! | `LOG_FORMAT`     | no       | `text`                                 | `json` for structured lines  |

use std::sync::Arc;

use sentinel_db::DynamoStore;
use sentinel_worker::logging::{self, LogFormat};
use sentinel_worker::{handler, Ingestor, WorkerConfig};

#[tokio::main]
async fn main() -> Result<(), lambda_runtime::Error> {
    dotenvy::dotenv().ok();

    logging::init(LogFormat::from_env());

    let config = WorkerConfig::from_env().unwrap_or_else(|e| {
        tracing::error!(error = %e, "Invalid configuration");
        std::process::exit(1);
    });

    let client = sentinel_db::create_client().await;
    let store = DynamoStore::new(client, config.table_name);

    tracing::info!(table = %store.table_name(), "Starting sentinel-worker");

    handler::run(Ingestor::new(Arc::new(store))).await
}
