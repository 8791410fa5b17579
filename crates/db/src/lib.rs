//! DynamoDB persistence for enriched telemetry records.
//!
//! - [`item`] maps records to and from DynamoDB attribute maps.
//! - [`store`] defines the [`TelemetryStore`] seam used by the worker.
//! - [`repositories`] holds the DynamoDB-backed write path.
//! - [`memory`] is an in-process store with the same upsert semantics.

pub mod item;
pub mod memory;
pub mod repositories;
pub mod store;

pub use item::{from_item, to_item, Item, SerializationError};
pub use memory::MemoryStore;
pub use repositories::TelemetryRepo;
pub use store::{DynamoStore, StoreError, TelemetryStore};

pub type DbClient = aws_sdk_dynamodb::Client;

/// Create a DynamoDB client from the standard AWS environment
/// (region, credentials, endpoint overrides).
pub async fn create_client() -> DbClient {
    let config = aws_config::load_defaults(aws_config::BehaviorVersion::latest()).await;
    aws_sdk_dynamodb::Client::new(&config)
}
