//! The storage seam between batch orchestration and the table.
//!
//! [`TelemetryStore`] is implemented by [`DynamoStore`] in production and by
//! [`MemoryStore`](crate::memory::MemoryStore) for tests and local runs.

use async_trait::async_trait;
use aws_sdk_dynamodb::error::DisplayErrorContext;
use sentinel_core::telemetry::TelemetryRecord;

use crate::item::{to_item, SerializationError};
use crate::repositories::TelemetryRepo;
use crate::DbClient;

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// Error type for persisting a record.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The record could not be mapped to the table's attribute format.
    #[error("Failed to serialize record: {0}")]
    Serialization(#[from] SerializationError),

    /// The write itself failed (throttling, permissions, network, ...).
    #[error("Failed to write to table '{table}': {message}")]
    Write { table: String, message: String },
}

// ---------------------------------------------------------------------------
// Trait
// ---------------------------------------------------------------------------

/// Durable upsert of telemetry records keyed by `(machine_id, timestamp)`.
#[async_trait]
pub trait TelemetryStore: Send + Sync {
    /// Create the item for the record's key, or fully replace an existing one.
    async fn put_record(&self, record: &TelemetryRecord) -> Result<(), StoreError>;
}

// ---------------------------------------------------------------------------
// DynamoStore
// ---------------------------------------------------------------------------

/// DynamoDB-backed store. Built once at startup and shared read-only.
#[derive(Debug, Clone)]
pub struct DynamoStore {
    client: DbClient,
    table_name: String,
}

impl DynamoStore {
    pub fn new(client: DbClient, table_name: impl Into<String>) -> Self {
        Self {
            client,
            table_name: table_name.into(),
        }
    }

    pub fn table_name(&self) -> &str {
        &self.table_name
    }
}

#[async_trait]
impl TelemetryStore for DynamoStore {
    async fn put_record(&self, record: &TelemetryRecord) -> Result<(), StoreError> {
        let item = to_item(record)?;

        TelemetryRepo::put(&self.client, &self.table_name, item)
            .await
            .map_err(|e| StoreError::Write {
                table: self.table_name.clone(),
                message: DisplayErrorContext(&e).to_string(),
            })?;

        tracing::debug!(
            table = %self.table_name,
            machine_id = %record.machine_id,
            timestamp = %record.timestamp,
            "Telemetry item written"
        );
        Ok(())
    }
}
