//! Repository for the telemetry table (one item per reading).

use aws_sdk_dynamodb::error::SdkError;
use aws_sdk_dynamodb::operation::put_item::PutItemError;

use crate::item::Item;
use crate::DbClient;

/// Provides write operations for telemetry items.
pub struct TelemetryRepo;

impl TelemetryRepo {
    /// Create or fully replace the item with the same `(machineId, timestamp)` key.
    pub async fn put(
        client: &DbClient,
        table_name: &str,
        item: Item,
    ) -> Result<(), SdkError<PutItemError>> {
        client
            .put_item()
            .table_name(table_name)
            .set_item(Some(item))
            .send()
            .await?;
        Ok(())
    }
}
