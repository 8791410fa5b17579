//! In-process telemetry store.
//!
//! Items are marshaled exactly as they would be for DynamoDB and kept in a
//! map keyed by `(machineId, timestamp)`, so a second write for the same key
//! replaces the first.

use std::collections::BTreeMap;

use async_trait::async_trait;
use sentinel_core::telemetry::TelemetryRecord;
use tokio::sync::Mutex;

use crate::item::{from_item, to_item, Item};
use crate::store::{StoreError, TelemetryStore};

type ItemKey = (String, String);

/// Table stand-in for tests and local dry runs.
#[derive(Debug, Default)]
pub struct MemoryStore {
    items: Mutex<BTreeMap<ItemKey, Item>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of distinct keys currently stored.
    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    /// Raw item for a key, as it would be returned by `GetItem`.
    pub async fn get_item(&self, machine_id: &str, timestamp: &str) -> Option<Item> {
        self.items
            .lock()
            .await
            .get(&(machine_id.to_string(), timestamp.to_string()))
            .cloned()
    }

    /// All stored records, ordered by `(machineId, timestamp)`.
    pub async fn records(&self) -> Vec<TelemetryRecord> {
        self.items
            .lock()
            .await
            .values()
            .filter_map(|item| from_item(item).ok())
            .collect()
    }
}

#[async_trait]
impl TelemetryStore for MemoryStore {
    async fn put_record(&self, record: &TelemetryRecord) -> Result<(), StoreError> {
        let item = to_item(record)?;
        let key = (record.machine_id.clone(), record.timestamp.clone());
        self.items.lock().await.insert(key, item);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;
    use aws_sdk_dynamodb::types::AttributeValue;
    use sentinel_core::severity::Severity;

    fn record(machine_id: &str, timestamp: &str, value: f64) -> TelemetryRecord {
        TelemetryRecord {
            machine_id: machine_id.into(),
            timestamp: timestamp.into(),
            sensor_type: "temperature".into(),
            value,
            is_incident: false,
            severity: None,
        }
    }

    #[tokio::test]
    async fn put_then_read_back() {
        let store = MemoryStore::new();
        let r = record("M1", "2024-01-15T10:30:00Z", 42.0);
        store.put_record(&r).await.unwrap();

        assert_eq!(store.len().await, 1);
        assert_eq!(store.records().await, vec![r]);

        let item = store.get_item("M1", "2024-01-15T10:30:00Z").await.unwrap();
        assert_eq!(item["value"], AttributeValue::N("42".into()));
    }

    #[tokio::test]
    async fn same_key_is_fully_replaced() {
        let store = MemoryStore::new();
        let mut first = record("M1", "2024-01-15T10:30:00Z", 95.0);
        first.is_incident = true;
        first.severity = Some(Severity::Critical);
        store.put_record(&first).await.unwrap();

        let second = record("M1", "2024-01-15T10:30:00Z", 20.0);
        store.put_record(&second).await.unwrap();

        assert_eq!(store.len().await, 1);
        let item = store.get_item("M1", "2024-01-15T10:30:00Z").await.unwrap();
        assert!(!item.contains_key("severity"));
        assert_eq!(store.records().await, vec![second]);
    }

    #[tokio::test]
    async fn distinct_keys_are_kept_apart() {
        let store = MemoryStore::new();
        store
            .put_record(&record("M1", "2024-01-15T10:30:00Z", 1.0))
            .await
            .unwrap();
        store
            .put_record(&record("M1", "2024-01-15T10:30:01Z", 2.0))
            .await
            .unwrap();
        store
            .put_record(&record("M2", "2024-01-15T10:30:00Z", 3.0))
            .await
            .unwrap();

        assert_eq!(store.len().await, 3);
    }

    #[tokio::test]
    async fn unserializable_record_is_not_stored() {
        let store = MemoryStore::new();
        let result = store
            .put_record(&record("M1", "2024-01-15T10:30:00Z", f64::NAN))
            .await;

        assert_matches!(result, Err(StoreError::Serialization(_)));
        assert!(store.is_empty().await);
    }
}
