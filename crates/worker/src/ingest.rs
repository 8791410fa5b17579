//! Per-message pipeline and batch orchestration.
//!
//! For each message, in order: decode the body, classify the reading,
//! stamp it with the current time, and upsert it into the store. The first
//! failure stops the batch. Records already written stay written; the host
//! redelivers the whole batch, so earlier messages are written again under a
//! new timestamp.

use std::sync::Arc;

use chrono::Utc;
use sentinel_core::incident::describe;
use sentinel_core::telemetry::{decode, enrich, TelemetryRecord};
use sentinel_core::types::Timestamp;
use sentinel_db::TelemetryStore;

use crate::error::IngestError;

/// Source of the ingestion timestamp.
pub type Clock = Arc<dyn Fn() -> Timestamp + Send + Sync>;

/// One message from the inbound batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct QueueMessage {
    pub message_id: String,
    pub body: String,
}

impl QueueMessage {
    pub fn new(message_id: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            message_id: message_id.into(),
            body: body.into(),
        }
    }
}

/// Runs the ingestion pipeline against a shared store.
///
/// Built once at startup and shared by every invocation. Holds no mutable
/// state of its own.
#[derive(Clone)]
pub struct Ingestor {
    store: Arc<dyn TelemetryStore>,
    clock: Clock,
}

impl Ingestor {
    /// Create an ingestor that stamps records with the wall clock.
    pub fn new(store: Arc<dyn TelemetryStore>) -> Self {
        Self::with_clock(store, Arc::new(Utc::now))
    }

    pub fn with_clock(store: Arc<dyn TelemetryStore>, clock: Clock) -> Self {
        Self { store, clock }
    }

    /// Decode, classify, and persist a single message.
    ///
    /// Returns the record that was written.
    pub async fn process_message(
        &self,
        message: &QueueMessage,
    ) -> Result<TelemetryRecord, IngestError> {
        let raw = decode(&message.body).map_err(|source| IngestError::Decode {
            message_id: message.message_id.clone(),
            source,
        })?;

        let record = enrich(raw, (self.clock)());

        self.store
            .put_record(&record)
            .await
            .map_err(|e| IngestError::from_store(&message.message_id, e))?;

        if let Some(severity) = record.severity {
            tracing::warn!(
                message_id = %message.message_id,
                machine_id = %record.machine_id,
                severity = %severity,
                "Incident detected: {}",
                describe(severity, &record.sensor_type, record.value)
            );
        }

        tracing::info!(
            message_id = %message.message_id,
            machine_id = %record.machine_id,
            sensor_type = %record.sensor_type,
            value = record.value,
            is_incident = record.is_incident,
            "Processed telemetry"
        );

        Ok(record)
    }

    /// Process every message in order, stopping at the first failure.
    ///
    /// Returns the number of messages processed. On failure, messages after
    /// the failing one are never attempted.
    pub async fn process_batch(&self, messages: &[QueueMessage]) -> Result<usize, IngestError> {
        for (index, message) in messages.iter().enumerate() {
            if let Err(e) = self.process_message(message).await {
                tracing::error!(
                    message_id = %message.message_id,
                    position = index,
                    batch_size = messages.len(),
                    error = %e,
                    "Error processing message, failing batch"
                );
                return Err(e);
            }
        }

        tracing::debug!(batch_size = messages.len(), "Batch processed");
        Ok(messages.len())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
