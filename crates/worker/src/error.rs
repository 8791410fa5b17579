//! Failure taxonomy for processing one queue message.
//!
//! Every variant carries the queue message id. The orchestrator treats all
//! of them the same way: log, stop the batch, and let the host redeliver.

use sentinel_db::{SerializationError, StoreError};

#[derive(Debug, thiserror::Error)]
pub enum IngestError {
    /// The body is not a JSON object with `machineId`, `sensorType`, `value`.
    #[error("Failed to decode message {message_id}: {source}")]
    Decode {
        message_id: String,
        source: serde_json::Error,
    },

    /// The record could not be mapped to table attributes.
    #[error("Failed to serialize record for message {message_id}: {source}")]
    Serialization {
        message_id: String,
        source: SerializationError,
    },

    /// The table write did not succeed.
    #[error("Failed to store record for message {message_id} in table '{table}': {cause}")]
    StoreWrite {
        message_id: String,
        table: String,
        cause: String,
    },
}

impl IngestError {
    /// Attach a message id to a store failure.
    pub fn from_store(message_id: &str, err: StoreError) -> Self {
        match err {
            StoreError::Serialization(source) => Self::Serialization {
                message_id: message_id.to_string(),
                source,
            },
            StoreError::Write { table, message } => Self::StoreWrite {
                message_id: message_id.to_string(),
                table,
                cause: message,
            },
        }
    }

    /// Id of the queue message that failed.
    pub fn message_id(&self) -> &str {
        match self {
            Self::Decode { message_id, .. }
            | Self::Serialization { message_id, .. }
            | Self::StoreWrite { message_id, .. } => message_id,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    #[test]
    fn store_write_keeps_cause_and_id() {
        let err = IngestError::from_store(
            "msg-1",
            StoreError::Write {
                table: "SentinelTelemetry".into(),
                message: "AccessDeniedException".into(),
            },
        );
        assert_eq!(err.message_id(), "msg-1");
        assert_eq!(
            err.to_string(),
            "Failed to store record for message msg-1 in table 'SentinelTelemetry': AccessDeniedException"
        );
    }

    #[test]
    fn store_serialization_maps_to_serialization() {
        let err = IngestError::from_store(
            "msg-2",
            StoreError::Serialization(SerializationError::MissingAttribute("value")),
        );
        assert_matches!(err, IngestError::Serialization { ref message_id, .. } if message_id == "msg-2");
    }

    #[test]
    fn decode_display_includes_id() {
        let source = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = IngestError::Decode {
            message_id: "msg-3".into(),
            source,
        };
        assert!(err.to_string().starts_with("Failed to decode message msg-3: "));
    }
}
