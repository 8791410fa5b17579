//! Inbound telemetry readings and the enriched records written to storage.

use chrono::SecondsFormat;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use crate::incident::{classify, Classification};
use crate::severity::Severity;
use crate::types::Timestamp;

// ---------------------------------------------------------------------------
// RawTelemetry
// ---------------------------------------------------------------------------

/// A single sensor reading as enqueued by upstream producers.
///
/// Decoding is lenient in the same places producers already rely on: a
/// missing or `null` field takes its zero value (`""` / `0.0`) and field
/// names match case-insensitively. A value of the wrong type still fails.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RawTelemetry {
    #[serde(deserialize_with = "null_as_default")]
    pub machine_id: String,
    #[serde(deserialize_with = "null_as_default")]
    pub sensor_type: String,
    #[serde(deserialize_with = "null_as_default")]
    pub value: f64,
}

/// Wire names of the [`RawTelemetry`] fields.
const FIELD_NAMES: [&str; 3] = ["machineId", "sensorType", "value"];

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Decode a message body into a [`RawTelemetry`].
///
/// The body must be a JSON object. Keys that match a field name ignoring
/// ASCII case are folded onto it; when several keys fold onto the same
/// field, the last one in the body wins. Unknown keys are ignored.
pub fn decode(body: &str) -> Result<RawTelemetry, serde_json::Error> {
    let map = match serde_json::from_str::<Value>(body)? {
        Value::Object(map) => map,
        other => {
            return Err(serde_json::Error::custom(format!(
                "expected a JSON object, found {}",
                kind(&other)
            )))
        }
    };

    let folded: serde_json::Map<String, Value> = map
        .into_iter()
        .map(|(key, value)| (canonical_key(key), value))
        .collect();

    serde_json::from_value(Value::Object(folded))
}

fn canonical_key(key: String) -> String {
    FIELD_NAMES
        .iter()
        .find(|name| name.eq_ignore_ascii_case(&key))
        .map(|name| name.to_string())
        .unwrap_or(key)
}

fn kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

// ---------------------------------------------------------------------------
// TelemetryRecord
// ---------------------------------------------------------------------------

/// An enriched reading, keyed by `(machine_id, timestamp)` in the table.
#[derive(Debug, Clone, PartialEq)]
pub struct TelemetryRecord {
    pub machine_id: String,
    /// Ingestion time, RFC 3339 UTC with second precision.
    pub timestamp: String,
    pub sensor_type: String,
    pub value: f64,
    pub is_incident: bool,
    /// `Some` exactly when `is_incident` is true.
    pub severity: Option<Severity>,
}

impl TelemetryRecord {
    /// Build a record from a decoded reading and its classification,
    /// stamped with `now`.
    pub fn new(raw: RawTelemetry, classification: Classification, now: Timestamp) -> Self {
        Self {
            machine_id: raw.machine_id,
            timestamp: format_timestamp(now),
            sensor_type: raw.sensor_type,
            value: raw.value,
            is_incident: classification.is_incident,
            severity: classification.severity,
        }
    }

    /// Severity as stored, or `""` when the reading is not an incident.
    pub fn severity_str(&self) -> &'static str {
        self.severity.map(Severity::as_str).unwrap_or("")
    }
}

/// Classify `raw` and build its record, stamped with `now`.
pub fn enrich(raw: RawTelemetry, now: Timestamp) -> TelemetryRecord {
    let classification = classify(&raw.sensor_type, raw.value);
    TelemetryRecord::new(raw, classification, now)
}

/// Format a timestamp the way the table sort key expects it,
/// e.g. `2024-01-15T10:30:00Z`.
pub fn format_timestamp(ts: Timestamp) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Secs, true)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
