//! Mapping between [`TelemetryRecord`] and DynamoDB attribute maps.
//!
//! Attribute names and types:
//!
//! | Attribute     | Type | Notes                     |
//! |---------------|------|---------------------------|
//! | `machineId`   | S    | partition key             |
//! | `timestamp`   | S    | sort key, RFC 3339 UTC    |
//! | `sensorType`  | S    |                           |
//! | `value`       | N    |                           |
//! | `is_incident` | BOOL |                           |
//! | `severity`    | S    | omitted when not incident |

use std::collections::HashMap;

use aws_sdk_dynamodb::types::AttributeValue;
use sentinel_core::error::CoreError;
use sentinel_core::severity::Severity;
use sentinel_core::telemetry::TelemetryRecord;

/// A DynamoDB item as sent to / returned by the SDK.
pub type Item = HashMap<String, AttributeValue>;

pub const ATTR_MACHINE_ID: &str = "machineId";
pub const ATTR_TIMESTAMP: &str = "timestamp";
pub const ATTR_SENSOR_TYPE: &str = "sensorType";
pub const ATTR_VALUE: &str = "value";
pub const ATTR_IS_INCIDENT: &str = "is_incident";
pub const ATTR_SEVERITY: &str = "severity";

// ---------------------------------------------------------------------------
// Error
// ---------------------------------------------------------------------------

/// A record could not be mapped to or from its attribute representation.
#[derive(Debug, thiserror::Error)]
pub enum SerializationError {
    /// DynamoDB numbers cannot carry NaN or infinities.
    #[error("Attribute '{attribute}' is not a finite number: {value}")]
    NonFiniteNumber { attribute: &'static str, value: f64 },

    #[error("Missing attribute '{0}'")]
    MissingAttribute(&'static str),

    #[error("Attribute '{attribute}' is not of type {expected}")]
    WrongType {
        attribute: &'static str,
        expected: &'static str,
    },

    #[error("Attribute '{attribute}' is not a valid number: {raw}")]
    InvalidNumber { attribute: &'static str, raw: String },

    #[error("Attribute 'is_incident' is {is_incident} but severity is {severity:?}")]
    InconsistentIncident {
        is_incident: bool,
        severity: Option<Severity>,
    },

    #[error(transparent)]
    Core(#[from] CoreError),
}

// ---------------------------------------------------------------------------
// Record -> item
// ---------------------------------------------------------------------------

/// Marshal a record into a full DynamoDB item.
pub fn to_item(record: &TelemetryRecord) -> Result<Item, SerializationError> {
    if !record.value.is_finite() {
        return Err(SerializationError::NonFiniteNumber {
            attribute: ATTR_VALUE,
            value: record.value,
        });
    }
    if record.is_incident != record.severity.is_some() {
        return Err(SerializationError::InconsistentIncident {
            is_incident: record.is_incident,
            severity: record.severity,
        });
    }

    let mut item = Item::with_capacity(6);
    item.insert(
        ATTR_MACHINE_ID.into(),
        AttributeValue::S(record.machine_id.clone()),
    );
    item.insert(
        ATTR_TIMESTAMP.into(),
        AttributeValue::S(record.timestamp.clone()),
    );
    item.insert(
        ATTR_SENSOR_TYPE.into(),
        AttributeValue::S(record.sensor_type.clone()),
    );
    item.insert(ATTR_VALUE.into(), AttributeValue::N(record.value.to_string()));
    item.insert(
        ATTR_IS_INCIDENT.into(),
        AttributeValue::Bool(record.is_incident),
    );
    if let Some(severity) = record.severity {
        item.insert(
            ATTR_SEVERITY.into(),
            AttributeValue::S(severity.as_str().to_string()),
        );
    }

    Ok(item)
}

// ---------------------------------------------------------------------------
// Item -> record
// ---------------------------------------------------------------------------

/// Unmarshal a stored item back into a record.
///
/// A missing or empty `severity` attribute means "not an incident".
pub fn from_item(item: &Item) -> Result<TelemetryRecord, SerializationError> {
    let value_raw = require(item, ATTR_VALUE)?
        .as_n()
        .map_err(|_| wrong_type(ATTR_VALUE, "N"))?;
    let value: f64 = value_raw
        .parse()
        .map_err(|_| SerializationError::InvalidNumber {
            attribute: ATTR_VALUE,
            raw: value_raw.clone(),
        })?;

    let is_incident = *require(item, ATTR_IS_INCIDENT)?
        .as_bool()
        .map_err(|_| wrong_type(ATTR_IS_INCIDENT, "BOOL"))?;

    let severity = match item.get(ATTR_SEVERITY) {
        None => None,
        Some(attr) => {
            let name = attr.as_s().map_err(|_| wrong_type(ATTR_SEVERITY, "S"))?;
            if name.is_empty() {
                None
            } else {
                Some(Severity::from_name(name)?)
            }
        }
    };

    if is_incident != severity.is_some() {
        return Err(SerializationError::InconsistentIncident {
            is_incident,
            severity,
        });
    }

    Ok(TelemetryRecord {
        machine_id: require_s(item, ATTR_MACHINE_ID)?,
        timestamp: require_s(item, ATTR_TIMESTAMP)?,
        sensor_type: require_s(item, ATTR_SENSOR_TYPE)?,
        value,
        is_incident,
        severity,
    })
}

fn require<'a>(
    item: &'a Item,
    attribute: &'static str,
) -> Result<&'a AttributeValue, SerializationError> {
    item.get(attribute)
        .ok_or(SerializationError::MissingAttribute(attribute))
}

fn require_s(item: &Item, attribute: &'static str) -> Result<String, SerializationError> {
    require(item, attribute)?
        .as_s()
        .cloned()
        .map_err(|_| wrong_type(attribute, "S"))
}

fn wrong_type(attribute: &'static str, expected: &'static str) -> SerializationError {
    SerializationError::WrongType {
        attribute,
        expected,
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn record(sensor_type: &str, value: f64, severity: Option<Severity>) -> TelemetryRecord {
        TelemetryRecord {
            machine_id: "M1".into(),
            timestamp: "2024-01-15T10:30:00Z".into(),
            sensor_type: sensor_type.into(),
            value,
            is_incident: severity.is_some(),
            severity,
        }
    }

    #[test]
    fn incident_item_has_all_attributes() {
        let item = to_item(&record("temperature", 95.5, Some(Severity::Critical))).unwrap();

        assert_eq!(item.len(), 6);
        assert_eq!(item[ATTR_MACHINE_ID], AttributeValue::S("M1".into()));
        assert_eq!(
            item[ATTR_TIMESTAMP],
            AttributeValue::S("2024-01-15T10:30:00Z".into())
        );
        assert_eq!(
            item[ATTR_SENSOR_TYPE],
            AttributeValue::S("temperature".into())
        );
        assert_eq!(item[ATTR_VALUE], AttributeValue::N("95.5".into()));
        assert_eq!(item[ATTR_IS_INCIDENT], AttributeValue::Bool(true));
        assert_eq!(item[ATTR_SEVERITY], AttributeValue::S("CRITICAL".into()));
    }

    #[test]
    fn normal_item_omits_severity() {
        let item = to_item(&record("humidity", 999.0, None)).unwrap();

        assert_eq!(item.len(), 5);
        assert!(!item.contains_key(ATTR_SEVERITY));
        assert_eq!(item[ATTR_IS_INCIDENT], AttributeValue::Bool(false));
        assert_eq!(item[ATTR_VALUE], AttributeValue::N("999".into()));
    }

    #[test]
    fn non_finite_value_is_rejected() {
        for value in [f64::NAN, f64::INFINITY, f64::NEG_INFINITY] {
            assert_matches!(
                to_item(&record("temperature", value, None)),
                Err(SerializationError::NonFiniteNumber { attribute: "value", .. })
            );
        }
    }

    #[test]
    fn inconsistent_incident_flag_is_rejected() {
        let mut r = record("temperature", 95.5, Some(Severity::Critical));
        r.is_incident = false;
        assert_matches!(
            to_item(&r),
            Err(SerializationError::InconsistentIncident { .. })
        );
    }

    #[test]
    fn item_reads_back_to_same_record() {
        let original = record("vibration", 81.25, Some(Severity::Warning));
        let item = to_item(&original).unwrap();
        assert_eq!(from_item(&item).unwrap(), original);

        let original = record("humidity", -3.0, None);
        let item = to_item(&original).unwrap();
        assert_eq!(from_item(&item).unwrap(), original);
    }

    #[test]
    fn empty_severity_reads_as_not_incident() {
        let mut item = to_item(&record("humidity", 1.0, None)).unwrap();
        item.insert(ATTR_SEVERITY.into(), AttributeValue::S(String::new()));
        let r = from_item(&item).unwrap();
        assert!(!r.is_incident);
        assert!(r.severity.is_none());
    }

    #[test]
    fn missing_key_attribute_is_reported() {
        let mut item = to_item(&record("humidity", 1.0, None)).unwrap();
        item.remove(ATTR_MACHINE_ID);
        assert_matches!(
            from_item(&item),
            Err(SerializationError::MissingAttribute("machineId"))
        );
    }

    #[test]
    fn wrongly_typed_value_is_reported() {
        let mut item = to_item(&record("humidity", 1.0, None)).unwrap();
        item.insert(ATTR_VALUE.into(), AttributeValue::S("1".into()));
        assert_matches!(
            from_item(&item),
            Err(SerializationError::WrongType { attribute: "value", expected: "N" })
        );
    }

    #[test]
    fn unknown_severity_is_reported() {
        let mut item = to_item(&record("temperature", 95.0, Some(Severity::Critical))).unwrap();
        item.insert(ATTR_SEVERITY.into(), AttributeValue::S("FATAL".into()));
        assert_matches!(from_item(&item), Err(SerializationError::Core(_)));
    }
}
