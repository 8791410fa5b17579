//! Incident classification for single telemetry readings.
//!
//! Pure logic. The caller decodes the reading and decides what to do with
//! the resulting [`Classification`].

use crate::sensor_names::{
    SENSOR_TEMPERATURE, SENSOR_VIBRATION, TEMPERATURE_CRITICAL_LIMIT, VIBRATION_WARNING_LIMIT,
};
use crate::severity::Severity;

/// A single incident rule: readings of `sensor_type` strictly above `limit`
/// are incidents of the given `severity`.
#[derive(Debug, Clone, Copy)]
pub struct IncidentRule {
    pub sensor_type: &'static str,
    pub limit: f64,
    pub severity: Severity,
}

impl IncidentRule {
    fn matches(&self, sensor_type: &str, value: f64) -> bool {
        sensor_type == self.sensor_type && value > self.limit
    }
}

/// Rules in evaluation order. Later matches overwrite earlier ones.
pub const INCIDENT_RULES: &[IncidentRule] = &[
    IncidentRule {
        sensor_type: SENSOR_TEMPERATURE,
        limit: TEMPERATURE_CRITICAL_LIMIT,
        severity: Severity::Critical,
    },
    IncidentRule {
        sensor_type: SENSOR_VIBRATION,
        limit: VIBRATION_WARNING_LIMIT,
        severity: Severity::Warning,
    },
];

/// Outcome of classifying one reading.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Classification {
    pub is_incident: bool,
    /// `Some` exactly when `is_incident` is true.
    pub severity: Option<Severity>,
}

impl Classification {
    /// A reading within normal range.
    pub fn normal() -> Self {
        Self::default()
    }

    /// A reading that tripped a rule.
    pub fn incident(severity: Severity) -> Self {
        Self {
            is_incident: true,
            severity: Some(severity),
        }
    }
}

/// Classify a reading against [`INCIDENT_RULES`].
pub fn classify(sensor_type: &str, value: f64) -> Classification {
    classify_with(INCIDENT_RULES, sensor_type, value)
}

/// Classify a reading against an explicit rule list.
///
/// Every rule is checked; the last matching rule determines the result.
pub fn classify_with(rules: &[IncidentRule], sensor_type: &str, value: f64) -> Classification {
    let mut classification = Classification::normal();
    for rule in rules {
        if rule.matches(sensor_type, value) {
            classification = Classification::incident(rule.severity);
        }
    }
    classification
}

/// One-line description of an incident, e.g. `Critical temperature: 95.5`.
pub fn describe(severity: Severity, sensor_type: &str, value: f64) -> String {
    format!("{} {sensor_type}: {value}", severity.label())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
