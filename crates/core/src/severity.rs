//! Incident severity levels.

use crate::error::CoreError;

/// Severity attached to a telemetry record flagged as an incident.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// Reading crossed a limit that needs attention but is not yet dangerous.
    Warning,
    /// Reading crossed a safety limit.
    Critical,
}

impl Severity {
    /// Stored name, as written to the `severity` attribute.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warning => "WARNING",
            Self::Critical => "CRITICAL",
        }
    }

    /// Parse from the stored `severity` attribute.
    pub fn from_name(name: &str) -> Result<Self, CoreError> {
        match name {
            "WARNING" => Ok(Self::Warning),
            "CRITICAL" => Ok(Self::Critical),
            other => Err(CoreError::Validation(format!(
                "Unknown severity '{other}'. Must be one of: WARNING, CRITICAL"
            ))),
        }
    }

    /// Human-readable label.
    pub fn label(self) -> &'static str {
        match self {
            Self::Warning => "Warning",
            Self::Critical => "Critical",
        }
    }
}

impl std::fmt::Display for Severity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
