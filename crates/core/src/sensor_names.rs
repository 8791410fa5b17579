//! Well-known sensor type names and their incident limits.
//!
//! Only the sensor types listed here carry incident semantics. Any other
//! `sensorType` value passes through the pipeline unclassified.

/// Temperature sensor readings.
pub const SENSOR_TEMPERATURE: &str = "temperature";

/// Vibration sensor readings.
pub const SENSOR_VIBRATION: &str = "vibration";

/// Temperature readings strictly above this value are critical incidents.
pub const TEMPERATURE_CRITICAL_LIMIT: f64 = 90.0;

/// Vibration readings strictly above this value are warning incidents.
pub const VIBRATION_WARNING_LIMIT: f64 = 80.0;
