//! Pure telemetry domain logic for the Sentinel ingestion pipeline.
//!
//! Nothing in this crate performs I/O. Decoding, incident classification,
//! and record construction are plain functions of their inputs so they can
//! be tested in isolation from the queue and the table store.

pub mod error;
pub mod incident;
pub mod sensor_names;
pub mod severity;
pub mod telemetry;
pub mod types;
