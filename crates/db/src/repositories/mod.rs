//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async methods
//! that accept `&DbClient` and the table name as the first arguments.

pub mod telemetry_repo;

pub use telemetry_repo::TelemetryRepo;
