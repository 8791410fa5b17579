//! `sentinel-worker` library crate.
//!
//! Batch orchestration and the Lambda entry point for telemetry ingestion.
//! The binary in `main.rs` only wires configuration, logging, and the
//! DynamoDB store into [`handler::run`].

pub mod config;
pub mod error;
pub mod handler;
pub mod ingest;
pub mod logging;

pub use config::{ConfigError, WorkerConfig};
pub use error::IngestError;
pub use ingest::{Ingestor, QueueMessage};
