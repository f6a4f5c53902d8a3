//! deltabeat-core — shared building blocks for the deltabeat reporter.
//!
//! Holds the process-wide [`MetricRegistry`], the immutable [`Snapshot`]
//! captured from it, the [`MetricValue`] sum type used for deltas, and the
//! `deltabeat.toml` configuration.

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use config::{DeltabeatConfig, MetricsLoggingConfig};
pub use error::{ConfigError, ConfigResult};
pub use registry::{MetricRegistry, Snapshot, SnapshotSource};
pub use types::*;
