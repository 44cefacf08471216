//! pulsetrack - live heart rate and step count dashboard.
//!
//! This library provides the metric model, the simulated sources, the
//! mutex-guarded [`MetricStore`] and the [`DashboardController`] that loads
//! both metrics concurrently and publishes loading, error and data state to
//! the terminal dashboard.

#![deny(missing_docs)]

/// Version string from Cargo.toml.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

pub mod cli;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod models;
pub mod sources;
pub mod store;
pub mod tui;

// Re-export key types for convenience
pub use config::PulseConfig;
pub use dashboard::{DashboardController, DashboardError, LoadOutcome, LoadState};
pub use models::{HeartRate, Metric, MetricView, SharedMetric, Steps};
pub use sources::{FetchError, HeartRateSource, MetricSource, SharedSource, StepsSource};
pub use store::{MetricSnapshot, MetricStore};
