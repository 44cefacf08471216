//! Dashboard orchestration.
//!
//! The [`DashboardController`] owns the observable [`LoadState`] and drives
//! concurrent metric loads against two [`MetricSource`](crate::sources::MetricSource)s.

mod controller;

pub use controller::DashboardController;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::store::MetricSnapshot;

/// Errors surfaced to the user.
///
/// Source-specific failures all collapse to [`DashboardError::FailedToLoad`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, thiserror::Error)]
#[serde(rename_all = "snake_case")]
pub enum DashboardError {
    /// One or more sources failed during the last load.
    #[error("Failed to load data. Please try again.")]
    FailedToLoad,
}

/// State published to the view layer.
#[derive(Debug, Clone, Default)]
pub struct LoadState {
    /// Metrics from the last successful load, heart rate first.
    pub metrics: MetricSnapshot,
    /// True while a load attempt is in flight.
    pub is_loading: bool,
    /// Set when the last completed load failed.
    pub error: Option<DashboardError>,
    /// When `metrics` was last populated.
    pub last_updated: Option<DateTime<Utc>>,
}

impl LoadState {
    /// Nothing to show: not loading, no error and no metrics.
    pub fn is_empty(&self) -> bool {
        !self.is_loading && self.error.is_none() && self.metrics.is_empty()
    }
}

/// How a single load attempt ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LoadOutcome {
    /// Both sources delivered and the metrics were published.
    Success,
    /// At least one source failed; metrics were cleared.
    Failed,
    /// The attempt stopped before publishing anything.
    Cancelled,
}

impl std::fmt::Display for LoadOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            LoadOutcome::Success => write!(f, "Metrics loaded"),
            LoadOutcome::Failed => write!(f, "Failed to load metrics"),
            LoadOutcome::Cancelled => write!(f, "Loading cancelled"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeartRate, SharedMetric};
    use std::sync::Arc;

    #[test]
    fn test_failed_to_load_message() {
        assert_eq!(
            DashboardError::FailedToLoad.to_string(),
            "Failed to load data. Please try again."
        );
    }

    #[test]
    fn test_failed_to_load_serialises() {
        let json = serde_json::to_string(&DashboardError::FailedToLoad).unwrap();
        assert_eq!(json, "\"failed_to_load\"");
    }

    #[test]
    fn test_load_state_default_is_empty() {
        let state = LoadState::default();
        assert!(state.is_empty());
        assert!(!state.is_loading);
        assert!(state.last_updated.is_none());
    }

    #[test]
    fn test_load_state_not_empty_when_loading_or_failed() {
        let loading = LoadState {
            is_loading: true,
            ..Default::default()
        };
        assert!(!loading.is_empty());

        let failed = LoadState {
            error: Some(DashboardError::FailedToLoad),
            ..Default::default()
        };
        assert!(!failed.is_empty());

        let loaded = LoadState {
            metrics: vec![Arc::new(HeartRate::new(70)) as SharedMetric],
            ..Default::default()
        };
        assert!(!loaded.is_empty());
    }

    #[test]
    fn test_load_outcome_display() {
        assert_eq!(LoadOutcome::Success.to_string(), "Metrics loaded");
        assert_eq!(LoadOutcome::Failed.to_string(), "Failed to load metrics");
        assert_eq!(LoadOutcome::Cancelled.to_string(), "Loading cancelled");
    }
}
