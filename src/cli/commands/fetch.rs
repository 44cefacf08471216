//! Fetch command implementation.
//!
//! Runs a single load attempt outside the dashboard and prints the outcome.

use std::future::Future;
use std::io;
use std::process::ExitCode;

use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, warn};

use crate::config::PulseConfig;
use crate::dashboard::{DashboardController, DashboardError, LoadOutcome, LoadState};
use crate::models::MetricView;

/// Exit code used when the user interrupts the load.
pub const EXIT_INTERRUPTED: u8 = 130;

/// Error type for the fetch command.
#[derive(Debug, thiserror::Error)]
pub enum FetchCommandError {
    /// Serialising the JSON report failed.
    #[error("Failed to encode output: {0}")]
    Encode(#[from] serde_json::Error),
}

/// JSON shape of a fetch result.
#[derive(Debug, Serialize)]
pub struct FetchReport {
    /// Loaded metrics in display order.
    pub metrics: Vec<MetricView>,
    /// Error kind, if the load failed.
    pub error: Option<DashboardError>,
    /// Human-readable error message.
    pub message: Option<String>,
    /// When the metrics were loaded.
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<&LoadState> for FetchReport {
    fn from(state: &LoadState) -> Self {
        Self {
            metrics: state.metrics.iter().map(MetricView::from).collect(),
            error: state.error,
            message: state.error.map(|e| e.to_string()),
            updated_at: state.last_updated,
        }
    }
}

/// Load metrics once and print them. Ctrl+C cancels the load.
pub async fn fetch(config: &PulseConfig, json: bool) -> Result<ExitCode, FetchCommandError> {
    let mut controller = DashboardController::from_config(config);
    controller.load_metrics();

    let outcome = match settle_or_interrupt(&mut controller, tokio::signal::ctrl_c()).await {
        Some(outcome) => outcome,
        None => {
            controller.cancel_loading();
            LoadOutcome::Cancelled
        }
    };
    info!(%outcome, "Fetch finished");

    let state = controller.state();
    if json {
        println!("{}", serde_json::to_string_pretty(&FetchReport::from(&state))?);
    } else {
        print!("{}", render_text(&state, outcome));
    }
    controller.shutdown().await;

    Ok(match outcome {
        LoadOutcome::Success => ExitCode::SUCCESS,
        LoadOutcome::Failed => ExitCode::FAILURE,
        LoadOutcome::Cancelled => ExitCode::from(EXIT_INTERRUPTED),
    })
}

/// Wait for the load unless `interrupt` resolves first.
///
/// Returns `None` when interrupted. If the interrupt handler could not be
/// installed the load is simply awaited.
async fn settle_or_interrupt<F>(
    controller: &mut DashboardController,
    interrupt: F,
) -> Option<LoadOutcome>
where
    F: Future<Output = io::Result<()>>,
{
    let interrupt_failed = tokio::select! {
        outcome = controller.settle() => return outcome,
        result = interrupt => match result {
            Ok(()) => return None,
            Err(e) => e,
        },
    };

    warn!(error = %interrupt_failed, "Ctrl+C handler unavailable; waiting for load");
    controller.settle().await
}

/// Plain-text rendering of a settled load.
pub fn render_text(state: &LoadState, outcome: LoadOutcome) -> String {
    let mut out = String::new();
    match outcome {
        LoadOutcome::Success => {
            for metric in &state.metrics {
                out.push_str(&format!(
                    "\x1b[1m{:<12}\x1b[0m {}\n",
                    metric.name(),
                    metric.value()
                ));
            }
            if state.metrics.is_empty() {
                out.push_str("\x1b[2mNo metrics available\x1b[0m\n");
            }
        }
        LoadOutcome::Failed => {
            let message = state
                .error
                .unwrap_or(DashboardError::FailedToLoad)
                .to_string();
            out.push_str(&format!("\x1b[31m{message}\x1b[0m\n"));
        }
        LoadOutcome::Cancelled => {
            out.push_str("\x1b[33mLoading cancelled\x1b[0m\n");
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{HeartRate, SharedMetric, Steps};
    use std::sync::Arc;

    fn loaded() -> LoadState {
        LoadState {
            metrics: vec![
                Arc::new(HeartRate::new(70)) as SharedMetric,
                Arc::new(Steps::new(5000)) as SharedMetric,
            ],
            last_updated: Some(Utc::now()),
            ..Default::default()
        }
    }

    #[test]
    fn test_render_success() {
        let text = render_text(&loaded(), LoadOutcome::Success);
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].contains("Heart Rate"));
        assert!(lines[0].ends_with("70 BPM"));
        assert!(lines[1].contains("Steps"));
        assert!(lines[1].ends_with("5000 steps"));
    }

    #[test]
    fn test_render_failure() {
        let state = LoadState {
            error: Some(DashboardError::FailedToLoad),
            ..Default::default()
        };
        let text = render_text(&state, LoadOutcome::Failed);
        assert!(text.contains("Failed to load data. Please try again."));
    }

    #[test]
    fn test_render_cancelled() {
        let text = render_text(&LoadState::default(), LoadOutcome::Cancelled);
        assert!(text.contains("Loading cancelled"));
    }

    #[test]
    fn test_report_from_success() {
        let report = FetchReport::from(&loaded());
        let json = serde_json::to_value(&report).unwrap();

        assert_eq!(json["metrics"][0]["name"], "Heart Rate");
        assert_eq!(json["metrics"][0]["value"], "70 BPM");
        assert_eq!(json["metrics"][1]["value"], "5000 steps");
        assert!(json["error"].is_null());
        assert!(json["updated_at"].is_string());
    }

    #[test]
    fn test_report_from_failure() {
        let state = LoadState {
            error: Some(DashboardError::FailedToLoad),
            ..Default::default()
        };
        let json = serde_json::to_value(FetchReport::from(&state)).unwrap();

        assert_eq!(json["metrics"].as_array().unwrap().len(), 0);
        assert_eq!(json["error"], "failed_to_load");
        assert_eq!(json["message"], "Failed to load data. Please try again.");
    }

    fn instant_controller() -> DashboardController {
        let mut config = PulseConfig::default();
        config.heart_rate.delay_ms = 0;
        config.steps.delay_ms = 0;
        DashboardController::from_config(&config)
    }

    #[tokio::test]
    async fn test_interrupt_setup_failure_still_loads() {
        let mut controller = instant_controller();
        controller.load_metrics();

        let broken = async { Err::<(), _>(io::Error::other("no signal handler")) };
        let outcome = settle_or_interrupt(&mut controller, broken).await;

        assert_eq!(outcome, Some(LoadOutcome::Success));
        assert_eq!(controller.metrics().len(), 2);
    }

    #[tokio::test]
    async fn test_interrupt_cancels_load() {
        let mut config = PulseConfig::default();
        config.steps.delay_ms = 60_000;
        let mut controller = DashboardController::from_config(&config);
        controller.load_metrics();

        let interrupt = async { Ok::<(), io::Error>(()) };
        let outcome = settle_or_interrupt(&mut controller, interrupt).await;

        assert_eq!(outcome, None);
        assert!(controller.is_loading());
    }

    #[tokio::test]
    async fn test_fetch_with_instant_sources() {
        let mut config = PulseConfig::default();
        config.heart_rate.delay_ms = 0;
        config.steps.delay_ms = 0;

        let code = fetch(&config, true).await.unwrap();
        assert_eq!(code, ExitCode::SUCCESS);
    }
}
