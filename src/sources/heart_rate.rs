//! Simulated heart rate sensor.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{sample, FetchError, MetricSource};
use crate::config::HeartRateConfig;
use crate::models::{HeartRate, SharedMetric};

/// Produces a random heart rate after a simulated sensor delay.
#[derive(Debug, Clone)]
pub struct HeartRateSource {
    delay: Duration,
    min_bpm: u32,
    max_bpm: u32,
}

impl HeartRateSource {
    /// Create a source with an explicit delay and bpm range.
    pub fn new(delay: Duration, min_bpm: u32, max_bpm: u32) -> Self {
        Self {
            delay,
            min_bpm,
            max_bpm,
        }
    }

    /// Create a source from the `heart_rate` config section.
    pub fn from_config(config: &HeartRateConfig) -> Self {
        Self::new(
            Duration::from_millis(config.delay_ms),
            config.min_bpm,
            config.max_bpm,
        )
    }
}

impl Default for HeartRateSource {
    fn default() -> Self {
        Self::from_config(&HeartRateConfig::default())
    }
}

#[async_trait]
impl MetricSource for HeartRateSource {
    fn name(&self) -> &str {
        "heart_rate"
    }

    async fn fetch_metric(&self) -> Result<SharedMetric, FetchError> {
        tokio::time::sleep(self.delay).await;
        let bpm = sample(self.name(), self.min_bpm, self.max_bpm)?;
        Ok(Arc::new(HeartRate::new(bpm)))
    }
}
