//! Simulated step counter.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;

use super::{sample, FetchError, MetricSource};
use crate::config::StepsConfig;
use crate::models::{SharedMetric, Steps};

/// Produces a random step count after a simulated sync delay.
#[derive(Debug, Clone)]
pub struct StepsSource {
    delay: Duration,
    min_count: u32,
    max_count: u32,
}

impl StepsSource {
    /// Create a source with an explicit delay and count range.
    pub fn new(delay: Duration, min_count: u32, max_count: u32) -> Self {
        Self {
            delay,
            min_count,
            max_count,
        }
    }

    /// Create a source from the `steps` config section.
    pub fn from_config(config: &StepsConfig) -> Self {
        Self::new(
            Duration::from_millis(config.delay_ms),
            config.min_count,
            config.max_count,
        )
    }
}

impl Default for StepsSource {
    fn default() -> Self {
        Self::from_config(&StepsConfig::default())
    }
}

#[async_trait]
impl MetricSource for StepsSource {
    fn name(&self) -> &str {
        "steps"
    }

    async fn fetch_metric(&self) -> Result<SharedMetric, FetchError> {
        tokio::time::sleep(self.delay).await;
        let count = sample(self.name(), self.min_count, self.max_count)?;
        Ok(Arc::new(Steps::new(count)))
    }
}
