//! Serialised owner of the last known metric snapshot.
//!
//! Every operation takes the same async mutex, so callers observe a total
//! order of `replace`/`read`/`clear` and never see a mix of two snapshots.

use tokio::sync::Mutex;

use crate::models::SharedMetric;

/// Ordered set of metrics, replaced as a whole.
pub type MetricSnapshot = Vec<SharedMetric>;

/// Holds the latest successfully loaded snapshot.
#[derive(Debug, Default)]
pub struct MetricStore {
    metrics: Mutex<MetricSnapshot>,
}

impl MetricStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the stored snapshot entirely.
    pub async fn replace(&self, snapshot: MetricSnapshot) {
        let mut guard = self.metrics.lock().await;
        *guard = snapshot;
    }

    /// Return an independent copy of the current snapshot.
    pub async fn read(&self) -> MetricSnapshot {
        self.metrics.lock().await.clone()
    }

    /// Empty the store. Calling this repeatedly is harmless.
    pub async fn clear(&self) {
        self.metrics.lock().await.clear();
    }

    /// Number of stored metrics.
    pub async fn len(&self) -> usize {
        self.metrics.lock().await.len()
    }

    /// Whether the store holds no metrics.
    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}
