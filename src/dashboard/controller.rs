//! Load orchestration for the dashboard.
//!
//! Each call to [`DashboardController::load_metrics`] spawns one background
//! task that fetches both metrics concurrently. The task never touches the
//! published state: it hands its result back over a one-shot channel owned by
//! the current [`LoadHandle`], and the controller applies it from the caller's
//! context in [`settle`](DashboardController::settle) or
//! [`poll_completion`](DashboardController::poll_completion). Dropping a handle
//! drops its receiver, so a superseded load can never publish.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use chrono::Utc;
use tokio::sync::oneshot::{self, error::TryRecvError};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, error, info, warn};

use super::{DashboardError, LoadOutcome, LoadState};
use crate::config::PulseConfig;
use crate::sources::{FetchError, HeartRateSource, SharedSource, StepsSource};
use crate::store::{MetricSnapshot, MetricStore};

/// What the background fetch task reports.
type FetchResult = Result<MetricSnapshot, FetchError>;

/// The single in-flight load attempt.
struct LoadHandle {
    generation: u64,
    cancelled: Arc<AtomicBool>,
    result: oneshot::Receiver<FetchResult>,
    task: JoinHandle<()>,
}

impl LoadHandle {
    fn cancel(&self) {
        self.cancelled.store(true, Ordering::SeqCst);
        self.task.abort();
    }
}

impl Drop for LoadHandle {
    fn drop(&mut self) {
        self.cancel();
    }
}

/// Resets `is_loading` when a load attempt finishes, on every exit path.
struct LoadingReset<'a>(&'a watch::Sender<LoadState>);

impl Drop for LoadingReset<'_> {
    fn drop(&mut self) {
        self.0
            .send_if_modified(|state| std::mem::replace(&mut state.is_loading, false));
    }
}

/// Coordinates metric loading and publishes [`LoadState`].
///
/// The controller is owned by the view's execution context; only that context
/// mutates the published state. Observers read it through [`state`](Self::state)
/// or a [`subscribe`](Self::subscribe) receiver.
pub struct DashboardController {
    heart_rate: SharedSource,
    steps: SharedSource,
    store: MetricStore,
    state: watch::Sender<LoadState>,
    current: Option<LoadHandle>,
    generation: u64,
}

impl DashboardController {
    /// Create a controller with explicit sources.
    pub fn new(heart_rate: SharedSource, steps: SharedSource) -> Self {
        let (state, _) = watch::channel(LoadState::default());
        Self {
            heart_rate,
            steps,
            store: MetricStore::new(),
            state,
            current: None,
            generation: 0,
        }
    }

    /// Create a controller with the simulated sensors described by `config`.
    pub fn from_config(config: &PulseConfig) -> Self {
        Self::new(
            Arc::new(HeartRateSource::from_config(&config.heart_rate)),
            Arc::new(StepsSource::from_config(&config.steps)),
        )
    }

    /// Start a new load attempt, superseding any attempt still in flight.
    ///
    /// `is_loading` is set before this returns. Must be called from within a
    /// tokio runtime.
    pub fn load_metrics(&mut self) {
        if let Some(previous) = self.current.take() {
            debug!(generation = previous.generation, "Superseding in-flight load");
            previous.cancel();
        }

        self.generation += 1;
        let generation = self.generation;
        let cancelled = Arc::new(AtomicBool::new(false));
        let (tx, rx) = oneshot::channel();

        self.state.send_modify(|state| state.is_loading = true);
        info!(generation, "Loading metrics");

        let heart_rate = self.heart_rate.clone();
        let steps = self.steps.clone();
        let flag = cancelled.clone();
        let task = tokio::spawn(async move {
            let Some(result) = fetch_all(heart_rate, steps, &flag).await else {
                debug!(generation, "Load stopped after cancellation");
                return;
            };
            // The receiver is gone if this attempt was superseded or cancelled.
            if tx.send(result).is_err() {
                debug!(generation, "Discarding result of abandoned load");
            }
        });

        self.current = Some(LoadHandle {
            generation,
            cancelled,
            result: rx,
            task,
        });
    }

    /// Cancel the in-flight load, if any, and clear the loading flag.
    ///
    /// Published metrics and error are left untouched.
    pub fn cancel_loading(&mut self) {
        if let Some(handle) = self.current.take() {
            info!(generation = handle.generation, "Cancelling load");
            handle.cancel();
        }
        self.state
            .send_if_modified(|state| std::mem::replace(&mut state.is_loading, false));
    }

    /// Wait for the current load attempt and apply its result.
    ///
    /// Returns `None` when nothing is in flight.
    pub async fn settle(&mut self) -> Option<LoadOutcome> {
        let result = {
            let handle = self.current.as_mut()?;
            (&mut handle.result).await.ok()
        };
        Some(self.finish(result).await)
    }

    /// Apply the current attempt's result if it has already arrived.
    ///
    /// Never waits on the fetch itself; intended for tick-driven event loops.
    pub async fn poll_completion(&mut self) -> Option<LoadOutcome> {
        let result = match self.current.as_mut()?.result.try_recv() {
            Ok(result) => Some(result),
            Err(TryRecvError::Empty) => return None,
            Err(TryRecvError::Closed) => None,
        };
        Some(self.finish(result).await)
    }

    /// Cancel any load and drop the stored snapshot.
    pub async fn shutdown(&mut self) {
        self.cancel_loading();
        self.store.clear().await;
        debug!("Dashboard controller shut down");
    }

    /// Snapshot of the published state.
    pub fn state(&self) -> LoadState {
        self.state.borrow().clone()
    }

    /// Receiver notified on every published change.
    pub fn subscribe(&self) -> watch::Receiver<LoadState> {
        self.state.subscribe()
    }

    /// Published metrics.
    pub fn metrics(&self) -> MetricSnapshot {
        self.state.borrow().metrics.clone()
    }

    /// Whether a load is in flight.
    pub fn is_loading(&self) -> bool {
        self.state.borrow().is_loading
    }

    /// Error from the last completed load.
    pub fn error(&self) -> Option<DashboardError> {
        self.state.borrow().error
    }

    /// Whether a load attempt is waiting to be settled.
    pub fn has_pending_load(&self) -> bool {
        self.current.is_some()
    }

    /// The backing store.
    pub fn store(&self) -> &MetricStore {
        &self.store
    }

    async fn finish(&mut self, result: Option<FetchResult>) -> LoadOutcome {
        let generation = self
            .current
            .take()
            .map_or(self.generation, |handle| handle.generation);
        let _reset = LoadingReset(&self.state);

        match result {
            Some(Ok(snapshot)) => {
                self.store.replace(snapshot).await;
                let metrics = self.store.read().await;
                info!(generation, count = metrics.len(), "Metrics loaded");
                self.state.send_modify(|state| {
                    state.metrics = metrics;
                    state.error = None;
                    state.last_updated = Some(Utc::now());
                });
                LoadOutcome::Success
            }
            Some(Err(err)) => {
                warn!(generation, error = %err, "Metric fetch failed");
                self.publish_failure().await;
                LoadOutcome::Failed
            }
            // A cancelled task has already lost its handle, so a closed
            // channel here means the task died.
            None => {
                error!(generation, "Fetch task ended without reporting");
                self.publish_failure().await;
                LoadOutcome::Failed
            }
        }
    }

    async fn publish_failure(&self) {
        self.store.clear().await;
        self.state.send_modify(|state| {
            state.metrics.clear();
            state.error = Some(DashboardError::FailedToLoad);
        });
    }
}

impl std::fmt::Debug for DashboardController {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("DashboardController")
            .field("heart_rate", &self.heart_rate.name())
            .field("steps", &self.steps.name())
            .field("generation", &self.generation)
            .field("in_flight", &self.current.is_some())
            .finish()
    }
}

/// Fetch both metrics concurrently; the first failure wins.
///
/// Returns `None` once the attempt has been cancelled.
async fn fetch_all(
    heart_rate: SharedSource,
    steps: SharedSource,
    cancelled: &AtomicBool,
) -> Option<FetchResult> {
    if cancelled.load(Ordering::SeqCst) {
        return None;
    }

    let joined = tokio::try_join!(heart_rate.fetch_metric(), steps.fetch_metric());

    if cancelled.load(Ordering::SeqCst) {
        return None;
    }

    Some(joined.map(|(heart_rate, steps)| vec![heart_rate, steps]))
}
