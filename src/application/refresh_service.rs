// Refresh service - Periodic polling of the data endpoint into the chart
use crate::application::data_source::TemperatureSource;
use crate::domain::chart::Chart;
use crate::domain::error::DashboardError;
use std::sync::Arc;
use std::sync::atomic::{AtomicU32, AtomicU64, Ordering};
use std::time::Duration;
use tokio::sync::RwLock;
use tokio::task::{JoinHandle, JoinSet};
use tokio::time::MissedTickBehavior;
use tokio_util::sync::CancellationToken;

pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(60);

pub type SharedChart = Arc<RwLock<Chart>>;

/// The hours-of-history control. Read once per poll, at the moment it fires.
#[derive(Debug, Clone)]
pub struct HoursSelector {
    hours: Arc<AtomicU32>,
}

impl HoursSelector {
    pub fn new(hours: u32) -> Self {
        Self {
            hours: Arc::new(AtomicU32::new(hours)),
        }
    }

    pub fn get(&self) -> u32 {
        self.hours.load(Ordering::SeqCst)
    }

    pub fn set(&self, hours: u32) {
        self.hours.store(hours, Ordering::SeqCst);
    }
}

#[derive(Debug, Clone)]
pub struct ChartSettings {
    pub label_format: String,
    pub sensor: Option<String>,
}

impl Default for ChartSettings {
    fn default() -> Self {
        Self {
            label_format: "%Y-%m-%d %H:%M:%S".to_string(),
            sensor: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// The chart now shows this poll's data
    Applied { points: usize },
    /// A poll requested later had already been applied; this response was dropped
    Superseded,
}

#[derive(Clone)]
pub struct RefreshService {
    source: Arc<dyn TemperatureSource>,
    chart: SharedChart,
    settings: ChartSettings,
    requested: Arc<AtomicU64>,
    applied: Arc<AtomicU64>,
}

impl RefreshService {
    pub fn new(source: Arc<dyn TemperatureSource>, chart: SharedChart, settings: ChartSettings) -> Self {
        Self {
            source,
            chart,
            settings,
            requested: Arc::new(AtomicU64::new(0)),
            applied: Arc::new(AtomicU64::new(0)),
        }
    }

    pub fn chart(&self) -> SharedChart {
        self.chart.clone()
    }

    /// Fetch one window and replace the chart's display series with it.
    ///
    /// On failure the chart keeps its last successfully rendered series.
    pub async fn refresh(&self, hours: u32) -> Result<RefreshOutcome, DashboardError> {
        let sequence = self.requested.fetch_add(1, Ordering::SeqCst) + 1;

        let series = match self.source.fetch(hours).await {
            Ok(series) => series,
            Err(e) => {
                tracing::warn!(sequence, hours, error = %e, "poll failed, keeping last series");
                return Err(e);
            }
        };

        let series = match &self.settings.sensor {
            Some(sensor) => series.for_sensor(sensor),
            None => series,
        };
        let labels = series.labels(&self.settings.label_format);
        let points = labels.len();

        let mut chart = self.chart.write().await;
        // Writers are serialized by the chart lock, so this check-then-store is race free
        if self.applied.load(Ordering::SeqCst) > sequence {
            tracing::debug!(sequence, "dropping response of an older poll");
            return Ok(RefreshOutcome::Superseded);
        }
        self.applied.store(sequence, Ordering::SeqCst);
        chart.replace_series(labels, series.temperatures);
        chart.update();

        Ok(RefreshOutcome::Applied { points })
    }

    /// Poll now and then every `period` until the returned handle is cancelled or dropped.
    ///
    /// Each poll runs in its own task, so a slow response never delays the next tick.
    pub fn spawn(&self, selector: HoursSelector, period: Duration) -> RefreshHandle {
        let token = CancellationToken::new();
        let cancelled = token.clone();
        let service = self.clone();

        let task = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(period);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            let mut polls = JoinSet::new();

            loop {
                tokio::select! {
                    biased;
                    _ = cancelled.cancelled() => break,
                    _ = ticker.tick() => {
                        let hours = selector.get();
                        let service = service.clone();
                        polls.spawn(async move {
                            // Errors are already logged; the timer keeps going regardless
                            if let Ok(RefreshOutcome::Applied { points }) = service.refresh(hours).await {
                                tracing::info!(hours, points, "chart refreshed");
                            }
                        });
                    }
                    Some(joined) = polls.join_next(), if !polls.is_empty() => {
                        if let Err(e) = joined {
                            tracing::error!(error = %e, "poll task failed");
                        }
                    }
                }
            }

            polls.abort_all();
            tracing::info!("refresh loop stopped");
        });

        RefreshHandle {
            token,
            task: Some(task),
        }
    }
}

/// Owner of a running refresh loop. Dropping it stops the loop.
pub struct RefreshHandle {
    token: CancellationToken,
    task: Option<JoinHandle<()>>,
}

impl RefreshHandle {
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Cancel and wait for the loop and its in-flight polls to wind down
    pub async fn shutdown(mut self) {
        self.cancel();
        if let Some(task) = self.task.take() {
            if let Err(e) = task.await {
                tracing::error!(error = %e, "refresh loop ended abnormally");
            }
        }
    }
}

impl Drop for RefreshHandle {
    fn drop(&mut self) {
        self.token.cancel();
    }
}
