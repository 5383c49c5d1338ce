mod sampler;
mod series;
mod source;

pub use sampler::*;
pub use series::*;
pub use source::*;

use egui::mutex::RwLock;
use log::info;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

/// Fixed sampling cadence.
pub const SAMPLE_INTERVAL: Duration = Duration::from_secs(1);

#[derive(Debug, thiserror::Error)]
pub enum MetricsError {
    #[error("host metrics are not supported on this platform")]
    Unsupported,
    #[error("host does not expose {0}")]
    Unavailable(&'static str),
    #[error("failed to start sampler thread: {0}")]
    Spawn(#[from] std::io::Error),
}

/// One observation of host utilization.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Reading {
    pub cpu_percent: f64,
    pub memory_percent: f64,
    pub used_memory_bytes: u64,
    pub total_memory_bytes: u64,
}

/// Owns the shared series, the monitoring flag and the sampler thread.
pub struct Metrics {
    store: Arc<RwLock<SeriesStore>>,
    monitoring: Arc<AtomicBool>,
    sampler: Sampler,
}

impl Metrics {
    /// Starts sampling `source` every `interval`. Readings are only recorded
    /// while monitoring is on; `on_sample` runs after each recorded reading.
    pub fn spawn<S, F>(
        source: S,
        interval: Duration,
        history_len: usize,
        monitoring: bool,
        on_sample: F,
    ) -> Result<Self, MetricsError>
    where
        S: MetricsSource,
        F: Fn() + Send + 'static,
    {
        let store = Arc::new(RwLock::new(SeriesStore::new(history_len)));
        let flag = Arc::new(AtomicBool::new(monitoring));
        let sampler = Sampler::spawn(
            source,
            Arc::clone(&store),
            Arc::clone(&flag),
            interval,
            on_sample,
        )?;

        Ok(Self {
            store,
            monitoring: flag,
            sampler,
        })
    }

    pub fn start_monitoring(&self) {
        if !self.monitoring.swap(true, Ordering::AcqRel) {
            info!("Monitoring started");
        }
    }

    pub fn stop_monitoring(&self) {
        if self.monitoring.swap(false, Ordering::AcqRel) {
            info!("Monitoring stopped");
        }
    }

    pub fn is_monitoring(&self) -> bool {
        self.monitoring.load(Ordering::Acquire)
    }

    /// Runs `f` with the series locked for reading.
    pub fn with_series<R>(&self, f: impl FnOnce(&SeriesStore) -> R) -> R {
        f(&self.store.read())
    }

    pub fn history_len(&self) -> usize {
        self.store.read().capacity()
    }

    pub fn set_history_len(&self, history_len: usize) {
        if self.history_len() != history_len {
            self.store.write().set_capacity(history_len);
        }
    }

    pub fn clear(&self) {
        self.store.write().clear();
    }

    pub fn is_sampling(&self) -> bool {
        self.sampler.is_running()
    }

    /// Stops the sampler thread. Monitoring can not be resumed afterwards.
    pub fn shutdown(&mut self) {
        self.stop_monitoring();
        self.sampler.shutdown();
    }
}
