use super::{MetricsSource, Second, SeriesStore};
use egui::mutex::RwLock;
use log::{debug, info, warn};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::sync::Arc;
use std::thread::{self, JoinHandle};
use std::time::Duration;

/// Background thread that polls a [`MetricsSource`] at a fixed cadence and
/// records readings into the shared [`SeriesStore`] while `monitoring` is set.
/// Paused ticks only refresh the source.
///
/// Dropping the sampler stops the thread and waits for it.
#[derive(Debug)]
pub struct Sampler {
    shutdown: Option<Sender<()>>,
    handle: Option<JoinHandle<()>>,
}

impl Sampler {
    pub fn spawn<S, F>(
        mut source: S,
        store: Arc<RwLock<SeriesStore>>,
        monitoring: Arc<AtomicBool>,
        interval: Duration,
        on_sample: F,
    ) -> std::io::Result<Self>
    where
        S: MetricsSource,
        F: Fn() + Send + 'static,
    {
        let (shutdown, shutdown_rx) = mpsc::channel::<()>();

        let handle = thread::Builder::new()
            .name("resource-sampler".to_owned())
            .spawn(move || {
                info!("Sampler started, interval {:?}", interval);
                // the first tick comes one interval after the source was primed
                while let Err(RecvTimeoutError::Timeout) = shutdown_rx.recv_timeout(interval) {
                    if !monitoring.load(Ordering::Acquire) {
                        source.refresh();
                        continue;
                    }
                    match source.sample() {
                        Ok(reading) => {
                            debug!("Sampled {:?}", reading);
                            store.write().record(Second::now(), &reading);
                            on_sample();
                        }
                        Err(err) => warn!("Skipping sample: {err}"),
                    }
                }
                info!("Sampler stopped");
            })?;

        Ok(Self {
            shutdown: Some(shutdown),
            handle: Some(handle),
        })
    }

    pub fn is_running(&self) -> bool {
        self.handle.as_ref().is_some_and(|h| !h.is_finished())
    }

    /// Signals the thread and waits for it to exit. Calling it again is a no-op.
    pub fn shutdown(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            // a send error only means the thread is already gone
            let _ = shutdown.send(());
        }
        if let Some(handle) = self.handle.take() {
            if handle.join().is_err() {
                warn!("Sampler thread panicked");
            }
        }
    }
}

impl Drop for Sampler {
    fn drop(&mut self) {
        self.shutdown();
    }
}
