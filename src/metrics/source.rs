use super::{MetricsError, Reading};
use log::info;
use std::thread;
use std::time::Instant;
use sysinfo::{System, MINIMUM_CPU_UPDATE_INTERVAL};

/// Anything that can report the host's current CPU and memory utilization.
pub trait MetricsSource: Send + 'static {
    fn sample(&mut self) -> Result<Reading, MetricsError>;

    /// Called on ticks that do not sample, so the next reading covers one
    /// interval instead of the whole pause.
    fn refresh(&mut self) {}
}

/// Converts a CPU load fraction into a percentage.
///
/// A negative or non-finite load is how hosts report a missing counter.
pub fn cpu_percent(load: f64) -> Result<f64, MetricsError> {
    if !load.is_finite() || load < 0.0 {
        return Err(MetricsError::Unavailable("cpu load"));
    }
    Ok(load.min(1.0) * 100.0)
}

/// Memory utilization as `(1 - free / total) * 100`.
pub fn memory_percent(free: u64, total: u64) -> Result<f64, MetricsError> {
    if total == 0 {
        return Err(MetricsError::Unavailable("total physical memory"));
    }
    let free = free.min(total);
    Ok((1.0 - free as f64 / total as f64) * 100.0)
}

/// Reads host counters through `sysinfo`.
pub struct SysinfoSource {
    system: System,
    cpu_refreshed_at: Instant,
}

impl std::fmt::Debug for SysinfoSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SysinfoSource").finish_non_exhaustive()
    }
}

impl SysinfoSource {
    pub fn new() -> Result<Self, MetricsError> {
        if !sysinfo::IS_SUPPORTED_SYSTEM {
            return Err(MetricsError::Unsupported);
        }

        let mut system = System::new();
        // cpu usage is a delta between two refreshes, so the first one only primes it
        system.refresh_cpu_usage();
        system.refresh_memory();
        info!(
            "Sampling {} cpus, {} bytes of physical memory",
            system.cpus().len(),
            system.total_memory()
        );

        Ok(Self {
            system,
            cpu_refreshed_at: Instant::now(),
        })
    }

    /// CPU usage is the delta since the previous refresh, which is noise when
    /// taken sooner than `MINIMUM_CPU_UPDATE_INTERVAL`.
    fn refresh_cpu(&mut self) {
        let wait = MINIMUM_CPU_UPDATE_INTERVAL.saturating_sub(self.cpu_refreshed_at.elapsed());
        if !wait.is_zero() {
            thread::sleep(wait);
        }
        self.system.refresh_cpu_usage();
        self.cpu_refreshed_at = Instant::now();
    }
}

impl MetricsSource for SysinfoSource {
    fn sample(&mut self) -> Result<Reading, MetricsError> {
        self.refresh_cpu();
        self.system.refresh_memory();

        let load = f64::from(self.system.global_cpu_usage()) / 100.0;
        let total = self.system.total_memory();
        let free = self.system.free_memory();

        Ok(Reading {
            cpu_percent: cpu_percent(load)?,
            memory_percent: memory_percent(free, total)?,
            used_memory_bytes: total.saturating_sub(free),
            total_memory_bytes: total,
        })
    }

    fn refresh(&mut self) {
        self.refresh_cpu();
    }
}
