use super::Reading;
use chrono::{DateTime, Local, TimeZone};
use std::collections::VecDeque;

/// A one-second time bucket, in unix seconds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Second(pub i64);

impl Second {
    pub fn now() -> Self {
        Local::now().into()
    }

    /// Seconds as a plot coordinate.
    pub fn as_f64(self) -> f64 {
        self.0 as f64
    }
}

impl<Tz: TimeZone> From<DateTime<Tz>> for Second {
    fn from(time: DateTime<Tz>) -> Self {
        Self(time.timestamp())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sample {
    pub second: Second,
    pub value: f64,
}

/// A bounded, time ordered series with at most one sample per second.
#[derive(Debug, Clone)]
pub struct TimeSeries {
    name: &'static str,
    samples: VecDeque<Sample>,
    capacity: usize,
}

impl TimeSeries {
    pub fn new(name: &'static str, capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self {
            name,
            samples: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    /// Overwrites the value already stored for `second`, or inserts a new
    /// sample in time order. The oldest samples are evicted past capacity.
    pub fn add_or_update(&mut self, second: Second, value: f64) {
        // the common case is appending after the newest sample
        match self.samples.back().map(|s| s.second) {
            Some(last) if last >= second => {
                match self.samples.binary_search_by_key(&second, |s| s.second) {
                    Ok(idx) => self.samples[idx].value = value,
                    Err(idx) => self.samples.insert(idx, Sample { second, value }),
                }
            }
            _ => self.samples.push_back(Sample { second, value }),
        }
        self.evict();
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.capacity = capacity.max(1);
        self.evict();
    }

    fn evict(&mut self) {
        while self.samples.len() > self.capacity {
            self.samples.pop_front();
        }
    }

    pub fn len(&self) -> usize {
        self.samples.len()
    }

    pub fn is_empty(&self) -> bool {
        self.samples.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Sample> {
        self.samples.iter()
    }

    pub fn last(&self) -> Option<&Sample> {
        self.samples.back()
    }

    /// Average over the visible window.
    pub fn mean(&self) -> Option<f64> {
        if self.samples.is_empty() {
            return None;
        }
        let sum: f64 = self.samples.iter().map(|s| s.value).sum();
        Some(sum / self.samples.len() as f64)
    }

    /// Highest value in the visible window.
    pub fn peak(&self) -> Option<f64> {
        self.samples.iter().map(|s| s.value).reduce(f64::max)
    }

    pub fn clear(&mut self) {
        self.samples.clear();
    }
}

/// The CPU and memory series shown on the chart.
#[derive(Debug, Clone)]
pub struct SeriesStore {
    pub cpu: TimeSeries,
    pub memory: TimeSeries,
    latest: Option<Reading>,
}

impl SeriesStore {
    pub const CPU_SERIES: &'static str = "CPU Usage (%)";
    pub const MEMORY_SERIES: &'static str = "Memory Usage (%)";

    pub fn new(capacity: usize) -> Self {
        Self {
            cpu: TimeSeries::new(Self::CPU_SERIES, capacity),
            memory: TimeSeries::new(Self::MEMORY_SERIES, capacity),
            latest: None,
        }
    }

    pub fn record(&mut self, second: Second, reading: &Reading) {
        self.cpu.add_or_update(second, reading.cpu_percent);
        self.memory.add_or_update(second, reading.memory_percent);
        self.latest = Some(*reading);
    }

    /// The most recent reading, including absolute memory amounts.
    pub fn latest(&self) -> Option<&Reading> {
        self.latest.as_ref()
    }

    pub fn capacity(&self) -> usize {
        self.cpu.capacity()
    }

    pub fn set_capacity(&mut self, capacity: usize) {
        self.cpu.set_capacity(capacity);
        self.memory.set_capacity(capacity);
    }

    pub fn clear(&mut self) {
        self.cpu.clear();
        self.memory.clear();
        self.latest = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn seconds(series: &TimeSeries) -> Vec<i64> {
        series.iter().map(|s| s.second.0).collect()
    }

    fn values(series: &TimeSeries) -> Vec<f64> {
        series.iter().map(|s| s.value).collect()
    }

    #[test]
    fn same_second_overwrites_instead_of_duplicating() {
        let mut series = TimeSeries::new("cpu", 10);
        series.add_or_update(Second(100), 10.0);
        series.add_or_update(Second(100), 20.0);

        assert_eq!(series.len(), 1);
        assert_eq!(series.last().map(|s| s.value), Some(20.0));
    }

    #[test]
    fn appends_in_time_order() {
        let mut series = TimeSeries::new("cpu", 10);
        for (second, value) in [(1, 1.0), (2, 2.0), (3, 3.0)] {
            series.add_or_update(Second(second), value);
        }
        assert_eq!(seconds(&series), vec![1, 2, 3]);
        assert_eq!(values(&series), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn older_samples_are_inserted_in_order() {
        let mut series = TimeSeries::new("cpu", 10);
        series.add_or_update(Second(1), 1.0);
        series.add_or_update(Second(5), 5.0);
        series.add_or_update(Second(3), 3.0);
        series.add_or_update(Second(1), 1.5);

        assert_eq!(seconds(&series), vec![1, 3, 5]);
        assert_eq!(values(&series), vec![1.5, 3.0, 5.0]);
    }

    #[test]
    fn oldest_samples_are_evicted_past_capacity() {
        let mut series = TimeSeries::new("cpu", 3);
        for second in 0..5 {
            series.add_or_update(Second(second), second as f64);
        }
        assert_eq!(seconds(&series), vec![2, 3, 4]);
    }

    #[test]
    fn shrinking_capacity_evicts_immediately() {
        let mut series = TimeSeries::new("cpu", 10);
        for second in 0..6 {
            series.add_or_update(Second(second), 0.0);
        }
        series.set_capacity(2);
        assert_eq!(seconds(&series), vec![4, 5]);

        series.set_capacity(0);
        assert_eq!(series.capacity(), 1);
        assert_eq!(seconds(&series), vec![5]);
    }

    #[test]
    fn window_statistics() {
        let mut series = TimeSeries::new("cpu", 10);
        assert_eq!(series.mean(), None);
        assert_eq!(series.peak(), None);

        for (second, value) in [(1, 10.0), (2, 40.0), (3, 25.0)] {
            series.add_or_update(Second(second), value);
        }
        assert_eq!(series.mean(), Some(25.0));
        assert_eq!(series.peak(), Some(40.0));
    }

    #[test]
    fn second_truncates_sub_second_precision() {
        let time = DateTime::from_timestamp(1_700_000_000, 750_000_000).unwrap();
        assert_eq!(Second::from(time), Second(1_700_000_000));
    }

    #[test]
    fn store_records_both_series() {
        let mut store = SeriesStore::new(60);
        let reading = Reading {
            cpu_percent: 42.0,
            memory_percent: 75.0,
            used_memory_bytes: 6,
            total_memory_bytes: 8,
        };
        store.record(Second(10), &reading);
        store.record(Second(10), &Reading { cpu_percent: 50.0, ..reading });

        assert_eq!(values(&store.cpu), vec![50.0]);
        assert_eq!(values(&store.memory), vec![75.0]);
        assert_eq!(store.cpu.name(), SeriesStore::CPU_SERIES);
        assert_eq!(store.latest().map(|r| r.cpu_percent), Some(50.0));

        store.clear();
        assert!(store.cpu.is_empty() && store.memory.is_empty());
        assert!(store.latest().is_none());
    }
}
