//! Metrics collector for the simulation engine
//!
//! 记录模拟引擎自身的运行指标（区别于写入存储的模拟指标样本），
//! 在启用 Prometheus 导出时可被抓取。

use metrics::{counter, gauge, histogram, Counter, Gauge, Histogram};
use tracing::debug;

/// Metrics collector for the simulation engine
#[derive(Clone)]
pub struct MetricsCollector {
    ticks_total: Counter,
    tick_duration: Histogram,
    tick_failures_total: Counter,

    samples_written_total: Counter,
    store_errors_total: Counter,

    pods_killed_total: Counter,
    pods_healed_total: Counter,
    experiments_started_total: Counter,
    experiments_completed_total: Counter,
    running_experiments: Gauge,
}

impl MetricsCollector {
    pub fn new() -> Self {
        Self {
            ticks_total: counter!("sentinel_ticks_total"),
            tick_duration: histogram!("sentinel_tick_duration_seconds"),
            tick_failures_total: counter!("sentinel_tick_failures_total"),
            samples_written_total: counter!("sentinel_samples_written_total"),
            store_errors_total: counter!("sentinel_store_errors_total"),
            pods_killed_total: counter!("sentinel_pods_killed_total"),
            pods_healed_total: counter!("sentinel_pods_healed_total"),
            experiments_started_total: counter!("sentinel_experiments_started_total"),
            experiments_completed_total: counter!("sentinel_experiments_completed_total"),
            running_experiments: gauge!("sentinel_running_experiments"),
        }
    }

    /// Record a completed scheduler tick
    pub fn record_tick(&self, duration_seconds: f64) {
        self.ticks_total.increment(1);
        self.tick_duration.record(duration_seconds);
    }

    /// Record a tick whose body panicked or was aborted
    pub fn record_tick_failure(&self) {
        self.tick_failures_total.increment(1);
    }

    pub fn record_samples_written(&self, service: &str, count: u64) {
        self.samples_written_total.increment(count);
        counter!("sentinel_service_samples_written_total", "service" => service.to_string())
            .increment(count);
    }

    /// Record a failed store operation
    pub fn record_store_error(&self, operation: &str) {
        self.store_errors_total.increment(1);
        debug!(operation = operation, "Store error recorded");
    }

    pub fn record_pod_killed(&self, service: &str) {
        self.pods_killed_total.increment(1);
        counter!("sentinel_service_pods_killed_total", "service" => service.to_string())
            .increment(1);
    }

    pub fn record_pods_healed(&self, count: u64) {
        self.pods_healed_total.increment(count);
    }

    pub fn record_experiment_started(&self, experiment_type: &str) {
        self.experiments_started_total.increment(1);
        counter!("sentinel_experiments_by_type_total", "type" => experiment_type.to_string())
            .increment(1);
    }

    pub fn record_experiment_completed(&self) {
        self.experiments_completed_total.increment(1);
    }

    pub fn update_running_experiments(&self, count: f64) {
        self.running_experiments.set(count);
    }
}

impl Default for MetricsCollector {
    fn default() -> Self {
        Self::new()
    }
}
