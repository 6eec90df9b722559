//! Structured logging utilities
//!
//! 模拟引擎生命周期事件的结构化日志，字段统一以 `event` 标识事件类型。

use tracing::{debug, error, info, warn};

/// Structured logging utilities
pub struct StructuredLogger;

impl StructuredLogger {
    /// Log scheduler tick completion
    pub fn log_tick_completed(
        tick: u64,
        samples_written: usize,
        experiments_completed: usize,
        pods_healed: usize,
        duration_ms: u64,
    ) {
        debug!(
            event = "tick_completed",
            tick.number = tick,
            tick.samples_written = samples_written,
            tick.experiments_completed = experiments_completed,
            tick.pods_healed = pods_healed,
            tick.duration_ms = duration_ms,
            "Scheduler tick completed"
        );
    }

    /// Log a tick that did not finish normally
    pub fn log_tick_failed(tick: u64, reason: &str) {
        error!(
            event = "tick_failed",
            tick.number = tick,
            tick.reason = reason,
            "Scheduler tick failed"
        );
    }

    /// Log experiment start
    pub fn log_experiment_started(
        experiment_id: i64,
        title: &str,
        experiment_type: &str,
        target_service: &str,
    ) {
        info!(
            event = "experiment_started",
            experiment.id = experiment_id,
            experiment.title = title,
            experiment.type = experiment_type,
            experiment.target = target_service,
            "Chaos experiment started"
        );
    }

    /// Log experiment completion
    pub fn log_experiment_completed(experiment_id: i64, title: &str, elapsed_seconds: i64) {
        info!(
            event = "experiment_completed",
            experiment.id = experiment_id,
            experiment.title = title,
            experiment.elapsed_seconds = elapsed_seconds,
            "Chaos experiment completed"
        );
    }

    /// Log pod kill
    pub fn log_pod_killed(pod_id: i64, pod_name: &str, service: &str, experiment_id: i64) {
        warn!(
            event = "pod_killed",
            pod.id = pod_id,
            pod.name = pod_name,
            pod.service = service,
            experiment.id = experiment_id,
            "Pod killed by chaos experiment"
        );
    }

    /// Log pod heal
    pub fn log_pod_healed(pod_id: i64, pod_name: &str, restarts: i32) {
        info!(
            event = "pod_healed",
            pod.id = pod_id,
            pod.name = pod_name,
            pod.restarts = restarts,
            "Pod restarted by self-healing"
        );
    }

    /// Log store error
    pub fn log_store_error(component: &str, operation: &str, error: &dyn std::error::Error) {
        error!(
            event = "store_error",
            error.component = component,
            error.operation = operation,
            error.message = %error,
            "Store operation failed"
        );
    }

    /// Log seeding result
    pub fn log_seeded(nodes: usize, pods: usize, products: usize) {
        info!(
            event = "cluster_seeded",
            seed.nodes = nodes,
            seed.pods = pods,
            seed.products = products,
            "Demo cluster seeded"
        );
    }
}
