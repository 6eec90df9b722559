//! Observability module
//!
//! - Metrics collection for the engine's own behaviour
//! - Structured logging of lifecycle events
//! - Prometheus exporter setup

pub mod exporter;
pub mod metrics_collector;
pub mod structured_logger;

pub use exporter::init_metrics;
pub use metrics_collector::MetricsCollector;
pub use structured_logger::StructuredLogger;
