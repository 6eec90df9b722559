use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, warn};

use sentinel_core::{
    constants::{ERROR_COUNT_UPPER, LATENCY_BASE_MS, LATENCY_JITTER_MS, REQUEST_COUNT_UPPER},
    models::NewMetricSample,
    traits::{Clock, RandomSource, TelemetryRepository},
};
use sentinel_infrastructure::{MetricsCollector, StructuredLogger};

/// 一次指标生成的结果
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SynthesisReport {
    pub samples_written: usize,
    /// 写入失败的服务
    pub failed_services: Vec<String>,
}

/// 指标合成器
///
/// 每个周期为每个服务写入一条延迟样本、一条 200 请求数样本，
/// 并以配置的概率追加一条 500 请求数样本。
pub struct MetricSynthesizer {
    telemetry: Arc<dyn TelemetryRepository>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    services: Vec<String>,
    error_probability: f64,
    metrics: MetricsCollector,
}

impl MetricSynthesizer {
    pub fn new(
        telemetry: Arc<dyn TelemetryRepository>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        services: Vec<String>,
        error_probability: f64,
        metrics: MetricsCollector,
    ) -> Self {
        Self {
            telemetry,
            clock,
            random,
            services,
            error_probability,
            metrics,
        }
    }

    pub fn services(&self) -> &[String] {
        &self.services
    }

    /// 生成单个服务本周期的样本
    pub fn samples_for(&self, service: &str, now: DateTime<Utc>) -> Vec<NewMetricSample> {
        let latency = self
            .random
            .range_f64(LATENCY_BASE_MS, LATENCY_BASE_MS + LATENCY_JITTER_MS);
        let requests = self.random.below(REQUEST_COUNT_UPPER) as f64;

        let mut samples = vec![
            NewMetricSample::request_duration(service, latency, now),
            NewMetricSample::requests_total(service, "200", requests, now),
        ];

        if self.random.chance(self.error_probability) {
            let errors = self.random.below(ERROR_COUNT_UPPER) as f64;
            samples.push(NewMetricSample::requests_total(service, "500", errors, now));
        }

        samples
    }

    /// 为所有服务写入本周期样本，单个服务失败不影响其他服务
    pub async fn synthesize(&self) -> SynthesisReport {
        let now = self.clock.now();
        let mut report = SynthesisReport::default();

        for service in &self.services {
            let mut written = 0;
            let mut failed = false;

            for sample in self.samples_for(service, now) {
                match self.telemetry.append_metric(&sample).await {
                    Ok(()) => written += 1,
                    Err(e) => {
                        warn!("写入服务 {} 的指标 {} 失败: {}", service, sample.name, e);
                        StructuredLogger::log_store_error("metric_synthesizer", "append_metric", &e);
                        self.metrics.record_store_error("append_metric");
                        failed = true;
                        break;
                    }
                }
            }

            report.samples_written += written;
            self.metrics.record_samples_written(service, written as u64);
            if failed {
                report.failed_services.push(service.clone());
            }
        }

        debug!(
            "指标生成完成: 写入 {} 条，失败服务 {} 个",
            report.samples_written,
            report.failed_services.len()
        );
        report
    }
}
