use std::sync::Arc;

use tracing::warn;

use sentinel_core::{
    constants::{COMPONENT_CHAOS_CONTROLLER, MAX_EXPERIMENT_DURATION_SECONDS},
    models::{ChaosExperiment, NewChaosExperiment, NewLogEntry},
    traits::{ChaosRepository, Clock, TelemetryRepository},
    SentinelError, SentinelResult,
};
use sentinel_infrastructure::{MetricsCollector, StructuredLogger};

/// 混沌实验触发入口
///
/// 校验请求后以 `running` 状态创建实验，开始时间取当前时钟，
/// 并由 `chaos-controller` 写入一条 warn 日志。
pub struct ExperimentTrigger {
    chaos: Arc<dyn ChaosRepository>,
    telemetry: Arc<dyn TelemetryRepository>,
    clock: Arc<dyn Clock>,
    metrics: MetricsCollector,
}

impl ExperimentTrigger {
    pub fn new(
        chaos: Arc<dyn ChaosRepository>,
        telemetry: Arc<dyn TelemetryRepository>,
        clock: Arc<dyn Clock>,
        metrics: MetricsCollector,
    ) -> Self {
        Self {
            chaos,
            telemetry,
            clock,
            metrics,
        }
    }

    pub fn validate(request: &NewChaosExperiment) -> SentinelResult<()> {
        if request.title.trim().is_empty() {
            return Err(SentinelError::InvalidInput("实验标题不能为空".to_string()));
        }
        if request.target_service.trim().is_empty() {
            return Err(SentinelError::InvalidInput("目标服务不能为空".to_string()));
        }
        if let Some(duration) = request.duration {
            if !(1..=MAX_EXPERIMENT_DURATION_SECONDS).contains(&duration) {
                return Err(SentinelError::InvalidInput(format!(
                    "实验持续时间必须在1到{MAX_EXPERIMENT_DURATION_SECONDS}秒之间: {duration}"
                )));
            }
        }
        Ok(())
    }

    pub async fn trigger(&self, request: &NewChaosExperiment) -> SentinelResult<ChaosExperiment> {
        Self::validate(request)?;

        let now = self.clock.now();
        let experiment = self.chaos.create_experiment(request, now).await?;

        StructuredLogger::log_experiment_started(
            experiment.id,
            &experiment.title,
            experiment.experiment_type.as_str(),
            &experiment.target_service,
        );
        self.metrics
            .record_experiment_started(experiment.experiment_type.as_str());

        let entry = NewLogEntry::warn(
            COMPONENT_CHAOS_CONTROLLER,
            format!(
                "Chaos Experiment Started: {} ({}) on {}",
                experiment.title, experiment.experiment_type, experiment.target_service
            ),
            now,
        );
        // 实验已创建，日志写入失败不回滚
        if let Err(e) = self.telemetry.append_log(&entry).await {
            warn!("写入实验启动日志失败: {}", e);
            StructuredLogger::log_store_error("experiment_trigger", "append_log", &e);
            self.metrics.record_store_error("append_log");
        }

        Ok(experiment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sentinel_core::models::ExperimentType;

    fn request(title: &str, target: &str, duration: Option<i32>) -> NewChaosExperiment {
        NewChaosExperiment {
            title: title.to_string(),
            experiment_type: ExperimentType::CpuStress,
            target_service: target.to_string(),
            duration,
        }
    }

    #[test]
    fn test_validation() {
        assert!(ExperimentTrigger::validate(&request("CPU", "backend", None)).is_ok());
        assert!(ExperimentTrigger::validate(&request("CPU", "backend", Some(30))).is_ok());
        assert!(ExperimentTrigger::validate(&request(" ", "backend", None)).is_err());
        assert!(ExperimentTrigger::validate(&request("CPU", "", None)).is_err());
        assert!(ExperimentTrigger::validate(&request("CPU", "backend", Some(0))).is_err());
        assert!(ExperimentTrigger::validate(&request("CPU", "backend", Some(-5))).is_err());
        assert!(ExperimentTrigger::validate(&request("CPU", "backend", Some(3601))).is_err());
    }
}
