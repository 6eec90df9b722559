use std::sync::Arc;

use chrono::{DateTime, Utc};
use tracing::{debug, info, warn};

use sentinel_core::{
    constants::{COMPONENT_KUBELET, COMPONENT_KUBE_SCHEDULER},
    models::{ChaosExperiment, ExperimentStatus, ExperimentType, NewLogEntry, PodStatus},
    traits::{ChaosRepository, Clock, ClusterRepository, RandomSource, TelemetryRepository},
    SentinelError, SentinelResult,
};
use sentinel_infrastructure::{MetricsCollector, StructuredLogger};

/// 单个实验在本周期内的处理结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExperimentOutcome {
    /// 已过期并完成，附带自愈的Pod数
    Completed { pods_healed: usize },
    /// 杀掉了一个Pod
    PodKilled { pod_id: i64 },
    /// 仍在运行但本周期没有可作用的对象
    NoEffect,
}

/// 一次混沌处理的汇总
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ChaosPassReport {
    pub evaluated: usize,
    pub completed: usize,
    pub pods_killed: usize,
    pub pods_healed: usize,
    pub failures: usize,
}

/// 混沌实验生命周期管理器
///
/// 每个周期扫描所有运行中的实验：到期的标记为完成并触发全局自愈，
/// 未到期的按类型施加效果。单个实验出错只记录日志，不影响其他实验。
pub struct ChaosLifecycleManager {
    cluster: Arc<dyn ClusterRepository>,
    telemetry: Arc<dyn TelemetryRepository>,
    chaos: Arc<dyn ChaosRepository>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
    default_duration_seconds: i64,
    metrics: MetricsCollector,
}

impl ChaosLifecycleManager {
    pub fn new(
        cluster: Arc<dyn ClusterRepository>,
        telemetry: Arc<dyn TelemetryRepository>,
        chaos: Arc<dyn ChaosRepository>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
        default_duration_seconds: i64,
        metrics: MetricsCollector,
    ) -> Self {
        Self {
            cluster,
            telemetry,
            chaos,
            clock,
            random,
            default_duration_seconds,
            metrics,
        }
    }

    pub async fn run_pass(&self) -> ChaosPassReport {
        let mut report = ChaosPassReport::default();

        let running = match self
            .chaos
            .list_experiments_by_status(ExperimentStatus::Running)
            .await
        {
            Ok(running) => running,
            Err(e) => {
                warn!("读取运行中的混沌实验失败: {}", e);
                StructuredLogger::log_store_error("chaos_manager", "list_experiments", &e);
                self.metrics.record_store_error("list_experiments");
                report.failures += 1;
                return report;
            }
        };
        self.metrics.update_running_experiments(running.len() as f64);

        let now = self.clock.now();
        for experiment in &running {
            report.evaluated += 1;
            match self.process(experiment, now).await {
                Ok(ExperimentOutcome::Completed { pods_healed }) => {
                    report.completed += 1;
                    report.pods_healed += pods_healed;
                }
                Ok(ExperimentOutcome::PodKilled { .. }) => report.pods_killed += 1,
                Ok(ExperimentOutcome::NoEffect) => {}
                Err(e) => {
                    warn!("处理混沌实验 {} 失败: {}", experiment.id, e);
                    StructuredLogger::log_store_error("chaos_manager", "process_experiment", &e);
                    self.metrics.record_store_error("process_experiment");
                    report.failures += 1;
                }
            }
        }

        report
    }

    /// 处理单个运行中的实验
    pub async fn process(
        &self,
        experiment: &ChaosExperiment,
        now: DateTime<Utc>,
    ) -> SentinelResult<ExperimentOutcome> {
        if experiment.is_expired(now, self.default_duration_seconds) {
            let pods_healed = self.complete(experiment, now).await?;
            return Ok(ExperimentOutcome::Completed { pods_healed });
        }

        self.apply_effect(experiment).await
    }

    /// 施加实验效果，只有 pod-kill 会修改Pod
    pub async fn apply_effect(
        &self,
        experiment: &ChaosExperiment,
    ) -> SentinelResult<ExperimentOutcome> {
        match experiment.experiment_type {
            ExperimentType::PodKill => self.kill_random_pod(experiment).await,
            ExperimentType::NetworkLatency | ExperimentType::CpuStress => {
                Ok(ExperimentOutcome::NoEffect)
            }
        }
    }

    async fn kill_random_pod(
        &self,
        experiment: &ChaosExperiment,
    ) -> SentinelResult<ExperimentOutcome> {
        let candidates = self
            .cluster
            .list_pods_by_service_and_status(&experiment.target_service, PodStatus::Running)
            .await?;

        let Some(index) = self.random.pick_index(candidates.len()) else {
            debug!(
                "实验 {} 的目标服务 {} 没有运行中的Pod",
                experiment.id, experiment.target_service
            );
            return Ok(ExperimentOutcome::NoEffect);
        };
        let victim = &candidates[index];

        self.cluster
            .update_pod(victim.id, PodStatus::CrashLoopBackOff, None)
            .await?;

        StructuredLogger::log_pod_killed(
            victim.id,
            &victim.name,
            &victim.service,
            experiment.id,
        );
        self.metrics.record_pod_killed(&victim.service);

        let entry = NewLogEntry::error(
            COMPONENT_KUBELET,
            format!("Liveness probe failed for {}. Container killed.", victim.name),
            self.clock.now(),
        );
        self.append_log(&entry).await;

        Ok(ExperimentOutcome::PodKilled { pod_id: victim.id })
    }

    /// 标记实验完成并执行自愈；状态写入失败时不自愈
    async fn complete(&self, experiment: &ChaosExperiment, now: DateTime<Utc>) -> SentinelResult<usize> {
        if !experiment
            .status
            .can_transition_to(ExperimentStatus::Completed)
        {
            return Err(SentinelError::InvalidStatusTransition {
                from: experiment.status.to_string(),
                to: ExperimentStatus::Completed.to_string(),
            });
        }

        self.chaos
            .update_experiment_status(experiment.id, ExperimentStatus::Completed)
            .await?;

        let elapsed = experiment
            .elapsed(now)
            .map(|elapsed| elapsed.num_seconds())
            .unwrap_or_default();
        StructuredLogger::log_experiment_completed(experiment.id, &experiment.title, elapsed);
        self.metrics.record_experiment_completed();

        self.heal_sweep().await
    }

    /// 将所有非 Running 的Pod恢复为 Running，重启次数加一
    ///
    /// 作用于整个集群，而不只是到期实验的目标服务。
    pub async fn heal_sweep(&self) -> SentinelResult<usize> {
        let pods = self.cluster.list_pods().await?;
        let mut healed = 0;

        for pod in pods.iter().filter(|pod| !pod.is_running()) {
            let restarts = pod.healed_restarts();
            if let Err(e) = self
                .cluster
                .update_pod(pod.id, PodStatus::Running, Some(restarts))
                .await
            {
                warn!("恢复Pod {} 失败: {}", pod.name, e);
                StructuredLogger::log_store_error("chaos_manager", "heal_pod", &e);
                self.metrics.record_store_error("heal_pod");
                continue;
            }

            healed += 1;
            StructuredLogger::log_pod_healed(pod.id, &pod.name, restarts);

            let entry = NewLogEntry::info(
                COMPONENT_KUBE_SCHEDULER,
                format!("Self-healing: Restarted pod {}", pod.name),
                self.clock.now(),
            );
            self.append_log(&entry).await;
        }

        if healed > 0 {
            info!("自愈完成，恢复了 {} 个Pod", healed);
            self.metrics.record_pods_healed(healed as u64);
        }
        Ok(healed)
    }

    async fn append_log(&self, entry: &NewLogEntry) {
        if let Err(e) = self.telemetry.append_log(entry).await {
            warn!("写入日志失败: {}", e);
            StructuredLogger::log_store_error("chaos_manager", "append_log", &e);
            self.metrics.record_store_error("append_log");
        }
    }
}
