use std::sync::atomic::{AtomicBool, AtomicI64, Ordering};
use std::sync::Arc;
use std::time::Duration as StdDuration;

use async_trait::async_trait;
use chrono::{DateTime, Duration, Utc};
use tokio::sync::broadcast;

use sentinel_core::{
    config::SimulationConfig,
    models::{
        Alert, ChaosExperiment, ExperimentStatus, ExperimentType, LogEntry, LogLevel, LogQuery,
        MetricQuery, MetricSample, NewAlert, NewChaosExperiment, NewLogEntry, NewMetricSample,
        NewNode, NewPod, Pod, PodStatus,
    },
    traits::{
        ChaosRepository, ClusterRepository, ManualClock, RandomSource, SequenceRandomSource,
        StorefrontRepository, TelemetryRepository,
    },
    SentinelError, SentinelResult,
};
use sentinel_engine::{ExperimentOutcome, SimulationEngine, SEED_POD_SERVICES};
use sentinel_infrastructure::{InMemoryStore, MetricsCollector, Repositories};

struct Harness {
    store: InMemoryStore,
    repos: Repositories,
    clock: Arc<ManualClock>,
    start: DateTime<Utc>,
}

impl Harness {
    fn new() -> Self {
        let store = InMemoryStore::new();
        let repos = Repositories::from_memory_store(store.clone());
        let start = Utc::now();
        Self {
            store,
            repos,
            clock: Arc::new(ManualClock::new(start)),
            start,
        }
    }

    fn engine(&self, random: Arc<dyn RandomSource>) -> SimulationEngine {
        SimulationEngine::new(
            &self.repos,
            &SimulationConfig::default(),
            self.clock.clone(),
            random,
            MetricsCollector::new(),
        )
    }

    /// 0.5 不会触发错误样本，两个候选时选中第二个
    fn default_engine(&self) -> SimulationEngine {
        self.engine(Arc::new(SequenceRandomSource::constant(0.5)))
    }

    fn at(&self, seconds: i64) {
        self.clock.set(self.start + Duration::seconds(seconds));
    }

    async fn add_pod(&self, name: &str, service: &str) -> Pod {
        self.store
            .create_pod(&NewPod::running(name, Some(1), service), self.start)
            .await
            .unwrap()
    }

    async fn pods(&self) -> Vec<Pod> {
        self.store.list_pods().await.unwrap()
    }

    async fn logs(&self, level: LogLevel) -> Vec<LogEntry> {
        self.store
            .list_logs(&LogQuery::new(None, Some(level)))
            .await
            .unwrap()
    }

    async fn experiment(&self, id: i64) -> ChaosExperiment {
        self.store.get_experiment(id).await.unwrap().unwrap()
    }
}

fn experiment(
    experiment_type: ExperimentType,
    target: &str,
    duration: Option<i32>,
) -> NewChaosExperiment {
    NewChaosExperiment {
        title: format!("{experiment_type} - {target}"),
        experiment_type,
        target_service: target.to_string(),
        duration,
    }
}

#[tokio::test]
async fn test_samples_per_tick_without_errors() {
    let harness = Harness::new();
    let engine = harness.default_engine();

    let report = engine.scheduler.run_tick().await.unwrap();

    assert_eq!(report.synthesis.samples_written, 6);
    assert!(report.synthesis.failed_services.is_empty());
    let samples = harness
        .store
        .list_metrics(&MetricQuery::default())
        .await
        .unwrap();
    assert_eq!(samples.len(), 6);
    for service in ["frontend", "backend", "database"] {
        assert_eq!(
            samples
                .iter()
                .filter(|s| s.label("service") == Some(service))
                .count(),
            2
        );
    }
}

#[tokio::test]
async fn test_samples_per_tick_with_errors() {
    let harness = Harness::new();
    let engine = harness.engine(Arc::new(SequenceRandomSource::constant(0.01)));

    let report = engine.scheduler.run_tick().await.unwrap();

    assert_eq!(report.synthesis.samples_written, 9);
    let samples = harness
        .store
        .list_metrics(&MetricQuery::default())
        .await
        .unwrap();
    let errors: Vec<_> = samples
        .iter()
        .filter(|s| s.label("status") == Some("500"))
        .collect();
    assert_eq!(errors.len(), 3);
}

#[tokio::test]
async fn test_pod_kill_scenario() {
    let harness = Harness::new();
    let engine = harness.default_engine();
    harness.add_pod("frontend-aaaaa", "frontend").await;
    harness.add_pod("frontend-bbbbb", "frontend").await;
    harness.add_pod("backend-ccccc", "backend").await;

    let created = engine
        .trigger
        .trigger(&experiment(ExperimentType::PodKill, "frontend", Some(30)))
        .await
        .unwrap();
    assert_eq!(created.status, ExperimentStatus::Running);
    assert_eq!(created.started_at, Some(harness.start));

    harness.at(10);
    let report = engine.scheduler.run_tick().await.unwrap();
    assert_eq!(report.chaos.pods_killed, 1);

    let pods = harness.pods().await;
    let crashed: Vec<_> = pods
        .iter()
        .filter(|p| p.status == PodStatus::CrashLoopBackOff)
        .collect();
    assert_eq!(crashed.len(), 1);
    assert_eq!(crashed[0].service, "frontend");
    assert_eq!(crashed[0].restarts, 0);

    let errors = harness.logs(LogLevel::Error).await;
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0].service, "kubelet");
    assert_eq!(
        errors[0].message,
        format!("Liveness probe failed for {}. Container killed.", crashed[0].name)
    );

    harness.at(31);
    let report = engine.scheduler.run_tick().await.unwrap();
    assert_eq!(report.chaos.completed, 1);
    assert_eq!(report.chaos.pods_healed, 1);

    let healed = harness
        .pods()
        .await
        .into_iter()
        .find(|p| p.id == crashed[0].id)
        .unwrap();
    assert_eq!(healed.status, PodStatus::Running);
    assert_eq!(healed.restarts, 1);
    assert_eq!(
        harness.experiment(created.id).await.status,
        ExperimentStatus::Completed
    );

    let infos = harness.logs(LogLevel::Info).await;
    assert_eq!(infos.len(), 1);
    assert_eq!(infos[0].service, "kube-scheduler");
    assert_eq!(
        infos[0].message,
        format!("Self-healing: Restarted pod {}", healed.name)
    );
}

#[tokio::test]
async fn test_trigger_writes_warn_log() {
    let harness = Harness::new();
    let engine = harness.default_engine();

    engine
        .trigger
        .trigger(&NewChaosExperiment {
            title: "Pod Failure - Frontend".to_string(),
            experiment_type: ExperimentType::PodKill,
            target_service: "frontend".to_string(),
            duration: None,
        })
        .await
        .unwrap();

    let warnings = harness.logs(LogLevel::Warn).await;
    assert_eq!(warnings.len(), 1);
    assert_eq!(warnings[0].service, "chaos-controller");
    assert_eq!(
        warnings[0].message,
        "Chaos Experiment Started: Pod Failure - Frontend (pod-kill) on frontend"
    );
}

#[tokio::test]
async fn test_invalid_trigger_creates_nothing() {
    let harness = Harness::new();
    let engine = harness.default_engine();

    let result = engine
        .trigger
        .trigger(&experiment(ExperimentType::PodKill, "frontend", Some(0)))
        .await;

    assert!(matches!(result, Err(SentinelError::InvalidInput(_))));
    assert!(harness.store.list_experiments().await.unwrap().is_empty());
    assert!(harness.logs(LogLevel::Warn).await.is_empty());
}

#[tokio::test]
async fn test_unknown_target_service_scenario() {
    let harness = Harness::new();
    let engine = harness.default_engine();
    harness.add_pod("frontend-aaaaa", "frontend").await;

    let created = engine
        .trigger
        .trigger(&experiment(ExperimentType::PodKill, "payments", Some(30)))
        .await
        .unwrap();

    harness.at(10);
    let report = engine.scheduler.run_tick().await.unwrap();
    assert_eq!(report.chaos.pods_killed, 0);
    assert_eq!(report.chaos.failures, 0);

    harness.at(30);
    let report = engine.scheduler.run_tick().await.unwrap();
    assert_eq!(report.chaos.completed, 1);
    assert_eq!(report.chaos.pods_healed, 0);

    assert_eq!(
        harness.experiment(created.id).await.status,
        ExperimentStatus::Completed
    );
    assert!(harness
        .pods()
        .await
        .iter()
        .all(|p| p.is_running() && p.restarts == 0));
    assert!(harness.logs(LogLevel::Error).await.is_empty());
}

#[tokio::test]
async fn test_concurrent_experiments_expire_independently() {
    let harness = Harness::new();
    let engine = harness.default_engine();

    let short = engine
        .trigger
        .trigger(&experiment(ExperimentType::CpuStress, "frontend", Some(10)))
        .await
        .unwrap();
    let long = engine
        .trigger
        .trigger(&experiment(ExperimentType::NetworkLatency, "backend", Some(60)))
        .await
        .unwrap();

    harness.at(15);
    let report = engine.scheduler.run_tick().await.unwrap();
    assert_eq!(report.chaos.evaluated, 2);
    assert_eq!(report.chaos.completed, 1);

    assert_eq!(
        harness.experiment(short.id).await.status,
        ExperimentStatus::Completed
    );
    assert_eq!(
        harness.experiment(long.id).await.status,
        ExperimentStatus::Running
    );

    harness.at(61);
    let report = engine.scheduler.run_tick().await.unwrap();
    assert_eq!(report.chaos.evaluated, 1);
    assert_eq!(
        harness.experiment(long.id).await.status,
        ExperimentStatus::Completed
    );
}

#[tokio::test]
async fn test_default_duration_applies_when_missing() {
    let harness = Harness::new();
    let engine = harness.default_engine();
    let created = engine
        .trigger
        .trigger(&experiment(ExperimentType::CpuStress, "frontend", None))
        .await
        .unwrap();

    harness.at(29);
    engine.scheduler.run_tick().await.unwrap();
    assert_eq!(
        harness.experiment(created.id).await.status,
        ExperimentStatus::Running
    );

    harness.at(30);
    engine.scheduler.run_tick().await.unwrap();
    assert_eq!(
        harness.experiment(created.id).await.status,
        ExperimentStatus::Completed
    );
}

#[tokio::test]
async fn test_completed_experiments_cause_no_mutations() {
    let harness = Harness::new();
    let engine = harness.default_engine();
    harness.add_pod("frontend-aaaaa", "frontend").await;

    engine
        .trigger
        .trigger(&experiment(ExperimentType::PodKill, "frontend", Some(5)))
        .await
        .unwrap();

    harness.at(6);
    let report = engine.scheduler.run_tick().await.unwrap();
    assert_eq!(report.chaos.completed, 1);
    assert_eq!(report.chaos.pods_killed, 0);

    let before = harness.pods().await;
    harness.at(7);
    let report = engine.scheduler.run_tick().await.unwrap();
    assert_eq!(report.chaos.evaluated, 0);
    assert_eq!(harness.pods().await, before);
}

#[tokio::test]
async fn test_restart_counts_never_decrease() {
    let harness = Harness::new();
    let engine = harness.default_engine();
    for i in 0..3 {
        harness.add_pod(&format!("frontend-{i}"), "frontend").await;
    }

    let mut last: Vec<i32> = vec![0; 3];
    for round in 0..4i64 {
        let base = round * 20;
        harness.at(base);
        engine
            .trigger
            .trigger(&experiment(ExperimentType::PodKill, "frontend", Some(10)))
            .await
            .unwrap();

        for offset in [2, 4, 11] {
            harness.at(base + offset);
            engine.scheduler.run_tick().await.unwrap();

            let restarts: Vec<i32> = harness.pods().await.iter().map(|p| p.restarts).collect();
            assert!(restarts.iter().zip(&last).all(|(now, before)| now >= before));
            last = restarts;
        }
    }
    assert!(last.iter().sum::<i32>() > 0);
}

#[tokio::test]
async fn test_heal_sweep_is_idempotent() {
    let harness = Harness::new();
    let engine = harness.default_engine();
    let pod = harness.add_pod("backend-aaaaa", "backend").await;
    harness
        .store
        .update_pod(pod.id, PodStatus::Pending, None)
        .await
        .unwrap();

    assert_eq!(engine.chaos_manager.heal_sweep().await.unwrap(), 1);
    let logs_after_first = harness.logs(LogLevel::Info).await.len();

    assert_eq!(engine.chaos_manager.heal_sweep().await.unwrap(), 0);
    assert_eq!(harness.logs(LogLevel::Info).await.len(), logs_after_first);
    assert_eq!(harness.pods().await[0].restarts, 1);
}

#[tokio::test]
async fn test_heal_is_global() {
    let harness = Harness::new();
    let engine = harness.default_engine();
    let backend = harness.add_pod("backend-aaaaa", "backend").await;
    harness
        .store
        .update_pod(backend.id, PodStatus::CrashLoopBackOff, None)
        .await
        .unwrap();

    engine
        .trigger
        .trigger(&experiment(ExperimentType::CpuStress, "frontend", Some(1)))
        .await
        .unwrap();
    harness.at(2);
    engine.scheduler.run_tick().await.unwrap();

    let pod = &harness.pods().await[0];
    assert_eq!(pod.status, PodStatus::Running);
    assert_eq!(pod.restarts, 1);
}

#[tokio::test]
async fn test_missing_start_time_is_expired() {
    let harness = Harness::new();
    let engine = harness.default_engine();
    let created = harness
        .store
        .create_experiment(
            &experiment(ExperimentType::PodKill, "frontend", Some(600)),
            harness.start,
        )
        .await
        .unwrap();

    let mut without_start = created.clone();
    without_start.started_at = None;
    let outcome = engine
        .chaos_manager
        .process(&without_start, harness.start)
        .await
        .unwrap();

    assert_eq!(outcome, ExperimentOutcome::Completed { pods_healed: 0 });
    assert_eq!(
        harness.experiment(created.id).await.status,
        ExperimentStatus::Completed
    );
}

/// 对指定服务的指标写入返回错误
struct FailingTelemetry {
    inner: InMemoryStore,
    failing_service: String,
}

#[async_trait]
impl TelemetryRepository for FailingTelemetry {
    async fn append_metric(&self, sample: &NewMetricSample) -> SentinelResult<()> {
        if sample.labels.get("service") == Some(&self.failing_service) {
            return Err(SentinelError::DatabaseOperation("disk full".to_string()));
        }
        self.inner.append_metric(sample).await
    }

    async fn list_metrics(&self, query: &MetricQuery) -> SentinelResult<Vec<MetricSample>> {
        self.inner.list_metrics(query).await
    }

    async fn append_log(&self, entry: &NewLogEntry) -> SentinelResult<()> {
        self.inner.append_log(entry).await
    }

    async fn list_logs(&self, query: &LogQuery) -> SentinelResult<Vec<LogEntry>> {
        self.inner.list_logs(query).await
    }

    async fn list_alerts(&self) -> SentinelResult<Vec<Alert>> {
        self.inner.list_alerts().await
    }

    async fn create_alert(&self, alert: &NewAlert) -> SentinelResult<Alert> {
        self.inner.create_alert(alert).await
    }
}

#[tokio::test]
async fn test_metric_write_failure_is_isolated() {
    let mut harness = Harness::new();
    harness.repos.telemetry = Arc::new(FailingTelemetry {
        inner: harness.store.clone(),
        failing_service: "backend".to_string(),
    });
    let engine = harness.default_engine();
    let created = engine
        .trigger
        .trigger(&experiment(ExperimentType::CpuStress, "frontend", Some(1)))
        .await
        .unwrap();

    harness.at(5);
    let report = engine.scheduler.run_tick().await.unwrap();

    assert_eq!(report.synthesis.samples_written, 4);
    assert_eq!(report.synthesis.failed_services, vec!["backend".to_string()]);
    assert_eq!(report.chaos.completed, 1);
    assert_eq!(
        harness.experiment(created.id).await.status,
        ExperimentStatus::Completed
    );
}

/// 对指定Pod的更新返回错误
struct FailingCluster {
    inner: InMemoryStore,
    failing_pod: i64,
}

#[async_trait]
impl ClusterRepository for FailingCluster {
    async fn list_nodes(&self) -> SentinelResult<Vec<sentinel_core::models::Node>> {
        self.inner.list_nodes().await
    }

    async fn create_node(&self, node: &NewNode) -> SentinelResult<sentinel_core::models::Node> {
        self.inner.create_node(node).await
    }

    async fn list_pods(&self) -> SentinelResult<Vec<Pod>> {
        self.inner.list_pods().await
    }

    async fn list_pods_by_service_and_status(
        &self,
        service: &str,
        status: PodStatus,
    ) -> SentinelResult<Vec<Pod>> {
        self.inner
            .list_pods_by_service_and_status(service, status)
            .await
    }

    async fn create_pod(&self, pod: &NewPod, created_at: DateTime<Utc>) -> SentinelResult<Pod> {
        self.inner.create_pod(pod, created_at).await
    }

    async fn update_pod(
        &self,
        id: i64,
        status: PodStatus,
        restarts: Option<i32>,
    ) -> SentinelResult<Pod> {
        if id == self.failing_pod {
            return Err(SentinelError::DatabaseOperation("locked".to_string()));
        }
        self.inner.update_pod(id, status, restarts).await
    }
}

#[tokio::test]
async fn test_pod_heal_failure_is_isolated() {
    let mut harness = Harness::new();
    let stuck = harness.add_pod("frontend-aaaaa", "frontend").await;
    let other = harness.add_pod("backend-bbbbb", "backend").await;
    for pod in [&stuck, &other] {
        harness
            .store
            .update_pod(pod.id, PodStatus::CrashLoopBackOff, None)
            .await
            .unwrap();
    }
    harness.repos.cluster = Arc::new(FailingCluster {
        inner: harness.store.clone(),
        failing_pod: stuck.id,
    });
    let engine = harness.default_engine();

    assert_eq!(engine.chaos_manager.heal_sweep().await.unwrap(), 1);

    let pods = harness.pods().await;
    assert_eq!(pods[0].status, PodStatus::CrashLoopBackOff);
    assert_eq!(pods[1].status, PodStatus::Running);
    assert_eq!(pods[1].restarts, 1);
}

/// 第一次读取运行中的实验时 panic
struct PanicOnceChaos {
    inner: InMemoryStore,
    panicked: AtomicBool,
}

#[async_trait]
impl ChaosRepository for PanicOnceChaos {
    async fn create_experiment(
        &self,
        experiment: &NewChaosExperiment,
        started_at: DateTime<Utc>,
    ) -> SentinelResult<ChaosExperiment> {
        self.inner.create_experiment(experiment, started_at).await
    }

    async fn get_experiment(&self, id: i64) -> SentinelResult<Option<ChaosExperiment>> {
        self.inner.get_experiment(id).await
    }

    async fn list_experiments(&self) -> SentinelResult<Vec<ChaosExperiment>> {
        self.inner.list_experiments().await
    }

    async fn list_experiments_by_status(
        &self,
        status: ExperimentStatus,
    ) -> SentinelResult<Vec<ChaosExperiment>> {
        if !self.panicked.swap(true, Ordering::SeqCst) {
            panic!("store connection poisoned");
        }
        self.inner.list_experiments_by_status(status).await
    }

    async fn update_experiment_status(
        &self,
        id: i64,
        status: ExperimentStatus,
    ) -> SentinelResult<()> {
        self.inner.update_experiment_status(id, status).await
    }
}

#[tokio::test]
async fn test_panicking_tick_does_not_stop_next_tick() {
    let mut harness = Harness::new();
    harness.repos.chaos = Arc::new(PanicOnceChaos {
        inner: harness.store.clone(),
        panicked: AtomicBool::new(false),
    });
    let engine = harness.default_engine();

    assert!(engine.scheduler.run_tick().await.is_none());

    let report = engine.scheduler.run_tick().await.unwrap();
    assert_eq!(report.tick, 2);
    assert_eq!(report.synthesis.samples_written, 6);
    assert_eq!(engine.scheduler.ticks(), 2);
}

/// 指定实验的状态更新返回错误，直到关闭开关
struct FailingStatusChaos {
    inner: InMemoryStore,
    failing_experiment: AtomicI64,
}

#[async_trait]
impl ChaosRepository for FailingStatusChaos {
    async fn create_experiment(
        &self,
        experiment: &NewChaosExperiment,
        started_at: DateTime<Utc>,
    ) -> SentinelResult<ChaosExperiment> {
        self.inner.create_experiment(experiment, started_at).await
    }

    async fn get_experiment(&self, id: i64) -> SentinelResult<Option<ChaosExperiment>> {
        self.inner.get_experiment(id).await
    }

    async fn list_experiments(&self) -> SentinelResult<Vec<ChaosExperiment>> {
        self.inner.list_experiments().await
    }

    async fn list_experiments_by_status(
        &self,
        status: ExperimentStatus,
    ) -> SentinelResult<Vec<ChaosExperiment>> {
        self.inner.list_experiments_by_status(status).await
    }

    async fn update_experiment_status(
        &self,
        id: i64,
        status: ExperimentStatus,
    ) -> SentinelResult<()> {
        if id == self.failing_experiment.load(Ordering::SeqCst) {
            return Err(SentinelError::DatabaseOperation("locked".to_string()));
        }
        self.inner.update_experiment_status(id, status).await
    }
}

#[tokio::test]
async fn test_experiment_status_failure_is_isolated() {
    let mut harness = Harness::new();
    let chaos = Arc::new(FailingStatusChaos {
        inner: harness.store.clone(),
        failing_experiment: AtomicI64::new(-1),
    });
    harness.repos.chaos = chaos.clone();
    let target = harness.add_pod("frontend-aaaaa", "frontend").await;
    let engine = harness.default_engine();

    let stuck = engine
        .trigger
        .trigger(&experiment(ExperimentType::CpuStress, "backend", Some(10)))
        .await
        .unwrap();
    let kill = engine
        .trigger
        .trigger(&experiment(ExperimentType::PodKill, "frontend", Some(60)))
        .await
        .unwrap();
    chaos.failing_experiment.store(stuck.id, Ordering::SeqCst);

    harness.at(15);
    let report = engine.chaos_manager.run_pass().await;
    assert_eq!(report.evaluated, 2);
    assert_eq!(report.failures, 1);
    assert_eq!(report.completed, 0);
    assert_eq!(report.pods_killed, 1);
    assert_eq!(report.pods_healed, 0);

    let pods = harness.pods().await;
    assert_eq!(pods[0].id, target.id);
    assert_eq!(pods[0].status, PodStatus::CrashLoopBackOff);
    assert_eq!(
        harness.experiment(stuck.id).await.status,
        ExperimentStatus::Running
    );

    chaos.failing_experiment.store(-1, Ordering::SeqCst);
    harness.at(20);
    let report = engine.chaos_manager.run_pass().await;
    assert_eq!(report.failures, 0);
    assert_eq!(report.completed, 1);
    assert_eq!(
        harness.experiment(stuck.id).await.status,
        ExperimentStatus::Completed
    );
    assert_eq!(
        harness.experiment(kill.id).await.status,
        ExperimentStatus::Running
    );
}

#[tokio::test]
async fn test_seed_creates_demo_cluster_once() {
    let harness = Harness::new();
    let engine = harness.engine(Arc::new(SequenceRandomSource::new(vec![0.1, 0.7, 0.3])));

    let report = engine.seeder.seed().await.unwrap();
    assert_eq!(report.nodes, 3);
    assert_eq!(report.pods, SEED_POD_SERVICES.len());
    assert_eq!(report.products, 4);

    let nodes = harness.store.list_nodes().await.unwrap();
    let names: Vec<_> = nodes.iter().map(|n| n.name.as_str()).collect();
    assert_eq!(names, vec!["worker-pool-1", "worker-pool-2", "control-plane-1"]);
    assert!(nodes[2].is_master);
    assert_eq!(nodes[1].region, "us-east-1b");
    let master_id = nodes[2].id;
    let db_node_id = nodes[1].id;

    let pods = harness.pods().await;
    assert_eq!(pods.len(), 7);
    for pod in &pods {
        assert!(pod.is_running());
        assert!(pod.name.starts_with(&format!("{}-", pod.service)));
        assert_ne!(pod.node_id, Some(master_id));
        if pod.service == "database" {
            assert_eq!(pod.node_id, Some(db_node_id));
        }
    }

    let products = harness.store.list_products().await.unwrap();
    assert_eq!(products[0].name, "Kubernetes The Hard Way");
    assert_eq!(products[2].price, 199.99);

    let again = engine.seeder.seed().await.unwrap();
    assert!(again.is_empty());
    assert_eq!(harness.pods().await.len(), 7);
    assert_eq!(harness.store.list_products().await.unwrap().len(), 4);
}

#[tokio::test]
async fn test_seed_resumes_after_partial_run() {
    let harness = Harness::new();
    for node in [
        NewNode::worker("worker-pool-1", "us-east-1a"),
        NewNode::worker("worker-pool-2", "us-east-1b"),
        NewNode::master("control-plane-1", "us-east-1a"),
    ] {
        harness.store.create_node(&node).await.unwrap();
    }
    let engine = harness.default_engine();

    let report = engine.seeder.seed().await.unwrap();
    assert_eq!(report.nodes, 0);
    assert_eq!(report.pods, SEED_POD_SERVICES.len());
    assert_eq!(report.products, 4);

    let nodes = harness.store.list_nodes().await.unwrap();
    assert_eq!(nodes.len(), 3);
    let master_id = nodes[2].id;
    let db_node_id = nodes[1].id;
    for pod in harness.pods().await {
        assert_ne!(pod.node_id, Some(master_id));
        if pod.service == "database" {
            assert_eq!(pod.node_id, Some(db_node_id));
        }
    }

    assert!(engine.seeder.seed().await.unwrap().is_empty());
    assert_eq!(harness.pods().await.len(), SEED_POD_SERVICES.len());
}

#[tokio::test(start_paused = true)]
async fn test_scheduler_runs_until_shutdown() {
    let harness = Harness::new();
    let engine = harness.default_engine();
    let (shutdown_tx, shutdown_rx) = broadcast::channel(1);

    let scheduler = engine.scheduler.clone();
    let handle = tokio::spawn(async move { scheduler.run(shutdown_rx).await });

    tokio::time::sleep(StdDuration::from_secs(11)).await;
    shutdown_tx.send(()).unwrap();
    handle.await.unwrap();

    assert!(engine.scheduler.ticks() >= 2);
    let samples = harness
        .store
        .list_metrics(&MetricQuery::default())
        .await
        .unwrap();
    assert_eq!(samples.len() as u64, engine.scheduler.ticks() * 6);
}
