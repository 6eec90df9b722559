//! 进程内存储
//!
//! 与 SQLite 实现提供相同语义的内存实现，`database.url = "memory://"` 时使用，
//! 也用于模拟引擎和 API 的测试。重启后数据丢失。

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sentinel_core::{
    models::{
        Alert, ChaosExperiment, ExperimentStatus, LogEntry, LogQuery, MetricQuery, MetricSample,
        NewAlert, NewChaosExperiment, NewLogEntry, NewMetricSample, NewNode, NewPod, NewProduct,
        Node, Order, OrderItem, OrderStatus, Pod, PodStatus, Product,
    },
    traits::{ChaosRepository, ClusterRepository, StorefrontRepository, TelemetryRepository},
    SentinelError, SentinelResult,
};
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

/// 单张表：按ID有序存放记录，ID自增
#[derive(Debug)]
struct Table<T> {
    rows: BTreeMap<i64, T>,
    next_id: i64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T: Clone> Table<T> {
    fn insert_with(&mut self, build: impl FnOnce(i64) -> T) -> T {
        let id = self.next_id;
        self.next_id += 1;
        let row = build(id);
        self.rows.insert(id, row.clone());
        row
    }

    fn values(&self) -> impl DoubleEndedIterator<Item = &T> {
        self.rows.values()
    }
}

#[derive(Debug, Default)]
struct StoreState {
    nodes: Table<Node>,
    pods: Table<Pod>,
    metrics: Table<MetricSample>,
    logs: Table<LogEntry>,
    alerts: Table<Alert>,
    experiments: Table<ChaosExperiment>,
    products: Table<Product>,
    orders: Table<Order>,
}

/// 内存存储，克隆后共享同一份数据
#[derive(Debug, Clone, Default)]
pub struct InMemoryStore {
    state: Arc<RwLock<StoreState>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

/// 按时间倒序排列，时间相同时ID大的在前
fn newest_first<T>(rows: &mut [T], key: impl Fn(&T) -> (Option<DateTime<Utc>>, i64)) {
    rows.sort_by(|a, b| key(b).cmp(&key(a)));
}

fn limit_of(limit: i64) -> usize {
    usize::try_from(limit).unwrap_or(0)
}

#[async_trait]
impl ClusterRepository for InMemoryStore {
    async fn list_nodes(&self) -> SentinelResult<Vec<Node>> {
        let state = self.state.read().await;
        Ok(state.nodes.values().cloned().collect())
    }

    async fn create_node(&self, node: &NewNode) -> SentinelResult<Node> {
        let mut state = self.state.write().await;
        let created = state.nodes.insert_with(|id| Node::from_new(id, node));
        debug!("创建节点成功: {} (id={})", created.name, created.id);
        Ok(created)
    }

    async fn list_pods(&self) -> SentinelResult<Vec<Pod>> {
        let state = self.state.read().await;
        Ok(state.pods.values().cloned().collect())
    }

    async fn list_pods_by_service_and_status(
        &self,
        service: &str,
        status: PodStatus,
    ) -> SentinelResult<Vec<Pod>> {
        let state = self.state.read().await;
        Ok(state
            .pods
            .values()
            .filter(|pod| pod.service == service && pod.status == status)
            .cloned()
            .collect())
    }

    async fn create_pod(&self, pod: &NewPod, created_at: DateTime<Utc>) -> SentinelResult<Pod> {
        let mut state = self.state.write().await;
        let created = state
            .pods
            .insert_with(|id| Pod::from_new(id, pod, created_at));
        debug!("创建Pod成功: {} (id={})", created.name, created.id);
        Ok(created)
    }

    async fn update_pod(
        &self,
        id: i64,
        status: PodStatus,
        restarts: Option<i32>,
    ) -> SentinelResult<Pod> {
        let mut state = self.state.write().await;
        let pod = state
            .pods
            .rows
            .get_mut(&id)
            .ok_or(SentinelError::PodNotFound { id })?;

        pod.status = status;
        if let Some(restarts) = restarts {
            pod.restarts = restarts;
        }
        debug!("更新Pod状态: id={} status={}", id, status);
        Ok(pod.clone())
    }
}

#[async_trait]
impl TelemetryRepository for InMemoryStore {
    async fn append_metric(&self, sample: &NewMetricSample) -> SentinelResult<()> {
        let mut state = self.state.write().await;
        state
            .metrics
            .insert_with(|id| MetricSample::from_new(id, sample));
        Ok(())
    }

    async fn list_metrics(&self, query: &MetricQuery) -> SentinelResult<Vec<MetricSample>> {
        let state = self.state.read().await;
        let mut samples: Vec<MetricSample> = state
            .metrics
            .values()
            .filter(|sample| query.matches(sample))
            .cloned()
            .collect();
        newest_first(&mut samples, |s| (Some(s.timestamp), s.id));
        samples.truncate(limit_of(query.limit));
        Ok(samples)
    }

    async fn append_log(&self, entry: &NewLogEntry) -> SentinelResult<()> {
        let mut state = self.state.write().await;
        state.logs.insert_with(|id| LogEntry::from_new(id, entry));
        Ok(())
    }

    async fn list_logs(&self, query: &LogQuery) -> SentinelResult<Vec<LogEntry>> {
        let state = self.state.read().await;
        let mut entries: Vec<LogEntry> = state
            .logs
            .values()
            .filter(|entry| query.matches(entry))
            .cloned()
            .collect();
        newest_first(&mut entries, |e| (Some(e.timestamp), e.id));
        entries.truncate(limit_of(query.limit));
        Ok(entries)
    }

    async fn list_alerts(&self) -> SentinelResult<Vec<Alert>> {
        let state = self.state.read().await;
        let mut alerts: Vec<Alert> = state.alerts.values().cloned().collect();
        newest_first(&mut alerts, |a| (Some(a.created_at), a.id));
        Ok(alerts)
    }

    async fn create_alert(&self, alert: &NewAlert) -> SentinelResult<Alert> {
        let mut state = self.state.write().await;
        Ok(state.alerts.insert_with(|id| Alert::from_new(id, alert)))
    }
}

#[async_trait]
impl ChaosRepository for InMemoryStore {
    async fn create_experiment(
        &self,
        experiment: &NewChaosExperiment,
        started_at: DateTime<Utc>,
    ) -> SentinelResult<ChaosExperiment> {
        let mut state = self.state.write().await;
        let created = state
            .experiments
            .insert_with(|id| ChaosExperiment::start(id, experiment, started_at));
        debug!("创建混沌实验成功: {} (id={})", created.title, created.id);
        Ok(created)
    }

    async fn get_experiment(&self, id: i64) -> SentinelResult<Option<ChaosExperiment>> {
        let state = self.state.read().await;
        Ok(state.experiments.rows.get(&id).cloned())
    }

    async fn list_experiments(&self) -> SentinelResult<Vec<ChaosExperiment>> {
        let state = self.state.read().await;
        let mut experiments: Vec<ChaosExperiment> = state.experiments.values().cloned().collect();
        newest_first(&mut experiments, |e| (e.started_at, e.id));
        Ok(experiments)
    }

    async fn list_experiments_by_status(
        &self,
        status: ExperimentStatus,
    ) -> SentinelResult<Vec<ChaosExperiment>> {
        let state = self.state.read().await;
        Ok(state
            .experiments
            .values()
            .filter(|experiment| experiment.status == status)
            .cloned()
            .collect())
    }

    async fn update_experiment_status(
        &self,
        id: i64,
        status: ExperimentStatus,
    ) -> SentinelResult<()> {
        let mut state = self.state.write().await;
        let experiment = state
            .experiments
            .rows
            .get_mut(&id)
            .ok_or(SentinelError::ExperimentNotFound { id })?;
        experiment.status = status;
        debug!("更新混沌实验状态: id={} status={}", id, status);
        Ok(())
    }
}

#[async_trait]
impl StorefrontRepository for InMemoryStore {
    async fn list_products(&self) -> SentinelResult<Vec<Product>> {
        let state = self.state.read().await;
        Ok(state.products.values().cloned().collect())
    }

    async fn get_product(&self, id: i64) -> SentinelResult<Option<Product>> {
        let state = self.state.read().await;
        Ok(state.products.rows.get(&id).cloned())
    }

    async fn create_product(&self, product: &NewProduct) -> SentinelResult<Product> {
        let mut state = self.state.write().await;
        Ok(state
            .products
            .insert_with(|id| Product::from_new(id, product)))
    }

    async fn create_order(
        &self,
        items: &[OrderItem],
        created_at: DateTime<Utc>,
    ) -> SentinelResult<Order> {
        let total = Order::total_for(items);
        let mut state = self.state.write().await;
        let order = state.orders.insert_with(|id| Order {
            id,
            total,
            status: OrderStatus::Completed,
            created_at,
        });
        debug!("创建订单成功: id={} total={}", order.id, order.total);
        Ok(order)
    }
}
