//! 数据仓储层接口定义
//!
//! 集群状态存储的抽象接口，按实体职责拆分：
//! - `ClusterRepository` - 节点与Pod
//! - `TelemetryRepository` - 指标样本、日志与告警
//! - `ChaosRepository` - 混沌实验记录
//! - `StorefrontRepository` - 演示商城的商品与订单
//!
//! ## 设计原则
//!
//! ### 单记录原子性
//! 每次写操作只涉及一条记录，不提供跨实体事务。模拟引擎每个周期都会重新
//! 读取所需数据，不在周期之间缓存任何记录。
//!
//! ### 异步设计
//! 所有操作都是异步的，返回 `SentinelResult<T>`，并要求实现 `Send + Sync`。
//!
//! ### 多种后端
//! - SQLite 实现（`sentinel-infrastructure::database::sqlite`）
//! - 内存实现（`sentinel-infrastructure::database::memory`）
//!
//! ## 使用示例
//!
//! ```rust,ignore
//! use sentinel_core::models::PodStatus;
//! use sentinel_core::traits::ClusterRepository;
//!
//! async fn crash_first(repo: &dyn ClusterRepository) -> SentinelResult<()> {
//!     let pods = repo
//!         .list_pods_by_service_and_status("frontend", PodStatus::Running)
//!         .await?;
//!     if let Some(pod) = pods.first() {
//!         repo.update_pod(pod.id, PodStatus::CrashLoopBackOff, None).await?;
//!     }
//!     Ok(())
//! }
//! ```

use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::models::{
    Alert, ChaosExperiment, ExperimentStatus, LogEntry, LogQuery, MetricQuery, MetricSample,
    NewAlert, NewChaosExperiment, NewLogEntry, NewMetricSample, NewNode, NewPod, NewProduct, Node,
    Order, OrderItem, Pod, PodStatus, Product,
};
use crate::SentinelResult;

/// 节点与Pod仓储接口
#[async_trait]
pub trait ClusterRepository: Send + Sync {
    /// 获取全部节点
    async fn list_nodes(&self) -> SentinelResult<Vec<Node>>;

    /// 创建节点，返回带ID的记录
    async fn create_node(&self, node: &NewNode) -> SentinelResult<Node>;

    /// 获取全部Pod
    async fn list_pods(&self) -> SentinelResult<Vec<Pod>>;

    /// 获取指定服务、指定状态的Pod
    async fn list_pods_by_service_and_status(
        &self,
        service: &str,
        status: PodStatus,
    ) -> SentinelResult<Vec<Pod>>;

    /// 创建Pod，`created_at` 由调用方提供
    async fn create_pod(&self, pod: &NewPod, created_at: DateTime<Utc>) -> SentinelResult<Pod>;

    /// 更新Pod状态，`restarts` 为 `None` 时保持原值
    ///
    /// # 错误
    ///
    /// * `PodNotFound` - Pod不存在
    async fn update_pod(
        &self,
        id: i64,
        status: PodStatus,
        restarts: Option<i32>,
    ) -> SentinelResult<Pod>;
}

/// 指标、日志与告警仓储接口
#[async_trait]
pub trait TelemetryRepository: Send + Sync {
    /// 追加指标样本
    async fn append_metric(&self, sample: &NewMetricSample) -> SentinelResult<()>;

    /// 按条件查询指标样本，按时间倒序
    async fn list_metrics(&self, query: &MetricQuery) -> SentinelResult<Vec<MetricSample>>;

    /// 追加日志条目
    async fn append_log(&self, entry: &NewLogEntry) -> SentinelResult<()>;

    /// 按条件查询日志，按时间倒序
    async fn list_logs(&self, query: &LogQuery) -> SentinelResult<Vec<LogEntry>>;

    /// 获取告警列表，按创建时间倒序
    async fn list_alerts(&self) -> SentinelResult<Vec<Alert>>;

    /// 创建告警
    async fn create_alert(&self, alert: &NewAlert) -> SentinelResult<Alert>;
}

/// 混沌实验仓储接口
#[async_trait]
pub trait ChaosRepository: Send + Sync {
    /// 以 `running` 状态创建实验，`started_at` 即创建时刻
    async fn create_experiment(
        &self,
        experiment: &NewChaosExperiment,
        started_at: DateTime<Utc>,
    ) -> SentinelResult<ChaosExperiment>;

    /// 根据ID获取实验
    async fn get_experiment(&self, id: i64) -> SentinelResult<Option<ChaosExperiment>>;

    /// 获取全部实验，按开始时间倒序
    async fn list_experiments(&self) -> SentinelResult<Vec<ChaosExperiment>>;

    /// 获取指定状态的实验
    async fn list_experiments_by_status(
        &self,
        status: ExperimentStatus,
    ) -> SentinelResult<Vec<ChaosExperiment>>;

    /// 更新实验状态
    ///
    /// # 错误
    ///
    /// * `ExperimentNotFound` - 实验不存在
    async fn update_experiment_status(
        &self,
        id: i64,
        status: ExperimentStatus,
    ) -> SentinelResult<()>;
}

/// 演示商城仓储接口
#[async_trait]
pub trait StorefrontRepository: Send + Sync {
    async fn list_products(&self) -> SentinelResult<Vec<Product>>;

    async fn get_product(&self, id: i64) -> SentinelResult<Option<Product>>;

    async fn create_product(&self, product: &NewProduct) -> SentinelResult<Product>;

    /// 创建订单，金额按 `Order::total_for` 计算，状态为 `completed`
    async fn create_order(
        &self,
        items: &[OrderItem],
        created_at: DateTime<Utc>,
    ) -> SentinelResult<Order>;
}
