use std::sync::Arc;

use tracing::{debug, info};

use sentinel_core::{
    constants::POD_NAME_SUFFIX_LEN,
    models::{NewNode, NewPod, NewProduct, Node},
    traits::{Clock, ClusterRepository, RandomSource, StorefrontRepository},
    SentinelError, SentinelResult,
};
use sentinel_infrastructure::StructuredLogger;

/// 种子Pod对应的服务，按顺序创建
pub const SEED_POD_SERVICES: [&str; 7] = [
    "frontend",
    "frontend",
    "backend",
    "backend",
    "database",
    "redis",
    "auth-service",
];

/// 数据库Pod固定调度到的节点
const DATABASE_NODE: &str = "worker-pool-2";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SeedReport {
    pub nodes: usize,
    pub pods: usize,
    pub products: usize,
}

impl SeedReport {
    pub fn is_empty(&self) -> bool {
        self.nodes == 0 && self.pods == 0 && self.products == 0
    }
}

/// 演示集群初始化
///
/// 节点、Pod与商品分别只在对应集合为空时写入，重复调用不产生任何写入。
pub struct InfrastructureSeeder {
    cluster: Arc<dyn ClusterRepository>,
    storefront: Arc<dyn StorefrontRepository>,
    clock: Arc<dyn Clock>,
    random: Arc<dyn RandomSource>,
}

impl InfrastructureSeeder {
    pub fn new(
        cluster: Arc<dyn ClusterRepository>,
        storefront: Arc<dyn StorefrontRepository>,
        clock: Arc<dyn Clock>,
        random: Arc<dyn RandomSource>,
    ) -> Self {
        Self {
            cluster,
            storefront,
            clock,
            random,
        }
    }

    pub fn catalogue() -> Vec<NewProduct> {
        vec![
            NewProduct::new(
                "Kubernetes The Hard Way",
                "A comprehensive guide to K8s internals.",
                49.99,
                "book",
                50,
            ),
            NewProduct::new(
                "Prometheus Handbook",
                "Master observability with Prometheus.",
                39.99,
                "book",
                100,
            ),
            NewProduct::new(
                "SRE Reliability Kit",
                "Tools for chaos engineering.",
                199.99,
                "kit",
                20,
            ),
            NewProduct::new(
                "Cluster Autoscaler Plushie",
                "Cute plushie that scales up.",
                24.99,
                "plushie",
                200,
            ),
        ]
    }

    pub async fn seed(&self) -> SentinelResult<SeedReport> {
        let mut report = SeedReport::default();

        // 三类数据分别在为空时补齐
        let mut nodes = self.cluster.list_nodes().await?;
        if nodes.is_empty() {
            info!("开始初始化演示集群");
            nodes = self.seed_nodes().await?;
            report.nodes = nodes.len();
        }

        if self.cluster.list_pods().await?.is_empty() {
            let workers: Vec<Node> = nodes.into_iter().filter(|node| !node.is_master).collect();
            for service in SEED_POD_SERVICES {
                let node = self.placement(service, &workers)?;
                let name = format!("{}-{}", service, self.random.suffix(POD_NAME_SUFFIX_LEN));
                self.cluster
                    .create_pod(&NewPod::running(name, Some(node.id), service), self.clock.now())
                    .await?;
                report.pods += 1;
            }
        }

        if self.storefront.list_products().await?.is_empty() {
            for product in Self::catalogue() {
                self.storefront.create_product(&product).await?;
                report.products += 1;
            }
        }

        if report.is_empty() {
            debug!("演示集群已完整，跳过初始化");
        } else {
            StructuredLogger::log_seeded(report.nodes, report.pods, report.products);
        }
        Ok(report)
    }

    async fn seed_nodes(&self) -> SentinelResult<Vec<Node>> {
        Ok(vec![
            self.cluster
                .create_node(&NewNode::worker("worker-pool-1", "us-east-1a"))
                .await?,
            self.cluster
                .create_node(&NewNode::worker(DATABASE_NODE, "us-east-1b"))
                .await?,
            self.cluster
                .create_node(&NewNode::master("control-plane-1", "us-east-1a"))
                .await?,
        ])
    }

    /// 数据库Pod固定在 worker-pool-2，其余随机选择工作节点
    fn placement<'a>(&self, service: &str, workers: &'a [Node]) -> SentinelResult<&'a Node> {
        if service == "database" {
            return workers
                .iter()
                .find(|node| node.name == DATABASE_NODE)
                .ok_or_else(|| SentinelError::Internal(format!("缺少节点 {DATABASE_NODE}")));
        }

        self.random
            .pick_index(workers.len())
            .and_then(|index| workers.get(index))
            .ok_or_else(|| SentinelError::Internal("没有可用的工作节点".to_string()))
    }
}
