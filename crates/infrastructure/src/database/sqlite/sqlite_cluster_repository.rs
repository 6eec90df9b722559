use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sentinel_core::{
    models::{NewNode, NewPod, Node, Pod, PodStatus},
    traits::ClusterRepository,
    SentinelError, SentinelResult,
};
use sqlx::{sqlite::SqliteRow, Row, SqlitePool};
use tracing::debug;

use crate::database::mapping::MappingHelpers;

const POD_COLUMNS: &str = "id, name, namespace, node_id, service, status, restarts, cpu_request, memory_request, created_at";

pub struct SqliteClusterRepository {
    pool: SqlitePool,
}

impl SqliteClusterRepository {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }

    fn row_to_node(row: &SqliteRow) -> SentinelResult<Node> {
        Ok(Node {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            region: row.try_get("region")?,
            status: MappingHelpers::parse_enum(row, "status")?,
            cpu_usage: row.try_get("cpu_usage")?,
            memory_usage: row.try_get("memory_usage")?,
            is_master: row.try_get("is_master")?,
        })
    }

    fn row_to_pod(row: &SqliteRow) -> SentinelResult<Pod> {
        Ok(Pod {
            id: row.try_get("id")?,
            name: row.try_get("name")?,
            namespace: row.try_get("namespace")?,
            node_id: row.try_get("node_id")?,
            service: row.try_get("service")?,
            status: MappingHelpers::parse_enum(row, "status")?,
            restarts: row.try_get("restarts")?,
            cpu_request: row.try_get("cpu_request")?,
            memory_request: row.try_get("memory_request")?,
            created_at: MappingHelpers::timestamp(row, "created_at")?,
        })
    }

    async fn get_pod(&self, id: i64) -> SentinelResult<Option<Pod>> {
        let row = sqlx::query(&format!("SELECT {POD_COLUMNS} FROM pods WHERE id = $1"))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(SentinelError::Database)?;

        row.as_ref().map(Self::row_to_pod).transpose()
    }
}

#[async_trait]
impl ClusterRepository for SqliteClusterRepository {
    async fn list_nodes(&self) -> SentinelResult<Vec<Node>> {
        let rows = sqlx::query(
            "SELECT id, name, region, status, cpu_usage, memory_usage, is_master FROM nodes ORDER BY id",
        )
        .fetch_all(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        rows.iter().map(Self::row_to_node).collect()
    }

    async fn create_node(&self, node: &NewNode) -> SentinelResult<Node> {
        let created = Node::from_new(0, node);
        let result = sqlx::query(
            r#"
            INSERT INTO nodes (name, region, status, cpu_usage, memory_usage, is_master)
            VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(&created.name)
        .bind(&created.region)
        .bind(created.status.as_str())
        .bind(created.cpu_usage)
        .bind(created.memory_usage)
        .bind(created.is_master)
        .execute(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        let id = result.last_insert_rowid();
        debug!("创建节点成功: {} (id={})", created.name, id);
        Ok(Node { id, ..created })
    }

    async fn list_pods(&self) -> SentinelResult<Vec<Pod>> {
        let rows = sqlx::query(&format!("SELECT {POD_COLUMNS} FROM pods ORDER BY id"))
            .fetch_all(&self.pool)
            .await
            .map_err(SentinelError::Database)?;

        rows.iter().map(Self::row_to_pod).collect()
    }

    async fn list_pods_by_service_and_status(
        &self,
        service: &str,
        status: PodStatus,
    ) -> SentinelResult<Vec<Pod>> {
        let rows = sqlx::query(&format!(
            "SELECT {POD_COLUMNS} FROM pods WHERE service = $1 AND status = $2 ORDER BY id"
        ))
        .bind(service)
        .bind(status.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        rows.iter().map(Self::row_to_pod).collect()
    }

    async fn create_pod(&self, pod: &NewPod, created_at: DateTime<Utc>) -> SentinelResult<Pod> {
        let result = sqlx::query(
            r#"
            INSERT INTO pods (name, namespace, node_id, service, status, restarts, cpu_request, memory_request, created_at)
            VALUES ($1, $2, $3, $4, $5, 0, $6, $7, $8)
            "#,
        )
        .bind(&pod.name)
        .bind(&pod.namespace)
        .bind(pod.node_id)
        .bind(&pod.service)
        .bind(pod.status.as_str())
        .bind(pod.cpu_request)
        .bind(pod.memory_request)
        .bind(MappingHelpers::to_millis(created_at))
        .execute(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        let id = result.last_insert_rowid();
        debug!("创建Pod成功: {} (id={})", pod.name, id);
        self.get_pod(id)
            .await?
            .ok_or(SentinelError::PodNotFound { id })
    }

    async fn update_pod(
        &self,
        id: i64,
        status: PodStatus,
        restarts: Option<i32>,
    ) -> SentinelResult<Pod> {
        let result = sqlx::query(
            "UPDATE pods SET status = $2, restarts = COALESCE($3, restarts) WHERE id = $1",
        )
        .bind(id)
        .bind(status.as_str())
        .bind(restarts)
        .execute(&self.pool)
        .await
        .map_err(SentinelError::Database)?;

        if result.rows_affected() == 0 {
            return Err(SentinelError::PodNotFound { id });
        }

        debug!("更新Pod状态: id={} status={}", id, status);
        self.get_pod(id)
            .await?
            .ok_or(SentinelError::PodNotFound { id })
    }
}
