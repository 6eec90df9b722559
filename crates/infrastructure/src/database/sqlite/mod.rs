pub mod sqlite_chaos_repository;
pub mod sqlite_cluster_repository;
pub mod sqlite_storefront_repository;
pub mod sqlite_telemetry_repository;

pub use sqlite_chaos_repository::SqliteChaosRepository;
pub use sqlite_cluster_repository::SqliteClusterRepository;
pub use sqlite_storefront_repository::SqliteStorefrontRepository;
pub use sqlite_telemetry_repository::SqliteTelemetryRepository;

use anyhow::{Context, Result};
use sentinel_core::config::models::DatabaseConfig;
use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite, SqlitePool};
use std::time::Duration;
use tracing::{debug, info};

pub struct DatabaseManager {
    pool: SqlitePool,
}

impl DatabaseManager {
    pub async fn new(config: &DatabaseConfig) -> Result<Self> {
        let mut options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(Duration::from_secs(config.connection_timeout_seconds));

        // 内存数据库每个连接都是独立的库，只能使用单连接且不能回收
        if is_in_memory_url(&config.url) {
            options = options
                .max_connections(1)
                .min_connections(1)
                .idle_timeout(None)
                .max_lifetime(None);
        } else {
            options = options
                .idle_timeout(Duration::from_secs(config.idle_timeout_seconds))
                .max_lifetime(Duration::from_secs(1800)); // 30分钟默认生命周期
        }

        let pool = options
            .connect(&config.url)
            .await
            .with_context(|| format!("连接数据库失败: {}", config.url))?;

        info!("数据库连接成功: {}", config.url);
        Ok(Self { pool })
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// 创建表结构，可重复执行
    pub async fn migrate(&self) -> Result<()> {
        let pool = &self.pool;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS nodes (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                region TEXT NOT NULL DEFAULT 'us-east-1',
                status TEXT NOT NULL DEFAULT 'Ready',
                cpu_usage INTEGER NOT NULL DEFAULT 0,
                memory_usage INTEGER NOT NULL DEFAULT 0,
                is_master INTEGER NOT NULL DEFAULT 0
            )
            "#,
        )
        .execute(pool)
        .await
        .context("创建节点表失败")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS pods (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                namespace TEXT NOT NULL DEFAULT 'default',
                node_id INTEGER,
                service TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'Running',
                restarts INTEGER NOT NULL DEFAULT 0,
                cpu_request INTEGER NOT NULL DEFAULT 100,
                memory_request INTEGER NOT NULL DEFAULT 128,
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .context("创建Pod表失败")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS metrics (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp INTEGER NOT NULL,
                name TEXT NOT NULL,
                value REAL NOT NULL,
                labels TEXT NOT NULL DEFAULT '{}'
            )
            "#,
        )
        .execute(pool)
        .await
        .context("创建指标表失败")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS logs (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                timestamp INTEGER NOT NULL,
                level TEXT NOT NULL,
                service TEXT NOT NULL,
                message TEXT NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .context("创建日志表失败")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS alerts (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                severity TEXT NOT NULL,
                title TEXT NOT NULL,
                description TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'firing',
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .context("创建告警表失败")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS chaos_experiments (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                title TEXT NOT NULL,
                type TEXT NOT NULL,
                target_service TEXT NOT NULL,
                status TEXT NOT NULL DEFAULT 'idle',
                duration INTEGER,
                started_at INTEGER
            )
            "#,
        )
        .execute(pool)
        .await
        .context("创建混沌实验表失败")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS products (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL,
                description TEXT NOT NULL,
                price REAL NOT NULL,
                image TEXT NOT NULL,
                stock INTEGER NOT NULL DEFAULT 100
            )
            "#,
        )
        .execute(pool)
        .await
        .context("创建商品表失败")?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS orders (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                total REAL NOT NULL,
                status TEXT NOT NULL DEFAULT 'pending',
                created_at INTEGER NOT NULL
            )
            "#,
        )
        .execute(pool)
        .await
        .context("创建订单表失败")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_pods_service_status ON pods(service, status)")
            .execute(pool)
            .await
            .context("创建Pod索引失败")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_metrics_name_timestamp ON metrics(name, timestamp)")
            .execute(pool)
            .await
            .context("创建指标索引失败")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_logs_timestamp ON logs(timestamp)")
            .execute(pool)
            .await
            .context("创建日志索引失败")?;

        sqlx::query("CREATE INDEX IF NOT EXISTS idx_chaos_status ON chaos_experiments(status)")
            .execute(pool)
            .await
            .context("创建实验状态索引失败")?;

        debug!("数据库表结构已就绪");
        Ok(())
    }

    pub async fn health_check(&self) -> Result<()> {
        sqlx::query("SELECT 1").execute(&self.pool).await?;
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub fn cluster_repository(&self) -> SqliteClusterRepository {
        SqliteClusterRepository::new(self.pool.clone())
    }

    pub fn telemetry_repository(&self) -> SqliteTelemetryRepository {
        SqliteTelemetryRepository::new(self.pool.clone())
    }

    pub fn chaos_repository(&self) -> SqliteChaosRepository {
        SqliteChaosRepository::new(self.pool.clone())
    }

    pub fn storefront_repository(&self) -> SqliteStorefrontRepository {
        SqliteStorefrontRepository::new(self.pool.clone())
    }
}

fn is_in_memory_url(url: &str) -> bool {
    url.contains(":memory:") || url.contains("mode=memory")
}

pub type DbPool = Pool<Sqlite>;
