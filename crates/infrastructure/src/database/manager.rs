use std::sync::Arc;

use anyhow::Result;
use sentinel_core::{
    config::models::DatabaseConfig,
    traits::{ChaosRepository, ClusterRepository, StorefrontRepository, TelemetryRepository},
};
use tracing::info;

use super::memory::InMemoryStore;
use super::sqlite::DatabaseManager;

/// 存储后端类型
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreBackend {
    Sqlite,
    Memory,
}

impl StoreBackend {
    pub fn from_url(url: &str) -> Self {
        if url.starts_with(sentinel_core::config::MEMORY_STORE_URL) {
            StoreBackend::Memory
        } else {
            StoreBackend::Sqlite
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            StoreBackend::Sqlite => "sqlite",
            StoreBackend::Memory => "memory",
        }
    }
}

/// 按配置选出的一组仓储实例，模拟引擎与 API 共享
#[derive(Clone)]
pub struct Repositories {
    pub cluster: Arc<dyn ClusterRepository>,
    pub telemetry: Arc<dyn TelemetryRepository>,
    pub chaos: Arc<dyn ChaosRepository>,
    pub storefront: Arc<dyn StorefrontRepository>,
    database: Option<Arc<DatabaseManager>>,
}

impl Repositories {
    /// 根据数据库URL连接对应后端，SQLite 会先执行建表
    pub async fn connect(config: &DatabaseConfig) -> Result<Self> {
        match StoreBackend::from_url(&config.url) {
            StoreBackend::Memory => {
                info!("使用进程内存储");
                Ok(Self::in_memory())
            }
            StoreBackend::Sqlite => {
                let manager = DatabaseManager::new(config).await?;
                manager.migrate().await?;
                Ok(Self::sqlite(manager))
            }
        }
    }

    pub fn in_memory() -> Self {
        Self::from_memory_store(InMemoryStore::new())
    }

    pub fn from_memory_store(store: InMemoryStore) -> Self {
        let store = Arc::new(store);
        Self {
            cluster: store.clone(),
            telemetry: store.clone(),
            chaos: store.clone(),
            storefront: store,
            database: None,
        }
    }

    pub fn sqlite(manager: DatabaseManager) -> Self {
        Self {
            cluster: Arc::new(manager.cluster_repository()),
            telemetry: Arc::new(manager.telemetry_repository()),
            chaos: Arc::new(manager.chaos_repository()),
            storefront: Arc::new(manager.storefront_repository()),
            database: Some(Arc::new(manager)),
        }
    }

    pub fn backend(&self) -> StoreBackend {
        if self.database.is_some() {
            StoreBackend::Sqlite
        } else {
            StoreBackend::Memory
        }
    }

    pub async fn health_check(&self) -> Result<()> {
        match &self.database {
            Some(database) => database.health_check().await,
            None => Ok(()),
        }
    }

    pub async fn close(&self) {
        if let Some(database) = &self.database {
            database.close().await;
        }
    }
}
