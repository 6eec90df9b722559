use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::{net::TcpListener, sync::broadcast, task::JoinHandle};
use tracing::{error, info, warn};

use sentinel_api::{create_app, AppState};
use sentinel_core::{
    traits::{Clock, SystemClock},
    AppConfig,
};
use sentinel_engine::{SeedReport, SimulationEngine};
use sentinel_infrastructure::{init_metrics, MetricsCollector, Repositories};

/// 主应用程序
///
/// 持有共享的仓储与模拟引擎，按配置启动模拟调度器和 API 服务器。
pub struct Application {
    config: AppConfig,
    repos: Repositories,
    engine: SimulationEngine,
    clock: Arc<dyn Clock>,
}

impl Application {
    /// 创建新的应用实例
    pub async fn new(config: AppConfig) -> Result<Self> {
        Self::with_clock(config, Arc::new(SystemClock)).await
    }

    pub async fn with_clock(config: AppConfig, clock: Arc<dyn Clock>) -> Result<Self> {
        info!("连接存储: {}", mask_database_url(&config.database.url));
        let repos = Repositories::connect(&config.database)
            .await
            .context("初始化存储失败")?;
        info!("存储后端: {}", repos.backend().as_str());

        if config.observability.metrics_enabled {
            init_metrics(&config.observability.metrics_bind_address)
                .context("启动指标导出器失败")?;
        }

        let engine = SimulationEngine::new(
            &repos,
            &config.simulation,
            clock.clone(),
            SimulationEngine::random_source(&config.simulation),
            MetricsCollector::new(),
        );

        Ok(Self {
            config,
            repos,
            engine,
            clock,
        })
    }

    pub fn engine(&self) -> &SimulationEngine {
        &self.engine
    }

    pub fn repositories(&self) -> &Repositories {
        &self.repos
    }

    /// 按配置初始化演示集群
    pub async fn seed(&self) -> Result<SeedReport> {
        if !self.config.simulation.seed_on_startup {
            info!("已关闭启动时初始化演示集群");
            return Ok(SeedReport::default());
        }
        self.engine
            .seeder
            .seed()
            .await
            .context("初始化演示集群失败")
    }

    /// 运行应用程序直到收到关闭信号
    pub async fn run(&self, shutdown_rx: broadcast::Receiver<()>) -> Result<()> {
        self.seed().await?;

        let mut handles: Vec<JoinHandle<()>> = Vec::new();

        if self.config.simulation.enabled {
            let scheduler = Arc::clone(&self.engine.scheduler);
            let shutdown_rx = shutdown_rx.resubscribe();
            handles.push(tokio::spawn(async move {
                scheduler.run(shutdown_rx).await;
            }));
        } else {
            warn!("模拟调度器已禁用");
        }

        if self.config.api.enabled {
            let listener = TcpListener::bind(&self.config.api.bind_address)
                .await
                .with_context(|| format!("绑定地址失败: {}", self.config.api.bind_address))?;
            handles.push(self.spawn_api(listener, shutdown_rx.resubscribe())?);
        }

        for handle in handles {
            if let Err(e) = handle.await {
                error!("组件任务异常退出: {}", e);
            }
        }

        self.repos.close().await;
        info!("所有组件已停止");
        Ok(())
    }

    /// 在给定监听器上启动 API 服务器
    pub fn spawn_api(
        &self,
        listener: TcpListener,
        mut shutdown_rx: broadcast::Receiver<()>,
    ) -> Result<JoinHandle<()>> {
        let state = AppState {
            repos: self.repos.clone(),
            engine: self.engine.clone(),
            clock: self.clock.clone(),
        };
        let app = create_app(state, &self.config.api);

        let address = listener.local_addr().context("读取监听地址失败")?;
        info!("API服务器启动在 http://{}", address);

        Ok(tokio::spawn(async move {
            let shutdown = async move {
                let _ = shutdown_rx.recv().await;
                info!("API服务器收到关闭信号");
            };
            if let Err(e) = axum::serve(listener, app.into_make_service())
                .with_graceful_shutdown(shutdown)
                .await
            {
                error!("API服务器运行失败: {}", e);
            }
        }))
    }
}

/// 屏蔽数据库URL中的敏感信息
fn mask_database_url(url: &str) -> String {
    if let Some(at_pos) = url.find('@') {
        if let Some(colon_pos) = url[..at_pos].rfind(':') {
            let mut masked = url.to_string();
            masked.replace_range(colon_pos + 1..at_pos, "***");
            return masked;
        }
    }
    url.to_string()
}
