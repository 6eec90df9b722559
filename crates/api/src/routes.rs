use std::sync::Arc;

use axum::{
    routing::{get, post},
    Router,
};

use sentinel_core::traits::Clock;
use sentinel_engine::SimulationEngine;
use sentinel_infrastructure::Repositories;

use crate::handlers::{
    chaos::{list_experiments, trigger_experiment},
    health::health_check,
    infrastructure::{list_nodes, list_pods},
    observability::{list_alerts, list_logs, list_metrics},
    orders::create_order,
    products::{get_product, list_products},
};

/// API应用状态
#[derive(Clone)]
pub struct AppState {
    pub repos: Repositories,
    pub engine: SimulationEngine,
    pub clock: Arc<dyn Clock>,
}

/// 创建API路由
pub fn create_routes(state: AppState) -> Router {
    Router::new()
        // 健康检查
        .route("/health", get(health_check))
        // 演示商城
        .route("/api/products", get(list_products))
        .route("/api/products/{id}", get(get_product))
        .route("/api/orders", post(create_order))
        // 集群状态
        .route("/api/infrastructure/nodes", get(list_nodes))
        .route("/api/infrastructure/pods", get(list_pods))
        // 可观测性数据
        .route("/api/observability/metrics", get(list_metrics))
        .route("/api/observability/logs", get(list_logs))
        .route("/api/observability/alerts", get(list_alerts))
        // 混沌实验
        .route("/api/chaos", get(list_experiments))
        .route("/api/chaos/trigger", post(trigger_experiment))
        .with_state(state)
}
