//! # Sentinel API
//!
//! 集群模拟平台的REST API，供仪表盘前端轮询集群状态、可观测性数据并触发混沌实验。
//!
//! ## API 端点
//!
//! ### 演示商城
//! - `GET /api/products` - 商品列表
//! - `GET /api/products/{id}` - 商品详情
//! - `POST /api/orders` - 下单
//!
//! ### 集群状态
//! - `GET /api/infrastructure/nodes` - 节点列表
//! - `GET /api/infrastructure/pods` - Pod列表
//!
//! ### 可观测性
//! - `GET /api/observability/metrics?name=&range=` - 指标样本
//! - `GET /api/observability/logs?service=&level=` - 日志
//! - `GET /api/observability/alerts` - 告警
//!
//! ### 混沌实验
//! - `GET /api/chaos` - 实验列表
//! - `POST /api/chaos/trigger` - 触发实验
//!
//! ## 响应格式
//!
//! 成功时直接返回实体的 camelCase JSON，错误时返回 `{ "message": ..., "code": ... }`。
//!
//! ```bash
//! curl -X POST http://localhost:5000/api/chaos/trigger \
//!   -H "Content-Type: application/json" \
//!   -d '{"type": "pod-kill", "title": "Pod Failure", "targetService": "frontend", "duration": 30}'
//! ```

pub mod error;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod validation;

use axum::Router;
use tower::ServiceBuilder;

use middleware::{cors_layer, request_logging, timeout_layer, trace_layer};
use sentinel_core::config::ApiConfig;

pub use routes::{create_routes, AppState};

/// 创建完整的API应用
pub fn create_app(state: AppState, api_config: &ApiConfig) -> Router {
    let router = create_routes(state).layer(
        ServiceBuilder::new()
            .layer(trace_layer())
            .layer(timeout_layer(api_config.request_timeout_seconds))
            .layer(axum::middleware::from_fn(request_logging)),
    );

    if api_config.cors_enabled {
        router.layer(cors_layer(&api_config.cors_origins))
    } else {
        router
    }
}
