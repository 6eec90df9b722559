use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};
use validator::Validate;

use sentinel_core::{
    constants::COMPONENT_FRONTEND,
    models::{NewLogEntry, OrderItem, OrderStatus},
    traits::{StorefrontRepository, TelemetryRepository},
};

use crate::{
    error::{ApiError, ApiResult},
    routes::AppState,
    validation::validate_order_items,
};

const INVALID_ORDER: &str = "Invalid order";

/// 下单请求
#[derive(Debug, Deserialize, Validate)]
pub struct CreateOrderRequest {
    #[validate(custom(function = "validate_order_items"))]
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize)]
pub struct CreateOrderResponse {
    pub id: i64,
    pub status: OrderStatus,
}

/// 创建订单并由 frontend 写入一条 info 日志
pub async fn create_order(
    State(state): State<AppState>,
    payload: Result<Json<CreateOrderRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<CreateOrderResponse>)> {
    let Json(request) = payload.map_err(|e| {
        debug!("下单请求解析失败: {}", e);
        ApiError::BadRequest(INVALID_ORDER.to_string())
    })?;
    request
        .validate()
        .map_err(|_| ApiError::BadRequest(INVALID_ORDER.to_string()))?;

    let now = state.clock.now();
    let order = state
        .repos
        .storefront
        .create_order(&request.items, now)
        .await?;

    let entry = NewLogEntry::info(
        COMPONENT_FRONTEND,
        format!("Order created: #{}. Total: ${}", order.id, order.total),
        now,
    );
    if let Err(e) = state.repos.telemetry.append_log(&entry).await {
        warn!("写入订单日志失败: {}", e);
    }

    Ok((
        StatusCode::CREATED,
        Json(CreateOrderResponse {
            id: order.id,
            status: order.status,
        }),
    ))
}
