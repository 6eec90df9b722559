use axum::{
    extract::{Path, State},
    Json,
};
use sentinel_core::{models::Product, traits::StorefrontRepository, SentinelError};

use crate::{error::ApiResult, routes::AppState};

/// 获取商品列表
pub async fn list_products(State(state): State<AppState>) -> ApiResult<Json<Vec<Product>>> {
    Ok(Json(state.repos.storefront.list_products().await?))
}

/// 获取单个商品
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> ApiResult<Json<Product>> {
    state
        .repos
        .storefront
        .get_product(id)
        .await?
        .map(Json)
        .ok_or_else(|| SentinelError::ProductNotFound { id }.into())
}
