use std::str::FromStr;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::Deserialize;

use sentinel_core::{
    models::{Alert, LogEntry, LogLevel, LogQuery, MetricQuery, MetricRange, MetricSample},
    traits::TelemetryRepository,
};

use crate::{
    error::{ApiError, ApiResult},
    routes::AppState,
};

/// 指标查询参数
#[derive(Debug, Deserialize)]
pub struct MetricsQueryParams {
    pub name: Option<String>,
    /// 1h、6h 或 24h
    pub range: Option<String>,
}

/// 日志查询参数
#[derive(Debug, Deserialize)]
pub struct LogsQueryParams {
    pub service: Option<String>,
    pub level: Option<String>,
}

/// 空字符串视为未提供
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// 获取指标样本，按名称过滤时最多50条，否则最多100条
pub async fn list_metrics(
    State(state): State<AppState>,
    Query(params): Query<MetricsQueryParams>,
) -> ApiResult<Json<Vec<MetricSample>>> {
    let range = non_empty(params.range)
        .map(|range| {
            MetricRange::from_str(&range)
                .map_err(|_| ApiError::BadRequest(format!("Invalid range: {range}")))
        })
        .transpose()?;

    let query = MetricQuery::new(non_empty(params.name), range, state.clock.now());
    Ok(Json(state.repos.telemetry.list_metrics(&query).await?))
}

/// 获取日志，最多100条
pub async fn list_logs(
    State(state): State<AppState>,
    Query(params): Query<LogsQueryParams>,
) -> ApiResult<Json<Vec<LogEntry>>> {
    let level = non_empty(params.level)
        .map(|level| {
            LogLevel::from_str(&level)
                .map_err(|_| ApiError::BadRequest(format!("Invalid level: {level}")))
        })
        .transpose()?;

    let query = LogQuery::new(non_empty(params.service), level);
    Ok(Json(state.repos.telemetry.list_logs(&query).await?))
}

pub async fn list_alerts(State(state): State<AppState>) -> ApiResult<Json<Vec<Alert>>> {
    Ok(Json(state.repos.telemetry.list_alerts().await?))
}
