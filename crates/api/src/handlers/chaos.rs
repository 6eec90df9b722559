use std::str::FromStr;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use tracing::info;
use validator::Validate;

use sentinel_core::{
    models::{ChaosExperiment, ExperimentType, NewChaosExperiment},
    traits::ChaosRepository,
};

use crate::{
    error::{ApiError, ApiResult},
    routes::AppState,
    validation::{validate_experiment_type, validate_not_blank},
};

/// 混沌实验触发请求
#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct TriggerExperimentRequest {
    #[serde(rename = "type")]
    #[validate(custom(function = "validate_experiment_type"))]
    pub experiment_type: String,

    #[validate(
        length(min = 1, max = 255, message = "Title is required"),
        custom(function = "validate_not_blank")
    )]
    pub title: String,

    #[validate(
        length(min = 1, max = 100, message = "Target service is required"),
        custom(function = "validate_not_blank")
    )]
    pub target_service: String,

    /// 秒，为空时使用默认值
    pub duration: Option<i32>,
}

impl TriggerExperimentRequest {
    pub fn into_new_experiment(self) -> ApiResult<NewChaosExperiment> {
        let experiment_type = ExperimentType::from_str(&self.experiment_type)
            .map_err(|e| ApiError::BadRequest(e.to_string()))?;
        Ok(NewChaosExperiment {
            title: self.title,
            experiment_type,
            target_service: self.target_service,
            duration: self.duration,
        })
    }
}

/// 获取实验列表，按开始时间倒序
pub async fn list_experiments(
    State(state): State<AppState>,
) -> ApiResult<Json<Vec<ChaosExperiment>>> {
    Ok(Json(state.repos.chaos.list_experiments().await?))
}

/// 触发混沌实验
pub async fn trigger_experiment(
    State(state): State<AppState>,
    payload: Result<Json<TriggerExperimentRequest>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<ChaosExperiment>)> {
    let Json(request) = payload.map_err(|e| ApiError::BadRequest(e.body_text()))?;
    request.validate()?;

    let experiment = state
        .engine
        .trigger
        .trigger(&request.into_new_experiment()?)
        .await?;

    info!(
        experiment_id = experiment.id,
        "通过API触发混沌实验: {}", experiment.title
    );
    Ok((StatusCode::CREATED, Json(experiment)))
}
