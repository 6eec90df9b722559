use axum::{extract::State, Json};
use sentinel_core::{
    models::{Node, Pod},
    traits::ClusterRepository,
};

use crate::{error::ApiResult, routes::AppState};

pub async fn list_nodes(State(state): State<AppState>) -> ApiResult<Json<Vec<Node>>> {
    Ok(Json(state.repos.cluster.list_nodes().await?))
}

pub async fn list_pods(State(state): State<AppState>) -> ApiResult<Json<Vec<Pod>>> {
    Ok(Json(state.repos.cluster.list_pods().await?))
}
