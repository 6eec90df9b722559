use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::routes::AppState;

pub async fn health_check(State(state): State<AppState>) -> Json<Value> {
    let database = match state.repos.health_check().await {
        Ok(()) => "ok".to_string(),
        Err(e) => format!("error: {e}"),
    };

    Json(json!({
        "status": "ok",
        "timestamp": state.clock.now().to_rfc3339(),
        "service": "sentinel",
        "version": env!("CARGO_PKG_VERSION"),
        "store": state.repos.backend().as_str(),
        "database": database,
        "ticks": state.engine.scheduler.ticks(),
    }))
}
