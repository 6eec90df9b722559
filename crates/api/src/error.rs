use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use sentinel_core::SentinelError;
use serde_json::json;
use tracing::error;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("模拟平台错误: {0}")]
    Sentinel(#[from] SentinelError),

    #[error("验证错误: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("请求参数错误: {0}")]
    BadRequest(String),

    #[error("未找到资源: {0}")]
    NotFound(String),

    #[error("内部服务器错误: {0}")]
    Internal(String),
}

impl ApiError {
    /// 取第一条校验错误的提示信息
    fn first_validation_message(errors: &validator::ValidationErrors) -> String {
        let mut fields: Vec<_> = errors.field_errors().into_iter().collect();
        fields.sort_by(|a, b| a.0.cmp(&b.0));
        fields
            .into_iter()
            .flat_map(|(field, errors)| {
                errors.iter().map(move |e| match &e.message {
                    Some(message) => message.to_string(),
                    None => format!("{field}: {}", e.code),
                })
            })
            .next()
            .unwrap_or_else(|| "请求参数验证失败".to_string())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            ApiError::Sentinel(SentinelError::InvalidInput(msg)) => {
                (StatusCode::BAD_REQUEST, msg.clone())
            }
            ApiError::Sentinel(SentinelError::ProductNotFound { .. }) => {
                (StatusCode::NOT_FOUND, "Product not found".to_string())
            }
            ApiError::Sentinel(e) if e.is_not_found() => (StatusCode::NOT_FOUND, e.to_string()),
            ApiError::Sentinel(e) => {
                error!("请求处理失败: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "系统内部错误".to_string())
            }
            ApiError::Validation(errors) => (
                StatusCode::BAD_REQUEST,
                Self::first_validation_message(errors),
            ),
            ApiError::BadRequest(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            ApiError::NotFound(msg) => (StatusCode::NOT_FOUND, msg.clone()),
            ApiError::Internal(msg) => {
                error!("请求处理失败: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, msg.clone())
            }
        };

        let body = Json(json!({
            "message": message,
            "code": status.as_u16(),
        }));

        (status, body).into_response()
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
