use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use domain::AppError;
use serde_json::json;

/// HTTP 边界的错误包装：领域分类 + 未登录 + 内部错误。
#[derive(Debug)]
pub enum ApiError {
    App(AppError),
    Unauthorized,
    Internal(anyhow::Error),
}

impl From<AppError> for ApiError {
    fn from(e: AppError) -> Self {
        ApiError::App(e)
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(e: anyhow::Error) -> Self {
        ApiError::Internal(e)
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            ApiError::App(AppError::NotFound(resource)) => (
                StatusCode::NOT_FOUND,
                Json(json!({ "error": "not_found", "resource": resource })),
            )
                .into_response(),
            ApiError::App(AppError::Forbidden) => (
                StatusCode::FORBIDDEN,
                Json(json!({ "error": "forbidden" })),
            )
                .into_response(),
            ApiError::App(AppError::Validation(errors)) => (
                StatusCode::UNPROCESSABLE_ENTITY,
                Json(json!({ "error": "validation_failed", "fields": errors.fields })),
            )
                .into_response(),
            // 退订 handler 自己消化成软提示，这里兜底
            ApiError::App(AppError::InvalidToken) => (
                StatusCode::BAD_REQUEST,
                Json(json!({ "error": "invalid_token" })),
            )
                .into_response(),
            ApiError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                Json(json!({ "error": "unauthorized" })),
            )
                .into_response(),
            ApiError::Internal(e) => {
                tracing::error!("Internal error: {:?}", e);
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({ "error": "internal", "message": e.to_string() })),
                )
                    .into_response()
            }
        }
    }
}
