use crate::forms::FieldErrors;
use thiserror::Error;

/// 每次请求的终态错误分类，向上传播到表现层。
#[derive(Debug, Error)]
pub enum AppError {
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("forbidden")]
    Forbidden,
    #[error("validation failed")]
    Validation(FieldErrors),
    #[error("invalid unsubscribe token")]
    InvalidToken,
}

impl From<FieldErrors> for AppError {
    fn from(errors: FieldErrors) -> Self {
        AppError::Validation(errors)
    }
}
