use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};

use crate::utils::error_to_api_response;

pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppError {
    BadRequest(String),
    NotFound(String),
    InternalServerError,
}

impl AppError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        AppError::BadRequest(message.into())
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        AppError::NotFound(message.into())
    }

    pub fn status(&self) -> StatusCode {
        match self {
            AppError::BadRequest(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::InternalServerError => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status();
        // 内部错误不向客户端暴露细节
        let error_message = match self {
            AppError::BadRequest(message) | AppError::NotFound(message) => message,
            AppError::InternalServerError => INTERNAL_ERROR_MESSAGE.to_string(),
        };

        (status, error_to_api_response(error_message)).into_response()
    }
}
