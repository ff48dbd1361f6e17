pub mod group;
pub mod health;

use crate::error::AppError;

// 未匹配的路由
pub async fn fallback() -> AppError {
    AppError::not_found("Endpoint not found")
}
