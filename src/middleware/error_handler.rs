use std::any::Any;

use axum::{
    body::{Body, to_bytes},
    http::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use tracing::error;

use crate::error::AppError;

// 日志中最多输出的响应体字节数，超出部分截断，响应本身保持完整
const MAX_LOGGED_BODY: usize = 1024;

pub async fn log_errors(req: Request<Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();
    let response = next.run(req).await;

    if !response.status().is_server_error() {
        return response;
    }

    let (mut parts, body) = response.into_parts();
    let bytes = match to_bytes(body, usize::MAX).await {
        Ok(b) => b,
        Err(e) => {
            error!("Failed to read error response body: {}", e);
            return Response::from_parts(parts, Body::empty());
        }
    };

    let logged = &bytes[..bytes.len().min(MAX_LOGGED_BODY)];
    error!(
        "Server error on {} {} - Status: {}, Body: {}{}",
        method,
        path,
        parts.status,
        String::from_utf8_lossy(logged),
        if bytes.len() > MAX_LOGGED_BODY { "...(truncated)" } else { "" }
    );

    // 重置body以便重新构建响应
    parts.headers.remove(axum::http::header::CONTENT_LENGTH);
    Response::from_parts(parts, Body::from(bytes))
}

// 处理函数 panic 时返回通用 500，不暴露细节
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.as_str()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s
    } else {
        "unknown panic"
    };
    error!("Handler panicked: {}", detail);

    AppError::InternalServerError.into_response()
}
