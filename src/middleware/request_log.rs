use axum::{body::Body, http::Request, middleware::Next, response::Response};

pub async fn log_requests(req: Request<Body>, next: Next) -> Response {
    tracing::info!("{} {}", req.method(), req.uri().path());
    next.run(req).await
}
