use axum::{
    Router,
    routing::{delete, get, post},
};
use tower::ServiceBuilder;
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer};

use crate::{
    AppState,
    middleware::{handle_panic, log_errors, log_requests},
    routes,
};

// 群组相关的路由
pub fn group_routes() -> Router<AppState> {
    Router::new()
        .route("/groups", post(routes::group::create_group))
        .route("/groups/{group_id}", delete(routes::group::delete_group))
        .route("/groups/{group_id}/join", post(routes::group::join_group))
        .route(
            "/groups/{group_id}/locations",
            post(routes::group::update_location).get(routes::group::get_locations),
        )
}

// 日志、panic 兜底与 CORS
pub fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router.layer(
        ServiceBuilder::new()
            .layer(axum::middleware::from_fn(log_requests))
            .layer(axum::middleware::from_fn(log_errors))
            .layer(CatchPanicLayer::custom(handle_panic))
            // 允许所有来源
            .layer(CorsLayer::permissive()),
    )
}

// 创建主路由
pub fn create_router(state: AppState) -> Router {
    let api_base_uri = state.config.api_base_uri.clone();

    let router = Router::new()
        .nest(&api_base_uri, group_routes())
        .route("/health", get(routes::health::health))
        .fallback(routes::fallback);

    with_middleware(router).with_state(state)
}
