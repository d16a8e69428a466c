//! 路由配置模块

use std::time::Duration;

use axum::{Router, http::StatusCode, middleware, routing::get};
use targeting_shared::observability::middleware as obs_middleware;
use tower_http::timeout::TimeoutLayer;

use crate::{handlers, state::AppState};

/// 投放决策路由，新旧两个版本并存
fn delivery_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/delivery", get(handlers::delivery::deliver_v1))
        .route("/v2/delivery", get(handlers::delivery::deliver_v2))
}

/// 活动查询路由
fn campaign_routes() -> Router<AppState> {
    Router::new()
        .route("/v1/campaigns", get(handlers::campaign::list_campaigns))
        .route("/v1/campaigns/{cid}", get(handlers::campaign::get_campaign))
}

/// 探针与指标路由
fn ops_routes() -> Router<AppState> {
    Router::new()
        .route("/healthz", get(handlers::health::healthz))
        .route("/ready", get(handlers::health::ready))
        .route("/metrics", get(handlers::health::metrics))
}

/// 全部业务路由（不含中间件）
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .merge(delivery_routes())
        .merge(campaign_routes())
        .merge(ops_routes())
}

/// 构建完整应用
///
/// 中间件由外到内：请求 ID → HTTP 追踪与指标 → 请求超时（超时返回 408）
pub fn app(state: AppState, request_timeout: Duration) -> Router {
    api_routes()
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            request_timeout,
        ))
        .layer(middleware::from_fn(obs_middleware::http_tracing))
        .layer(middleware::from_fn(obs_middleware::request_id))
        .with_state(state)
}
