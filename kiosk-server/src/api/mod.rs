//! API 路由模块
//!
//! # 结构
//!
//! - [`health`] - 健康检查
//! - [`orders`] - 订单提交 (每个 kiosk 的旧路径 + `/api/orders/{kiosk}`)
//! - [`kiosks`] - kiosk 列表、菜单和报价

pub mod health;
pub mod kiosks;
pub mod orders;

use std::any::Any;

use axum::Router;
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use shared::AppError;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::trace::TraceLayer;

use crate::core::ServerState;

/// HTTP 请求日志中间件
async fn log_request(request: axum::extract::Request, next: Next) -> Response {
    let method = request.method().clone();
    let uri = request.uri().clone();

    let response = next.run(request).await;

    tracing::info!(target: "http_access", "{} {} {}", method, uri, response.status());

    response
}

/// Turns a handler panic into the usual JSON 500 so the form always gets an answer
fn handle_panic(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };
    tracing::error!(panic = %detail, "Handler panicked");

    AppError::internal("Internal server error").into_response()
}

/// Build a router with all routes registered (no middleware, no state)
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(orders::router())
        .merge(kiosks::router())
}

/// Build the fully configured application
///
/// Used by both the HTTP server and the oneshot tests.
pub fn build_app(state: ServerState) -> Router {
    with_middleware(build_router().with_state(state))
}

/// Wrap a stateless router in the server's middleware stack
pub fn with_middleware(router: Router) -> Router {
    router
        // Panics become JSON 500s
        .layer(CatchPanicLayer::custom(handle_panic))
        // CORS - the kiosk forms are served from another origin
        .layer(CorsLayer::permissive())
        // Request logging
        .layer(middleware::from_fn(log_request))
        // Trace - request spans
        .layer(TraceLayer::new_for_http())
        // Request ID: propagate must sit inside set
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}
