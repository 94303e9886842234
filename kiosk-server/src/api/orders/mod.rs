//! 订单提交路由
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/orders/{kiosk} | POST | 按 kiosk slug 提交订单 |
//! | 每个 kiosk 的旧路径 (/api/sheet, /api/bitter, ...) | POST | 旧表单提交地址 |
//!
//! 其他方法返回 405 与 `Allow: POST`。

mod handler;

use axum::{Router, extract::State, routing::post};

use crate::core::ServerState;
use crate::kiosk;

pub fn router() -> Router<ServerState> {
    let mut router = Router::new().route(
        "/api/orders/{kiosk}",
        post(handler::submit_by_slug).fallback(handler::method_not_allowed),
    );

    for profile in kiosk::profiles() {
        router = router.route(
            profile.legacy_path,
            post(
                move |State(state): State<ServerState>, body: handler::OrderBody| {
                    handler::submit(profile, state, body)
                },
            )
            .fallback(handler::method_not_allowed),
        );
    }

    router
}
