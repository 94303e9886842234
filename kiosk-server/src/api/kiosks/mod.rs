//! Kiosk API 模块
//!
//! | 路径 | 方法 | 说明 |
//! |------|------|------|
//! | /api/kiosks | GET | 所有 kiosk 及其提交路径 |
//! | /api/kiosks/{kiosk}/menu | GET | 菜单 |
//! | /api/kiosks/{kiosk}/quote | POST | 按菜单计价购物车 |

mod handler;

use axum::{
    Router,
    routing::{get, post},
};

use crate::core::ServerState;

pub fn router() -> Router<ServerState> {
    Router::new().nest("/api/kiosks", routes())
}

fn routes() -> Router<ServerState> {
    Router::new()
        .route("/", get(handler::list))
        .route("/{kiosk}/menu", get(handler::menu))
        .route("/{kiosk}/quote", post(handler::quote))
}
