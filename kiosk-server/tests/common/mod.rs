#![allow(dead_code)]

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use chrono::{TimeZone, Utc};
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use kiosk_server::{Config, FixedClock, MemoryLedger, ServerState, build_app};
use serde_json::Value;
use tower::ServiceExt;

pub struct Reply {
    pub status: StatusCode,
    pub headers: http::HeaderMap,
    pub body: String,
}

impl Reply {
    pub fn json(&self) -> Value {
        serde_json::from_str(&self.body).unwrap()
    }
}

/// App backed by `ledger`, clock frozen at 2024-12-24 12:05 Toronto time
pub fn app(ledger: Arc<MemoryLedger>) -> Router {
    let clock = FixedClock::new(Utc.with_ymd_and_hms(2024, 12, 24, 17, 5, 0).unwrap());
    build_app(ServerState::new(Config::in_memory(), ledger, Arc::new(clock)))
}

pub async fn send(app: Router, method: Method, uri: &str, body: Option<Value>) -> Reply {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(json) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(json.to_string())
        }
        None => Body::empty(),
    };

    let response = app.oneshot(builder.body(body).unwrap()).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();

    Reply {
        status,
        headers,
        body: String::from_utf8(bytes.to_vec()).unwrap(),
    }
}

pub async fn post(app: Router, uri: &str, body: Value) -> Reply {
    send(app, Method::POST, uri, Some(body)).await
}
