mod common;

use axum::{Router, routing::get};
use common::send;
use http::{Method, StatusCode, header};
use kiosk_server::api::with_middleware;

async fn explode() -> &'static str {
    panic!("row builder exploded")
}

fn panicking_app() -> Router {
    with_middleware(Router::new().route("/explode", get(explode)))
}

#[tokio::test]
async fn test_panic_becomes_json_500() {
    let reply = send(panicking_app(), Method::GET, "/explode", None).await;

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.headers[header::CONTENT_TYPE], "application/json");
    let body = reply.json();
    assert_eq!(body["error"], "Internal server error");
    assert_eq!(body["code"], 9001);
}

#[tokio::test]
async fn test_request_id_is_echoed() {
    let reply = send(panicking_app(), Method::GET, "/explode", None).await;
    assert!(reply.headers.contains_key("x-request-id"));
}
