mod common;

use std::sync::Arc;

use common::{app, post, send};
use http::{Method, StatusCode};
use kiosk_server::MemoryLedger;
use serde_json::json;

fn fresh_app() -> axum::Router {
    app(Arc::new(MemoryLedger::new()))
}

#[tokio::test]
async fn test_health_reports_ledger_backend() {
    let reply = send(fresh_app(), Method::GET, "/health", None).await;

    assert_eq!(reply.status, StatusCode::OK);
    let body = reply.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["ledger"], "memory");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
}

#[tokio::test]
async fn test_list_kiosks() {
    let reply = send(fresh_app(), Method::GET, "/api/kiosks", None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let body = reply.json();
    let kiosks = body.as_array().unwrap();
    assert_eq!(kiosks.len(), 6);

    let pacific = kiosks.iter().find(|k| k["slug"] == "pacific-mall").unwrap();
    assert_eq!(pacific["legacyPath"], "/api/sheet-pacific-mall");
    assert_eq!(pacific["orderPath"], "/api/orders/pacific-mall");
    assert_eq!(pacific["sheetRange"], "pacificmall!A2");
    assert_eq!(pacific["waitingTime"], "15-20 minutes");
    assert_eq!(pacific["layout"]["kind"], "discounted");

    let classic = kiosks.iter().find(|k| k["slug"] == "classic").unwrap();
    assert!(classic.get("waitingTime").is_none());
}

#[tokio::test]
async fn test_menu() {
    let reply = send(fresh_app(), Method::GET, "/api/kiosks/pacific-mall/menu", None).await;
    assert_eq!(reply.status, StatusCode::OK);

    let menu = reply.json();
    assert_eq!(menu["kiosk"], "pacific-mall");
    let names: Vec<_> = menu["items"]
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(names, ["Waffle", "Croffle", "KeyChain"]);
}

#[tokio::test]
async fn test_menu_unknown_kiosk() {
    let reply = send(fresh_app(), Method::GET, "/api/kiosks/downtown/menu", None).await;
    assert_eq!(reply.status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_quote_applies_keychain_promotion() {
    let body = json!({
        "selections": [
            { "product": "Waffle", "flavor": "Original", "isHalf": true },
            { "product": "KeyChain" }
        ],
        "socialDiscounts": { "followedInstagram": true }
    });
    let reply = post(fresh_app(), "/api/kiosks/pacific-mall/quote", body).await;
    assert_eq!(reply.status, StatusCode::OK);

    let quote = reply.json();
    assert_eq!(quote["items"][0]["description"], "Waffle - Original (Half)");
    assert_eq!(quote["items"][0]["price"], 8.0);
    assert_eq!(quote["items"][1]["product"], "KeyChain");
    assert_eq!(quote["items"][1]["price"], 5.0);
    assert_eq!(quote["totals"]["subtotal"], 13.0);
    assert_eq!(quote["totals"]["discount"], 1.0);
    assert_eq!(quote["totals"]["total"], 12.0);
}

#[tokio::test]
async fn test_quote_keychain_alone_is_regular_price() {
    let body = json!({ "selections": [{ "product": "KeyChain" }] });
    let reply = post(fresh_app(), "/api/kiosks/pacific-mall/quote", body).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["items"][0]["price"], 8.0);
}

#[tokio::test]
async fn test_quote_rejects_half_croffle() {
    let body = json!({
        "selections": [
            { "product": "Waffle", "flavor": "Matcha" },
            { "product": "Croffle", "flavor": "Matcha", "isHalf": true }
        ]
    });
    let reply = post(fresh_app(), "/api/kiosks/pacific-mall/quote", body).await;

    assert_eq!(reply.status, StatusCode::UNPROCESSABLE_ENTITY);
    let error = reply.json();
    assert_eq!(error["error"], "Half portion is not available for Croffle");
    assert_eq!(error["details"]["index"], 1);
}

#[tokio::test]
async fn test_quote_inverted_half_rule() {
    let body = json!({ "selections": [{ "product": "Waffle", "flavor": "Original", "isHalf": true }] });
    let reply = post(fresh_app(), "/api/kiosks/blowchick/quote", body).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json()["items"][0]["price"], 5.0);
}
