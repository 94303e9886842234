mod common;

use std::sync::Arc;

use common::{app, post, send};
use http::{Method, StatusCode, header};
use kiosk_server::MemoryLedger;
use kiosk_server::kiosk::profiles;
use kiosk_server::ledger::CellValue;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde_json::json;

fn pacific_order() -> serde_json::Value {
    json!({
        "orderId": "1024",
        "items": [
            { "product": "Waffle", "flavor": "Original", "isHalf": false, "price": 14 },
            { "product": "Croffle", "flavor": "Chocolate", "isHalf": false, "price": 8 },
            { "product": "KeyChain", "flavor": "", "isHalf": false, "price": 5 }
        ],
        "socialDiscounts": { "followedInstagram": true, "repostedStory": true }
    })
}

fn text(cell: Option<&CellValue>) -> &str {
    cell.and_then(CellValue::as_text).unwrap()
}

fn number(cell: Option<&CellValue>) -> Decimal {
    cell.and_then(CellValue::as_number).unwrap()
}

#[tokio::test]
async fn test_non_post_is_405_on_every_order_endpoint() {
    let mut paths: Vec<String> = profiles().iter().map(|p| p.legacy_path.to_string()).collect();
    paths.push("/api/orders/pacific-mall".into());

    for path in &paths {
        for method in [Method::GET, Method::PUT, Method::DELETE] {
            let ledger = Arc::new(MemoryLedger::new());
            let reply = send(app(ledger.clone()), method.clone(), path, None).await;

            assert_eq!(reply.status, StatusCode::METHOD_NOT_ALLOWED, "{method} {path}");
            assert_eq!(reply.headers[header::ALLOW], "POST");
            let body = reply.json();
            assert_eq!(body["error"], format!("Method {method} Not Allowed"));
            assert_eq!(body["code"], 9);
            assert_eq!(ledger.calls(), 0);
        }
    }
}

#[tokio::test]
async fn test_pacific_mall_success_reports_waiting_time() {
    let ledger = Arc::new(MemoryLedger::new());
    let reply = post(app(ledger.clone()), "/api/sheet-pacific-mall", pacific_order()).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(
        reply.json(),
        json!({ "message": "Order processed successfully", "waitingTime": "15-20 minutes" })
    );

    let rows = ledger.rows_in("pacificmall!A2");
    assert_eq!(rows.len(), 3);
    assert_eq!(text(rows[0].cell(2)), "Waffle - Original");
    assert_eq!(text(rows[2].cell(2)), "KeyChain");
    assert_eq!(text(rows[0].cell(6)), "2024-12-24");
    assert_eq!(text(rows[0].cell(7)), "12:05");
    assert_eq!(rows[0].len(), 15);
}

#[tokio::test]
async fn test_slug_endpoint_matches_legacy_path() {
    let ledger = Arc::new(MemoryLedger::new());
    let reply = post(app(ledger.clone()), "/api/orders/pacific-mall", pacific_order()).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(ledger.rows_in("pacificmall!A2").len(), 3);
}

#[tokio::test]
async fn test_discount_and_total_only_on_first_row() {
    let ledger = Arc::new(MemoryLedger::new());
    let reply = post(app(ledger.clone()), "/api/sheet-north-york", pacific_order()).await;
    assert_eq!(reply.status, StatusCode::OK);

    let rows = ledger.rows_in("north-york!A2");
    assert_eq!(rows.len(), 3);
    assert_eq!(number(rows[0].cell(4)), dec!(2));
    assert_eq!(number(rows[0].cell(5)), dec!(25));
    for row in &rows[1..] {
        assert_eq!(number(row.cell(4)), Decimal::ZERO);
        assert_eq!(number(row.cell(5)), Decimal::ZERO);
    }
}

#[tokio::test]
async fn test_failure_on_item_k_writes_k_rows() {
    let order = pacific_order();
    let products = ["Waffle - Original", "Croffle - Chocolate", "KeyChain"];

    for (k, product) in products.iter().enumerate() {
        let ledger = Arc::new(MemoryLedger::fail_from_call(k));
        let reply = post(app(ledger.clone()), "/api/bitter", order.clone()).await;

        assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
        let body = reply.json();
        assert_eq!(body["error"], format!("Failed to append item {product}"));
        assert_eq!(body["details"]["rowsWritten"], k);
        assert_eq!(ledger.rows().len(), k);
    }
}

#[tokio::test]
async fn test_pacific_mall_failure_names_product_only() {
    let ledger = Arc::new(MemoryLedger::fail_from_call(1));
    let reply = post(app(ledger.clone()), "/api/sheet-pacific-mall", pacific_order()).await;

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(reply.json()["error"], "Failed to append item Croffle");
    assert_eq!(ledger.rows().len(), 1);
}

#[tokio::test]
async fn test_legacy_failure_message_is_prefixed() {
    let ledger = Arc::new(MemoryLedger::fail_from_call(0));
    let body = json!({
        "orderId": "9",
        "items": [{ "item": { "name": "Oreo Milkshake", "price": 10 }, "quantity": 1 }]
    });
    let reply = post(app(ledger), "/api/sheet", body).await;

    assert_eq!(reply.status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(
        reply.json()["error"],
        "Error adding data to sheet: Failed to append item Oreo Milkshake"
    );
}

#[tokio::test]
async fn test_classic_nested_items_use_summary_layout() {
    let ledger = Arc::new(MemoryLedger::new());
    let body = json!({
        "orderId": "9",
        "items": [
            { "item": { "name": "Oreo Milkshake", "price": 10 }, "quantity": 2, "category": "Milkshakes" },
            { "item": { "name": "Lemonade + Hot Milk tea", "price": 10 }, "quantity": 1, "category": "Drink Combo" }
        ]
    });
    let reply = post(app(ledger.clone()), "/api/sheet", body).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!({ "message": "Data added successfully" }));

    let rows = ledger.rows_in("Summary!A3");
    assert_eq!(rows.len(), 3);
    assert_eq!(text(rows[0].cell(0)), "9");
    assert_eq!(text(rows[0].cell(3)), "Milkshakes");
    assert_eq!(text(rows[0].cell(4)), "Oreo Milkshake");
    assert_eq!(number(rows[0].cell(5)), dec!(2));
    assert_eq!(number(rows[0].cell(7)), dec!(20));
    assert_eq!(text(rows[0].cell(8)), "Pending");
    assert_eq!(text(rows[1].cell(4)), "Lemonade");
    assert_eq!(text(rows[2].cell(4)), "Hot Milk tea");
    assert_eq!(number(rows[2].cell(6)), Decimal::ZERO);
}

#[tokio::test]
async fn test_bittersweet_drink_appends_bundled_row() {
    let ledger = Arc::new(MemoryLedger::new());
    let body = json!({
        "orderId": "31",
        "items": [{ "item": { "name": "Nutella Crunch", "price": 12, "withDrink": true } }]
    });
    let reply = post(app(ledger.clone()), "/api/sheetv2", body).await;

    assert_eq!(reply.status, StatusCode::OK);
    let rows = ledger.rows_in("Summary!A3");
    assert_eq!(rows.len(), 2);
    assert_eq!(text(rows[0].cell(2)), "Nutella Crunch");
    assert_eq!(number(rows[0].cell(3)), dec!(12));
    assert_eq!(text(rows[1].cell(2)), "Hot Milk Tea");
    assert_eq!(number(rows[1].cell(3)), Decimal::ZERO);
}

#[tokio::test]
async fn test_invalid_bodies_are_400() {
    let cases = [
        json!({ "items": [] }),
        json!({ "orderId": "", "items": [{ "product": "Waffle", "flavor": "Original", "price": 9 }] }),
        json!({ "orderId": "1", "items": [] }),
        json!({ "orderId": "1", "items": [{ "product": "Waffle", "flavor": "Original", "price": -1 }] }),
        json!({ "orderId": "1", "items": [{ "product": "Cream Puff", "price": 10, "quantity": -2 }] }),
        json!({ "orderId": "1", "items": [{ "flavor": "Original", "price": 9 }] }),
    ];

    for body in cases {
        let ledger = Arc::new(MemoryLedger::new());
        let reply = post(app(ledger.clone()), "/api/sheetv3", body.clone()).await;

        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{body}");
        assert!(reply.json()["error"].is_string());
        assert_eq!(ledger.calls(), 0);
    }
}

#[tokio::test]
async fn test_oversized_amounts_are_400_not_panics() {
    let cases = [
        (
            "/api/sheet",
            json!({
                "orderId": "9",
                "items": [{ "item": { "name": "Oreo Milkshake", "price": 1e20 }, "quantity": 4000000000u32 }]
            }),
        ),
        (
            "/api/bitter",
            json!({
                "orderId": "9",
                "items": [
                    { "product": "Waffle", "flavor": "Original", "price": 5e28 },
                    { "product": "Waffle", "flavor": "Original", "price": 5e28 }
                ]
            }),
        ),
    ];

    for (path, body) in cases {
        let ledger = Arc::new(MemoryLedger::new());
        let reply = post(app(ledger.clone()), path, body).await;

        assert_eq!(reply.status, StatusCode::BAD_REQUEST, "{path}");
        let error = reply.json();
        assert_eq!(error["code"], 8);
        assert!(error["error"].as_str().unwrap().contains("items[0]"));
        assert_eq!(ledger.calls(), 0);
    }
}

#[tokio::test]
async fn test_malformed_json_is_400() {
    let ledger = Arc::new(MemoryLedger::new());
    let request = http::Request::builder()
        .method(Method::POST)
        .uri("/api/sheetv3")
        .header(header::CONTENT_TYPE, "application/json")
        .body(axum::body::Body::from("{not json"))
        .unwrap();

    let response = tower::ServiceExt::oneshot(app(ledger), request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_unknown_kiosk_is_404() {
    let ledger = Arc::new(MemoryLedger::new());
    let reply = post(app(ledger), "/api/orders/downtown", pacific_order()).await;

    assert_eq!(reply.status, StatusCode::NOT_FOUND);
    assert_eq!(reply.json()["error"], "Kiosk downtown not found");
}

#[tokio::test]
async fn test_blowchick_has_no_waiting_time() {
    let ledger = Arc::new(MemoryLedger::new());
    let body = json!({
        "orderId": "3",
        "items": [{ "product": "Waffle", "flavor": "Earl Grey", "isHalf": true, "price": 6 }]
    });
    let reply = post(app(ledger.clone()), "/api/sheetv3", body).await;

    assert_eq!(reply.status, StatusCode::OK);
    assert_eq!(reply.json(), json!({ "message": "Order processed successfully" }));
    let rows = ledger.rows_in("BlowChick!A3");
    assert_eq!(text(rows[0].cell(2)), "Waffle - Earl Grey (Half)");
}
