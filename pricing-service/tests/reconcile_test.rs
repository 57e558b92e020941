//! Reconciliation endpoint tests.

mod common;

use common::TestApp;
use serde_json::json;

fn consistent_line() -> serde_json::Value {
    json!({
        "description": "Scenario item",
        "quantity": 2,
        "unit_cost": 50,
        "discount_percentage": 5,
        "vat_percent": 10,
        "stored": {
            "discount_amount": "5.00",
            "vat_amount": "9.50",
            "line_total": "104.50"
        }
    })
}

#[tokio::test]
async fn consistent_document_reconciles_cleanly() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/v1/pricing/reconcile",
            &json!({
                "document_type": "purchase_invoice",
                "lines": [consistent_line(), consistent_line()],
                "stored_grand_total": "209.00"
            }),
        )
        .await;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["consistent"], true);
    assert_eq!(body["grand_total_consistent"], true);
    assert_eq!(body["posted_grand_total"], "209.00");
}

#[tokio::test]
async fn stale_stored_total_is_reported_with_delta() {
    let app = TestApp::spawn().await;

    // Quantity edited 2 -> 3, stored totals never refreshed.
    let mut stale = consistent_line();
    stale["quantity"] = json!(3);

    let response = app
        .post_json(
            "/v1/pricing/reconcile",
            &json!({
                "document_type": "quotation",
                "lines": [stale],
                "stored_grand_total": "104.50"
            }),
        )
        .await;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["consistent"], false);

    let drifts = body["lines"][0]["drifts"].as_array().expect("drifts array");
    let total_drift = drifts
        .iter()
        .find(|d| d["field"] == "line_total")
        .expect("line_total drift reported");
    assert_eq!(total_drift["stored"], "104.50");
    assert_eq!(total_drift["computed"], "156.75");
    assert_eq!(total_drift["delta"], "52.25");
}

#[tokio::test]
async fn stored_grand_total_must_match_posted_sum() {
    let app = TestApp::spawn().await;

    let response = app
        .post_json(
            "/v1/pricing/reconcile",
            &json!({
                "document_type": "lpo",
                "lines": [consistent_line(), consistent_line()],
                "stored_grand_total": "209.01"
            }),
        )
        .await;

    assert!(response.status().is_success());
    let body: serde_json::Value = response.json().await.expect("Invalid JSON");
    assert_eq!(body["consistent"], false);
    assert_eq!(body["grand_total_consistent"], false);
    assert_eq!(body["stored_grand_total"], "209.01");
    assert_eq!(body["posted_grand_total"], "209.00");
}

#[tokio::test]
async fn invalid_line_aborts_reconciliation() {
    let app = TestApp::spawn().await;

    let mut bad = consistent_line();
    bad["quantity"] = json!(-2);

    let response = app
        .post_json(
            "/v1/pricing/reconcile",
            &json!({
                "document_type": "quotation",
                "lines": [bad],
                "stored_grand_total": "104.50"
            }),
        )
        .await;

    assert_eq!(response.status(), reqwest::StatusCode::UNPROCESSABLE_ENTITY);
}
