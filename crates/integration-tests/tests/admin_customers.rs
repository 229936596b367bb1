//! Customer views and shipments through the admin API.
//!
//! Requires a migrated database and both servers running.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use storehaus_integration_tests::{TestContext, client};

#[tokio::test]
#[ignore = "Requires running servers and database"]
async fn test_customer_detail_counts_items() {
    let ctx = TestContext::new().await;
    let shopper = client();
    let user = ctx.register_customer(&shopper).await;
    let user_id = user["id"].as_i64().unwrap();
    let order_id = ctx.seed_order(user_id, &[2, 3]).await;

    let admin = client();
    ctx.login_admin(&admin).await;

    let detail: Value = admin
        .get(ctx.admin(&format!("/api/customers/{user_id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(detail["orders"][0]["id"], order_id);
    assert_eq!(detail["orders"][0]["itemCount"], 5);

    let missing = admin
        .get(ctx.admin("/api/customers/2147483000"))
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
#[ignore = "Requires running servers and database"]
async fn test_shipment_marks_order_shipped() {
    let ctx = TestContext::new().await;
    let shopper = client();
    let user = ctx.register_customer(&shopper).await;
    let order_id = ctx.seed_order(user["id"].as_i64().unwrap(), &[1]).await;

    let admin = client();
    ctx.login_admin(&admin).await;

    let body = json!({
        "destination": {
            "name": "Kim Minji",
            "line1": "12 Teheran-ro",
            "city": "Seoul",
            "postalCode": "06234",
            "countryCode": "KR"
        },
        "package": { "weightGrams": 800, "lengthCm": 30, "widthCm": 20, "heightCm": 10 }
    });

    let response = admin
        .post(ctx.admin(&format!("/api/orders/{order_id}/shipment")))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let shipment: Value = response.json().await.unwrap();
    let tracking = shipment["trackingNumber"].as_str().unwrap().to_owned();

    let order: Value = shopper
        .get(ctx.storefront(&format!("/api/account/orders/{order_id}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(order["status"], "SHIPPED");
    assert_eq!(order["trackingNumber"], tracking);

    let missing = admin
        .post(ctx.admin("/api/orders/2147483000/shipment"))
        .json(&body)
        .send()
        .await
        .unwrap();
    assert_eq!(missing.status(), StatusCode::NOT_FOUND);
}

fn shipment_body() -> Value {
    json!({
        "destination": {
            "name": "Kim Minji",
            "line1": "12 Teheran-ro",
            "city": "Seoul",
            "postalCode": "06234",
            "countryCode": "KR"
        },
        "package": { "weightGrams": 800, "lengthCm": 30, "widthCm": 20, "heightCm": 10 }
    })
}

#[tokio::test]
#[ignore = "Requires running servers and database"]
async fn test_shipment_only_for_orders_awaiting_shipment() {
    let ctx = TestContext::new().await;
    let shopper = client();
    let user = ctx.register_customer(&shopper).await;
    let user_id = user["id"].as_i64().unwrap();

    let admin = client();
    ctx.login_admin(&admin).await;

    // A second shipment keeps the first tracking number
    let shipped = ctx.seed_order(user_id, &[1]).await;
    let first = admin
        .post(ctx.admin(&format!("/api/orders/{shipped}/shipment")))
        .json(&shipment_body())
        .send()
        .await
        .unwrap();
    assert_eq!(first.status(), StatusCode::CREATED);
    let first: Value = first.json().await.unwrap();

    let again = admin
        .post(ctx.admin(&format!("/api/orders/{shipped}/shipment")))
        .json(&shipment_body())
        .send()
        .await
        .unwrap();
    assert_eq!(again.status(), StatusCode::CONFLICT);

    let order: Value = shopper
        .get(ctx.storefront(&format!("/api/account/orders/{shipped}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(order["trackingNumber"], first["trackingNumber"]);

    // A cancelled order stays cancelled
    let cancelled = ctx.seed_order(user_id, &[1]).await;
    ctx.set_order_status(cancelled, "cancelled").await;
    let response = admin
        .post(ctx.admin(&format!("/api/orders/{cancelled}/shipment")))
        .json(&shipment_body())
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CONFLICT);

    let order: Value = shopper
        .get(ctx.storefront(&format!("/api/account/orders/{cancelled}")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(order["status"], "CANCELLED");
    assert!(order["trackingNumber"].is_null());
}
