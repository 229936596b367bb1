//! Coupon and campaign management through the admin API.
//!
//! Requires a migrated database and a running admin server.

#![allow(clippy::unwrap_used)]

use reqwest::StatusCode;
use serde_json::{Value, json};

use storehaus_integration_tests::{TestContext, client, unique_code};

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_coupon_lifecycle() {
    let ctx = TestContext::new().await;
    let admin = client();
    ctx.login_admin(&admin).await;

    let code = unique_code("save");
    let response = admin
        .post(ctx.admin("/api/coupons"))
        .json(&json!({
            "code": format!("  {code} "),
            "discountType": "PERCENTAGE",
            "discountValue": "10"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let coupon: Value = response.json().await.unwrap();
    assert_eq!(coupon["code"], code.to_uppercase());
    assert_eq!(coupon["isActive"], true);
    assert_eq!(coupon["userId"], Value::Null);

    let duplicate = admin
        .post(ctx.admin("/api/coupons"))
        .json(&json!({
            "code": code,
            "discountType": "FIXED_AMOUNT",
            "discountValue": "5000"
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(duplicate.status(), StatusCode::CONFLICT);

    let id = coupon["id"].as_i64().unwrap();
    let deactivated: Value = admin
        .post(ctx.admin(&format!("/api/coupons/{id}/deactivate")))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(deactivated["isActive"], false);
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_campaign_toggle_leaves_coupon_alone() {
    let ctx = TestContext::new().await;
    let admin = client();
    ctx.login_admin(&admin).await;

    let coupon: Value = admin
        .post(ctx.admin("/api/coupons"))
        .json(&json!({
            "code": unique_code("camp"),
            "discountType": "FIXED_AMOUNT",
            "discountValue": "3000"
        }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();

    let slug = unique_code("Spring").to_lowercase();
    let response = admin
        .post(ctx.admin("/api/campaigns"))
        .json(&json!({
            "title": "Spring Sale",
            "slug": slug,
            "couponId": coupon["id"]
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::CREATED);
    let campaign: Value = response.json().await.unwrap();
    assert_eq!(campaign["coupon"]["id"], coupon["id"]);

    let id = campaign["id"].as_i64().unwrap();
    let toggled: Value = admin
        .post(ctx.admin(&format!("/api/campaigns/{id}/active")))
        .json(&json!({ "active": false }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(toggled["isActive"], false);
    assert_eq!(toggled["coupon"]["isActive"], true);
}

#[tokio::test]
#[ignore = "Requires running admin server and database"]
async fn test_unknown_coupon_reference_is_bad_request() {
    let ctx = TestContext::new().await;
    let admin = client();
    ctx.login_admin(&admin).await;

    let response = admin
        .post(ctx.admin("/api/campaigns"))
        .json(&json!({
            "title": "Ghost",
            "slug": unique_code("ghost").to_lowercase(),
            "couponId": 2_147_483_000
        }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
