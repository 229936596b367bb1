//! End-to-end tests for Storehaus.
//!
//! The tests talk to running servers over HTTP and seed fixtures straight into
//! the database, so every test is `#[ignore]`d by default.
//!
//! # Running Tests
//!
//! ```bash
//! cargo run -p storehaus-cli -- migrate
//! cargo run -p storehaus-storefront &
//! cargo run -p storehaus-admin &
//! cargo test -p storehaus-integration-tests -- --ignored
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` - Database shared by both servers
//! - `STOREFRONT_URL` - Storefront base URL (default: `http://localhost:3000`)
//! - `ADMIN_URL` - Admin base URL (default: `http://localhost:3001`)

#![allow(clippy::missing_panics_doc)]

use reqwest::{Client, StatusCode};
use serde_json::{Value, json};
use sqlx::PgPool;
use uuid::Uuid;

use storehaus_admin::services::AdminAuthService;

/// Password used for every account the tests create.
pub const TEST_PASSWORD: &str = "integration-passphrase";

/// Shared handles for one test.
pub struct TestContext {
    pub storefront_url: String,
    pub admin_url: String,
    pub pool: PgPool,
}

impl TestContext {
    /// Read URLs from the environment and connect to the database.
    pub async fn new() -> Self {
        dotenvy::dotenv().ok();

        let database_url = std::env::var("DATABASE_URL").expect("DATABASE_URL must be set");
        let pool = PgPool::connect(&database_url)
            .await
            .expect("Failed to connect to database");

        Self {
            storefront_url: std::env::var("STOREFRONT_URL")
                .unwrap_or_else(|_| "http://localhost:3000".to_string()),
            admin_url: std::env::var("ADMIN_URL")
                .unwrap_or_else(|_| "http://localhost:3001".to_string()),
            pool,
        }
    }

    /// `storefront_url` joined with `path`.
    #[must_use]
    pub fn storefront(&self, path: &str) -> String {
        format!("{}{path}", self.storefront_url)
    }

    /// `admin_url` joined with `path`.
    #[must_use]
    pub fn admin(&self, path: &str) -> String {
        format!("{}{path}", self.admin_url)
    }

    /// Register a fresh storefront customer on `client` and return the user.
    pub async fn register_customer(&self, client: &Client) -> Value {
        let response = client
            .post(self.storefront("/api/auth/register"))
            .json(&json!({ "email": unique_email("shopper"), "password": TEST_PASSWORD }))
            .send()
            .await
            .expect("register request failed");
        assert_eq!(response.status(), StatusCode::CREATED);
        response.json().await.expect("register body")
    }

    /// Create an admin account and log `client` in as it.
    pub async fn login_admin(&self, client: &Client) -> Value {
        let email = unique_email("ops");
        AdminAuthService::new(&self.pool)
            .create_admin(&email, Some("Ops"), TEST_PASSWORD)
            .await
            .expect("Failed to create admin");

        let response = client
            .post(self.admin("/auth/login"))
            .json(&json!({ "email": email, "password": TEST_PASSWORD }))
            .send()
            .await
            .expect("admin login request failed");
        assert_eq!(response.status(), StatusCode::OK);
        response.json().await.expect("admin login body")
    }

    /// Insert a product with one variant and an order of `quantities` for
    /// `user_id`. Returns the order id.
    pub async fn seed_order(&self, user_id: i64, quantities: &[i32]) -> i32 {
        let tag = Uuid::new_v4().simple().to_string();
        let user_id = i32::try_from(user_id).expect("user id fits in i32");

        let product_id: i32 = sqlx::query_scalar(
            "INSERT INTO shop.products (name, slug, price_krw, price_usd)
             VALUES ($1, $2, 12000, 9.50) RETURNING id",
        )
        .bind(format!("Test product {tag}"))
        .bind(format!("test-product-{tag}"))
        .fetch_one(&self.pool)
        .await
        .expect("insert product");

        let variant_id: i32 = sqlx::query_scalar(
            "INSERT INTO shop.product_variants (product_id, name, sku, stock)
             VALUES ($1, 'Default', $2, 10) RETURNING id",
        )
        .bind(product_id)
        .bind(format!("SKU-{tag}"))
        .fetch_one(&self.pool)
        .await
        .expect("insert variant");

        let order_id: i32 = sqlx::query_scalar(
            "INSERT INTO shop.orders (user_id, status, total_amount, currency)
             VALUES ($1, 'paid', 24000, 'KRW') RETURNING id",
        )
        .bind(user_id)
        .fetch_one(&self.pool)
        .await
        .expect("insert order");

        for quantity in quantities {
            sqlx::query(
                "INSERT INTO shop.order_items (order_id, variant_id, quantity, unit_price)
                 VALUES ($1, $2, $3, 12000)",
            )
            .bind(order_id)
            .bind(variant_id)
            .bind(quantity)
            .execute(&self.pool)
            .await
            .expect("insert order item");
        }

        order_id
    }

    /// Force an order into `status` (e.g. `cancelled`), as an external
    /// payment or support system would.
    pub async fn set_order_status(&self, order_id: i32, status: &str) {
        sqlx::query("UPDATE shop.orders SET status = $2::shop.order_status WHERE id = $1")
            .bind(order_id)
            .bind(status)
            .execute(&self.pool)
            .await
            .expect("update order status");
    }
}

/// A client that keeps cookies between requests.
#[must_use]
pub fn client() -> Client {
    Client::builder()
        .cookie_store(true)
        .build()
        .expect("Failed to create HTTP client")
}

/// An email nobody else will register.
#[must_use]
pub fn unique_email(prefix: &str) -> String {
    format!("{prefix}-{}@storehaus.test", Uuid::new_v4().simple())
}

/// A code no other coupon uses.
#[must_use]
pub fn unique_code(prefix: &str) -> String {
    let suffix: String = Uuid::new_v4().simple().to_string().chars().take(8).collect();
    format!("{prefix}-{suffix}")
}
