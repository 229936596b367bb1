//! Domain models for the storefront.
//!
//! These are the validated shapes handlers work with and serialize. Row types
//! stay private to the `db` module.

pub mod account;
pub mod address;
pub mod order;
pub mod product;
pub mod session;
pub mod user;

pub use account::AccountStats;
pub use address::Address;
pub use order::{Order, OrderItem, OrderItemProduct, OrderItemVariant};
pub use product::{DisplayPrice, PricedProduct, Product, ProductDetail, ProductVariant};
pub use session::{CurrentUser, keys as session_keys};
pub use user::User;
