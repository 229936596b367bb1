//! HTTP middleware stack for the storefront.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (capture errors, transactions)
//! 2. `TraceLayer` (request span with status and latency)
//! 3. Request ID (add unique ID to each request)
//! 4. Session layer (tower-sessions with `PostgreSQL` store)
//! 5. Rate limiting (governor, per route group)
//!
//! Extractors: `RequireAuth`/`OptionalAuth` read the session user,
//! `RegionPreference` reads the region cookie.

pub mod auth;
pub mod rate_limit;
pub mod region;
pub mod request_id;
pub mod session;

pub use auth::{OptionalAuth, RequireAuth, clear_current_user, set_current_user};
pub use rate_limit::{activity_rate_limiter, auth_rate_limiter};
pub use region::{CookieRegionPersistence, RegionPreference};
pub use request_id::{RequestId, request_id_middleware};
pub use session::create_session_layer;
