//! HTTP middleware for the storefront.

pub mod rate_limit;
pub mod request_id;

pub use rate_limit::{api_rate_limiter, checkout_rate_limiter};
pub use request_id::request_id_middleware;
