//! HTTP middleware for the admin API.

pub mod auth;
pub mod request_id;

pub use auth::{ADMIN_SESSION_COOKIE, RequireAdminSession};
pub use request_id::request_id_middleware;
