//! HTTP route handlers for the storefront API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                  - Health check
//!
//! # Catalog
//! GET  /api/fragrances          - Visible fragrances with variants
//! GET  /api/fragrances/{slug}   - Single fragrance by slug
//!
//! # Checkout
//! POST /api/orders              - Submit an order (rate limited)
//!
//! # Profiles
//! GET  /api/profile/{id}        - Fetch a user profile
//! PUT  /api/profile/{id}        - Create or update a user profile
//! ```

pub mod checkout;
pub mod fragrances;
pub mod profile;

use axum::{
    Router,
    routing::{get, post},
};

use crate::middleware::{api_rate_limiter, checkout_rate_limiter};
use crate::state::AppState;

/// Create the catalog routes router.
pub fn catalog_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(fragrances::index))
        .route("/{slug}", get(fragrances::show))
        .layer(api_rate_limiter())
}

/// Create the checkout routes router.
pub fn checkout_routes() -> Router<AppState> {
    Router::new()
        .route("/", post(checkout::submit))
        .layer(checkout_rate_limiter())
}

/// Create the profile routes router.
pub fn profile_routes() -> Router<AppState> {
    Router::new()
        .route("/{id}", get(profile::show).put(profile::upsert))
        .layer(api_rate_limiter())
}

/// Create all routes for the storefront API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/api/fragrances", catalog_routes())
        .nest("/api/orders", checkout_routes())
        .nest("/api/profile", profile_routes())
}
