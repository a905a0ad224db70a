//! HTTP route handlers for the admin API.
//!
//! # Route Structure
//!
//! ```text
//! GET  /health                          - Health check
//!
//! # Auth
//! POST /admin/auth/login                - Password login, sets session cookie
//! POST /admin/auth/logout               - Clears session cookie
//! GET  /admin/auth/session              - Check session validity
//!
//! # Orders (require session)
//! GET    /admin/orders                  - All orders, newest first
//! GET    /admin/orders/poll             - New orders past a cursor (?after_id=N)
//! GET    /admin/orders/{id}             - Single order
//! PUT    /admin/orders/{id}/status      - Set status (pending/completed only)
//! POST   /admin/orders/{id}/cancel      - Cancel an order
//! POST   /admin/orders/{id}/reviewed    - Toggle the reviewed flag
//! DELETE /admin/orders/{id}             - Delete an order
//!
//! # Catalog (require session)
//! GET    /admin/fragrances              - All fragrances, hidden included
//! POST   /admin/fragrances              - Create fragrance with variants
//! GET    /admin/fragrances/{id}         - Single fragrance
//! PUT    /admin/fragrances/{id}         - Partial update
//! POST   /admin/fragrances/{id}/visibility - Show/hide on the storefront
//! DELETE /admin/fragrances/{id}         - Delete fragrance and variants
//! POST   /admin/fragrances/{id}/variants - Add a variant
//! DELETE /admin/variants/{id}           - Remove a variant
//!
//! # Uploads (require session)
//! POST /admin/images                    - Multipart image upload to storage
//! ```

pub mod auth;
pub mod fragrances;
pub mod orders;
pub mod uploads;

use axum::{
    Router,
    routing::{delete, get, post, put},
};

use crate::state::AppState;

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/logout", post(auth::logout))
        .route("/session", get(auth::session))
}

/// Create the order routes router.
pub fn order_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(orders::index))
        .route("/poll", get(orders::poll))
        .route("/{id}", get(orders::show).delete(orders::destroy))
        .route("/{id}/status", put(orders::update_status))
        .route("/{id}/cancel", post(orders::cancel))
        .route("/{id}/reviewed", post(orders::set_reviewed))
}

/// Create the catalog routes router.
pub fn fragrance_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(fragrances::index).post(fragrances::create))
        .route(
            "/{id}",
            get(fragrances::show)
                .put(fragrances::update)
                .delete(fragrances::destroy),
        )
        .route("/{id}/visibility", post(fragrances::set_visibility))
        .route("/{id}/variants", post(fragrances::add_variant))
}

/// Create all routes for the admin API.
pub fn routes() -> Router<AppState> {
    Router::new()
        .nest("/admin/auth", auth_routes())
        .nest("/admin/orders", order_routes())
        .nest("/admin/fragrances", fragrance_routes())
        .route("/admin/variants/{id}", delete(fragrances::remove_variant))
        .route("/admin/images", post(uploads::upload_image))
}
