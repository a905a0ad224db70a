//! Authentication extractor for the admin API.
//!
//! Auth is a single shared password: login checks it and sets an
//! `admin_session` cookie, and every protected handler requires that cookie
//! to be present. The cookie value is an opaque random token; there is no
//! server-side session store, so presence is the whole check. The admin
//! binary is expected to sit behind a private network or access proxy.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, header::COOKIE, request::Parts},
    response::{IntoResponse, Response},
};

/// Name of the admin session cookie.
pub const ADMIN_SESSION_COOKIE: &str = "admin_session";

/// Extractor that requires an admin session cookie.
///
/// # Example
///
/// ```rust,ignore
/// async fn protected_handler(_session: RequireAdminSession) -> impl IntoResponse {
///     "admins only"
/// }
/// ```
pub struct RequireAdminSession;

/// Error returned when the admin session cookie is missing.
pub struct AdminAuthRejection;

impl IntoResponse for AdminAuthRejection {
    fn into_response(self) -> Response {
        (StatusCode::UNAUTHORIZED, "Admin session required").into_response()
    }
}

impl<S> FromRequestParts<S> for RequireAdminSession
where
    S: Send + Sync,
{
    type Rejection = AdminAuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        let has_session = parts
            .headers
            .get_all(COOKIE)
            .iter()
            .filter_map(|value| value.to_str().ok())
            .any(|header| cookie_present(header, ADMIN_SESSION_COOKIE));

        if has_session {
            Ok(Self)
        } else {
            Err(AdminAuthRejection)
        }
    }
}

/// Whether a `Cookie` header contains a non-empty value for `name`.
fn cookie_present(header: &str, name: &str) -> bool {
    header.split(';').any(|pair| {
        let mut parts = pair.trim().splitn(2, '=');
        parts.next() == Some(name) && parts.next().is_some_and(|v| !v.is_empty())
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cookie_present() {
        assert!(cookie_present("admin_session=abc123", ADMIN_SESSION_COOKIE));
        assert!(cookie_present(
            "theme=dark; admin_session=abc123; lang=en",
            ADMIN_SESSION_COOKIE
        ));
    }

    #[test]
    fn test_cookie_absent() {
        assert!(!cookie_present("theme=dark; lang=en", ADMIN_SESSION_COOKIE));
        assert!(!cookie_present("", ADMIN_SESSION_COOKIE));
    }

    #[test]
    fn test_empty_cookie_value_rejected() {
        assert!(!cookie_present("admin_session=", ADMIN_SESSION_COOKIE));
    }

    #[test]
    fn test_cookie_name_is_exact_match() {
        assert!(!cookie_present(
            "not_admin_session=abc123",
            ADMIN_SESSION_COOKIE
        ));
    }
}
