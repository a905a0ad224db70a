//! Admin authentication handlers.

use axum::Json;
use axum::extract::State;
use axum::http::header::SET_COOKIE;
use axum::response::{AppendHeaders, IntoResponse};
use secrecy::ExposeSecret;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::{ADMIN_SESSION_COOKIE, RequireAdminSession};
use crate::state::AppState;

/// Session cookie lifetime: one day.
const SESSION_MAX_AGE_SECS: u64 = 86_400;

/// Login request body.
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub password: String,
}

/// Login response body.
#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub authenticated: bool,
}

/// `POST /admin/auth/login` - Check the password and set the session cookie.
#[instrument(skip(state, request))]
pub async fn login(
    State(state): State<AppState>,
    Json(request): Json<LoginRequest>,
) -> Result<impl IntoResponse> {
    let expected = state.config().admin_password.expose_secret();

    if !constant_time_eq(request.password.as_bytes(), expected.as_bytes()) {
        tracing::warn!("Failed admin login attempt");
        return Err(AppError::Unauthorized("invalid password".to_string()));
    }

    let token = Uuid::new_v4().to_string();
    let cookie = format!(
        "{ADMIN_SESSION_COOKIE}={token}; Path=/; HttpOnly; SameSite=Lax; Max-Age={SESSION_MAX_AGE_SECS}"
    );

    tracing::info!("Admin logged in");
    Ok((
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(LoginResponse {
            authenticated: true,
        }),
    ))
}

/// `POST /admin/auth/logout` - Expire the session cookie.
#[instrument]
pub async fn logout() -> impl IntoResponse {
    let cookie = format!("{ADMIN_SESSION_COOKIE}=; Path=/; HttpOnly; SameSite=Lax; Max-Age=0");
    (
        AppendHeaders([(SET_COOKIE, cookie)]),
        Json(json!({ "authenticated": false })),
    )
}

/// `GET /admin/auth/session` - Report whether the caller has a session.
///
/// Returns 401 via the extractor when the cookie is missing.
#[instrument(skip(_session))]
pub async fn session(_session: RequireAdminSession) -> Json<LoginResponse> {
    Json(LoginResponse {
        authenticated: true,
    })
}

/// Compare two byte strings in time independent of where they differ.
fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_constant_time_eq() {
        assert!(constant_time_eq(b"hunter2", b"hunter2"));
        assert!(!constant_time_eq(b"hunter2", b"hunter3"));
        assert!(!constant_time_eq(b"hunter2", b"hunter22"));
        assert!(constant_time_eq(b"", b""));
    }
}
