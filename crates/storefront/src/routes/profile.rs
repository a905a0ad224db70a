//! User profile route handlers.
//!
//! Profiles are keyed by the Supabase auth user id. The storefront uses them
//! to pre-fill checkout; `profile_completed` is derived server-side rather
//! than trusted from the client.

use axum::Json;
use axum::extract::{Path, State};
use serde::Deserialize;
use tracing::instrument;
use uuid::Uuid;

use qotore_core::UserProfile;

use crate::error::{AppError, Result};
use crate::state::AppState;

/// Update payload for a user profile. All fields optional.
#[derive(Debug, Deserialize)]
pub struct ProfileUpdate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub wilayat: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
}

/// `GET /api/profile/{id}` - Fetch a user profile.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<UserProfile>> {
    let profile = state
        .supabase()
        .get_profile(id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("profile {id}")))?;
    Ok(Json(profile))
}

/// `PUT /api/profile/{id}` - Create or update a user profile.
///
/// Upserts the row and recomputes `profile_completed` from the stored fields.
#[instrument(skip(state, update))]
pub async fn upsert(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(update): Json<ProfileUpdate>,
) -> Result<Json<UserProfile>> {
    let mut profile = UserProfile {
        id,
        name: normalize(update.name),
        phone: normalize(update.phone),
        wilayat: normalize(update.wilayat),
        city: normalize(update.city),
        profile_completed: false,
    };
    profile.profile_completed = profile.is_complete();

    let stored = state.supabase().upsert_profile(&profile).await?;
    Ok(Json(stored))
}

/// Trim a field, treating whitespace-only values as absent.
fn normalize(value: Option<String>) -> Option<String> {
    value
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_trims_and_drops_blank() {
        assert_eq!(normalize(Some(" Muscat ".to_string())), Some("Muscat".to_string()));
        assert_eq!(normalize(Some("   ".to_string())), None);
        assert_eq!(normalize(None), None);
    }
}
