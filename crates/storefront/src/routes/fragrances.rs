//! Catalog route handlers.

use axum::Json;
use axum::extract::{Path, State};
use tracing::instrument;

use qotore_core::Fragrance;

use crate::cache::{CacheKey, CacheValue};
use crate::error::{AppError, Result};
use crate::state::AppState;

/// `GET /api/fragrances` - All visible fragrances with their variants.
///
/// Hidden fragrances never appear here; responses are cached with a short TTL.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> Result<Json<Vec<Fragrance>>> {
    if let Some(CacheValue::Catalog(fragrances)) =
        state.catalog_cache().get(&CacheKey::Catalog).await
    {
        return Ok(Json(fragrances));
    }

    let fragrances = state.supabase().list_fragrances().await?;
    state
        .catalog_cache()
        .insert(CacheKey::Catalog, CacheValue::Catalog(fragrances.clone()))
        .await;

    Ok(Json(fragrances))
}

/// `GET /api/fragrances/{slug}` - Single fragrance by slug.
///
/// Returns 404 for unknown slugs and for hidden fragrances.
#[instrument(skip(state))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<Fragrance>> {
    let key = CacheKey::Fragrance(slug.clone());
    if let Some(CacheValue::Fragrance(fragrance)) = state.catalog_cache().get(&key).await {
        return Ok(Json(*fragrance));
    }

    let fragrance = state
        .supabase()
        .get_fragrance_by_slug(&slug)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("fragrance {slug}")))?;

    state
        .catalog_cache()
        .insert(key, CacheValue::Fragrance(Box::new(fragrance.clone())))
        .await;

    Ok(Json(fragrance))
}
