//! Catalog management handlers.

use axum::Json;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use serde::Deserialize;
use tracing::instrument;

use qotore_core::{Fragrance, FragranceId, Price, Variant, VariantId};

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminSession;
use crate::state::AppState;
use crate::supabase::{FragrancePatch, NewFragrance, NewVariant};

/// `GET /admin/fragrances` - All fragrances, hidden included.
#[instrument(skip(state, _session))]
pub async fn index(
    _session: RequireAdminSession,
    State(state): State<AppState>,
) -> Result<Json<Vec<Fragrance>>> {
    Ok(Json(state.supabase().list_all_fragrances().await?))
}

/// `GET /admin/fragrances/{id}` - Single fragrance with variants.
#[instrument(skip(state, _session))]
pub async fn show(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<FragranceId>,
) -> Result<Json<Fragrance>> {
    Ok(Json(state.supabase().get_fragrance(id).await?))
}

/// Variant fields accepted on create.
#[derive(Debug, Deserialize)]
pub struct VariantRequest {
    #[serde(default)]
    pub size_ml: Option<i32>,
    pub price: Price,
    #[serde(default)]
    pub is_whole_bottle: bool,
}

/// Create request body.
#[derive(Debug, Deserialize)]
pub struct CreateFragranceRequest {
    pub name: String,
    #[serde(default)]
    pub slug: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
    #[serde(default)]
    pub hidden: bool,
    #[serde(default)]
    pub variants: Vec<VariantRequest>,
}

/// `POST /admin/fragrances` - Create a fragrance with its variants.
///
/// The slug is derived from the name when not supplied. Returns 201 with the
/// stored fragrance, re-fetched so embedded variants carry their database ids.
#[instrument(skip(state, _session, request))]
pub async fn create(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Json(request): Json<CreateFragranceRequest>,
) -> Result<(StatusCode, Json<Fragrance>)> {
    let name = request.name.trim().to_string();
    let slug = derive_slug(&name, request.slug.as_deref())?;
    validate_variants(&request.variants)?;

    let stored = state
        .supabase()
        .insert_fragrance(&NewFragrance {
            name,
            slug,
            brand: request.brand,
            description: request.description,
            image_path: request.image_path,
            hidden: request.hidden,
        })
        .await?;

    for variant in &request.variants {
        state
            .supabase()
            .insert_variant(&NewVariant {
                fragrance_id: stored.id,
                size_ml: variant.size_ml,
                price: variant.price,
                is_whole_bottle: variant.is_whole_bottle,
            })
            .await?;
    }

    let full = state.supabase().get_fragrance(stored.id).await?;
    tracing::info!(slug = %full.slug, "Fragrance created");
    Ok((StatusCode::CREATED, Json(full)))
}

/// Update request body. Unset fields are left untouched.
#[derive(Debug, Deserialize)]
pub struct UpdateFragranceRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_path: Option<String>,
}

/// `PUT /admin/fragrances/{id}` - Partial update.
///
/// Renaming also regenerates the slug, so storefront links follow the name.
#[instrument(skip(state, _session, request))]
pub async fn update(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<FragranceId>,
    Json(request): Json<UpdateFragranceRequest>,
) -> Result<Json<Fragrance>> {
    let slug = match request.name.as_deref() {
        Some(name) => {
            let slug = Fragrance::slugify(name);
            if slug.is_empty() {
                return Err(AppError::BadRequest(
                    "name must contain at least one alphanumeric character".to_string(),
                ));
            }
            Some(slug)
        }
        None => None,
    };

    let patch = FragrancePatch {
        name: request.name.map(|n| n.trim().to_string()),
        slug,
        brand: request.brand,
        description: request.description,
        image_path: request.image_path,
        hidden: None,
    };
    if patch.is_empty() {
        return Err(AppError::BadRequest("no fields to update".to_string()));
    }

    Ok(Json(state.supabase().update_fragrance(id, &patch).await?))
}

/// Visibility request body.
#[derive(Debug, Deserialize)]
pub struct VisibilityRequest {
    pub hidden: bool,
}

/// `POST /admin/fragrances/{id}/visibility` - Show or hide on the storefront.
#[instrument(skip(state, _session))]
pub async fn set_visibility(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<FragranceId>,
    Json(request): Json<VisibilityRequest>,
) -> Result<Json<Fragrance>> {
    let patch = FragrancePatch {
        hidden: Some(request.hidden),
        ..Default::default()
    };
    let updated = state.supabase().update_fragrance(id, &patch).await?;

    tracing::info!(slug = %updated.slug, hidden = request.hidden, "Fragrance visibility changed");
    Ok(Json(updated))
}

/// `DELETE /admin/fragrances/{id}` - Delete a fragrance and its variants.
#[instrument(skip(state, _session))]
pub async fn destroy(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<FragranceId>,
) -> Result<StatusCode> {
    state.supabase().get_fragrance(id).await?;
    state.supabase().delete_fragrance(id).await?;

    tracing::info!(fragrance_id = %id, "Fragrance deleted");
    Ok(StatusCode::NO_CONTENT)
}

/// `POST /admin/fragrances/{id}/variants` - Add a variant.
#[instrument(skip(state, _session, request))]
pub async fn add_variant(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<FragranceId>,
    Json(request): Json<VariantRequest>,
) -> Result<(StatusCode, Json<Variant>)> {
    validate_variants(std::slice::from_ref(&request))?;

    // 404 for unknown fragrance instead of a foreign key error from PostgREST
    state.supabase().get_fragrance(id).await?;

    let stored = state
        .supabase()
        .insert_variant(&NewVariant {
            fragrance_id: id,
            size_ml: request.size_ml,
            price: request.price,
            is_whole_bottle: request.is_whole_bottle,
        })
        .await?;

    Ok((StatusCode::CREATED, Json(stored)))
}

/// `DELETE /admin/variants/{id}` - Remove a variant.
#[instrument(skip(state, _session))]
pub async fn remove_variant(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    Path(id): Path<VariantId>,
) -> Result<StatusCode> {
    state.supabase().delete_variant(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Slug for a new fragrance: an explicit slug wins, the name is the fallback.
/// Either source is normalized through `Fragrance::slugify`.
fn derive_slug(name: &str, slug: Option<&str>) -> Result<String> {
    let source = slug.filter(|s| !s.trim().is_empty()).unwrap_or(name);
    let slug = Fragrance::slugify(source);
    if slug.is_empty() {
        return Err(AppError::BadRequest(
            "slug source must contain at least one alphanumeric character".to_string(),
        ));
    }
    Ok(slug)
}

/// Reject variants with nonpositive prices or contradictory size fields.
fn validate_variants(variants: &[VariantRequest]) -> Result<()> {
    for variant in variants {
        if variant.price <= Price::ZERO {
            return Err(AppError::BadRequest(
                "variant price must be positive".to_string(),
            ));
        }
        if variant.is_whole_bottle && variant.size_ml.is_some() {
            return Err(AppError::BadRequest(
                "whole-bottle variants must not set size_ml".to_string(),
            ));
        }
        if !variant.is_whole_bottle && variant.size_ml.is_some_and(|ml| ml <= 0) {
            return Err(AppError::BadRequest(
                "size_ml must be positive".to_string(),
            ));
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn variant(size_ml: Option<i32>, price: i64, is_whole_bottle: bool) -> VariantRequest {
        VariantRequest {
            size_ml,
            price: Price::from_baisa(price),
            is_whole_bottle,
        }
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_derive_slug_prefers_explicit_slug() {
        assert_eq!(
            derive_slug("Oud Royal", Some("Royal Oud 2024")).unwrap(),
            "royal-oud-2024"
        );
    }

    #[test]
    #[allow(clippy::unwrap_used)]
    fn test_derive_slug_falls_back_to_name() {
        assert_eq!(derive_slug("Oud Royal", None).unwrap(), "oud-royal");
        assert_eq!(derive_slug("Oud Royal", Some("   ")).unwrap(), "oud-royal");
    }

    #[test]
    fn test_derive_slug_rejects_no_alphanumerics() {
        assert!(derive_slug("!!!", None).is_err());
    }

    #[test]
    fn test_validate_variants_accepts_decant_and_bottle() {
        let variants = vec![variant(Some(5), 2500, false), variant(None, 45_000, true)];
        assert!(validate_variants(&variants).is_ok());
    }

    #[test]
    fn test_validate_variants_rejects_free_variant() {
        assert!(validate_variants(&[variant(Some(5), 0, false)]).is_err());
    }

    #[test]
    fn test_validate_variants_rejects_sized_whole_bottle() {
        assert!(validate_variants(&[variant(Some(100), 45_000, true)]).is_err());
    }

    #[test]
    fn test_validate_variants_rejects_negative_size() {
        assert!(validate_variants(&[variant(Some(-5), 2500, false)]).is_err());
    }
}
