//! Image upload handler.

use axum::Json;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;

use crate::error::{AppError, Result};
use crate::middleware::RequireAdminSession;
use crate::state::AppState;

/// Maximum accepted image size, in bytes.
const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

/// Accepted content types and their storage extensions.
const ALLOWED_TYPES: &[(&str, &str)] = &[
    ("image/jpeg", "jpg"),
    ("image/png", "png"),
    ("image/webp", "webp"),
];

/// Upload response body.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Storage path to persist as the fragrance `image_path`.
    pub path: String,
}

/// `POST /admin/images` - Upload a fragrance image.
///
/// Takes a multipart form with a single `file` field and stores it under a
/// fresh UUID name in the image bucket.
#[instrument(skip(state, _session, multipart))]
pub async fn upload_image(
    _session: RequireAdminSession,
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::BadRequest(format!("invalid multipart body: {e}")))?
    {
        if field.name() != Some("file") {
            continue;
        }

        let content_type = field
            .content_type()
            .ok_or_else(|| AppError::BadRequest("file field needs a content type".to_string()))?
            .to_string();

        let bytes = field
            .bytes()
            .await
            .map_err(|e| AppError::BadRequest(format!("failed to read upload: {e}")))?;

        let extension = validate_image(&content_type, bytes.len())?;

        let name = format!("{}.{extension}", Uuid::new_v4());
        let path = state
            .supabase()
            .upload_image(&name, &content_type, bytes.to_vec())
            .await?;

        tracing::info!(path = %path, size = bytes.len(), "Image uploaded");
        return Ok((StatusCode::CREATED, Json(UploadResponse { path })));
    }

    Err(AppError::BadRequest(
        "multipart body must contain a 'file' field".to_string(),
    ))
}

/// Check an upload's content type and size, returning the storage extension.
fn validate_image(content_type: &str, size: usize) -> Result<&'static str> {
    let extension = ALLOWED_TYPES
        .iter()
        .find(|(mime, _)| *mime == content_type)
        .map(|(_, ext)| *ext)
        .ok_or_else(|| AppError::BadRequest(format!("unsupported image type '{content_type}'")))?;

    if size == 0 {
        return Err(AppError::BadRequest("uploaded file is empty".to_string()));
    }
    if size > MAX_IMAGE_BYTES {
        return Err(AppError::BadRequest(format!(
            "image exceeds {MAX_IMAGE_BYTES} byte limit"
        )));
    }

    Ok(extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_image_maps_content_type_to_extension() {
        assert!(matches!(validate_image("image/jpeg", 1024), Ok("jpg")));
        assert!(matches!(validate_image("image/png", 1024), Ok("png")));
        assert!(matches!(validate_image("image/webp", 1024), Ok("webp")));
    }

    #[test]
    fn test_validate_image_rejects_non_image_type() {
        assert!(matches!(
            validate_image("text/html", 1024),
            Err(AppError::BadRequest(_))
        ));
        assert!(matches!(
            validate_image("image/svg+xml", 1024),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_image_rejects_empty_body() {
        assert!(matches!(
            validate_image("image/png", 0),
            Err(AppError::BadRequest(_))
        ));
    }

    #[test]
    fn test_validate_image_rejects_oversized_body() {
        assert!(matches!(
            validate_image("image/png", MAX_IMAGE_BYTES + 1),
            Err(AppError::BadRequest(_))
        ));
        assert!(validate_image("image/png", MAX_IMAGE_BYTES).is_ok());
    }
}
