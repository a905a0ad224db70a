//! Request payloads for the Supabase REST API.

use serde::Serialize;

use qotore_core::{FragranceId, Price};

/// Insert payload for the `fragrances` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewFragrance {
    pub name: String,
    pub slug: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    pub image_path: Option<String>,
    pub hidden: bool,
}

/// Partial update for a fragrance. Only set fields are sent, so a PATCH
/// never clobbers columns the caller did not mention.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FragrancePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub hidden: Option<bool>,
}

impl FragrancePatch {
    /// Whether the patch would change anything.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.slug.is_none()
            && self.brand.is_none()
            && self.description.is_none()
            && self.image_path.is_none()
            && self.hidden.is_none()
    }
}

/// Insert payload for the `variants` table.
#[derive(Debug, Clone, Serialize)]
pub struct NewVariant {
    pub fragrance_id: FragranceId,
    pub size_ml: Option<i32>,
    pub price: Price,
    pub is_whole_bottle: bool,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_fragrance_patch_skips_unset_fields() {
        let patch = FragrancePatch {
            hidden: Some(true),
            ..Default::default()
        };

        let json = serde_json::to_value(&patch).unwrap();
        assert_eq!(json, serde_json::json!({ "hidden": true }));
    }

    #[test]
    fn test_fragrance_patch_is_empty() {
        assert!(FragrancePatch::default().is_empty());
        assert!(
            !FragrancePatch {
                name: Some("Oud Royal".to_string()),
                ..Default::default()
            }
            .is_empty()
        );
    }
}
