//! Fragrance catalog row types.

use serde::{Deserialize, Serialize};

use super::{FragranceId, Price, VariantId};

/// A fragrance in the catalog, as stored in the `fragrances` table.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Fragrance {
    pub id: FragranceId,
    pub name: String,
    /// URL-safe identifier used by the storefront detail route.
    pub slug: String,
    pub brand: Option<String>,
    pub description: Option<String>,
    /// Object path in the Supabase Storage images bucket.
    pub image_path: Option<String>,
    /// Hidden fragrances are excluded from storefront responses.
    #[serde(default)]
    pub hidden: bool,
    /// Purchasable sizes. Supabase embeds these via `select=*,variants(*)`.
    #[serde(default)]
    pub variants: Vec<Variant>,
}

/// A purchasable size of a fragrance.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Variant {
    pub id: VariantId,
    /// Decant size in milliliters; `None` for a whole bottle.
    pub size_ml: Option<i32>,
    /// Price in baisa.
    pub price: Price,
    /// Whole-bottle listings are displayed without a size.
    #[serde(default)]
    pub is_whole_bottle: bool,
}

impl Fragrance {
    /// Derive a URL-safe slug from a display name.
    ///
    /// Lowercases, maps runs of non-alphanumeric characters to single
    /// hyphens, and trims leading/trailing hyphens.
    #[must_use]
    pub fn slugify(name: &str) -> String {
        let mut slug = String::with_capacity(name.len());
        let mut last_was_hyphen = true;
        for c in name.chars() {
            if c.is_ascii_alphanumeric() {
                slug.push(c.to_ascii_lowercase());
                last_was_hyphen = false;
            } else if !last_was_hyphen {
                slug.push('-');
                last_was_hyphen = true;
            }
        }
        while slug.ends_with('-') {
            slug.pop();
        }
        slug
    }
}

impl Variant {
    /// Display label, e.g. `"5ml"` or `"Full Bottle"`.
    #[must_use]
    pub fn label(&self) -> String {
        if self.is_whole_bottle {
            "Full Bottle".to_string()
        } else {
            self.size_ml
                .map_or_else(|| "Sample".to_string(), |ml| format!("{ml}ml"))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify() {
        assert_eq!(Fragrance::slugify("Oud Royal"), "oud-royal");
        assert_eq!(Fragrance::slugify("  Ambre   Nuit  "), "ambre-nuit");
        assert_eq!(Fragrance::slugify("No.5 -- Eau"), "no-5-eau");
        assert_eq!(Fragrance::slugify("???"), "");
    }

    #[test]
    fn test_variant_label() {
        let decant = Variant {
            id: VariantId::new(1),
            size_ml: Some(10),
            price: Price::from_baisa(2500),
            is_whole_bottle: false,
        };
        assert_eq!(decant.label(), "10ml");

        let bottle = Variant {
            id: VariantId::new(2),
            size_ml: None,
            price: Price::from_baisa(45_000),
            is_whole_bottle: true,
        };
        assert_eq!(bottle.label(), "Full Bottle");
    }
}
