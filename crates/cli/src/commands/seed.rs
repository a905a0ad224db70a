//! Seed the fragrance catalog from a YAML file.
//!
//! The file is a list of fragrances with inline variants, prices in baisa:
//!
//! ```yaml
//! - name: Oud Royal
//!   brand: Qotore
//!   description: Deep aged oud.
//!   variants:
//!     - size_ml: 5
//!       price_baisa: 2500
//!     - whole_bottle: true
//!       price_baisa: 45000
//! ```

use std::path::Path;

use serde::Deserialize;
use tracing::info;

use qotore_admin::config::AdminConfig;
use qotore_admin::supabase::{NewFragrance, NewVariant, SupabaseClient};
use qotore_core::{Fragrance, Price};

/// A fragrance entry in the seed file.
#[derive(Debug, Deserialize)]
struct SeedFragrance {
    name: String,
    #[serde(default)]
    brand: Option<String>,
    #[serde(default)]
    description: Option<String>,
    #[serde(default)]
    variants: Vec<SeedVariant>,
}

/// A variant entry in the seed file.
#[derive(Debug, Deserialize)]
struct SeedVariant {
    #[serde(default)]
    size_ml: Option<i32>,
    price_baisa: i64,
    #[serde(default)]
    whole_bottle: bool,
}

/// Validate seed entries before touching the database.
fn validate(entries: &[SeedFragrance]) -> Vec<String> {
    let mut errors = Vec::new();
    for (i, entry) in entries.iter().enumerate() {
        if Fragrance::slugify(&entry.name).is_empty() {
            errors.push(format!("entry {i}: name '{}' produces an empty slug", entry.name));
        }
        for (j, variant) in entry.variants.iter().enumerate() {
            if variant.price_baisa <= 0 {
                errors.push(format!("entry {i} variant {j}: price must be positive"));
            }
            if variant.whole_bottle && variant.size_ml.is_some() {
                errors.push(format!(
                    "entry {i} variant {j}: whole bottles must not set size_ml"
                ));
            }
        }
    }
    errors
}

/// Seed the catalog from a YAML file.
///
/// # Errors
///
/// Returns an error if configuration is missing, the file is invalid, or
/// any insert fails.
pub async fn catalog(file_path: &str, hidden: bool) -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();

    let path = Path::new(file_path);
    if !path.exists() {
        return Err(format!("File not found: {file_path}").into());
    }

    info!(path = %file_path, "Loading catalog seed file");

    // Read and validate the YAML before connecting to Supabase
    let content = tokio::fs::read_to_string(path).await?;
    let entries: Vec<SeedFragrance> = serde_yaml::from_str(&content)?;

    let errors = validate(&entries);
    if !errors.is_empty() {
        for err in &errors {
            tracing::error!("  - {err}");
        }
        return Err(format!("{} validation errors found", errors.len()).into());
    }

    info!(count = entries.len(), "Seed file validated");

    let config = AdminConfig::from_env()?;
    let client = SupabaseClient::new(&config.supabase);

    for entry in entries {
        let slug = Fragrance::slugify(&entry.name);
        let stored = client
            .insert_fragrance(&NewFragrance {
                name: entry.name.clone(),
                slug,
                brand: entry.brand,
                description: entry.description,
                image_path: None,
                hidden,
            })
            .await?;

        for variant in &entry.variants {
            client
                .insert_variant(&NewVariant {
                    fragrance_id: stored.id,
                    size_ml: variant.size_ml,
                    price: Price::from_baisa(variant.price_baisa),
                    is_whole_bottle: variant.whole_bottle,
                })
                .await?;
        }

        info!(slug = %stored.slug, variants = entry.variants.len(), "Seeded fragrance");
    }

    info!("Catalog seeding complete");
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_seed_yaml() {
        let yaml = r"
- name: Oud Royal
  brand: Qotore
  variants:
    - size_ml: 5
      price_baisa: 2500
    - whole_bottle: true
      price_baisa: 45000
";
        let entries: Vec<SeedFragrance> = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].variants.len(), 2);
        assert!(validate(&entries).is_empty());
    }

    #[test]
    fn test_validate_rejects_bad_entries() {
        let entries = vec![SeedFragrance {
            name: "???".to_string(),
            brand: None,
            description: None,
            variants: vec![SeedVariant {
                size_ml: Some(5),
                price_baisa: 0,
                whole_bottle: false,
            }],
        }];
        assert_eq!(validate(&entries).len(), 2);
    }
}
