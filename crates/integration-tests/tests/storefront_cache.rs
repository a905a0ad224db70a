//! Integration tests for the storefront catalog cache.

use qotore_core::{Fragrance, FragranceId, Price, Variant, VariantId};
use qotore_storefront::cache::{CacheKey, CacheValue, CatalogCache};

fn fragrance(id: i64, slug: &str) -> Fragrance {
    Fragrance {
        id: FragranceId::new(id),
        name: "Oud Royal".to_string(),
        slug: slug.to_string(),
        brand: Some("Qotore".to_string()),
        description: None,
        image_path: None,
        hidden: false,
        variants: vec![Variant {
            id: VariantId::new(1),
            size_ml: Some(5),
            price: Price::from_baisa(2500),
            is_whole_bottle: false,
        }],
    }
}

#[tokio::test]
async fn test_catalog_and_slug_keys_are_independent() {
    let cache = CatalogCache::new(60);

    cache
        .insert(
            CacheKey::Catalog,
            CacheValue::Catalog(vec![fragrance(1, "oud-royal")]),
        )
        .await;

    assert!(cache.get(&CacheKey::Catalog).await.is_some());
    assert!(
        cache
            .get(&CacheKey::Fragrance("oud-royal".to_string()))
            .await
            .is_none()
    );
}

#[tokio::test]
async fn test_cached_fragrance_round_trips() {
    let cache = CatalogCache::new(60);
    let key = CacheKey::Fragrance("oud-royal".to_string());

    cache
        .insert(
            key.clone(),
            CacheValue::Fragrance(Box::new(fragrance(1, "oud-royal"))),
        )
        .await;

    match cache.get(&key).await {
        Some(CacheValue::Fragrance(cached)) => {
            assert_eq!(cached.slug, "oud-royal");
            assert_eq!(cached.variants.len(), 1);
        }
        other => panic!("expected cached fragrance, got {other:?}"),
    }
}
