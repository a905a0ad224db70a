//! Supabase REST client for the storefront.
//!
//! Talks to PostgREST (`/rest/v1/...`) with the anon key, so row-level
//! security applies: hidden fragrances are additionally filtered here, and
//! the only write the storefront performs is the order insert at checkout.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;
use uuid::Uuid;

use qotore_core::{Fragrance, Order, UserProfile};

use crate::config::SupabaseConfig;

pub mod types;

pub use types::NewOrder;

/// Errors returned by the Supabase REST API client.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// PostgREST rejected the request.
    #[error("Supabase API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// API key rejected.
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Rate limited; retry after the given number of seconds.
    #[error("Rate limited, retry after {0}s")]
    RateLimited(u64),

    /// A single-row lookup matched nothing.
    #[error("Row not found")]
    NotFound,
}

/// Error body PostgREST returns on failure.
#[derive(Debug, serde::Deserialize)]
struct PostgrestErrorBody {
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    details: Option<String>,
}

/// Supabase REST client (anon key).
///
/// Cheaply cloneable; the reqwest client and credentials live behind an `Arc`.
#[derive(Clone)]
pub struct SupabaseClient {
    inner: Arc<SupabaseClientInner>,
}

struct SupabaseClientInner {
    client: reqwest::Client,
    base_url: String,
    api_key: SecretString,
}

impl SupabaseClient {
    /// Create a new client from configuration.
    #[must_use]
    pub fn new(config: &SupabaseConfig) -> Self {
        Self {
            inner: Arc::new(SupabaseClientInner {
                client: reqwest::Client::new(),
                base_url: config.url.clone(),
                api_key: config.api_key.clone(),
            }),
        }
    }

    fn rest_url(&self, path_and_query: &str) -> String {
        format!("{}/rest/v1/{path_and_query}", self.inner.base_url)
    }

    /// Attach the anon key headers to a request.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let key = self.inner.api_key.expose_secret();
        req.header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
    }

    /// Send a request and decode the JSON response, mapping PostgREST errors.
    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, SupabaseError> {
        let response = self.authorize(req).send().await?;
        let status = response.status();

        if status == StatusCode::TOO_MANY_REQUESTS {
            let retry_after = response
                .headers()
                .get("Retry-After")
                .and_then(|v| v.to_str().ok())
                .and_then(|s| s.parse().ok())
                .unwrap_or(60);
            return Err(SupabaseError::RateLimited(retry_after));
        }

        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(SupabaseError::Unauthorized(
                "Invalid or expired API key".to_string(),
            ));
        }

        if !status.is_success() {
            let body: PostgrestErrorBody = response.json().await.unwrap_or(PostgrestErrorBody {
                message: None,
                details: None,
            });
            let message = body
                .message
                .or(body.details)
                .unwrap_or_else(|| "Unknown error".to_string());
            return Err(SupabaseError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response.json().await?)
    }

    // =========================================================================
    // Fragrances
    // =========================================================================

    /// Get all visible fragrances with their variants, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_fragrances(&self) -> Result<Vec<Fragrance>, SupabaseError> {
        let url = self.rest_url("fragrances?select=*,variants(*)&hidden=eq.false&order=name.asc");
        self.execute(self.inner.client.get(url)).await
    }

    /// Get a visible fragrance by slug.
    ///
    /// A value outside the slug alphabet cannot match a stored row and is
    /// answered without a query; interpolating it would corrupt the filter
    /// string.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(slug = %slug))]
    pub async fn get_fragrance_by_slug(
        &self,
        slug: &str,
    ) -> Result<Option<Fragrance>, SupabaseError> {
        if !valid_slug(slug) {
            return Ok(None);
        }

        let url = self.rest_url(&format!(
            "fragrances?select=*,variants(*)&slug=eq.{slug}&hidden=eq.false&limit=1"
        ));
        let rows: Vec<Fragrance> = self.execute(self.inner.client.get(url)).await?;
        Ok(rows.into_iter().next())
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Insert a new order, returning the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or the insert returns no row.
    #[instrument(skip(self, order), fields(order_number = %order.order_number))]
    pub async fn insert_order(&self, order: &NewOrder) -> Result<Order, SupabaseError> {
        let url = self.rest_url("orders");
        let rows: Vec<Order> = self
            .execute(
                self.inner
                    .client
                    .post(url)
                    .header("Prefer", "return=representation")
                    .json(order),
            )
            .await?;
        rows.into_iter().next().ok_or(SupabaseError::NotFound)
    }

    // =========================================================================
    // User profiles
    // =========================================================================

    /// Get a user profile by auth id.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(user_id = %id))]
    pub async fn get_profile(&self, id: Uuid) -> Result<Option<UserProfile>, SupabaseError> {
        let url = self.rest_url(&format!("user_profiles?id=eq.{id}&limit=1"));
        let rows: Vec<UserProfile> = self.execute(self.inner.client.get(url)).await?;
        Ok(rows.into_iter().next())
    }

    /// Insert or update a user profile, returning the stored row.
    ///
    /// Uses PostgREST upsert semantics (`resolution=merge-duplicates`).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no row comes back.
    #[instrument(skip(self, profile), fields(user_id = %profile.id))]
    pub async fn upsert_profile(&self, profile: &UserProfile) -> Result<UserProfile, SupabaseError> {
        let url = self.rest_url("user_profiles");
        let rows: Vec<UserProfile> = self
            .execute(
                self.inner
                    .client
                    .post(url)
                    .header(
                        "Prefer",
                        "resolution=merge-duplicates,return=representation",
                    )
                    .json(profile),
            )
            .await?;
        rows.into_iter().next().ok_or(SupabaseError::NotFound)
    }
}

/// Whether a path segment looks like a stored slug: non-empty, lowercase
/// ASCII alphanumerics and hyphens only.
fn valid_slug(slug: &str) -> bool {
    !slug.is_empty()
        && slug
            .bytes()
            .all(|b| b.is_ascii_lowercase() || b.is_ascii_digit() || b == b'-')
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_slug_accepts_slug_alphabet() {
        assert!(valid_slug("oud-royal-50"));
        assert!(valid_slug("amber"));
    }

    #[test]
    fn test_valid_slug_rejects_query_metacharacters() {
        assert!(!valid_slug("oud&hidden=eq.true"));
        assert!(!valid_slug("oud royal"));
        assert!(!valid_slug("oud#1"));
    }

    #[test]
    fn test_valid_slug_rejects_empty_and_uppercase() {
        assert!(!valid_slug(""));
        assert!(!valid_slug("Oud-Royal"));
    }
}
