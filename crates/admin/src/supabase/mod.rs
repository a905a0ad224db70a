//! Supabase REST client for the back office.
//!
//! Uses the service-role key, which bypasses row-level security, so this
//! client can read hidden fragrances, mutate orders, and write to storage.
//! It must never be reachable from storefront code.

use std::sync::Arc;

use reqwest::StatusCode;
use secrecy::{ExposeSecret, SecretString};
use serde::de::DeserializeOwned;
use thiserror::Error;
use tracing::instrument;

use qotore_core::{Fragrance, FragranceId, Order, OrderId, OrderStatus, Variant, VariantId};

use crate::config::SupabaseConfig;

pub mod types;

pub use types::{FragrancePatch, NewFragrance, NewVariant};

/// Storage bucket holding fragrance images.
pub const IMAGE_BUCKET: &str = "fragrance-images";

/// Errors returned by the Supabase REST API client.
#[derive(Debug, Error)]
pub enum SupabaseError {
    /// Transport-level failure.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// PostgREST or storage rejected the request.
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

/// Supabase REST client (service-role key).
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

    fn storage_url(&self, bucket: &str, path: &str) -> String {
        format!("{}/storage/v1/object/{bucket}/{path}", self.inner.base_url)
    }

    /// Attach the service-role key headers to a request.
    fn authorize(&self, req: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        let key = self.inner.api_key.expose_secret();
        req.header("apikey", key)
            .header("Authorization", format!("Bearer {key}"))
    }

    /// Send a request, mapping PostgREST errors, and return the raw response.
    async fn send(&self, req: reqwest::RequestBuilder) -> Result<reqwest::Response, SupabaseError> {
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

        Ok(response)
    }

    /// Send a request and decode the JSON response.
    async fn execute<T: DeserializeOwned>(
        &self,
        req: reqwest::RequestBuilder,
    ) -> Result<T, SupabaseError> {
        Ok(self.send(req).await?.json().await?)
    }

    /// Send a request, discarding the response body.
    async fn execute_empty(&self, req: reqwest::RequestBuilder) -> Result<(), SupabaseError> {
        self.send(req).await?;
        Ok(())
    }

    /// Unwrap a single-row result set.
    fn single<T>(rows: Vec<T>) -> Result<T, SupabaseError> {
        rows.into_iter().next().ok_or(SupabaseError::NotFound)
    }

    // =========================================================================
    // Orders
    // =========================================================================

    /// Get all orders, newest first, optionally filtered by status.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_orders(
        &self,
        status: Option<OrderStatus>,
    ) -> Result<Vec<Order>, SupabaseError> {
        let url = match status {
            Some(status) => {
                self.rest_url(&format!("orders?select=*&status=eq.{status}&order=created_at.desc"))
            }
            None => self.rest_url("orders?select=*&order=created_at.desc"),
        };
        self.execute(self.inner.client.get(url)).await
    }

    /// Get a single order by id.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::NotFound` if no such order exists.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn get_order(&self, id: OrderId) -> Result<Order, SupabaseError> {
        let url = self.rest_url(&format!("orders?select=*&id=eq.{id}&limit=1"));
        let rows: Vec<Order> = self.execute(self.inner.client.get(url)).await?;
        Self::single(rows)
    }

    /// Get orders with an id strictly greater than `after_id`, oldest first.
    ///
    /// This is the new-order poll cursor: callers remember the highest id
    /// they have seen and pass it back.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(after_id = %after_id))]
    pub async fn orders_after(&self, after_id: OrderId) -> Result<Vec<Order>, SupabaseError> {
        let url = self.rest_url(&format!("orders?select=*&id=gt.{after_id}&order=id.asc"));
        self.execute(self.inner.client.get(url)).await
    }

    /// Update an order's status, returning the updated row.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::NotFound` if the PATCH matched no rows.
    #[instrument(skip(self), fields(order_id = %id, status = %status))]
    pub async fn update_order_status(
        &self,
        id: OrderId,
        status: OrderStatus,
    ) -> Result<Order, SupabaseError> {
        let url = self.rest_url(&format!("orders?id=eq.{id}"));
        let rows: Vec<Order> = self
            .execute(
                self.inner
                    .client
                    .patch(url)
                    .header("Prefer", "return=representation")
                    .json(&serde_json::json!({ "status": status })),
            )
            .await?;
        Self::single(rows)
    }

    /// Mark an order as reviewed (or not), returning the updated row.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::NotFound` if the PATCH matched no rows.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn set_order_reviewed(
        &self,
        id: OrderId,
        reviewed: bool,
    ) -> Result<Order, SupabaseError> {
        let url = self.rest_url(&format!("orders?id=eq.{id}"));
        let rows: Vec<Order> = self
            .execute(
                self.inner
                    .client
                    .patch(url)
                    .header("Prefer", "return=representation")
                    .json(&serde_json::json!({ "reviewed": reviewed })),
            )
            .await?;
        Self::single(rows)
    }

    /// Delete an order.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(order_id = %id))]
    pub async fn delete_order(&self, id: OrderId) -> Result<(), SupabaseError> {
        let url = self.rest_url(&format!("orders?id=eq.{id}"));
        self.execute_empty(self.inner.client.delete(url)).await
    }

    // =========================================================================
    // Fragrances
    // =========================================================================

    /// Get all fragrances including hidden ones, with variants.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_all_fragrances(&self) -> Result<Vec<Fragrance>, SupabaseError> {
        let url = self.rest_url("fragrances?select=*,variants(*)&order=name.asc");
        self.execute(self.inner.client.get(url)).await
    }

    /// Get a single fragrance by id, with variants.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::NotFound` if no such fragrance exists.
    #[instrument(skip(self), fields(fragrance_id = %id))]
    pub async fn get_fragrance(&self, id: FragranceId) -> Result<Fragrance, SupabaseError> {
        let url = self.rest_url(&format!("fragrances?select=*,variants(*)&id=eq.{id}&limit=1"));
        let rows: Vec<Fragrance> = self.execute(self.inner.client.get(url)).await?;
        Self::single(rows)
    }

    /// Insert a new fragrance, returning the stored row (without variants).
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no row comes back.
    #[instrument(skip(self, fragrance), fields(slug = %fragrance.slug))]
    pub async fn insert_fragrance(
        &self,
        fragrance: &NewFragrance,
    ) -> Result<Fragrance, SupabaseError> {
        let url = self.rest_url("fragrances");
        let rows: Vec<Fragrance> = self
            .execute(
                self.inner
                    .client
                    .post(url)
                    .header("Prefer", "return=representation")
                    .json(fragrance),
            )
            .await?;
        Self::single(rows)
    }

    /// Apply a partial update to a fragrance, returning the updated row.
    ///
    /// # Errors
    ///
    /// Returns `SupabaseError::NotFound` if the PATCH matched no rows.
    #[instrument(skip(self, patch), fields(fragrance_id = %id))]
    pub async fn update_fragrance(
        &self,
        id: FragranceId,
        patch: &FragrancePatch,
    ) -> Result<Fragrance, SupabaseError> {
        let url = self.rest_url(&format!("fragrances?id=eq.{id}"));
        let rows: Vec<Fragrance> = self
            .execute(
                self.inner
                    .client
                    .patch(url)
                    .header("Prefer", "return=representation")
                    .json(patch),
            )
            .await?;
        Self::single(rows)
    }

    /// Delete a fragrance. Variants are removed by the database cascade.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(fragrance_id = %id))]
    pub async fn delete_fragrance(&self, id: FragranceId) -> Result<(), SupabaseError> {
        let url = self.rest_url(&format!("fragrances?id=eq.{id}"));
        self.execute_empty(self.inner.client.delete(url)).await
    }

    /// Insert a variant for a fragrance, returning the stored row.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails or no row comes back.
    #[instrument(skip(self, variant), fields(fragrance_id = %variant.fragrance_id))]
    pub async fn insert_variant(&self, variant: &NewVariant) -> Result<Variant, SupabaseError> {
        let url = self.rest_url("variants");
        let rows: Vec<Variant> = self
            .execute(
                self.inner
                    .client
                    .post(url)
                    .header("Prefer", "return=representation")
                    .json(variant),
            )
            .await?;
        Self::single(rows)
    }

    /// Delete a variant.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self), fields(variant_id = %id))]
    pub async fn delete_variant(&self, id: VariantId) -> Result<(), SupabaseError> {
        let url = self.rest_url(&format!("variants?id=eq.{id}"));
        self.execute_empty(self.inner.client.delete(url)).await
    }

    // =========================================================================
    // Storage
    // =========================================================================

    /// Upload an image to the fragrance image bucket.
    ///
    /// Returns the storage path (`bucket/name`) to persist on the fragrance.
    ///
    /// # Errors
    ///
    /// Returns an error if the upload fails.
    #[instrument(skip(self, bytes), fields(name = %name, size = bytes.len()))]
    pub async fn upload_image(
        &self,
        name: &str,
        content_type: &str,
        bytes: Vec<u8>,
    ) -> Result<String, SupabaseError> {
        let url = self.storage_url(IMAGE_BUCKET, name);
        self.execute_empty(
            self.inner
                .client
                .post(url)
                .header("Content-Type", content_type)
                .body(bytes),
        )
        .await?;

        Ok(format!("{IMAGE_BUCKET}/{name}"))
    }
}
